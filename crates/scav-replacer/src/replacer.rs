//! Load-time and route-triggered passes
//!
//! [`ScavReplacer`] is the context handed to every trigger: the shared
//! run-time state plus the dataset it patches.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use scav_locations::Dataset;
use scav_patch::{patch_all_maps, patch_payload_in_place, PatchResult};
use serde::{Deserialize, Serialize};

use crate::debug_dump::{append_summary, DebugTag};
use crate::state::{ReplacerState, Snapshot};

/// Server routes that trigger a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// A local raid is starting
    LocalStart,
    /// The client fetches raid configuration
    RaidConfiguration,
    /// A local raid has ended
    LocalEnd,
    /// The server generated bots for the client
    BotGenerate,
}

impl Route {
    /// All routes, in registration order
    pub const ALL: [Self; 4] = [
        Self::LocalStart,
        Self::RaidConfiguration,
        Self::LocalEnd,
        Self::BotGenerate,
    ];

    /// Request path
    #[inline]
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::LocalStart => "/client/match/local/start",
            Self::RaidConfiguration => "/client/raid/configuration",
            Self::LocalEnd => "/client/match/local/end",
            Self::BotGenerate => "/client/game/bot/generate",
        }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Path is not a handled route
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown route '{0}'")]
pub struct UnknownRoute(pub String);

impl FromStr for Route {
    type Err = UnknownRoute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|route| route.path().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownRoute(s.to_string()))
    }
}

/// Body of a local raid start request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StartLocalRaidRequest {
    /// Map the raid takes place on
    pub location: Option<String>,
}

impl StartLocalRaidRequest {
    /// Request for a map
    #[must_use]
    pub fn for_location(location: impl Into<String>) -> Self {
        Self {
            location: Some(location.into()),
        }
    }

    /// Parse a request body; malformed bodies carry no location
    #[must_use]
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_else(|err| {
            tracing::debug!("unreadable raid start request: {}", err);
            Self::default()
        })
    }
}

/// Trigger context
#[derive(Debug)]
pub struct ScavReplacer {
    state: ReplacerState,
    dataset: Dataset,
}

impl ScavReplacer {
    /// Create context
    #[must_use]
    pub fn new(state: ReplacerState, dataset: Dataset) -> Self {
        Self { state, dataset }
    }

    /// Run-time state
    #[inline]
    #[must_use]
    pub fn state(&self) -> &ReplacerState {
        &self.state
    }

    /// Dataset being patched
    #[inline]
    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Load-time pass over every included map
    ///
    /// Returns an empty result when disabled.
    pub fn on_load(&self) -> PatchResult {
        self.on_load_for(None)
    }

    /// Load-time pass, optionally limited to one map
    ///
    /// `map` selects a single map in place of the allow list; the deny list
    /// still applies.
    /// Returns an empty result when disabled.
    pub fn on_load_for(&self, map: Option<&str>) -> PatchResult {
        let snapshot = self.state.snapshot();
        let result = if snapshot.config.enabled {
            let result = self.patch(&snapshot, map);
            if snapshot.config.debug_dump {
                append_summary(&snapshot.mod_root, DebugTag::Startup, &snapshot.identifiers, &result);
            }
            result
        } else {
            PatchResult::default()
        };

        tracing::info!(
            "[{}] {} successfully loaded ({} replaced)",
            crate::MOD_GUID,
            crate::MOD_NAME,
            result.total_replaced
        );
        result
    }

    /// Pass triggered by a local raid start
    pub fn on_local_start(&self, request: &StartLocalRaidRequest) -> PatchResult {
        self.route_pass(Route::LocalStart, request.location.as_deref())
    }

    /// Pass triggered by a raid configuration fetch
    pub fn on_raid_configuration(&self) -> PatchResult {
        self.route_pass(Route::RaidConfiguration, None)
    }

    /// Pass triggered by a local raid end
    pub fn on_local_end(&self) -> PatchResult {
        self.route_pass(Route::LocalEnd, None)
    }

    /// Patch an outgoing bot-generation body in place
    ///
    /// Returns the number of values rewritten.
    pub fn on_bot_generate(&self, output: &mut String) -> usize {
        let snapshot = self.state.snapshot();
        if !(snapshot.config.enabled && snapshot.config.patch_on_bot_generate) {
            return 0;
        }

        let replaced = patch_payload_in_place(output, &snapshot.identifiers);
        if replaced > 0 {
            tracing::debug!("bot payload: replaced {}", replaced);
            if snapshot.config.debug_dump {
                let result = PatchResult {
                    total_replaced: replaced,
                    ..PatchResult::default()
                };
                append_summary(&snapshot.mod_root, DebugTag::BotGenerate, &snapshot.identifiers, &result);
            }
        }
        replaced
    }

    /// Dispatch a routed request
    ///
    /// Always returns the response body, patched for bot generation. Unknown
    /// paths pass through unchanged.
    #[must_use]
    pub fn handle(&self, path: &str, request_body: Option<&str>, mut output: String) -> String {
        let Ok(route) = path.parse::<Route>() else {
            return output;
        };
        match route {
            Route::LocalStart => {
                let request = request_body.map(StartLocalRaidRequest::from_body).unwrap_or_default();
                self.on_local_start(&request);
            }
            Route::RaidConfiguration => {
                self.on_raid_configuration();
            }
            Route::LocalEnd => {
                self.on_local_end();
            }
            Route::BotGenerate => {
                self.on_bot_generate(&mut output);
            }
        }
        output
    }

    fn route_pass(&self, route: Route, request_location: Option<&str>) -> PatchResult {
        let snapshot = self.state.snapshot();
        let config = &snapshot.config;
        let toggle = match route {
            Route::LocalStart => config.patch_on_local_start,
            Route::RaidConfiguration => config.patch_on_raid_configuration,
            Route::LocalEnd => config.patch_on_local_end,
            Route::BotGenerate => false,
        };
        if !(config.enabled && config.route_patching_enabled && toggle) {
            return PatchResult::default();
        }

        let override_map = config.map_override(request_location);
        let result = self.patch(&snapshot, override_map);
        tracing::debug!("{}: replaced {}", route, result.total_replaced);
        if config.debug_dump && !result.is_empty() {
            append_summary(&snapshot.mod_root, DebugTag::RoutePatch, &snapshot.identifiers, &result);
        }
        result
    }

    fn patch(&self, snapshot: &Snapshot, override_map: Option<&str>) -> PatchResult {
        patch_all_maps(self.dataset.root(), &snapshot.identifiers, &snapshot.options, override_map)
    }
}
