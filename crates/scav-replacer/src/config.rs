//! Mod configuration
//!
//! Loaded once from the mod root; every failure falls back to defaults.

use std::fs;
use std::path::{Path, PathBuf};

use scav_patch::{IdentifierSet, PatchOptions, DEFAULT_FROM, DEFAULT_TO};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

use crate::jsonc::strip_jsonc;

/// Candidate configuration files under the mod root, in lookup order
pub const CONFIG_CANDIDATES: &[&str] = &[
    "config/config.jsonc",
    "config/config.json",
    "Config/config.jsonc",
    "Config/config.json",
];

/// Errors loading the configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File exists but cannot be read
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Configuration file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Content is not a valid configuration
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// Root is valid JSON but not an object
    #[error("configuration root must be an object, found {0}")]
    NotAnObject(&'static str),
}

/// ScavReplacer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ReplacerConfig {
    /// Master switch
    pub enabled: bool,
    /// Spawn types to replace
    pub from_wild_spawn_types: Vec<String>,
    /// Replacement spawn type
    pub to_wild_spawn_type: String,
    /// Process only these maps (all when empty)
    pub only_maps: Vec<String>,
    /// Never process these maps
    pub exclude_maps: Vec<String>,
    /// Walk each map's `Waves`
    pub patch_waves: bool,
    /// Walk each map's `MinMaxBots`
    pub patch_min_max_bots: bool,
    /// Walk each map's whole base record
    pub deep_patch_enabled: bool,
    /// Rewrite spawn-type mapping keys
    pub patch_dictionary_keys: bool,
    /// Master switch for raid route triggers
    pub route_patching_enabled: bool,
    /// Patch when a local raid starts
    pub patch_on_local_start: bool,
    /// Patch when the client fetches raid configuration
    pub patch_on_raid_configuration: bool,
    /// Patch when a local raid ends
    pub patch_on_local_end: bool,
    /// Patch bot-generation responses
    pub patch_on_bot_generate: bool,
    /// Append pass summaries under `_debug/`
    pub debug_dump: bool,
}

impl ReplacerConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse JSON or JSONC text
    ///
    /// Member names are matched ignoring case; unknown members are ignored.
    ///
    /// # Errors
    /// Returns error if the text is not a JSON object of the expected shape
    pub fn from_jsonc_str(text: &str) -> Result<Self, ConfigError> {
        let obj = match serde_json::from_str(&strip_jsonc(text))? {
            Json::Object(obj) => obj,
            Json::Null => return Err(ConfigError::NotAnObject("null")),
            Json::Bool(_) => return Err(ConfigError::NotAnObject("bool")),
            Json::Number(_) => return Err(ConfigError::NotAnObject("number")),
            Json::String(_) => return Err(ConfigError::NotAnObject("string")),
            Json::Array(_) => return Err(ConfigError::NotAnObject("array")),
        };
        Ok(serde_json::from_value(Json::Object(canonical_keys(obj)))?)
    }

    /// Read a configuration file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_jsonc_str(&text)
    }

    /// Load from the first existing candidate under `mod_root`
    ///
    /// A missing file yields defaults; an unreadable or invalid file logs a
    /// warning and yields defaults.
    #[must_use]
    pub fn load(mod_root: &Path) -> Self {
        let Some(path) = find_config_file(mod_root) else {
            tracing::debug!("no configuration under {}, using defaults", mod_root.display());
            return Self::default();
        };
        match Self::from_path(&path) {
            Ok(config) => {
                tracing::debug!("configuration loaded from {}", path.display());
                config
            }
            Err(err) => {
                tracing::warn!("{}: {}; using defaults", path.display(), err);
                Self::default()
            }
        }
    }

    /// Identifier set, with defaults applied
    #[must_use]
    pub fn identifiers(&self) -> IdentifierSet {
        IdentifierSet::new(&self.from_wild_spawn_types, &self.to_wild_spawn_type)
    }

    /// Orchestration options
    #[must_use]
    pub fn patch_options(&self) -> PatchOptions {
        PatchOptions {
            patch_waves: self.patch_waves,
            patch_min_max_bots: self.patch_min_max_bots,
            deep_patch: self.deep_patch_enabled,
            patch_dictionary_keys: self.patch_dictionary_keys,
            only_maps: self.only_maps.clone(),
            exclude_maps: self.exclude_maps.clone(),
        }
    }

    /// Single-map override for a route-triggered pass
    ///
    /// A lone allow-list entry wins over the request's location; blank
    /// locations are ignored.
    #[must_use]
    pub fn map_override<'a>(&'a self, request_location: Option<&'a str>) -> Option<&'a str> {
        if let [only] = self.only_maps.as_slice() {
            return Some(only.as_str());
        }
        request_location.filter(|location| !location.trim().is_empty())
    }
}

impl Default for ReplacerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            from_wild_spawn_types: DEFAULT_FROM.iter().map(ToString::to_string).collect(),
            to_wild_spawn_type: DEFAULT_TO.to_string(),
            only_maps: Vec::new(),
            exclude_maps: Vec::new(),
            patch_waves: true,
            patch_min_max_bots: true,
            deep_patch_enabled: true,
            patch_dictionary_keys: true,
            route_patching_enabled: true,
            patch_on_local_start: true,
            patch_on_raid_configuration: true,
            patch_on_local_end: true,
            patch_on_bot_generate: true,
            debug_dump: false,
        }
    }
}

/// First existing configuration file under `mod_root`
#[must_use]
pub fn find_config_file(mod_root: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|candidate| mod_root.join(candidate))
        .find(|path| path.is_file())
}

/// Member names in their serialized spelling
const FIELD_NAMES: &[&str] = &[
    "Enabled",
    "FromWildSpawnTypes",
    "ToWildSpawnType",
    "OnlyMaps",
    "ExcludeMaps",
    "PatchWaves",
    "PatchMinMaxBots",
    "DeepPatchEnabled",
    "PatchDictionaryKeys",
    "RoutePatchingEnabled",
    "PatchOnLocalStart",
    "PatchOnRaidConfiguration",
    "PatchOnLocalEnd",
    "PatchOnBotGenerate",
    "DebugDump",
];

fn canonical_keys(obj: Map<String, Json>) -> Map<String, Json> {
    obj.into_iter()
        .map(|(key, value)| {
            let key = FIELD_NAMES
                .iter()
                .find(|name| name.eq_ignore_ascii_case(&key))
                .map_or(key, |name| (*name).to_string());
            (key, value)
        })
        .collect()
}
