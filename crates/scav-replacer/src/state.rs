//! Shared run-time state
//!
//! Triggers read a [`Snapshot`] and keep it for the whole pass; reloading
//! swaps in a new snapshot without affecting passes already running.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use scav_patch::{IdentifierSet, PatchOptions};

use crate::config::ReplacerConfig;

/// Immutable view of the configuration used by one pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Configuration as loaded
    pub config: ReplacerConfig,
    /// Identifiers derived from the configuration
    pub identifiers: IdentifierSet,
    /// Orchestration options derived from the configuration
    pub options: PatchOptions,
    /// Directory holding the configuration and debug output
    pub mod_root: PathBuf,
}

impl Snapshot {
    /// Derive a snapshot from a configuration
    #[must_use]
    pub fn new(config: ReplacerConfig, mod_root: impl Into<PathBuf>) -> Self {
        Self {
            identifiers: config.identifiers(),
            options: config.patch_options(),
            config,
            mod_root: mod_root.into(),
        }
    }
}

/// Guarded current snapshot
#[derive(Debug)]
pub struct ReplacerState {
    current: RwLock<Arc<Snapshot>>,
}

impl ReplacerState {
    /// Create state from a configuration
    #[must_use]
    pub fn new(config: ReplacerConfig, mod_root: impl Into<PathBuf>) -> Self {
        Self {
            current: RwLock::new(Arc::new(Snapshot::new(config, mod_root))),
        }
    }

    /// Load the configuration found under `mod_root`
    #[must_use]
    pub fn load(mod_root: &Path) -> Self {
        Self::new(ReplacerConfig::load(mod_root), mod_root)
    }

    /// Current snapshot
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&*self.current.read())
    }

    /// Replace the configuration, keeping the mod root
    pub fn reload(&self, config: ReplacerConfig) {
        let mod_root = self.current.read().mod_root.clone();
        *self.current.write() = Arc::new(Snapshot::new(config, mod_root));
    }

    /// Re-read the configuration from the mod root
    pub fn reload_from_disk(&self) {
        let mod_root = self.current.read().mod_root.clone();
        let config = ReplacerConfig::load(&mod_root);
        *self.current.write() = Arc::new(Snapshot::new(config, mod_root));
        tracing::debug!("configuration reloaded");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_flight_snapshot_survives_reload() {
        let state = ReplacerState::new(ReplacerConfig::default(), "/mods/scav");
        let before = state.snapshot();

        state.reload(ReplacerConfig {
            to_wild_spawn_type: "exUsec".into(),
            ..ReplacerConfig::default()
        });

        assert_eq!(before.identifiers.to(), "pmcBot");
        assert_eq!(state.snapshot().identifiers.to(), "exUsec");
        assert_eq!(state.snapshot().mod_root, PathBuf::from("/mods/scav"));
    }

    #[test]
    fn snapshot_derives_options() {
        let snapshot = Snapshot::new(
            ReplacerConfig {
                deep_patch_enabled: false,
                exclude_maps: vec!["factory4_day".into()],
                ..ReplacerConfig::default()
            },
            ".",
        );
        assert!(!snapshot.options.deep_patch);
        assert_eq!(snapshot.options.exclude_maps, ["factory4_day"]);
    }

    #[test]
    fn reload_from_disk_picks_up_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let state = ReplacerState::load(dir.path());
        assert!(state.snapshot().config.enabled);

        std::fs::create_dir(dir.path().join("config")).unwrap();
        std::fs::write(dir.path().join("config/config.json"), r#"{"Enabled": false}"#).unwrap();
        state.reload_from_disk();
        assert!(!state.snapshot().config.enabled);
    }
}
