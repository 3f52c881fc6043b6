//! ScavReplacer Host Runtime
//!
//! Wires the patch core to its host: configuration discovery, shared
//! run-time state, route triggers and debug summaries.
//!
//! # Core Concepts
//!
//! - [`ReplacerConfig`]: Mod configuration, loaded from JSON or JSONC
//! - [`ReplacerState`]: Current configuration snapshot, copied out per pass
//! - [`ScavReplacer`]: Trigger context for load-time and routed passes
//! - [`Route`]: Server routes that trigger a pass
//!
//! # Example
//!
//! ```rust
//! use scav_locations::Dataset;
//! use scav_replacer::{ReplacerConfig, ReplacerState, ScavReplacer};
//!
//! let dataset: Dataset = r#"{"Woods": {"Base": {"Waves": [{"WildSpawnType": "assault"}]}}}"#.parse()?;
//! let replacer = ScavReplacer::new(ReplacerState::new(ReplacerConfig::default(), "."), dataset);
//!
//! assert_eq!(replacer.on_load().total_replaced, 1);
//! assert_eq!(replacer.on_local_end().total_replaced, 0);
//! # Ok::<(), scav_locations::DatasetError>(())
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
pub mod config;
pub mod debug_dump;
pub mod jsonc;
pub mod logging;
pub mod replacer;
pub mod state;

// Re-exports
pub use config::{ConfigError, ReplacerConfig};
pub use debug_dump::DebugTag;
pub use replacer::{Route, ScavReplacer, StartLocalRaidRequest, UnknownRoute};
pub use state::{ReplacerState, Snapshot};

/// Mod identifier
pub const MOD_GUID: &str = "com.salco.scavreplacer";

/// Mod display name
pub const MOD_NAME: &str = "ScavReplacer";

/// Mod version
pub const MOD_VERSION: &str = env!("CARGO_PKG_VERSION");
