//! ScavReplacer Location Dataset
//!
//! Loads the location database into a graph of typed records so spawn-type
//! fields carry their native representation, and exports it back to JSON.
//!
//! # Core Concepts
//!
//! - [`WILD_SPAWN_TYPE`]: The spawn-type enumeration
//! - [`RecordSchema`]: Declared fields of a record type and their shapes
//! - [`Dataset`]: Root of a loaded location database
//!
//! # Example
//!
//! ```rust
//! use scav_locations::Dataset;
//!
//! let dataset: Dataset = r#"{
//!     "Shoreline": {"Base": {"waves": [{"WildSpawnType": "assault"}]}}
//! }"#.parse()?;
//! assert_eq!(dataset.map_names(), ["Shoreline"]);
//! # Ok::<(), scav_locations::DatasetError>(())
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
mod dataset;
mod schema;
mod spawn_type;

// Re-exports
pub use dataset::{Dataset, DatasetError};
pub use schema::{
    FieldSpec, RecordSchema, Shape, BOSS_LOCATION_SPAWN, BOSS_SUPPORT, LOCATION, LOCATIONS,
    LOCATION_BASE, MIN_MAX_BOT, WAVE,
};
pub use spawn_type::WILD_SPAWN_TYPE;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
