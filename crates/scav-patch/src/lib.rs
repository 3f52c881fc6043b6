//! ScavReplacer Patch Core
//!
//! Rewrites spawn-type identifiers inside an object graph and inside
//! serialized bot payloads.
//!
//! # Core Operations
//!
//! - [`Walker::walk`]: Cycle-safe deep traversal, each node visited once
//! - [`rewrite_fields`] / [`rewrite_keys`]: Per-node field and key rewriting
//! - [`patch_all_maps`]: Per-map orchestration with filters and a tally
//! - [`patch_serialized_payload`]: Independent JSON text path
//!
//! # Architecture
//!
//! ```text
//! patch_all_maps → for each map → Walker (fresh VisitedSet) → rewrite_fields / rewrite_keys
//! patch_serialized_payload → serde_json tree → rewrite string values under spawn keys
//! ```
//!
//! # Example
//!
//! ```rust
//! use scav_patch::{patch_serialized_payload, IdentifierSet};
//!
//! let ids = IdentifierSet::new(["assault", "marksman"], "pmcBot");
//! let patched = patch_serialized_payload(r#"{"Role":"assault"}"#, &ids);
//! assert_eq!(patched.text, r#"{"Role":"pmcBot"}"#);
//! assert_eq!(patched.replaced, 1);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
mod identifiers;
mod names;
mod orchestrator;
mod payload;
mod rewriter;
mod walker;

// Re-exports
pub use identifiers::{IdentifierSet, DEFAULT_FROM, DEFAULT_TO};
pub use names::{
    is_reserved_map_name, is_spawn_container, is_spawn_field, RESERVED_MAP_NAMES,
    SPAWN_CONTAINER_NAMES, SPAWN_FIELD_NAMES,
};
pub use orchestrator::{patch_all_maps, patch_container, PatchOptions, PatchResult};
pub use payload::{patch_json_value, patch_payload_in_place, patch_serialized_payload, PayloadError, PayloadPatch};
pub use rewriter::{rewrite_fields, rewrite_keys};
pub use walker::{deep_patch, Walker};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
