//! Well-known names
//!
//! All comparisons against these lists ignore case.

/// Field names that carry a spawn-type identifier, in rewrite order
pub const SPAWN_FIELD_NAMES: &[&str] = &[
    "WildSpawnType",
    "Role",
    "SpawnType",
    "BotType",
    "BotRole",
    "BossName",
    "BossEscortType",
];

/// Containers whose mapping keys are spawn-type identifiers
pub const SPAWN_CONTAINER_NAMES: &[&str] = &[
    "Waves",
    "MinMaxBots",
    "BossLocationSpawn",
    "BossLocationSpawnInfo",
];

/// Top-level dataset members that are not maps
pub const RESERVED_MAP_NAMES: &[&str] = &["Base", "ExtensionData"];

fn contains_ignore_case(list: &[&str], name: &str) -> bool {
    list.iter().any(|candidate| candidate.eq_ignore_ascii_case(name))
}

/// Check if a field or JSON key carries a spawn-type identifier
#[inline]
#[must_use]
pub fn is_spawn_field(name: &str) -> bool {
    contains_ignore_case(SPAWN_FIELD_NAMES, name)
}

/// Check if a container is keyed by spawn-type identifiers
#[inline]
#[must_use]
pub fn is_spawn_container(name: &str) -> bool {
    contains_ignore_case(SPAWN_CONTAINER_NAMES, name)
}

/// Check if a top-level dataset member is administrative
#[inline]
#[must_use]
pub fn is_reserved_map_name(name: &str) -> bool {
    contains_ignore_case(RESERVED_MAP_NAMES, name)
}
