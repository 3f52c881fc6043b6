//! Container-level patch orchestration
//!
//! Applies the walker to each map of a location dataset, honoring map
//! filters and per-container toggles, and tallies what changed.

use std::collections::BTreeMap;

use scav_graph::{AccessError, Node, NodeRef, Value};
use serde::Serialize;

use crate::identifiers::IdentifierSet;
use crate::names::is_reserved_map_name;
use crate::walker::Walker;

/// Container holding spawn waves
const WAVES: &str = "Waves";
/// Container holding population bounds
const MIN_MAX_BOTS: &str = "MinMaxBots";
/// Nested base record of a map
const BASE: &str = "Base";

/// Orchestration toggles and map filters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOptions {
    /// Walk each map's `Waves` container
    pub patch_waves: bool,
    /// Walk each map's `MinMaxBots` container
    pub patch_min_max_bots: bool,
    /// Walk each map's entire base record
    pub deep_patch: bool,
    /// Rewrite spawn-type mapping keys
    pub patch_dictionary_keys: bool,
    /// Process only these maps (all when empty)
    pub only_maps: Vec<String>,
    /// Never process these maps
    pub exclude_maps: Vec<String>,
}

impl PatchOptions {
    /// Create default options
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With allow-list
    #[inline]
    #[must_use]
    pub fn with_only_maps<I, S>(mut self, maps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only_maps = maps.into_iter().map(Into::into).collect();
        self
    }

    /// With deny-list
    #[inline]
    #[must_use]
    pub fn with_exclude_maps<I, S>(mut self, maps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_maps = maps.into_iter().map(Into::into).collect();
        self
    }

    /// Only the deep walk, no direct container walks
    #[inline]
    #[must_use]
    pub fn deep_only(mut self) -> Self {
        self.patch_waves = false;
        self.patch_min_max_bots = false;
        self.deep_patch = true;
        self
    }

    /// Check if a map passes the filters
    ///
    /// A non-blank `override_map` replaces the allow-list and selects exactly
    /// that map; the deny-list still applies.
    #[must_use]
    pub fn includes_map(&self, name: &str, override_map: Option<&str>) -> bool {
        if is_reserved_map_name(name) {
            return false;
        }
        match override_map.map(str::trim).filter(|m| !m.is_empty()) {
            Some(only) if !only.eq_ignore_ascii_case(name) => return false,
            Some(_) => {}
            None => {
                if !self.only_maps.is_empty() && !contains_ignore_case(&self.only_maps, name) {
                    return false;
                }
            }
        }
        !contains_ignore_case(&self.exclude_maps, name)
    }
}

impl Default for PatchOptions {
    fn default() -> Self {
        Self {
            patch_waves: true,
            patch_min_max_bots: true,
            deep_patch: true,
            patch_dictionary_keys: true,
            only_maps: Vec::new(),
            exclude_maps: Vec::new(),
        }
    }
}

fn contains_ignore_case(list: &[String], name: &str) -> bool {
    list.iter().any(|entry| entry.trim().eq_ignore_ascii_case(name))
}

/// Outcome of one orchestration pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchResult {
    /// Fields and keys rewritten across all maps
    pub total_replaced: usize,
    /// Rewrites per map; maps with no rewrites are absent
    pub replaced_by_map: BTreeMap<String, usize>,
}

impl PatchResult {
    /// Check if nothing was rewritten
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_replaced == 0
    }

    /// Record a map's rewrite count; zero counts are not recorded
    pub fn record(&mut self, map: &str, replaced: usize) {
        if replaced == 0 {
            return;
        }
        *self.replaced_by_map.entry(map.to_string()).or_default() += replaced;
        self.total_replaced += replaced;
    }

    /// Fold another result into this one
    pub fn merge(&mut self, other: &Self) {
        for (map, replaced) in &other.replaced_by_map {
            self.record(map, *replaced);
        }
        // Results built without a per-map breakdown still carry a total.
        let unattributed = other
            .total_replaced
            .saturating_sub(other.replaced_by_map.values().sum::<usize>());
        self.total_replaced += unattributed;
    }

    /// Per-map entries ordered by name, ignoring case
    #[must_use]
    pub fn maps_ignoring_case(&self) -> Vec<(&str, usize)> {
        let mut maps: Vec<(&str, usize)> = self
            .replaced_by_map
            .iter()
            .map(|(name, replaced)| (name.as_str(), *replaced))
            .collect();
        maps.sort_by_key(|(name, _)| name.to_lowercase());
        maps
    }
}

/// Patch every map of a dataset
///
/// Enumerates the root's members (record fields or mapping text keys),
/// skipping reserved names and maps excluded by `options` or
/// `override_map`. Each map's base record is its `Base` member when that is
/// a node, otherwise the map itself. Waves and population bounds are walked
/// directly when enabled; the whole base record is walked when deep patching
/// is enabled. Each walk uses a fresh visited set.
///
/// Maps whose value cannot be read are skipped.
pub fn patch_all_maps(
    root: &NodeRef,
    ids: &IdentifierSet,
    options: &PatchOptions,
    override_map: Option<&str>,
) -> PatchResult {
    let mut result = PatchResult::default();

    for (name, location) in enumerate_maps(root) {
        if !options.includes_map(&name, override_map) {
            continue;
        }
        let location = match location {
            Ok(Value::Node(node)) => node,
            Ok(_) => continue,
            Err(err) => {
                tracing::debug!("skipping map {}: {}", name, err);
                continue;
            }
        };

        let replaced = patch_map(&location, ids, options);
        tracing::debug!("map {}: replaced {}", name, replaced);
        result.record(&name, replaced);
    }

    result
}

/// Walk one named container of a base record
///
/// Returns 0 if the base record has no such member.
pub fn patch_container(base: &NodeRef, name: &str, ids: &IdentifierSet, rewrite_keys: bool) -> usize {
    let container = base.read().member(name);
    match container {
        Some(container) => Walker::new(ids, rewrite_keys).walk(&container, name),
        None => 0,
    }
}

fn patch_map(location: &NodeRef, ids: &IdentifierSet, options: &PatchOptions) -> usize {
    let base = match location.read().member(BASE) {
        Some(Value::Node(base)) => base,
        _ => location.clone(),
    };

    let mut replaced = 0;
    if options.patch_waves {
        replaced += patch_container(&base, WAVES, ids, options.patch_dictionary_keys);
    }
    if options.patch_min_max_bots {
        replaced += patch_container(&base, MIN_MAX_BOTS, ids, options.patch_dictionary_keys);
    }
    if options.deep_patch {
        replaced += Walker::new(ids, options.patch_dictionary_keys).walk(&Value::Node(base), BASE);
    }
    replaced
}

/// Named members of the dataset root
///
/// Collected up front so no lock on the root is held while maps are walked.
fn enumerate_maps(root: &NodeRef) -> Vec<(String, Result<Value, AccessError>)> {
    match &*root.read() {
        Node::Record(record) => record
            .fields()
            .iter()
            .filter(|field| !field.indexed)
            .map(|field| (field.name.to_string(), record.get(&field.name)))
            .collect(),
        Node::Mapping(map) => map
            .iter()
            .filter_map(|(key, value)| Some((key.as_text()?.to_string(), Ok(value.clone()))))
            .collect(),
        Node::Sequence(_) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_compose() {
        let options = PatchOptions::new()
            .with_only_maps(["Shoreline"])
            .with_exclude_maps(["Shoreline"]);
        assert!(!options.includes_map("Shoreline", None));
        assert!(!options.includes_map("Woods", None));
    }

    #[test]
    fn override_replaces_allow_list() {
        let options = PatchOptions::new().with_only_maps(["Shoreline"]);
        assert!(options.includes_map("woods", Some("Woods")));
        assert!(!options.includes_map("Shoreline", Some("Woods")));
        assert!(options.includes_map("Shoreline", Some("  ")));
    }

    #[test]
    fn reserved_names_are_never_maps() {
        let options = PatchOptions::new();
        assert!(!options.includes_map("base", None));
        assert!(!options.includes_map("ExtensionData", Some("ExtensionData")));
    }

    #[test]
    fn result_skips_zero_counts() {
        let mut result = PatchResult::default();
        result.record("Woods", 0);
        result.record("Shoreline", 2);
        assert_eq!(result.total_replaced, 2);
        assert_eq!(result.replaced_by_map.len(), 1);
    }

    #[test]
    fn merge_adds_totals() {
        let mut first = PatchResult::default();
        first.record("Woods", 1);
        let mut second = PatchResult::default();
        second.record("Woods", 2);
        second.record("bigmap", 1);
        second.total_replaced += 4;

        first.merge(&second);
        assert_eq!(first.replaced_by_map["Woods"], 3);
        assert_eq!(first.total_replaced, 8);
    }

    #[test]
    fn map_order_ignores_case() {
        let mut result = PatchResult::default();
        result.record("Woods", 1);
        result.record("bigmap", 1);
        result.record("Shoreline", 1);
        let names: Vec<&str> = result.maps_ignoring_case().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["bigmap", "Shoreline", "Woods"]);
    }

    #[test]
    fn result_serializes_camel_case() {
        let mut result = PatchResult::default();
        result.record("Woods", 1);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, serde_json::json!({"totalReplaced": 1, "replacedByMap": {"Woods": 1}}));
    }
}
