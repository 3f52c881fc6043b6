//! End-to-end behavior of the orchestrator and walker over location graphs

use pretty_assertions::assert_eq;
use scav_graph::{AccessError, DynRecord, FieldInfo, FieldRepr, Key, Mapping, NodeRef, Record, Value};
use scav_patch::{deep_patch, patch_all_maps, IdentifierSet, PatchOptions, Walker};
use scav_test_utils::{
    create_boss_spawn, create_cyclic_graph, create_location, create_locations, create_min_max_bot,
    create_shared_graph, create_wave, sample_dataset, FaultyRecord,
};

fn ids() -> IdentifierSet {
    IdentifierSet::default()
}

#[test]
fn sample_dataset_is_patched_per_map() {
    let dataset = sample_dataset();
    let result = patch_all_maps(dataset.root(), &ids(), &PatchOptions::default(), None);

    assert_eq!(result.total_replaced, 4);
    assert_eq!(result.replaced_by_map["bigmap"], 2);
    assert_eq!(result.replaced_by_map["Woods"], 2);

    let json = dataset.to_json().unwrap();
    assert_eq!(json["bigmap"]["Base"]["waves"][0]["WildSpawnType"], "pmcBot");
    assert_eq!(json["bigmap"]["Base"]["waves"][1]["WildSpawnType"], "exUsec");
    assert_eq!(json["Woods"]["Base"]["MinMaxBots"][1]["WildSpawnType"], serde_json::Value::Null);
}

#[test]
fn second_pass_replaces_nothing() {
    let dataset = sample_dataset();
    let options = PatchOptions::default();

    let first = patch_all_maps(dataset.root(), &ids(), &options, None);
    let second = patch_all_maps(dataset.root(), &ids(), &options, None);

    assert!(!first.is_empty());
    assert_eq!(second.total_replaced, 0);
    assert!(second.replaced_by_map.is_empty());
}

#[test]
fn cyclic_graph_is_rewritten_once() {
    let root = create_cyclic_graph();
    assert_eq!(deep_patch(&Value::Node(root.clone()), "Base", &ids(), true), 2);
    assert_eq!(deep_patch(&Value::Node(root), "Base", &ids(), true), 0);
}

#[test]
fn shared_record_is_counted_once() {
    let (root, shared) = create_shared_graph();
    let ids = ids();
    let mut walker = Walker::new(&ids, true);

    assert_eq!(walker.walk(&Value::Node(root), "Settings"), 1);
    assert!(walker.visited().contains(&shared));
}

#[test]
fn record_shared_between_containers_is_counted_once() {
    let wave = create_wave("assault");
    let location = create_location(vec![wave.clone()], vec![wave]);
    let root = create_locations(vec![("Woods", location)]);

    let result = patch_all_maps(&root, &ids(), &PatchOptions::default(), None);
    assert_eq!(result.total_replaced, 1);
}

#[test]
fn matching_ignores_case_and_writes_configured_casing() {
    let spawn = NodeRef::record(DynRecord::new("Spawn").with("Role", FieldRepr::Text, "Assault"));
    let ids = IdentifierSet::new(["assault"], "PmcBOT");

    assert_eq!(deep_patch(&Value::Node(spawn.clone()), "Base", &ids, true), 1);
    assert_eq!(spawn.read().member("role"), Some(Value::from("PmcBOT")));
}

#[test]
fn target_listed_as_source_with_other_casing_stays_idempotent() {
    let location = create_location(vec![create_wave("pmcBot"), create_wave("assault")], vec![]);
    let root = create_locations(vec![("Woods", location)]);
    let ids = IdentifierSet::new(["assault", "pmcBot"], "PMCBOT");
    let options = PatchOptions::default();

    assert_eq!(patch_all_maps(&root, &ids, &options, None).total_replaced, 1);
    assert_eq!(patch_all_maps(&root, &ids, &options, None).total_replaced, 0);
    assert_eq!(patch_all_maps(&root, &ids, &options, None).total_replaced, 0);
}

#[test]
fn existing_target_key_survives_merge() {
    let mut bounds = Mapping::new();
    bounds.insert(Key::from("assault"), Value::Int(1));
    bounds.insert(Key::from("pmcBot"), Value::Int(7));
    let bounds = NodeRef::mapping(bounds);

    let base = NodeRef::record(DynRecord::new("LocationBase").with("MinMaxBots", FieldRepr::Dynamic, bounds.clone()));
    let location = NodeRef::record(DynRecord::new("Location").with("Base", FieldRepr::Dynamic, base));
    let root = create_locations(vec![("Woods", location)]);

    let result = patch_all_maps(&root, &ids(), &PatchOptions::default(), None);
    assert_eq!(result.total_replaced, 1);

    let guard = bounds.read();
    let map = guard.as_mapping().unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(map[&Key::from("pmcBot")], Value::Int(7));
}

#[test]
fn allow_and_deny_lists_compose() {
    let root = create_locations(vec![
        ("Shoreline", create_location(vec![create_wave("assault")], vec![])),
        ("Woods", create_location(vec![create_wave("assault")], vec![])),
    ]);
    let options = PatchOptions::new()
        .with_only_maps(["Shoreline"])
        .with_exclude_maps(["Shoreline"]);

    let result = patch_all_maps(&root, &ids(), &options, None);
    assert_eq!(result.total_replaced, 0);
}

#[test]
fn override_selects_single_map() {
    let root = create_locations(vec![
        ("Shoreline", create_location(vec![create_wave("assault")], vec![])),
        ("Woods", create_location(vec![create_wave("marksman")], vec![])),
    ]);
    let options = PatchOptions::new().with_only_maps(["Shoreline"]);

    let result = patch_all_maps(&root, &ids(), &options, Some("woods"));
    assert_eq!(result.replaced_by_map.keys().collect::<Vec<_>>(), ["Woods"]);
}

#[test]
fn toggles_limit_what_is_walked() {
    let location = create_location(vec![create_wave("assault")], vec![create_min_max_bot(Some("marksman"))]);
    let root = create_locations(vec![("Woods", location)]);
    let options = PatchOptions {
        patch_min_max_bots: false,
        deep_patch: false,
        ..PatchOptions::default()
    };

    assert_eq!(patch_all_maps(&root, &ids(), &options, None).total_replaced, 1);
    assert_eq!(patch_all_maps(&root, &ids(), &PatchOptions::default(), None).total_replaced, 1);
}

#[test]
fn boss_fields_are_reached_by_deep_walk() {
    let boss = create_boss_spawn("bossKnight", "assault");
    let base = NodeRef::record(DynRecord::new("LocationBase").with(
        "BossLocationSpawn",
        FieldRepr::Dynamic,
        NodeRef::sequence(vec![Value::Node(boss.clone())]),
    ));
    let location = NodeRef::record(DynRecord::new("Location").with("Base", FieldRepr::Dynamic, base));
    let root = create_locations(vec![("Lighthouse", location)]);

    let result = patch_all_maps(&root, &ids(), &PatchOptions::default(), None);
    assert_eq!(result.total_replaced, 1);
    assert_eq!(boss.read().member("BossEscortType"), Some(Value::from("pmcBot")));
    assert_eq!(boss.read().member("BossName"), Some(Value::from("bossKnight")));
}

#[test]
fn unsupported_field_type_is_left_alone() {
    let spawn = NodeRef::record(
        DynRecord::new("Spawn")
            .with("BotType", FieldRepr::Unsupported("List<string>"), "assault")
            .with("Role", FieldRepr::Text, "marksman"),
    );
    assert_eq!(deep_patch(&Value::Node(spawn.clone()), "Base", &ids(), true), 1);
    assert_eq!(spawn.read().member("BotType"), Some(Value::from("assault")));
}

#[test]
fn failing_records_are_skipped() {
    let faulty = NodeRef::record(FaultyRecord::new());
    let root = NodeRef::sequence(vec![Value::Node(faulty), Value::Node(create_wave("assault"))]);
    assert_eq!(deep_patch(&Value::Node(root), "Waves", &ids(), true), 1);
}

/// Root whose first map cannot be read
#[derive(Debug)]
struct BrokenRoot {
    fields: Vec<FieldInfo>,
    woods: NodeRef,
}

impl Record for BrokenRoot {
    fn type_name(&self) -> &str {
        "Locations"
    }

    fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    fn get(&self, name: &str) -> Result<Value, AccessError> {
        if name.eq_ignore_ascii_case("Woods") {
            Ok(Value::Node(self.woods.clone()))
        } else {
            Err(AccessError::faulted(name, "map failed to load"))
        }
    }

    fn set(&mut self, name: &str, _value: Value) -> Result<(), AccessError> {
        Err(AccessError::NotWritable(name.to_string()))
    }
}

#[test]
fn unreadable_map_does_not_abort_pass() {
    let root = NodeRef::record(BrokenRoot {
        fields: vec![
            FieldInfo::new("Factory", FieldRepr::Dynamic),
            FieldInfo::new("Woods", FieldRepr::Dynamic),
        ],
        woods: create_location(vec![create_wave("assault")], vec![]),
    });

    let result = patch_all_maps(&root, &ids(), &PatchOptions::default(), None);
    assert_eq!(result.total_replaced, 1);
    assert!(!result.replaced_by_map.contains_key("Factory"));
}

mod props {
    use super::*;
    use proptest::prelude::*;

    fn role() -> impl Strategy<Value = &'static str> {
        prop::sample::select(vec!["assault", "Assault", "MARKSMAN", "pmcBot", "exUsec", "bossKnight"])
    }

    proptest! {
        #[test]
        fn patching_is_idempotent(maps in prop::collection::vec(prop::collection::vec(role(), 0..6), 0..4)) {
            let expected: usize = maps
                .iter()
                .flatten()
                .filter(|role| ["assault", "marksman"].contains(&role.to_lowercase().as_str()))
                .count();

            let names: Vec<String> = (0..maps.len()).map(|i| format!("map{i}")).collect();
            let locations = maps
                .iter()
                .zip(&names)
                .map(|(roles, name)| {
                    let waves = roles.iter().map(|role| create_wave(role)).collect();
                    (name.as_str(), create_location(waves, vec![]))
                })
                .collect();
            let root = create_locations(locations);

            let first = patch_all_maps(&root, &ids(), &PatchOptions::default(), None);
            let second = patch_all_maps(&root, &ids(), &PatchOptions::default(), None);
            prop_assert_eq!(first.total_replaced, expected);
            prop_assert_eq!(second.total_replaced, 0);
        }

        #[test]
        fn any_casing_matches_and_target_casing_is_kept(
            upper in prop::collection::vec(any::<bool>(), 7),
            to in "[a-zA-Z]{1,12}",
        ) {
            let spelled: String = "assault"
                .chars()
                .zip(&upper)
                .map(|(c, up)| if *up { c.to_ascii_uppercase() } else { c })
                .collect();
            prop_assume!(to != spelled);

            let spawn = NodeRef::record(DynRecord::new("Spawn").with("Role", FieldRepr::Text, spelled.as_str()));
            let ids = IdentifierSet::new(["assault"], &to);

            prop_assert_eq!(deep_patch(&Value::Node(spawn.clone()), "Base", &ids, true), 1);
            prop_assert_eq!(spawn.read().member("Role"), Some(Value::from(to.as_str())));
        }
    }
}
