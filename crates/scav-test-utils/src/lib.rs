//! Testing utilities for ScavReplacer workspace
//!
//! Shared graph fixtures, sample location data and misbehaving records.

#![allow(missing_docs)]
#![allow(clippy::missing_panics_doc)]

use scav_graph::{AccessError, DynRecord, FieldInfo, FieldRepr, Key, Mapping, NodeRef, Record, Value};
use scav_locations::{Dataset, WILD_SPAWN_TYPE};
use serde_json::{json, Value as Json};

/// Spawn-type value as the dataset stores it
pub fn spawn_type(name: &str) -> Value {
    WILD_SPAWN_TYPE
        .parse(name)
        .map_or_else(|| Value::from(name), Value::Symbol)
}

pub fn create_wave(spawn: &str) -> NodeRef {
    NodeRef::record(
        DynRecord::new("Wave")
            .with("WildSpawnType", FieldRepr::Enum(&WILD_SPAWN_TYPE), spawn_type(spawn))
            .with("slots_max", FieldRepr::Dynamic, 2_i64),
    )
}

pub fn create_min_max_bot(spawn: Option<&str>) -> NodeRef {
    NodeRef::record(
        DynRecord::new("MinMaxBot")
            .with(
                "WildSpawnType",
                FieldRepr::OptionalEnum(&WILD_SPAWN_TYPE),
                spawn.map_or(Value::Null, spawn_type),
            )
            .with("max", FieldRepr::Dynamic, 4_i64),
    )
}

pub fn create_boss_spawn(boss: &str, escort: &str) -> NodeRef {
    NodeRef::record(
        DynRecord::new("BossLocationSpawn")
            .with("BossName", FieldRepr::Text, boss)
            .with("BossEscortType", FieldRepr::Text, escort),
    )
}

pub fn create_location(waves: Vec<NodeRef>, min_max_bots: Vec<NodeRef>) -> NodeRef {
    let base = NodeRef::record(
        DynRecord::new("LocationBase")
            .with("Waves", FieldRepr::Dynamic, NodeRef::sequence(waves.into_iter().map(Value::Node).collect()))
            .with(
                "MinMaxBots",
                FieldRepr::Dynamic,
                NodeRef::sequence(min_max_bots.into_iter().map(Value::Node).collect()),
            ),
    );
    NodeRef::record(DynRecord::new("Location").with("Base", FieldRepr::Dynamic, base))
}

/// Root record with the given maps plus an administrative `Base` member
pub fn create_locations(maps: Vec<(&str, NodeRef)>) -> NodeRef {
    let mut root = DynRecord::new("Locations").with("Base", FieldRepr::Dynamic, NodeRef::mapping(Mapping::new()));
    for (name, location) in maps {
        root.push_field(FieldInfo::new(name.to_string(), FieldRepr::Dynamic), location);
    }
    NodeRef::record(root)
}

/// Location document with two maps, each holding one replaceable wave and
/// one replaceable population bound
pub fn sample_locations_json() -> Json {
    json!({
        "base": {"locations": []},
        "bigmap": {
            "Base": {
                "Id": "bigmap",
                "waves": [
                    {"WildSpawnType": "assault", "slots_min": 1},
                    {"WildSpawnType": "exUsec", "slots_min": 0}
                ],
                "MinMaxBots": [{"WildSpawnType": "marksman", "min": 0, "max": 2}],
                "BossLocationSpawn": [{"BossName": "bossKojaniy", "BossEscortType": "followerKojaniy"}]
            }
        },
        "Woods": {
            "Base": {
                "Id": "Woods",
                "Waves": [{"WildSpawnType": "marksman"}],
                "MinMaxBots": [{"WildSpawnType": "assault"}, {"WildSpawnType": null}]
            }
        }
    })
}

pub fn sample_dataset() -> Dataset {
    Dataset::from_json(&sample_locations_json()).unwrap()
}

/// Mapping whose two entries hold the same record; returns the root and the
/// shared record
pub fn create_shared_graph() -> (NodeRef, NodeRef) {
    let shared = NodeRef::record(DynRecord::new("Spawn").with("Role", FieldRepr::Text, "assault"));
    let mut map = Mapping::new();
    map.insert(Key::from("first"), Value::Node(shared.clone()));
    map.insert(Key::from("second"), Value::Node(shared.clone()));
    (NodeRef::mapping(map), shared)
}

/// Two records referring to each other, both holding a replaceable role
pub fn create_cyclic_graph() -> NodeRef {
    let child = NodeRef::record(
        DynRecord::new("Child")
            .with("Role", FieldRepr::Text, "assault")
            .with("Parent", FieldRepr::Dynamic, Value::Null),
    );
    let parent = NodeRef::record(
        DynRecord::new("Parent")
            .with("Role", FieldRepr::Text, "marksman")
            .with("Child", FieldRepr::Dynamic, child.clone()),
    );
    child
        .write()
        .as_record_mut()
        .unwrap()
        .set("Parent", Value::Node(parent.clone()))
        .unwrap();
    parent
}

/// Record whose spawn-type field declares itself readable but fails on read
#[derive(Debug)]
pub struct FaultyRecord {
    fields: Vec<FieldInfo>,
    pub name: Value,
}

impl FaultyRecord {
    pub fn new() -> Self {
        Self {
            fields: vec![
                FieldInfo::new("Role", FieldRepr::Text),
                FieldInfo::new("Name", FieldRepr::Text),
            ],
            name: Value::from("assault"),
        }
    }
}

impl Default for FaultyRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl Record for FaultyRecord {
    fn type_name(&self) -> &str {
        "Faulty"
    }

    fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    fn get(&self, name: &str) -> Result<Value, AccessError> {
        if name.eq_ignore_ascii_case("Name") {
            Ok(self.name.clone())
        } else {
            Err(AccessError::faulted(name, "getter threw"))
        }
    }

    fn set(&mut self, name: &str, value: Value) -> Result<(), AccessError> {
        if name.eq_ignore_ascii_case("Name") {
            self.name = value;
            Ok(())
        } else {
            Err(AccessError::faulted(name, "setter threw"))
        }
    }
}
