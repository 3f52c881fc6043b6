//! Record schemas of the location database
//!
//! Only the members that matter for spawn-type rewriting are declared; any
//! other member is loaded untyped and written back unchanged.

use scav_graph::FieldRepr;

use crate::spawn_type::WILD_SPAWN_TYPE;

/// Structure expected at a position in the data
#[derive(Debug)]
pub enum Shape {
    /// Leaf value, stored in the field's representation
    Scalar,
    /// Object loaded as a typed record
    Record(&'static RecordSchema),
    /// Array of the inner shape
    List(&'static Shape),
    /// Anything, loaded as untyped mappings and sequences
    Untyped,
}

/// Declared member of a record type
#[derive(Debug)]
pub struct FieldSpec {
    /// Member name, matched ignoring case
    pub name: &'static str,
    /// Native representation
    pub repr: FieldRepr,
    /// Expected structure
    pub shape: &'static Shape,
}

/// Declared members of a record type
#[derive(Debug)]
pub struct RecordSchema {
    /// Record type name
    pub type_name: &'static str,
    /// Declared members
    pub fields: &'static [FieldSpec],
    /// Shape of undeclared members; untyped when `None`
    pub rest: Option<&'static Shape>,
}

impl RecordSchema {
    /// Find a declared member, ignoring case
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields
            .iter()
            .find(|spec| spec.name.eq_ignore_ascii_case(name))
    }
}

static SCALAR: Shape = Shape::Scalar;
pub(crate) static UNTYPED: Shape = Shape::Untyped;

static WAVE_SHAPE: Shape = Shape::Record(&WAVE);
static WAVE_LIST: Shape = Shape::List(&WAVE_SHAPE);
static MIN_MAX_BOT_SHAPE: Shape = Shape::Record(&MIN_MAX_BOT);
static MIN_MAX_BOT_LIST: Shape = Shape::List(&MIN_MAX_BOT_SHAPE);
static BOSS_SUPPORT_SHAPE: Shape = Shape::Record(&BOSS_SUPPORT);
static BOSS_SUPPORT_LIST: Shape = Shape::List(&BOSS_SUPPORT_SHAPE);
static BOSS_LOCATION_SPAWN_SHAPE: Shape = Shape::Record(&BOSS_LOCATION_SPAWN);
static BOSS_LOCATION_SPAWN_LIST: Shape = Shape::List(&BOSS_LOCATION_SPAWN_SHAPE);
static LOCATION_BASE_SHAPE: Shape = Shape::Record(&LOCATION_BASE);
static LOCATION_SHAPE: Shape = Shape::Record(&LOCATION);

/// Spawn wave
pub static WAVE: RecordSchema = RecordSchema {
    type_name: "Wave",
    fields: &[FieldSpec {
        name: "WildSpawnType",
        repr: FieldRepr::Enum(&WILD_SPAWN_TYPE),
        shape: &SCALAR,
    }],
    rest: None,
};

/// Population bound for one spawn type
pub static MIN_MAX_BOT: RecordSchema = RecordSchema {
    type_name: "MinMaxBot",
    fields: &[FieldSpec {
        name: "WildSpawnType",
        repr: FieldRepr::OptionalEnum(&WILD_SPAWN_TYPE),
        shape: &SCALAR,
    }],
    rest: None,
};

/// Escort group of a boss spawn
pub static BOSS_SUPPORT: RecordSchema = RecordSchema {
    type_name: "BossSupport",
    fields: &[FieldSpec {
        name: "BossEscortType",
        repr: FieldRepr::Text,
        shape: &SCALAR,
    }],
    rest: None,
};

/// Boss spawn
pub static BOSS_LOCATION_SPAWN: RecordSchema = RecordSchema {
    type_name: "BossLocationSpawn",
    fields: &[
        FieldSpec {
            name: "BossName",
            repr: FieldRepr::Text,
            shape: &SCALAR,
        },
        FieldSpec {
            name: "BossEscortType",
            repr: FieldRepr::Text,
            shape: &SCALAR,
        },
        FieldSpec {
            name: "Supports",
            repr: FieldRepr::Dynamic,
            shape: &BOSS_SUPPORT_LIST,
        },
    ],
    rest: None,
};

/// Spawn-relevant part of a map
pub static LOCATION_BASE: RecordSchema = RecordSchema {
    type_name: "LocationBase",
    fields: &[
        FieldSpec {
            name: "Id",
            repr: FieldRepr::Text,
            shape: &SCALAR,
        },
        FieldSpec {
            name: "Name",
            repr: FieldRepr::Text,
            shape: &SCALAR,
        },
        FieldSpec {
            name: "Waves",
            repr: FieldRepr::Dynamic,
            shape: &WAVE_LIST,
        },
        FieldSpec {
            name: "MinMaxBots",
            repr: FieldRepr::Dynamic,
            shape: &MIN_MAX_BOT_LIST,
        },
        FieldSpec {
            name: "BossLocationSpawn",
            repr: FieldRepr::Dynamic,
            shape: &BOSS_LOCATION_SPAWN_LIST,
        },
    ],
    rest: None,
};

/// One map
pub static LOCATION: RecordSchema = RecordSchema {
    type_name: "Location",
    fields: &[FieldSpec {
        name: "Base",
        repr: FieldRepr::Dynamic,
        shape: &LOCATION_BASE_SHAPE,
    }],
    rest: None,
};

/// Database root: one member per map plus administrative members
pub static LOCATIONS: RecordSchema = RecordSchema {
    type_name: "Locations",
    fields: &[
        FieldSpec {
            name: "Base",
            repr: FieldRepr::Dynamic,
            shape: &UNTYPED,
        },
        FieldSpec {
            name: "ExtensionData",
            repr: FieldRepr::Dynamic,
            shape: &UNTYPED,
        },
    ],
    rest: Some(&LOCATION_SHAPE),
};
