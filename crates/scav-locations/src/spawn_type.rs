//! Spawn-type enumeration

use scav_graph::EnumDef;

/// Spawn types known to the location database
pub static WILD_SPAWN_TYPE: EnumDef = EnumDef::new(
    "WildSpawnType",
    &[
        "marksman",
        "assault",
        "bossTest",
        "bossBully",
        "followerTest",
        "followerBully",
        "bossKilla",
        "bossKojaniy",
        "followerKojaniy",
        "pmcBot",
        "cursedAssault",
        "bossGluhar",
        "followerGluharAssault",
        "followerGluharSecurity",
        "followerGluharScout",
        "followerGluharSnipe",
        "followerSanitar",
        "bossSanitar",
        "test",
        "assaultGroup",
        "sectantWarrior",
        "sectantPriest",
        "bossTagilla",
        "followerTagilla",
        "exUsec",
        "gifter",
        "bossKnight",
        "followerBigPipe",
        "followerBirdEye",
        "bossZryachiy",
        "followerZryachiy",
        "bossBoar",
        "followerBoar",
        "arenaFighter",
        "arenaFighterEvent",
        "bossBoarSniper",
        "crazyAssaultEvent",
        "peacefullZryachiyEvent",
        "sectactPriestEvent",
        "ravangeZryachiyEvent",
        "followerBoarClose1",
        "followerBoarClose2",
        "bossKolontay",
        "followerKolontayAssault",
        "followerKolontaySecurity",
        "shooterBTR",
        "bossPartisan",
        "spiritWinter",
        "spiritSpring",
        "peacemaker",
        "pmcBEAR",
        "pmcUSEC",
        "skier",
        "sectantPredvestnik",
        "sectantPrizrak",
        "sectantOni",
        "infectedAssault",
        "infectedPmc",
        "infectedCivil",
        "infectedLaborant",
        "infectedTagilla",
        "bossTagillaAgro",
        "bossKillaAgro",
        "tagillaHelperAgro",
    ],
);
