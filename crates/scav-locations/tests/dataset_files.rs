//! File round-trips of the location dataset

use pretty_assertions::assert_eq;
use scav_locations::{Dataset, DatasetError};
use serde_json::json;

#[test]
fn load_and_write_back_preserves_content() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("locations.json");
    let output = dir.path().join("patched.json");

    let document = json!({
        "Woods": {
            "Base": {
                "Id": "Woods",
                "Waves": [{"WildSpawnType": "marksman", "isPlayers": false}],
                "MinMaxBots": [{"WildSpawnType": "assault", "max": 4}]
            }
        },
        "Base": {"locations": []}
    });
    std::fs::write(&input, serde_json::to_string_pretty(&document).unwrap()).unwrap();

    let dataset = Dataset::from_path(&input).unwrap();
    assert_eq!(dataset.map_names(), ["Woods"]);
    dataset.write_to_path(&output).unwrap();

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written, document);
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");

    let err = Dataset::from_path(&missing).unwrap_err();
    assert!(matches!(&err, DatasetError::Io { path, .. } if path == &missing));
}

#[test]
fn reader_rejects_malformed_json() {
    let err = Dataset::from_reader("{\"Woods\": ".as_bytes()).unwrap_err();
    assert!(matches!(err, DatasetError::Json(_)));
}
