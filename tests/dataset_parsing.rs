mod common;

use common::{FULL_DOC, full_dataset};
use palmares::models::Dataset;

#[test]
fn riders_keep_document_order() {
    let d = full_dataset();
    let ids: Vec<&str> = d.riders.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["merckx", "pogacar"]);
    assert_eq!(d.riders[0].name, "Eddy Merckx");
}

#[test]
fn rider_lookup_by_id() {
    let d = full_dataset();
    assert_eq!(d.rider("pogacar").unwrap().name, "Tadej Pogacar");
    assert!(d.rider("anquetil").is_none());
}

#[test]
fn missing_color_fields_stay_none() {
    let d = full_dataset();
    let pogacar = d.rider("pogacar").unwrap();
    assert_eq!(pogacar.color_primary.as_deref(), Some("#4ECDC4"));
    assert!(pogacar.color_secondary.is_none());
    assert!(pogacar.color_light.is_none());
}

#[test]
fn metrics_keep_order_and_per_rider_values() {
    let d = full_dataset();
    let ids: Vec<&str> = d.metrics.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["tdf", "stages", "career"]);
    let stages = &d.metrics[1];
    assert_eq!(stages.value_for("merckx"), Some(34.0));
    assert_eq!(stages.value_for("pogacar"), Some(21.0));
    assert_eq!(stages.max_value, 40.0);
    assert_eq!(stages.step_size, 5.0);
}

#[test]
fn note_is_optional() {
    let d = full_dataset();
    assert!(d.metrics[0].note.is_none());
    assert_eq!(
        d.metrics[2].note.as_deref(),
        Some("Pogacar's statistics are still being written")
    );
}

#[test]
fn malformed_document_is_a_parse_error() {
    assert!(Dataset::from_json("{\"riders\": []}").is_err());
    assert!(Dataset::from_json("not json").is_err());
}

#[test]
fn dataset_is_structurally_comparable() {
    // Reload semantics rely on wholesale replacement; equality lets tests
    // assert nothing was patched in place.
    let a = Dataset::from_json(FULL_DOC).unwrap();
    let b = Dataset::from_json(FULL_DOC).unwrap();
    assert_eq!(a, b);
}

#[test]
fn more_than_two_riders_are_supported() {
    let doc = r#"{
      "riders": {
        "x": { "name": "X" }, "y": { "name": "Y" }, "z": { "name": "Z" }
      },
      "metrics": [ { "id": "m", "title": "T", "x": 1, "y": 2, "z": 3, "maxValue": 4 } ]
    }"#;
    let d = Dataset::from_json(doc).unwrap();
    assert_eq!(d.riders.len(), 3);
    assert_eq!(d.metrics[0].value_for("z"), Some(3.0));
}
