mod common;

use common::{Scripted, TWO_RIDER_DOC, two_rider_dataset};
use palmares::api::LoadError;
use palmares::load::{LoadState, Loader};
use palmares::models::Dataset;

#[test]
fn loader_starts_idle() {
    let loader = Loader::new();
    assert_eq!(*loader.state(), LoadState::Idle);
    assert!(loader.dataset().is_none());
    assert!(loader.palette().is_none());
}

#[test]
fn successful_load_reaches_ready_with_derived_palette() {
    let mut loader = Loader::new();
    let state = loader.load(&Scripted::Ok(TWO_RIDER_DOC)).clone();
    assert_eq!(state, LoadState::Ready);
    let dataset = loader.dataset().expect("dataset available when ready");
    assert_eq!(dataset.riders.len(), 2);
    let palette = loader.palette().expect("palette derived on success");
    assert_eq!(palette["a"].primary.as_deref(), Some("#FF6B6B"));
}

#[test]
fn failed_load_reaches_error_with_stable_message() {
    let mut loader = Loader::new();
    loader.load(&Scripted::Status(500));
    match loader.state() {
        LoadState::Error(msg) => {
            assert_eq!(msg, "Unable to load rider data. Please refresh to try again.");
        }
        other => panic!("expected Error, got {other:?}"),
    }
    assert!(loader.dataset().is_none());
    assert!(loader.palette().is_none());
}

#[test]
fn begin_transitions_to_loading() {
    let mut loader = Loader::new();
    let _token = loader.begin();
    assert_eq!(*loader.state(), LoadState::Loading);
    assert!(loader.dataset().is_none());
}

#[test]
fn superseded_success_is_discarded() {
    let mut loader = Loader::new();

    // Request A goes out, then request B supersedes it.
    let token_a = loader.begin();
    let token_b = loader.begin();

    // B resolves first with the real data.
    assert!(loader.finish(token_b, Ok(two_rider_dataset())));
    assert_eq!(*loader.state(), LoadState::Ready);

    // A resolves late with different data; it must change nothing.
    let stale = Dataset::from_json(
        r#"{"riders":{"x":{"name":"Stale"}},"metrics":[{"id":"s","title":"S","x":1,"maxValue":2}]}"#,
    )
    .unwrap();
    assert!(!loader.finish(token_a, Ok(stale)));
    assert_eq!(*loader.state(), LoadState::Ready);
    assert_eq!(loader.dataset().unwrap().riders[0].name, "A");
}

#[test]
fn superseded_failure_is_not_an_error() {
    let mut loader = Loader::new();
    let token_a = loader.begin();
    let token_b = loader.begin();

    assert!(loader.finish(token_b, Ok(two_rider_dataset())));

    // The stale failure must not flip Ready into Error.
    assert!(!loader.finish(token_a, Err(LoadError::Status(500))));
    assert_eq!(*loader.state(), LoadState::Ready);
}

#[test]
fn new_generation_recovers_from_error() {
    let mut loader = Loader::new();
    loader.load(&Scripted::Status(503));
    assert!(matches!(loader.state(), LoadState::Error(_)));

    loader.load(&Scripted::Ok(TWO_RIDER_DOC));
    assert_eq!(*loader.state(), LoadState::Ready);
}

#[test]
fn reload_replaces_dataset_and_palette_wholesale() {
    let mut loader = Loader::new();
    loader.load(&Scripted::Ok(TWO_RIDER_DOC));
    let first = loader.dataset().unwrap().clone();

    loader.load(&Scripted::Ok(common::FULL_DOC));
    let second = loader.dataset().unwrap();
    assert_ne!(&first, second);
    // Palette belongs to the new dataset.
    assert!(loader.palette().unwrap().contains_key("merckx"));
    assert!(!loader.palette().unwrap().contains_key("a"));
}
