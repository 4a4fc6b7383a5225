//! Tests that hit live HTTP endpoints. Run with: cargo test --features online
#![cfg(feature = "online")]

use palmares::api::{Client, DataSource, LoadError};

#[test]
fn non_success_status_maps_to_status_error() {
    let client = Client::new("https://httpbin.org/status/500");
    match client.fetch() {
        Err(LoadError::Status(code)) => assert_eq!(code, 500),
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[test]
fn wrong_shape_body_maps_to_parse_error() {
    // Valid JSON, but not a comparison document.
    let client = Client::new("https://httpbin.org/json");
    match client.fetch() {
        Err(LoadError::Parse(_)) => {}
        other => panic!("expected Parse error, got {other:?}"),
    }
}

#[test]
fn unreachable_host_maps_to_transport_error() {
    let client = Client::new("https://nonexistent.invalid/data.json");
    match client.fetch() {
        Err(LoadError::Transport(_)) => {}
        other => panic!("expected Transport error, got {other:?}"),
    }
}
