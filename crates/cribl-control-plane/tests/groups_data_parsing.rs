//! Integration tests for parsing control-plane data.
//!
//! These tests validate that worker-group listings and login responses taken
//! from a leader deserialize into the open-shaped client types.

use cribl_control_plane::{ControlPlaneClient, LoginInfo, Product};
use cribl_core::{Entity, ListResponse};
use std::fs;
use std::path::PathBuf;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Get the path to the test fixtures directory.
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn load_fixture(name: &str) -> String {
    let fixture_path = fixtures_dir().join(name);
    fs::read_to_string(&fixture_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read fixture at {}: {}",
            fixture_path.display(),
            e
        )
    })
}

#[test]
fn test_deserialize_group_list() {
    let json_data = load_fixture("groups_list.json");

    let response: ListResponse<Entity> = serde_json::from_str(&json_data).unwrap_or_else(|e| {
        panic!(
            "Failed to deserialize group list data: {}\nJSON: {}",
            e, json_data
        )
    });

    assert_eq!(response.count, Some(3));
    assert_eq!(response.into_items().len(), 3, "Expected 3 groups in test data");
}

#[test]
fn test_group_fields_keep_server_order() {
    let json_data = load_fixture("groups_list.json");
    let groups = serde_json::from_str::<ListResponse<Entity>>(&json_data)
        .unwrap()
        .into_items();

    let keys: Vec<&str> = groups[0].fields().map(|(key, _)| key).collect();
    assert_eq!(
        keys,
        vec![
            "id",
            "description",
            "tags",
            "configVersion",
            "isFleet",
            "onPrem",
            "provisioned",
            "workerCount",
            "estimatedIngestRate"
        ]
    );
}

#[test]
fn test_group_without_id() {
    let json_data = load_fixture("groups_list.json");
    let groups = serde_json::from_str::<ListResponse<Entity>>(&json_data)
        .unwrap()
        .into_items();

    assert!(groups[1].display_field("id").is_none());
    assert_eq!(
        groups[1].display_field("description").as_deref(),
        Some("Group that reports no id")
    );
}

#[test]
fn test_group_nested_values() {
    let json_data = load_fixture("groups_list.json");
    let groups = serde_json::from_str::<ListResponse<Entity>>(&json_data)
        .unwrap()
        .into_items();

    let edge = &groups[2];
    assert_eq!(
        edge.display_field("cloud").as_deref(),
        Some(r#"{"provider":"aws","region":"us-west-2"}"#)
    );
    assert_eq!(edge.display_field("lookupDeployments").as_deref(), Some("[]"));
    assert!(edge.display_field("maxWorkerAge").is_none());
    assert!(edge.get("maxWorkerAge").is_some());
}

#[tokio::test]
async fn test_login_then_list_against_fixture_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(load_fixture("login.json"), "application/json"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/products/stream/groups"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(load_fixture("groups_list.json"), "application/json"),
        )
        .mount(&server)
        .await;

    let base = format!("{}/api/v1", server.uri());
    let token = ControlPlaneClient::new(&base)
        .unwrap()
        .auth_tokens_get(&LoginInfo::new("admin", "admin"))
        .await
        .unwrap();
    assert!(token.expose().starts_with("eyJ"));

    let groups = ControlPlaneClient::builder(&base)
        .unwrap()
        .with_security(cribl_core::Security::BearerAuth(token.token))
        .build()
        .unwrap()
        .groups_list(Product::Stream)
        .await
        .unwrap()
        .into_items();
    assert_eq!(groups.len(), 3);
}
