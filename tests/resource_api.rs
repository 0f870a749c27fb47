//! Resource client tests against a mock HTTP server

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use netkit_cli::client::{ResourceApi, ResourceClient};
use netkit_cli::config::Config;
use netkit_cli::error::AppError;

fn client_for(server: &MockServer) -> ResourceClient {
    let config = Config {
        api_base_url: server.uri(),
        timeout: Duration::from_secs(5),
    };
    ResourceClient::new(&config).unwrap()
}

fn resource_body(id: u32, name: &str, dns: &str) -> serde_json::Value {
    json!({
        "ID": id,
        "name": name,
        "dns": dns,
        "CreatedAt": "2025-03-01T10:30:00Z",
        "UpdatedAt": "2025-03-01T10:30:00Z"
    })
}

#[tokio::test]
async fn create_posts_body_and_unwraps_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/resource"))
        .and(body_json(json!({"name": "edge", "dns": "edge.example.com"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": resource_body(1, "edge", "edge.example.com"),
            "message": "resource created"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resource = client_for(&server)
        .create("edge", "edge.example.com")
        .await
        .unwrap();
    assert_eq!(resource.id, 1);
    assert_eq!(resource.name, "edge");
}

#[tokio::test]
async fn list_returns_all_resources_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/resources"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                resource_body(1, "edge", "edge.example.com"),
                resource_body(2, "api", "api.example.com")
            ],
            "message": "ok"
        })))
        .mount(&server)
        .await;

    let resources = client_for(&server).list().await.unwrap();
    assert_eq!(resources.len(), 2);
    assert_eq!(resources[0].id, 1);
    assert_eq!(resources[1].name, "api");
}

#[tokio::test]
async fn get_maps_404_to_not_found_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/resource"))
        .and(query_param("id", "42"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let error = client_for(&server).get(42).await.unwrap_err();
    assert!(error.to_string().contains("resource with ID 42 not found"));
}

#[tokio::test]
async fn update_sends_only_provided_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/resource"))
        .and(query_param("id", "7"))
        .and(body_json(json!({"dns": "new.example.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": resource_body(7, "edge", "new.example.com"),
            "message": "resource updated"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resource = client_for(&server)
        .update(7, None, Some("new.example.com"))
        .await
        .unwrap();
    assert_eq!(resource.dns, "new.example.com");
}

#[tokio::test]
async fn update_without_fields_fails_before_any_request() {
    let server = MockServer::start().await;
    // No mock mounted: a request would fail the test via the 404 fallthrough

    let error = client_for(&server).update(7, None, None).await.unwrap_err();
    assert!(matches!(error, AppError::Validation(_)));
    assert!(error.to_string().contains("at least one of 'name' or 'dns'"));
}

#[tokio::test]
async fn delete_targets_resource_by_query_param() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/resource"))
        .and(query_param("id", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": resource_body(3, "old", "old.example.com"),
            "message": "resource deleted"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resource = client_for(&server).delete(3).await.unwrap();
    assert_eq!(resource.id, 3);
}

#[tokio::test]
async fn json_error_body_is_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/resource"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid input",
            "message": "dns already registered"
        })))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .create("edge", "edge.example.com")
        .await
        .unwrap_err();
    let message = error.to_string();
    assert!(message.contains("invalid input"));
    assert!(message.contains("dns already registered"));
}

#[tokio::test]
async fn non_json_error_body_is_reported_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/resources"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_string("upstream exploded")
                .insert_header("content-type", "text/plain"),
        )
        .mount(&server)
        .await;

    let error = client_for(&server).list().await.unwrap_err();
    let message = error.to_string();
    assert!(message.contains("HTTP 500"));
    assert!(message.contains("upstream exploded"));
}
