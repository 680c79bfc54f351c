mod common;

use axum_test::TestServer;
use serde_json::{json, Value};

fn server() -> (TestServer, golinks::AppState) {
    let state = common::create_test_state();
    let server = TestServer::new(common::api_app(state.clone())).unwrap();
    (server, state)
}

#[tokio::test]
async fn test_api_requires_key() {
    let (server, _state) = server();

    let response = server.get("/api/url/abc").await;
    response.assert_status_unauthorized();

    let response = server
        .get("/api/url/abc")
        .add_header("X-Api-Key", "wrong-key")
        .await;
    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_create_and_fetch_route() {
    let (server, _state) = server();

    let response = server
        .post("/api/url/docs")
        .add_header("X-Api-Key", common::TEST_API_KEY)
        .json(&json!({ "url": "https://example.com/docs" }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["name"], "docs");
    assert_eq!(body["url"], "https://example.com/docs");
    assert_eq!(body["source_url"], "https://go.example.com/docs");

    let response = server
        .get("/api/url/docs")
        .add_header("X-Api-Key", common::TEST_API_KEY)
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["url"], "https://example.com/docs");
}

#[tokio::test]
async fn test_create_overwrites_existing_route() {
    let (server, _state) = server();
    for url in ["https://old.example.com", "https://new.example.com"] {
        let response = server
            .post("/api/url/docs")
            .add_header("X-Api-Key", common::TEST_API_KEY)
            .json(&json!({ "url": url }))
            .await;
        response.assert_status_ok();
    }

    let response = server
        .get("/api/url/docs")
        .add_header("X-Api-Key", common::TEST_API_KEY)
        .await;
    let body: Value = response.json();
    assert_eq!(body["url"], "https://new.example.com");
}

#[tokio::test]
async fn test_create_rejects_invalid_url() {
    let (server, _state) = server();

    let response = server
        .post("/api/url/docs")
        .add_header("X-Api-Key", common::TEST_API_KEY)
        .json(&json!({ "url": "not a url" }))
        .await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_create_rejects_reserved_name() {
    let (server, _state) = server();

    for name in ["api", "edit", "healthz", "next_id"] {
        let response = server
            .post(&format!("/api/url/{name}"))
            .add_header("X-Api-Key", common::TEST_API_KEY)
            .json(&json!({ "url": "https://example.com" }))
            .await;
        response.assert_status_bad_request();
    }
}

#[tokio::test]
async fn test_counter_name_is_never_a_route() {
    let (server, _state) = server();

    // Touch the counter so its key holds a value.
    let response = server
        .post("/api/url")
        .add_header("X-Api-Key", common::TEST_API_KEY)
        .json(&json!({ "url": "https://example.com" }))
        .await;
    response.assert_status_ok();

    // The counter value must not leak out as a (corrupt) route.
    let response = server
        .get("/api/url/next_id")
        .add_header("X-Api-Key", common::TEST_API_KEY)
        .await;
    response.assert_status_not_found();
}

#[tokio::test]
async fn test_auto_allocated_name() {
    let (server, _state) = server();

    let response = server
        .post("/api/url")
        .add_header("X-Api-Key", common::TEST_API_KEY)
        .json(&json!({ "url": "https://example.com" }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    // First counter allocation is 1, encoded base-36.
    assert_eq!(body["name"], "1");

    let response = server
        .post("/api/url")
        .add_header("X-Api-Key", common::TEST_API_KEY)
        .json(&json!({ "url": "https://example.com/second" }))
        .await;
    let body: Value = response.json();
    assert_eq!(body["name"], "2");
}

#[tokio::test]
async fn test_auto_allocation_skips_claimed_names() {
    let (server, state) = server();
    common::seed_route(&state, "1", "https://claimed.example.com").await;

    let response = server
        .post("/api/url")
        .add_header("X-Api-Key", common::TEST_API_KEY)
        .json(&json!({ "url": "https://example.com" }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["name"], "2");
}

#[tokio::test]
async fn test_delete_is_idempotent_over_http() {
    let (server, state) = server();
    common::seed_route(&state, "gone", "https://example.com").await;

    let response = server
        .delete("/api/url/gone")
        .add_header("X-Api-Key", common::TEST_API_KEY)
        .await;
    assert_eq!(response.status_code(), 204);

    // Second delete of the same name also succeeds.
    let response = server
        .delete("/api/url/gone")
        .add_header("X-Api-Key", common::TEST_API_KEY)
        .await;
    assert_eq!(response.status_code(), 204);

    let response = server
        .get("/api/url/gone")
        .add_header("X-Api-Key", common::TEST_API_KEY)
        .await;
    response.assert_status_not_found();
}

#[tokio::test]
async fn test_list_from_start_in_order() {
    let (server, state) = server();
    common::seed_route(&state, "a", "https://example.com/a").await;
    common::seed_route(&state, "b", "https://example.com/b").await;
    common::seed_route(&state, "c", "https://example.com/c").await;

    let response = server
        .get("/api/urls")
        .add_query_param("start", "b")
        .add_header("X-Api-Key", common::TEST_API_KEY)
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let names: Vec<&str> = body["routes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["b", "c"]);
    assert!(body.get("next").is_none());
}

#[tokio::test]
async fn test_list_paginates_with_cursor() {
    let (server, state) = server();
    common::seed_route(&state, "a", "https://example.com/a").await;
    common::seed_route(&state, "b", "https://example.com/b").await;
    common::seed_route(&state, "c", "https://example.com/c").await;

    let response = server
        .get("/api/urls")
        .add_query_param("limit", "2")
        .add_header("X-Api-Key", common::TEST_API_KEY)
        .await;
    let body: Value = response.json();

    let names: Vec<&str> = body["routes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["a", "b"]);
    assert_eq!(body["next"], "c");

    // Resume from the cursor.
    let response = server
        .get("/api/urls")
        .add_query_param("start", "c")
        .add_header("X-Api-Key", common::TEST_API_KEY)
        .await;
    let body: Value = response.json();
    assert_eq!(body["routes"][0]["name"], "c");
}

#[tokio::test]
async fn test_config_reports_host() {
    let (server, _state) = server();

    let response = server
        .get("/api/config")
        .add_header("X-Api-Key", common::TEST_API_KEY)
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["host"], "go.example.com");
}
