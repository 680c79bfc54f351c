mod common;

use axum_test::TestServer;
use serde_json::Value;

#[tokio::test]
async fn test_health_reports_store_status() {
    let state = common::create_test_state();
    let server = TestServer::new(common::public_app(state)).unwrap();

    let response = server.get("/healthz").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["store"]["status"], "ok");
    assert!(body["version"].as_str().is_some());
}
