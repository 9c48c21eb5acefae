mod common;

use axum::{Router, http::StatusCode, routing::get};
use axum_test::TestServer;
use shorturl::api::handlers::health_handler;
use shorturl::domain::audit_event::AuditLogger;

#[tokio::test]
async fn test_health_ok() {
    let (state, _rx) = common::create_test_state();
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();
    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["store"]["status"], "ok");
    assert_eq!(json["checks"]["store"]["message"], "0 aliases");
    assert_eq!(json["checks"]["audit_queue"]["status"], "ok");
}

#[tokio::test]
async fn test_health_audit_disabled_is_ok() {
    let (mut state, _rx) = common::create_test_state();
    state.audit = AuditLogger::disabled();
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();
    let response = server.get("/health").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["checks"]["audit_queue"]["message"], "Audit disabled");
}

#[tokio::test]
async fn test_health_degraded_when_audit_worker_gone() {
    let (state, rx) = common::create_test_state();
    drop(rx);
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();
    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["audit_queue"]["status"], "error");
}
