//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Store**: Reports the number of aliases held
/// 2. **Audit Queue**: Checks the audit worker is still receiving
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "store": { "status": "ok", "message": "42 aliases" },
///     "audit_queue": { "status": "ok", "message": "Capacity: 1000" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let store_check = check_store(&state).await;

    let audit_check = check_audit_queue(&state);

    let all_healthy = store_check.is_ok() && audit_check.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            store: store_check,
            audit_queue: audit_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_store(state: &AppState) -> CheckStatus {
    match state.shortener_service.alias_count().await {
        Ok(count) => CheckStatus::ok(format!("{count} aliases")),
        Err(e) => CheckStatus::error(format!("Store error: {e}")),
    }
}

/// A disabled audit logger is healthy; a closed queue is not.
fn check_audit_queue(state: &AppState) -> CheckStatus {
    match state.audit.capacity() {
        None => CheckStatus::ok("Audit disabled"),
        Some(_) if !state.audit.is_open() => CheckStatus::error("Audit queue is closed"),
        Some(capacity) => CheckStatus::ok(format!("Capacity: {capacity}")),
    }
}
