//! Bearer token gate for alias creation.

use axum::{
    RequestExt,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;
use tracing::debug;

use crate::{error::AppError, state::AppState};

/// Rejects the request unless it carries a token issued by `POST /shorturl/login`.
///
/// ```text
/// Authorization: Bearer <access_token>
/// ```
///
/// The token is hashed and looked up among issued tokens; expired tokens
/// are evicted on lookup and rejected.
///
/// # Errors
///
/// Returns `401 Unauthorized` with `WWW-Authenticate: Bearer` if the header
/// is missing or malformed, or the token is unknown or expired.
///
/// # Example
///
/// ```rust,ignore
/// let create = Router::new()
///     .route("/shorturl", post(shorten_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_bearer));
/// ```
pub async fn require_bearer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let AuthBearer(token) = match req.extract_parts::<AuthBearer>().await {
        Ok(bearer) => bearer,
        Err(_) => {
            debug!(path = %req.uri().path(), "Request without bearer token");
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Authorization header is missing or invalid" }),
            ));
        }
    };

    if let Err(e) = state.auth_service.authenticate(&token).await {
        debug!(path = %req.uri().path(), "Bearer token rejected");
        return Err(e);
    }

    Ok(next.run(req).await)
}
