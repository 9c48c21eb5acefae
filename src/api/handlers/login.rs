//! Handler for client login.

use axum::{Json, extract::State};

use crate::api::dto::login::{LoginRequest, LoginResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Exchanges client credentials for a bearer token.
///
/// # Endpoint
///
/// `POST /shorturl/login`
///
/// # Request Body
///
/// ```json
/// { "clientID": "user1", "clientSecret": "pass123" }
/// ```
///
/// # Response
///
/// ```json
/// { "token_type": "Bearer", "access_token": "5f0c...", "expires_in": 3600 }
/// ```
///
/// # Errors
///
/// Returns 401 Unauthorized if the credentials are missing or unknown.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let credential = state
        .auth_service
        .login(payload.client_id.as_deref(), payload.client_secret.as_deref())
        .await?;

    Ok(Json(LoginResponse {
        token_type: "Bearer",
        access_token: credential.access_token,
        expires_in: credential.expires_in,
    }))
}
