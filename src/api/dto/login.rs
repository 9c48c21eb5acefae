//! DTOs for the login endpoint.

use serde::{Deserialize, Serialize};

/// Client credentials submitted at login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(rename = "clientID")]
    pub client_id: Option<String>,
    #[serde(rename = "clientSecret")]
    pub client_secret: Option<String>,
}

/// Bearer token issued after a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token_type: &'static str,
    pub access_token: String,
    pub expires_in: u64,
}
