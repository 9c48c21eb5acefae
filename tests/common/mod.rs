#![allow(dead_code)]

use shorturl::application::services::{AuthConfig, AuthService, ShortenerService};
use shorturl::domain::audit_event::{AuditEvent, AuditLogger};
use shorturl::infrastructure::persistence::{InMemoryAliasRepository, InMemoryTokenRepository};
use shorturl::state::AppState;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;

pub const BASE_URL: &str = "http://sho.rt";
pub const CLIENT_ID: &str = "user1";
pub const CLIENT_SECRET: &str = "pass123";

pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        credentials: HashMap::from([(CLIENT_ID.to_string(), CLIENT_SECRET.to_string())]),
        signing_secret: "test-signing-secret".to_string(),
        token_ttl_seconds: 3600,
    }
}

pub fn create_test_state_with(
    repository: Arc<InMemoryAliasRepository>,
    auth_config: AuthConfig,
    require_auth: bool,
) -> (AppState, mpsc::Receiver<AuditEvent>) {
    let (tx, rx) = mpsc::channel(100);
    let audit = AuditLogger::new(tx);

    let shortener_service = Arc::new(ShortenerService::new(
        repository,
        BASE_URL.to_string(),
        30,
        audit.clone(),
    ));
    let auth_service = Arc::new(AuthService::new(
        Arc::new(InMemoryTokenRepository::new()),
        auth_config,
        audit.clone(),
    ));

    let state = AppState {
        shortener_service,
        auth_service,
        audit,
        require_auth,
    };

    (state, rx)
}

pub fn create_test_state() -> (AppState, mpsc::Receiver<AuditEvent>) {
    create_test_state_with(
        Arc::new(InMemoryAliasRepository::default()),
        test_auth_config(),
        false,
    )
}

/// Extracts the short code from a `shortlink` returned by `POST /shorturl`.
pub fn code_of(shortlink: &str) -> &str {
    shortlink.rsplit('/').next().unwrap_or_default()
}
