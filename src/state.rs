//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AuthService, ShortenerService};
use crate::domain::audit_event::AuditLogger;
use crate::infrastructure::persistence::{InMemoryAliasRepository, InMemoryTokenRepository};

#[derive(Clone)]
pub struct AppState {
    pub shortener_service: Arc<ShortenerService<InMemoryAliasRepository>>,
    pub auth_service: Arc<AuthService<InMemoryTokenRepository>>,
    pub audit: AuditLogger,
    /// When true, creating aliases requires a bearer token.
    pub require_auth: bool,
}
