//! Business logic services for the application layer.

pub mod auth_service;
pub mod shortener_service;

pub use auth_service::{AuthConfig, AuthService, Credential};
pub use shortener_service::{AccessOutcome, AliasStats, ShortLink, ShortenerService};
