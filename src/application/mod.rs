//! Application layer services implementing business logic.
//!
//! Services consume repository traits and give HTTP handlers a narrow API.
//!
//! # Available Services
//!
//! - [`services::shortener_service::ShortenerService`] - Alias creation and access
//! - [`services::auth_service::AuthService`] - Credential login and bearer tokens

pub mod services;
