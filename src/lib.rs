//! # shorturl
//!
//! An in-memory URL shortening service built with Axum.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Aliases, tokens, audit events and repository traits
//! - **Application Layer** ([`application`]) - Shortening and authentication services
//! - **Infrastructure Layer** ([`infrastructure`]) - Concurrent in-memory stores and audit sinks
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Random or caller-chosen short codes with a validity window
//! - Redirects and per-alias click statistics
//! - Optional bearer token authentication for link creation
//! - Fire-and-forget audit logging to a remote collector
//!
//! ## Quick Start
//!
//! ```bash
//! export BASE_URL="http://localhost:8080"
//! cargo run
//!
//! curl -X POST localhost:8080/shorturl \
//!   -H 'content-type: application/json' \
//!   -d '{"url":"https://example.com","validity":30}'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AccessOutcome, AuthService, ShortenerService};
    pub use crate::domain::entities::{Alias, NewAlias};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
