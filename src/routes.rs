//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /shorturl`         - Create a short link (bearer token if `REQUIRE_AUTH`)
//! - `POST /shorturl/login`   - Issue a bearer token
//! - `GET  /shorturl/{code}`  - Redirect or statistics (public)
//! - `GET  /health`           - Health check: store, audit queue (public)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - Bearer token on alias creation, when enabled
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .merge(api::routes::shorturl_routes(&state))
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
