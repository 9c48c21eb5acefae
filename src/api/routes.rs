//! API route configuration.
//!
//! `POST /shorturl` is gated by [`crate::api::middleware::auth`] only when
//! the service is started with `REQUIRE_AUTH=true`.

use crate::api::handlers::{access_handler, login_handler, shorten_handler};
use crate::api::middleware::auth;
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// Short link routes.
///
/// # Endpoints
///
/// - `POST /shorturl`          - Create a short link
/// - `POST /shorturl/login`    - Exchange client credentials for a token
/// - `GET  /shorturl/{code}`   - Redirect, or statistics with `?stats=true`
pub fn shorturl_routes(state: &AppState) -> Router<AppState> {
    let mut create = Router::new().route("/shorturl", post(shorten_handler));
    if state.require_auth {
        create = create.route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer,
        ));
    }

    Router::new()
        .merge(create)
        .route("/shorturl/login", post(login_handler))
        .route("/shorturl/{code}", get(access_handler))
}
