//! Handler for the shorten endpoint.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for one URL.
///
/// # Endpoint
///
/// `POST /shorturl`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/some/long/path",
///   "validity": 30,          // optional, minutes
///   "shortcode": "promo1"    // optional, 1-10 alphanumeric
/// }
/// ```
///
/// A `shortcode` that is already taken is silently replaced with a
/// generated one; check the returned `shortlink` for the final code.
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "shortlink": "http://localhost:8080/shorturl/promo1",
///   "expiry": "2025-01-01T12:30:00.000Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for an invalid URL, shortcode or validity.
/// Returns 503 Service Unavailable if no free code could be generated.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    payload.validate()?;

    let validity = payload.validity_minutes();
    let link = state
        .shortener_service
        .shorten(payload.url, validity, payload.shortcode)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            expiry: link.expiry(),
            shortlink: link.shortlink,
        }),
    ))
}
