//! Handler for short link redirects and statistics.

use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};

use crate::api::dto::stats::{AccessParams, ClickDetails, StatsResponse};
use crate::application::services::AccessOutcome;
use crate::application::services::shortener_service::format_timestamp;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its target or reports its statistics.
///
/// # Endpoint
///
/// `GET /shorturl/{code}` - 307 Temporary Redirect to the target URL
///
/// `GET /shorturl/{code}?stats=true` - 200 with click statistics
///
/// Both forms count as a click.
///
/// # Response (stats)
///
/// ```json
/// {
///   "totalClicks": 3,
///   "originalUrl": "https://example.com",
///   "creationDate": "2025-01-01T12:00:00.000Z",
///   "expiryDate": "2025-01-01T12:30:00.000Z",
///   "clickDetails": {
///     "timestamp": "2025-01-01T12:05:00.000Z",
///     "source": "Unknown",
///     "location": "Unknown"
///   }
/// }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the code doesn't exist.
/// Returns 410 Gone if the alias has expired.
pub async fn access_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(params): Query<AccessParams>,
) -> Result<Response, AppError> {
    let outcome = state
        .shortener_service
        .access(&code, params.wants_stats())
        .await?;

    let response = match outcome {
        AccessOutcome::Redirect { target_url } => Redirect::temporary(&target_url).into_response(),
        AccessOutcome::Stats(stats) => Json(StatsResponse {
            total_clicks: stats.total_clicks,
            original_url: stats.original_url,
            creation_date: format_timestamp(stats.created_at),
            expiry_date: format_timestamp(stats.expires_at),
            click_details: ClickDetails::at(format_timestamp(stats.accessed_at)),
        })
        .into_response(),
    };

    Ok(response)
}
