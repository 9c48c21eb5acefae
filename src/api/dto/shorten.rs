//! DTOs for the shorten endpoint.

use crate::domain::entities::MAX_VALIDITY_MINUTES;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Upper bound on `validity`, in the request's integer type.
const MAX_VALIDITY: i64 = MAX_VALIDITY_MINUTES as i64;

/// Request to shorten a single URL.
///
/// All fields are optional at the wire level so that a missing `url` is
/// reported as an invalid URL rather than a body parse failure.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL to shorten.
    pub url: Option<String>,

    /// Lifetime of the alias in minutes (default 30).
    #[validate(range(min = 0, max = MAX_VALIDITY))]
    pub validity: Option<i64>,

    /// Preferred short code, 1-10 alphanumeric characters.
    pub shortcode: Option<String>,
}

/// Response for a created alias.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub shortlink: String,
    /// ISO-8601 UTC expiry timestamp.
    pub expiry: String,
}

impl ShortenRequest {
    /// Validity in minutes; call only after [`Validate::validate`] succeeded.
    pub fn validity_minutes(&self) -> Option<u32> {
        self.validity.and_then(|v| u32::try_from(v).ok())
    }
}
