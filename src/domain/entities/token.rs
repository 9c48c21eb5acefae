//! Bearer token issued to an authenticated client.

use chrono::{DateTime, Utc};

/// A bearer token record.
///
/// Only the HMAC hash of the raw token is kept; the raw value is returned to
/// the client once and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token_hash: String,
    pub client_id: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl IssuedToken {
    /// Returns true once `now` has reached the expiry instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
