//! Alias entity representing a short code bound to a target URL.

use chrono::{DateTime, Duration, Utc};

/// Default validity window applied when a request does not specify one.
pub const DEFAULT_VALIDITY_MINUTES: u32 = 30;

/// Upper bound on the validity window (one year).
pub const MAX_VALIDITY_MINUTES: u32 = 525_600;

/// A short code mapped to its target URL with a fixed validity window.
///
/// Aliases are never mutated after creation and never removed; once
/// `expires_at` has passed they simply stop resolving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    pub code: String,
    pub target_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Alias {
    /// Creates an alias valid for `validity_minutes` starting at `created_at`.
    pub fn new(
        code: String,
        target_url: String,
        created_at: DateTime<Utc>,
        validity_minutes: u32,
    ) -> Self {
        Self {
            code,
            target_url,
            created_at,
            expires_at: created_at + Duration::minutes(i64::from(validity_minutes)),
        }
    }

    /// Returns true if `now` is strictly after the expiry instant.
    ///
    /// An alias is still valid at exactly `expires_at`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Input data for creating a new alias.
///
/// `requested_code` is a preference, not a demand: when the code is already
/// taken the store generates a fresh one instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAlias {
    pub target_url: String,
    pub validity_minutes: u32,
    pub requested_code: Option<String>,
}

impl NewAlias {
    pub fn new(target_url: impl Into<String>, validity_minutes: Option<u32>) -> Self {
        Self {
            target_url: target_url.into(),
            validity_minutes: validity_minutes.unwrap_or(DEFAULT_VALIDITY_MINUTES),
            requested_code: None,
        }
    }

    pub fn with_requested_code(mut self, code: Option<String>) -> Self {
        self.requested_code = code;
        self
    }
}
