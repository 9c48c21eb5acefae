//! Repository trait for issued bearer tokens.

use crate::domain::entities::IssuedToken;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for bearer tokens issued at login.
///
/// Tokens are looked up by their HMAC hash only.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::InMemoryTokenRepository`] - in-memory store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Stores a newly issued token.
    async fn save(&self, token: IssuedToken) -> Result<(), AppError>;

    /// Returns true if a token with this hash exists and has not expired at `now`.
    ///
    /// Expired tokens encountered during lookup may be discarded.
    async fn validate_token(&self, token_hash: &str, now: DateTime<Utc>) -> Result<bool, AppError>;
}
