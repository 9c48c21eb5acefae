//! Repository trait for alias storage and click counting.

use crate::domain::entities::{Alias, NewAlias};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Store interface owning aliases and their click counters.
///
/// Implementations own code allocation: `create` validates its input, picks
/// the final code and inserts the record in one atomic step, so no two
/// aliases can ever share a code. Expired aliases are kept forever and their
/// codes are never reissued.
///
/// Time is passed in explicitly so callers (and tests) control the clock.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::InMemoryAliasRepository`] - concurrent in-memory store
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_alias.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AliasRepository: Send + Sync {
    /// Creates a new alias valid from `now` for `new_alias.validity_minutes`.
    ///
    /// If `requested_code` is free it is used verbatim; if it is already
    /// taken a random code is generated instead (not an error).
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] if the target URL is not a valid absolute URL
    /// - [`AppError::InvalidCodeFormat`] if the requested code fails the pattern
    /// - [`AppError::InvalidValidity`] if the validity window is out of range
    /// - [`AppError::CapacityExhausted`] if no free code was drawn within the
    ///   configured number of attempts
    async fn create(&self, new_alias: NewAlias, now: DateTime<Utc>) -> Result<Alias, AppError>;

    /// Resolves a code to its alias as of `now`.
    ///
    /// Does not record a click.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if no alias exists for `code`
    /// - [`AppError::Expired`] if `now` is strictly after the alias expiry
    async fn resolve(&self, code: &str, now: DateTime<Utc>) -> Result<Alias, AppError>;

    /// Increments the click counter for `code` and returns the new count.
    ///
    /// Creates the counter on first use. Performs no existence or expiry
    /// check; callers only record clicks after a successful resolve.
    async fn record_click(&self, code: &str) -> Result<u64, AppError>;

    /// Returns the current click count for `code`, `0` if none recorded.
    async fn click_count(&self, code: &str) -> Result<u64, AppError>;

    /// Returns the number of aliases ever created, expired ones included.
    async fn count(&self) -> Result<usize, AppError>;
}
