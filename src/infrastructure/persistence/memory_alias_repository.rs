//! Concurrent in-memory implementation of the alias repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::entities::{Alias, MAX_VALIDITY_MINUTES, NewAlias};
use crate::domain::repositories::AliasRepository;
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, is_reserved_code, validate_requested_code};
use crate::utils::url_validator::validate_url;

/// Default bound on random draws before giving up on code generation.
pub const DEFAULT_MAX_CODE_ATTEMPTS: usize = 10_000;

type CodeGenerator = Arc<dyn Fn() -> String + Send + Sync>;

/// In-memory alias store backed by [`DashMap`].
///
/// Codes are claimed through the map's entry API, which holds the shard lock
/// across the existence check and the insert. Two concurrent creates can
/// therefore never end up with the same code.
///
/// Nothing is ever evicted, so an expired code stays reserved for the life of
/// the process.
pub struct InMemoryAliasRepository {
    aliases: DashMap<String, Alias>,
    clicks: DashMap<String, u64>,
    max_code_attempts: usize,
    code_generator: CodeGenerator,
}

impl InMemoryAliasRepository {
    /// Creates an empty store drawing at most `max_code_attempts` random
    /// codes per create.
    pub fn new(max_code_attempts: usize) -> Self {
        Self {
            aliases: DashMap::new(),
            clicks: DashMap::new(),
            max_code_attempts,
            code_generator: Arc::new(generate_code),
        }
    }

    /// Replaces the random code source.
    pub fn with_code_generator<F>(mut self, generator: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.code_generator = Arc::new(generator);
        self
    }

    /// Inserts an alias under `code` if the code is free.
    fn try_claim(&self, code: String, new_alias: &NewAlias, now: DateTime<Utc>) -> Option<Alias> {
        match self.aliases.entry(code) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => {
                let alias = Alias::new(
                    slot.key().clone(),
                    new_alias.target_url.clone(),
                    now,
                    new_alias.validity_minutes,
                );
                slot.insert(alias.clone());
                Some(alias)
            }
        }
    }

    fn validate(new_alias: &NewAlias) -> Result<(), AppError> {
        validate_url(&new_alias.target_url).map_err(|e| {
            AppError::invalid_url("Invalid URL", json!({ "reason": e.to_string() }))
        })?;

        if let Some(code) = &new_alias.requested_code {
            validate_requested_code(code)?;
        }

        if new_alias.validity_minutes > MAX_VALIDITY_MINUTES {
            return Err(AppError::invalid_validity(
                "Validity is too long",
                json!({
                    "validity": new_alias.validity_minutes,
                    "max": MAX_VALIDITY_MINUTES,
                }),
            ));
        }

        Ok(())
    }
}

impl Default for InMemoryAliasRepository {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CODE_ATTEMPTS)
    }
}

#[async_trait]
impl AliasRepository for InMemoryAliasRepository {
    async fn create(&self, new_alias: NewAlias, now: DateTime<Utc>) -> Result<Alias, AppError> {
        Self::validate(&new_alias)?;

        if let Some(requested) = new_alias.requested_code.clone()
            && !is_reserved_code(&requested)
        {
            if let Some(alias) = self.try_claim(requested, &new_alias, now) {
                return Ok(alias);
            }
            debug!(
                "Requested code {:?} is taken, generating a new one",
                new_alias.requested_code
            );
        }

        for attempt in 1..=self.max_code_attempts {
            if let Some(alias) = self.try_claim((self.code_generator)(), &new_alias, now) {
                if attempt > 1 {
                    debug!("Generated free code after {} attempts", attempt);
                }
                return Ok(alias);
            }
        }

        warn!(
            "No free short code after {} attempts",
            self.max_code_attempts
        );
        Err(AppError::capacity_exhausted(
            "Failed to generate unique code",
            json!({ "attempts": self.max_code_attempts }),
        ))
    }

    async fn resolve(&self, code: &str, now: DateTime<Utc>) -> Result<Alias, AppError> {
        let alias = self
            .aliases
            .get(code)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::not_found("Shortcode not found", json!({ "code": code })))?;

        if alias.is_expired_at(now) {
            return Err(AppError::expired(
                "Link expired",
                json!({ "code": code, "expired_at": alias.expires_at }),
            ));
        }

        Ok(alias)
    }

    async fn record_click(&self, code: &str) -> Result<u64, AppError> {
        let mut count = self.clicks.entry(code.to_string()).or_insert(0);
        *count += 1;
        Ok(*count)
    }

    async fn click_count(&self, code: &str) -> Result<u64, AppError> {
        Ok(self.clicks.get(code).map(|c| *c).unwrap_or(0))
    }

    async fn count(&self) -> Result<usize, AppError> {
        Ok(self.aliases.len())
    }
}
