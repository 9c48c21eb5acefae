//! In-memory implementation of the token repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::domain::entities::IssuedToken;
use crate::domain::repositories::TokenRepository;
use crate::error::AppError;

/// Token store keyed by token hash.
///
/// Expired tokens are removed lazily when a lookup hits them.
#[derive(Default)]
pub struct InMemoryTokenRepository {
    tokens: DashMap<String, IssuedToken>,
}

impl InMemoryTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tokens currently held, expired ones included.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn save(&self, token: IssuedToken) -> Result<(), AppError> {
        self.tokens.insert(token.token_hash.clone(), token);
        Ok(())
    }

    async fn validate_token(&self, token_hash: &str, now: DateTime<Utc>) -> Result<bool, AppError> {
        self.tokens
            .remove_if(token_hash, |_, token| token.is_expired_at(now));

        Ok(self.tokens.contains_key(token_hash))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn token(hash: &str, issued_at: DateTime<Utc>, ttl_seconds: i64) -> IssuedToken {
        IssuedToken {
            token_hash: hash.to_string(),
            client_id: "user1".to_string(),
            issued_at,
            expires_at: issued_at + Duration::seconds(ttl_seconds),
        }
    }

    #[tokio::test]
    async fn test_saved_token_validates() {
        let repo = InMemoryTokenRepository::new();
        let now = Utc::now();
        repo.save(token("h1", now, 60)).await.unwrap();

        assert!(repo.validate_token("h1", now).await.unwrap());
        assert!(!repo.validate_token("unknown", now).await.unwrap());
    }

    #[tokio::test]
    async fn test_expired_token_rejected_and_evicted() {
        let repo = InMemoryTokenRepository::new();
        let now = Utc::now();
        repo.save(token("h1", now, 60)).await.unwrap();

        let later = now + Duration::seconds(61);
        assert!(!repo.validate_token("h1", later).await.unwrap());
        assert!(repo.is_empty());
    }
}
