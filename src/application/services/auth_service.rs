//! Authentication service: credential login and bearer token validation.

use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::domain::audit_event::AuditLogger;
use crate::domain::entities::IssuedToken;
use crate::domain::repositories::TokenRepository;
use crate::error::AppError;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

const AUDIT_AUTH: &str = "auth";

/// Client credential table and token settings, injected at construction.
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    /// `client_id -> client_secret`.
    pub credentials: HashMap<String, String>,
    /// HMAC key used to hash tokens before storage.
    pub signing_secret: String,
    /// Lifetime of issued tokens in seconds.
    pub token_ttl_seconds: u64,
}

/// A token handed back to a client after a successful login.
#[derive(Debug, Clone)]
pub struct Credential {
    pub access_token: String,
    pub expires_in: u64,
}

/// Service for issuing and checking bearer tokens.
///
/// Tokens are random UUIDs. Only their HMAC-SHA256 (keyed by
/// `signing_secret`) is stored, so a leaked token table cannot be replayed.
pub struct AuthService<R: TokenRepository> {
    repository: Arc<R>,
    config: AuthConfig,
    audit: AuditLogger,
}

impl<R: TokenRepository> AuthService<R> {
    /// Creates a new authentication service.
    pub fn new(repository: Arc<R>, config: AuthConfig, audit: AuditLogger) -> Self {
        Self {
            repository,
            config,
            audit,
        }
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(self.config.signing_secret.as_bytes())
            .expect("HMAC accepts any key length")
    }

    /// Hashes a raw token with HMAC-SHA256 using the signing secret.
    ///
    /// Returns a 64-character lowercase hex-encoded MAC.
    fn hash_token(&self, token: &str) -> String {
        let mut mac = self.mac();
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Compares two secrets in constant time.
    fn secrets_match(&self, provided: &str, expected: &str) -> bool {
        let mut expected_mac = self.mac();
        expected_mac.update(expected.as_bytes());
        let expected_tag = expected_mac.finalize().into_bytes();

        let mut provided_mac = self.mac();
        provided_mac.update(provided.as_bytes());
        provided_mac.verify_slice(&expected_tag).is_ok()
    }

    /// Checks a client id/secret pair and issues a new bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if either value is missing or the
    /// pair is not in the credential table.
    pub async fn login(
        &self,
        client_id: Option<&str>,
        client_secret: Option<&str>,
    ) -> Result<Credential, AppError> {
        let (Some(client_id), Some(client_secret)) = (client_id, client_secret) else {
            self.audit.warn(AUDIT_AUTH, "Login without credentials");
            return Err(invalid_credentials());
        };

        let known = self
            .config
            .credentials
            .get(client_id)
            .is_some_and(|expected| self.secrets_match(client_secret, expected));

        if !known {
            self.audit
                .warn(AUDIT_AUTH, format!("Login failed for {client_id}"));
            return Err(invalid_credentials());
        }

        let ttl = self.config.token_ttl_seconds;
        let issued_at = Utc::now();
        let expires_at = i64::try_from(ttl)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
            .ok_or_else(|| {
                AppError::internal(
                    "Token lifetime is out of range",
                    json!({ "token_ttl_seconds": ttl }),
                )
            })?;

        let raw_token = Uuid::new_v4().simple().to_string();

        self.repository
            .save(IssuedToken {
                token_hash: self.hash_token(&raw_token),
                client_id: client_id.to_string(),
                issued_at,
                expires_at,
            })
            .await?;

        info!(client_id, "Token issued");
        self.audit
            .info(AUDIT_AUTH, format!("Token issued for {client_id}"));

        Ok(Credential {
            access_token: raw_token,
            expires_in: ttl,
        })
    }

    /// Authenticates a raw bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is unknown or expired.
    pub async fn authenticate(&self, token: &str) -> Result<(), AppError> {
        let token_hash = self.hash_token(token);

        let is_valid = self
            .repository
            .validate_token(&token_hash, Utc::now())
            .await?;

        if !is_valid {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Invalid or expired token"}),
            ));
        }

        Ok(())
    }
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized(
        "Invalid clientID or clientSecret",
        json!({"reason": "Unknown client credentials"}),
    )
}
