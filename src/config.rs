//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Example
//!
//! ```bash
//! export LISTEN="0.0.0.0:8080"
//! export BASE_URL="https://sho.rt"
//! export AUTH_CREDENTIALS="user1:pass123,user2:secret456"
//! export TOKEN_SIGNING_SECRET="change-me"
//! export REQUIRE_AUTH="true"
//! export AUDIT_LOG_URL="https://logs.internal/api/logs"
//! ```
//!
//! ## Required Variables
//!
//! `TOKEN_SIGNING_SECRET` when `REQUIRE_AUTH=true` or `AUTH_CREDENTIALS` is set.
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:8080`)
//! - `BASE_URL` - Prefix for returned short links (default: `http://localhost:8080`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `DEFAULT_VALIDITY_MINUTES` - Lifetime of links created without `validity` (default: 30)
//! - `MAX_CODE_ATTEMPTS` - Random draws before giving up on a free code (default: 10000)
//! - `AUDIT_LOG_URL` / `AUDIT_LOG_TOKEN` - Remote audit collector (disabled if unset)
//! - `AUDIT_TIMEOUT_SECONDS` - Per-request audit timeout (default: 3)
//! - `AUDIT_QUEUE_CAPACITY` - Audit event buffer size (default: 1000, min: 10)
//! - `AUTH_CREDENTIALS` - `id:secret` pairs separated by commas
//! - `REQUIRE_AUTH` - Require a bearer token on `POST /shorturl` (default: false)
//! - `TOKEN_TTL_SECONDS` - Lifetime of issued tokens (default: 3600, max: 30 days)

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::env;
use std::str::FromStr;

use crate::domain::entities::{DEFAULT_VALIDITY_MINUTES, MAX_VALIDITY_MINUTES};

/// Upper bound for `TOKEN_TTL_SECONDS` (30 days).
pub const MAX_TOKEN_TTL_SECONDS: u64 = 30 * 24 * 60 * 60;
use crate::infrastructure::persistence::DEFAULT_MAX_CODE_ATTEMPTS;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub base_url: String,
    pub log_level: String,
    pub log_format: String,
    pub default_validity_minutes: u32,
    pub max_code_attempts: usize,

    // ── Audit ───────────────────────────────────────────────────────────────
    /// Remote collector endpoint. `None` keeps audit events local.
    pub audit_log_url: Option<String>,
    pub audit_log_token: Option<String>,
    pub audit_timeout_seconds: u64,
    pub audit_queue_capacity: usize,

    // ── Auth ────────────────────────────────────────────────────────────────
    /// `client_id -> client_secret`, parsed from `AUTH_CREDENTIALS`.
    pub auth_credentials: HashMap<String, String>,
    pub require_auth: bool,
    /// HMAC signing secret used to hash issued tokens before storage.
    pub token_signing_secret: String,
    pub token_ttl_seconds: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable cannot be parsed or
    /// `AUTH_CREDENTIALS` is malformed.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let base_url =
            env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let default_validity_minutes =
            parse_var("DEFAULT_VALIDITY_MINUTES", DEFAULT_VALIDITY_MINUTES)?;
        let max_code_attempts = parse_var("MAX_CODE_ATTEMPTS", DEFAULT_MAX_CODE_ATTEMPTS)?;

        let audit_log_url = non_empty_var("AUDIT_LOG_URL");
        let audit_log_token = non_empty_var("AUDIT_LOG_TOKEN");
        let audit_timeout_seconds = parse_var("AUDIT_TIMEOUT_SECONDS", 3)?;
        let audit_queue_capacity = parse_var("AUDIT_QUEUE_CAPACITY", 1_000)?;

        let auth_credentials = match env::var("AUTH_CREDENTIALS") {
            Ok(raw) => parse_credentials(&raw).context("Failed to parse AUTH_CREDENTIALS")?,
            Err(_) => HashMap::new(),
        };

        let require_auth = env::var("REQUIRE_AUTH")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        let token_signing_secret = env::var("TOKEN_SIGNING_SECRET").unwrap_or_default();
        let token_ttl_seconds = parse_var("TOKEN_TTL_SECONDS", 3600)?;

        Ok(Self {
            listen_addr,
            base_url,
            log_level,
            log_format,
            default_validity_minutes,
            max_code_attempts,
            audit_log_url,
            audit_log_token,
            audit_timeout_seconds,
            audit_queue_capacity,
            auth_credentials,
            require_auth,
            token_signing_secret,
            token_ttl_seconds,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` or `base_url` is malformed
    /// - a capacity, timeout or attempt bound is out of range
    /// - auth is configured without `TOKEN_SIGNING_SECRET`
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            anyhow::bail!(
                "BASE_URL must start with 'http://' or 'https://', got '{}'",
                self.base_url
            );
        }

        if self.default_validity_minutes > MAX_VALIDITY_MINUTES {
            anyhow::bail!(
                "DEFAULT_VALIDITY_MINUTES must be at most {}, got {}",
                MAX_VALIDITY_MINUTES,
                self.default_validity_minutes
            );
        }

        if self.max_code_attempts == 0 || self.max_code_attempts > 1_000_000 {
            anyhow::bail!(
                "MAX_CODE_ATTEMPTS must be between 1 and 1000000, got {}",
                self.max_code_attempts
            );
        }

        if self.audit_queue_capacity < 10 {
            anyhow::bail!(
                "AUDIT_QUEUE_CAPACITY must be at least 10, got {}",
                self.audit_queue_capacity
            );
        }

        if self.audit_queue_capacity > 1_000_000 {
            anyhow::bail!(
                "AUDIT_QUEUE_CAPACITY is too large (max: 1000000), got {}",
                self.audit_queue_capacity
            );
        }

        if let Some(ref url) = self.audit_log_url
            && !url.starts_with("http://")
            && !url.starts_with("https://")
        {
            anyhow::bail!(
                "AUDIT_LOG_URL must start with 'http://' or 'https://', got '{}'",
                url
            );
        }

        if self.audit_timeout_seconds == 0 {
            anyhow::bail!("AUDIT_TIMEOUT_SECONDS must be greater than 0");
        }

        if self.token_ttl_seconds == 0 || self.token_ttl_seconds > MAX_TOKEN_TTL_SECONDS {
            anyhow::bail!(
                "TOKEN_TTL_SECONDS must be between 1 and {}, got {}",
                MAX_TOKEN_TTL_SECONDS,
                self.token_ttl_seconds
            );
        }

        if self.is_auth_configured() && self.token_signing_secret.is_empty() {
            anyhow::bail!(
                "TOKEN_SIGNING_SECRET must be set when REQUIRE_AUTH is enabled or AUTH_CREDENTIALS is set"
            );
        }

        Ok(())
    }

    /// Returns whether login or the auth gate is in use.
    pub fn is_auth_configured(&self) -> bool {
        self.require_auth || !self.auth_credentials.is_empty()
    }

    /// Returns whether audit events are shipped to a remote collector.
    pub fn is_remote_audit_enabled(&self) -> bool {
        self.audit_log_url.is_some()
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Base URL: {}", self.base_url);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!(
            "  Default validity: {} minutes",
            self.default_validity_minutes
        );
        tracing::info!("  Max code attempts: {}", self.max_code_attempts);

        if let Some(ref url) = self.audit_log_url {
            tracing::info!(
                "  Audit log: {} (token: {})",
                url,
                mask_secret(self.audit_log_token.as_deref().unwrap_or(""))
            );
        } else {
            tracing::info!("  Audit log: local only");
        }
        tracing::info!("  Audit queue capacity: {}", self.audit_queue_capacity);

        tracing::info!(
            "  Auth: {} client(s), required: {}",
            self.auth_credentials.len(),
            self.require_auth
        );
        tracing::info!(
            "  Token signing secret: {}",
            mask_secret(&self.token_signing_secret)
        );

        if self.require_auth && self.auth_credentials.is_empty() {
            tracing::warn!("REQUIRE_AUTH is enabled but AUTH_CREDENTIALS is empty");
        }
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{name} must be a non-negative integer, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Parses `id:secret` pairs separated by commas.
///
/// Whitespace around entries is ignored. The secret is everything after the
/// first `:` and may itself contain colons.
fn parse_credentials(raw: &str) -> Result<HashMap<String, String>> {
    let mut credentials = HashMap::new();

    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (id, secret) = entry
            .split_once(':')
            .with_context(|| format!("expected 'id:secret', got '{entry}'"))?;

        if id.is_empty() || secret.is_empty() {
            anyhow::bail!("client id and secret must be non-empty in '{entry}'");
        }

        credentials.insert(id.to_string(), secret.to_string());
    }

    Ok(credentials)
}

/// Masks a secret for logging, keeping only whether it is set.
fn mask_secret(secret: &str) -> &'static str {
    if secret.is_empty() { "<unset>" } else { "***" }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable is malformed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn valid_config() -> Config {
        Config {
            listen_addr: "0.0.0.0:8080".to_string(),
            base_url: "http://localhost:8080".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            default_validity_minutes: 30,
            max_code_attempts: 10_000,
            audit_log_url: None,
            audit_log_token: None,
            audit_timeout_seconds: 3,
            audit_queue_capacity: 1_000,
            auth_credentials: HashMap::new(),
            require_auth: false,
            token_signing_secret: String::new(),
            token_ttl_seconds: 3600,
        }
    }

    #[test]
    fn test_parse_credentials() {
        let creds = parse_credentials("user1:pass123, user2:secret456").unwrap();
        assert_eq!(creds.len(), 2);
        assert_eq!(creds["user1"], "pass123");
        assert_eq!(creds["user2"], "secret456");
    }

    #[test]
    fn test_parse_credentials_secret_with_colon() {
        let creds = parse_credentials("svc:a:b:c").unwrap();
        assert_eq!(creds["svc"], "a:b:c");
    }

    #[test]
    fn test_parse_credentials_rejects_malformed() {
        assert!(parse_credentials("no-separator").is_err());
        assert!(parse_credentials(":secret").is_err());
        assert!(parse_credentials("id:").is_err());
        assert!(parse_credentials("").unwrap().is_empty());
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret(""), "<unset>");
        assert_eq!(mask_secret("hunter2"), "***");
    }

    #[test]
    fn test_config_validation() {
        let mut config = valid_config();
        assert!(config.validate().is_ok());

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.listen_addr = "8080".to_string();
        assert!(config.validate().is_err());
        config.listen_addr = "0.0.0.0:8080".to_string();

        config.base_url = "localhost:8080".to_string();
        assert!(config.validate().is_err());
        config.base_url = "https://sho.rt".to_string();

        config.max_code_attempts = 0;
        assert!(config.validate().is_err());
        config.max_code_attempts = 10_000;

        config.audit_queue_capacity = 5;
        assert!(config.validate().is_err());
        config.audit_queue_capacity = 1_000;

        config.default_validity_minutes = MAX_VALIDITY_MINUTES + 1;
        assert!(config.validate().is_err());
        config.default_validity_minutes = 30;

        config.audit_log_url = Some("ftp://logs".to_string());
        assert!(config.validate().is_err());
        config.audit_log_url = None;

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_auth_requires_signing_secret() {
        let mut config = valid_config();
        config.require_auth = true;
        assert!(config.validate().is_err());

        config.token_signing_secret = "secret".to_string();
        assert!(config.validate().is_ok());

        config.require_auth = false;
        config.token_signing_secret.clear();
        config
            .auth_credentials
            .insert("user1".to_string(), "pass123".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            for name in [
                "LISTEN",
                "BASE_URL",
                "LOG_FORMAT",
                "DEFAULT_VALIDITY_MINUTES",
                "MAX_CODE_ATTEMPTS",
                "AUDIT_LOG_URL",
                "AUDIT_QUEUE_CAPACITY",
                "AUTH_CREDENTIALS",
                "REQUIRE_AUTH",
                "TOKEN_SIGNING_SECRET",
            ] {
                env::remove_var(name);
            }
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.default_validity_minutes, 30);
        assert_eq!(config.max_code_attempts, 10_000);
        assert_eq!(config.audit_queue_capacity, 1_000);
        assert!(!config.require_auth);
        assert!(!config.is_remote_audit_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_from_env_auth_settings() {
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("AUTH_CREDENTIALS", "user1:pass123");
            env::set_var("REQUIRE_AUTH", "TRUE");
            env::set_var("TOKEN_SIGNING_SECRET", "sign");
            env::set_var("TOKEN_TTL_SECONDS", "60");
        }

        let config = load_from_env().unwrap();
        assert!(config.require_auth);
        assert_eq!(config.auth_credentials["user1"], "pass123");
        assert_eq!(config.token_ttl_seconds, 60);

        // Cleanup
        unsafe {
            env::remove_var("AUTH_CREDENTIALS");
            env::remove_var("REQUIRE_AUTH");
            env::remove_var("TOKEN_SIGNING_SECRET");
            env::remove_var("TOKEN_TTL_SECONDS");
        }
    }

    #[test]
    fn test_token_ttl_bounds() {
        let mut config = valid_config();

        config.token_ttl_seconds = MAX_TOKEN_TTL_SECONDS;
        assert!(config.validate().is_ok());

        config.token_ttl_seconds = MAX_TOKEN_TTL_SECONDS + 1;
        assert!(config.validate().is_err());

        config.token_ttl_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_huge_token_ttl() {
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("TOKEN_TTL_SECONDS", "10000000000000000");
        }

        let config = Config::from_env().unwrap();
        assert!(config.validate().is_err());
        assert!(load_from_env().is_err());

        unsafe {
            env::remove_var("TOKEN_TTL_SECONDS");
        }
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_non_numeric() {
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("MAX_CODE_ATTEMPTS", "lots");
        }

        assert!(Config::from_env().is_err());

        unsafe {
            env::remove_var("MAX_CODE_ATTEMPTS");
        }
    }
}
