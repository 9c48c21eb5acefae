//! Alias creation and access service.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::json;
use tracing::debug;

use crate::domain::audit_event::AuditLogger;
use crate::domain::entities::{Alias, NewAlias};
use crate::domain::repositories::AliasRepository;
use crate::error::AppError;
use crate::utils::code_generator::validate_requested_code;
use crate::utils::url_validator::validate_url;

const AUDIT_CREATE: &str = "handler";
const AUDIT_ACCESS: &str = "route";

/// Formats a timestamp as ISO-8601 / RFC 3339 in UTC with millisecond precision.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// A freshly created alias together with its public short link.
#[derive(Debug, Clone)]
pub struct ShortLink {
    pub alias: Alias,
    pub shortlink: String,
}

impl ShortLink {
    pub fn expiry(&self) -> String {
        format_timestamp(self.alias.expires_at)
    }
}

/// Click statistics for one alias, captured at access time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasStats {
    pub total_clicks: u64,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub accessed_at: DateTime<Utc>,
}

/// Result of a successful access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessOutcome {
    Redirect { target_url: String },
    Stats(AliasStats),
}

/// Service for shortening URLs and accessing the resulting aliases.
///
/// Validates input before touching the store, records one click per
/// successful access, and reports every outcome to the audit log.
pub struct ShortenerService<R: AliasRepository> {
    repository: Arc<R>,
    base_url: String,
    default_validity_minutes: u32,
    audit: AuditLogger,
}

impl<R: AliasRepository> ShortenerService<R> {
    /// Creates a new shortener service.
    ///
    /// Short links are rendered as `<base_url>/shorturl/<code>`.
    pub fn new(
        repository: Arc<R>,
        base_url: impl Into<String>,
        default_validity_minutes: u32,
        audit: AuditLogger,
    ) -> Self {
        Self {
            repository,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            default_validity_minutes,
            audit,
        }
    }

    /// Shortens `url` into a new alias.
    ///
    /// # Arguments
    ///
    /// - `url` - Target URL; required
    /// - `validity_minutes` - Lifetime of the alias; service default when absent
    /// - `shortcode` - Preferred code; replaced by a generated one if taken
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] if `url` is missing or malformed (store untouched)
    /// - [`AppError::InvalidCodeFormat`] if `shortcode` fails the pattern (store untouched)
    /// - Any error returned by [`AliasRepository::create`]
    pub async fn shorten(
        &self,
        url: Option<String>,
        validity_minutes: Option<u32>,
        shortcode: Option<String>,
    ) -> Result<ShortLink, AppError> {
        let url = url.unwrap_or_default();

        if let Err(e) = validate_url(&url) {
            self.audit.error(AUDIT_CREATE, format!("Invalid URL: {url}"));
            return Err(AppError::invalid_url(
                "Invalid URL",
                json!({ "url": url, "reason": e.to_string() }),
            ));
        }

        if let Some(code) = &shortcode
            && let Err(e) = validate_requested_code(code)
        {
            self.audit.warn(AUDIT_CREATE, format!("Invalid shortcode: {code}"));
            return Err(e);
        }

        let new_alias = NewAlias::new(
            url,
            Some(validity_minutes.unwrap_or(self.default_validity_minutes)),
        )
        .with_requested_code(shortcode);

        let alias = self.repository.create(new_alias, Utc::now()).await?;

        self.audit.info(
            AUDIT_CREATE,
            format!("URL shortened for {}", alias.target_url),
        );
        debug!(code = %alias.code, "Alias created");

        Ok(ShortLink {
            shortlink: self.get_short_url(&alias.code),
            alias,
        })
    }

    /// Resolves `code` and counts the access.
    ///
    /// Returns the redirect target, or statistics when `want_stats` is set.
    /// A click is recorded only when the alias resolves.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the code does not exist
    /// - [`AppError::Expired`] if the alias is past its expiry
    pub async fn access(&self, code: &str, want_stats: bool) -> Result<AccessOutcome, AppError> {
        let now = Utc::now();

        let alias = match self.repository.resolve(code, now).await {
            Ok(alias) => alias,
            Err(e @ AppError::NotFound { .. }) => {
                self.audit
                    .error(AUDIT_ACCESS, format!("Shortcode not found: {code}"));
                return Err(e);
            }
            Err(e @ AppError::Expired { .. }) => {
                self.audit.warn(AUDIT_ACCESS, format!("Link expired: {code}"));
                return Err(e);
            }
            Err(e) => return Err(e),
        };

        let total_clicks = self.repository.record_click(code).await?;

        if want_stats {
            self.audit
                .info(AUDIT_ACCESS, format!("Stats for shortcode: {code}"));

            return Ok(AccessOutcome::Stats(AliasStats {
                total_clicks,
                original_url: alias.target_url,
                created_at: alias.created_at,
                expires_at: alias.expires_at,
                accessed_at: now,
            }));
        }

        self.audit.info(
            AUDIT_ACCESS,
            format!("Redirected: {code} to {}", alias.target_url),
        );

        Ok(AccessOutcome::Redirect {
            target_url: alias.target_url,
        })
    }

    /// Builds the public short link for `code`.
    pub fn get_short_url(&self, code: &str) -> String {
        format!("{}/shorturl/{}", self.base_url, code)
    }

    /// Number of aliases held by the store.
    pub async fn alias_count(&self) -> Result<usize, AppError> {
        self.repository.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audit_event::{AuditEvent, AuditLevel};
    use crate::domain::repositories::MockAliasRepository;
    use chrono::Duration;
    use tokio::sync::mpsc;

    fn service(
        repo: MockAliasRepository,
    ) -> (ShortenerService<MockAliasRepository>, mpsc::Receiver<AuditEvent>) {
        let (tx, rx) = mpsc::channel(16);
        let service = ShortenerService::new(
            Arc::new(repo),
            "http://localhost:8080/",
            30,
            AuditLogger::new(tx),
        );
        (service, rx)
    }

    fn alias(code: &str, url: &str, created_at: DateTime<Utc>, validity: u32) -> Alias {
        Alias::new(code.to_string(), url.to_string(), created_at, validity)
    }

    #[tokio::test]
    async fn test_shorten_success() {
        let mut repo = MockAliasRepository::new();
        repo.expect_create()
            .withf(|new_alias, _| {
                new_alias.target_url == "https://example.com"
                    && new_alias.validity_minutes == 30
                    && new_alias.requested_code.is_none()
            })
            .times(1)
            .returning(|new_alias, now| {
                Ok(Alias::new(
                    "abc123".to_string(),
                    new_alias.target_url,
                    now,
                    new_alias.validity_minutes,
                ))
            });

        let (service, mut rx) = service(repo);
        let link = service
            .shorten(Some("https://example.com".to_string()), None, None)
            .await
            .unwrap();

        assert_eq!(link.shortlink, "http://localhost:8080/shorturl/abc123");
        assert_eq!(link.alias.expires_at - link.alias.created_at, Duration::minutes(30));
        assert!(link.expiry().ends_with('Z'));

        let event = rx.try_recv().unwrap();
        assert_eq!(event.level, AuditLevel::Info);
        assert_eq!(event.package, "handler");
    }

    #[tokio::test]
    async fn test_shorten_passes_validity_and_code() {
        let mut repo = MockAliasRepository::new();
        repo.expect_create()
            .withf(|new_alias, _| {
                new_alias.validity_minutes == 5
                    && new_alias.requested_code.as_deref() == Some("Promo1")
            })
            .times(1)
            .returning(|new_alias, now| {
                Ok(Alias::new(
                    new_alias.requested_code.unwrap(),
                    new_alias.target_url,
                    now,
                    new_alias.validity_minutes,
                ))
            });

        let (service, _rx) = service(repo);
        let link = service
            .shorten(
                Some("https://example.com".to_string()),
                Some(5),
                Some("Promo1".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(link.alias.code, "Promo1");
    }

    #[tokio::test]
    async fn test_shorten_invalid_url_fails_fast() {
        let mut repo = MockAliasRepository::new();
        repo.expect_create().times(0);

        let (service, mut rx) = service(repo);
        let result = service
            .shorten(Some("not a url".to_string()), None, None)
            .await;

        assert!(matches!(result, Err(AppError::InvalidUrl { .. })));
        let event = rx.try_recv().unwrap();
        assert_eq!(event.level, AuditLevel::Error);
        assert_eq!(event.message, "Invalid URL: not a url");
    }

    #[tokio::test]
    async fn test_shorten_missing_url() {
        let mut repo = MockAliasRepository::new();
        repo.expect_create().times(0);

        let (service, _rx) = service(repo);
        let result = service.shorten(None, None, None).await;

        assert!(matches!(result, Err(AppError::InvalidUrl { .. })));
    }

    #[tokio::test]
    async fn test_shorten_invalid_code_fails_fast() {
        let mut repo = MockAliasRepository::new();
        repo.expect_create().times(0);

        let (service, mut rx) = service(repo);
        let result = service
            .shorten(
                Some("https://example.com".to_string()),
                None,
                Some("a*b".to_string()),
            )
            .await;

        assert!(matches!(result, Err(AppError::InvalidCodeFormat { .. })));
        assert_eq!(rx.try_recv().unwrap().level, AuditLevel::Warn);
    }

    #[tokio::test]
    async fn test_shorten_logs_untruncated_message() {
        let long_url = format!("https://example.com/{}", "p".repeat(100));
        let mut repo = MockAliasRepository::new();
        repo.expect_create().times(1).returning(|new_alias, now| {
            Ok(Alias::new(
                "abc123".to_string(),
                new_alias.target_url,
                now,
                new_alias.validity_minutes,
            ))
        });

        let (service, mut rx) = service(repo);
        service
            .shorten(Some(long_url.clone()), None, None)
            .await
            .unwrap();

        let event = rx.try_recv().unwrap();
        assert_eq!(event.message, format!("URL shortened for {long_url}"));
    }

    #[tokio::test]
    async fn test_access_redirect_records_click() {
        let mut repo = MockAliasRepository::new();
        repo.expect_resolve()
            .times(1)
            .returning(|code, now| Ok(alias(code, "https://example.com/target", now, 30)));
        repo.expect_record_click()
            .withf(|code| code == "abc123")
            .times(1)
            .returning(|_| Ok(1));

        let (service, _rx) = service(repo);
        let outcome = service.access("abc123", false).await.unwrap();

        assert_eq!(
            outcome,
            AccessOutcome::Redirect {
                target_url: "https://example.com/target".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_access_stats_reports_true_creation_date() {
        let created_at = Utc::now() - Duration::minutes(7);
        let mut repo = MockAliasRepository::new();
        repo.expect_resolve()
            .times(1)
            .returning(move |code, _| Ok(alias(code, "https://example.com", created_at, 30)));
        repo.expect_record_click().times(1).returning(|_| Ok(4));

        let (service, _rx) = service(repo);
        let outcome = service.access("abc123", true).await.unwrap();

        let AccessOutcome::Stats(stats) = outcome else {
            panic!("expected stats");
        };
        assert_eq!(stats.total_clicks, 4);
        assert_eq!(stats.created_at, created_at);
        assert_eq!(stats.expires_at, created_at + Duration::minutes(30));
        assert_eq!(stats.original_url, "https://example.com");
    }

    #[tokio::test]
    async fn test_access_not_found_records_nothing() {
        let mut repo = MockAliasRepository::new();
        repo.expect_resolve()
            .times(1)
            .returning(|code, _| {
                Err(AppError::not_found(
                    "Shortcode not found",
                    json!({ "code": code }),
                ))
            });
        repo.expect_record_click().times(0);

        let (service, mut rx) = service(repo);
        let result = service.access("missing", false).await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
        assert_eq!(rx.try_recv().unwrap().level, AuditLevel::Error);
    }

    #[tokio::test]
    async fn test_access_expired_records_nothing() {
        let mut repo = MockAliasRepository::new();
        repo.expect_resolve()
            .times(1)
            .returning(|code, _| Err(AppError::expired("Link expired", json!({ "code": code }))));
        repo.expect_record_click().times(0);

        let (service, mut rx) = service(repo);
        let result = service.access("old", true).await;

        assert!(matches!(result, Err(AppError::Expired { .. })));
        assert_eq!(rx.try_recv().unwrap().level, AuditLevel::Warn);
    }

    #[tokio::test]
    async fn test_audit_failure_does_not_fail_request() {
        let mut repo = MockAliasRepository::new();
        repo.expect_resolve()
            .returning(|code, now| Ok(alias(code, "https://example.com", now, 30)));
        repo.expect_record_click().returning(|_| Ok(1));

        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let service = ShortenerService::new(
            Arc::new(repo),
            "http://localhost:8080",
            30,
            AuditLogger::new(tx),
        );

        assert!(service.access("abc123", false).await.is_ok());
    }

    #[test]
    fn test_format_timestamp_is_iso8601_utc() {
        use chrono::TimeZone;
        let ts = Utc.with_ymd_and_hms(2025, 7, 5, 10, 30, 0).unwrap();
        assert_eq!(format_timestamp(ts), "2025-07-05T10:30:00.000Z");
    }
}
