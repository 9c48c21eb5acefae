//! Audit sink posting events to a remote log collector.

use super::service::{AuditError, AuditResult, AuditSink};
use crate::domain::audit_event::AuditEvent;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::debug;

/// Number of extra delivery attempts after the first failure.
const MAX_RETRIES: usize = 2;

/// JSON body accepted by the log collector.
#[derive(Debug, Serialize)]
struct AuditPayload<'a> {
    stack: &'static str,
    level: &'static str,
    package: &'a str,
    message: &'a str,
}

impl<'a> From<&'a AuditEvent> for AuditPayload<'a> {
    fn from(event: &'a AuditEvent) -> Self {
        Self {
            stack: "backend",
            level: event.level.as_str(),
            package: event.package,
            message: event.truncated_message(),
        }
    }
}

/// Posts each event as JSON to a fixed collector URL.
///
/// Transport errors and `5xx` responses are retried with jittered
/// exponential backoff; `4xx` responses are reported immediately.
pub struct HttpAuditSink {
    client: reqwest::Client,
    endpoint: String,
    bearer_token: Option<String>,
}

impl HttpAuditSink {
    /// Creates a sink for `endpoint` with a per-request `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        endpoint: impl Into<String>,
        bearer_token: Option<String>,
        timeout: Duration,
    ) -> AuditResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AuditError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            bearer_token,
        })
    }

    async fn post_once(&self, payload: &AuditPayload<'_>) -> AuditResult<()> {
        let mut request = self.client.post(&self.endpoint).json(payload);
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AuditError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(AuditError::Rejected(status.as_u16()))
        }
    }
}

fn is_retryable(err: &AuditError) -> bool {
    match err {
        AuditError::Transport(_) => true,
        AuditError::Rejected(status) => *status >= 500,
    }
}

#[async_trait]
impl AuditSink for HttpAuditSink {
    async fn send(&self, event: &AuditEvent) -> AuditResult<()> {
        let payload = AuditPayload::from(event);
        let strategy = ExponentialBackoff::from_millis(50)
            .max_delay(Duration::from_secs(1))
            .map(jitter)
            .take(MAX_RETRIES);

        RetryIf::start(strategy, || self.post_once(&payload), is_retryable).await?;

        debug!(package = event.package, "Audit event delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audit_event::{AuditLevel, MAX_AUDIT_MESSAGE_CHARS};

    #[test]
    fn test_payload_truncates_message() {
        let event = AuditEvent::new(AuditLevel::Info, "handler", "z".repeat(200));
        let payload = AuditPayload::from(&event);

        assert_eq!(payload.stack, "backend");
        assert_eq!(payload.level, "info");
        assert_eq!(payload.package, "handler");
        assert_eq!(payload.message.chars().count(), MAX_AUDIT_MESSAGE_CHARS);
    }

    #[test]
    fn test_payload_json_shape() {
        let event = AuditEvent::new(AuditLevel::Warn, "route", "Link expired: abc");
        let json = serde_json::to_value(AuditPayload::from(&event)).unwrap();

        assert_eq!(json["stack"], "backend");
        assert_eq!(json["level"], "warn");
        assert_eq!(json["package"], "route");
        assert_eq!(json["message"], "Link expired: abc");
    }

    #[test]
    fn test_retry_policy() {
        assert!(is_retryable(&AuditError::Transport("reset".into())));
        assert!(is_retryable(&AuditError::Rejected(503)));
        assert!(!is_retryable(&AuditError::Rejected(401)));
    }

    #[tokio::test]
    async fn test_unreachable_collector_reports_error() {
        let sink = HttpAuditSink::new(
            "http://127.0.0.1:9/logs",
            Some("token".to_string()),
            Duration::from_millis(200),
        )
        .unwrap();

        let event = AuditEvent::new(AuditLevel::Error, "handler", "Invalid URL");
        assert!(matches!(
            sink.send(&event).await,
            Err(AuditError::Transport(_))
        ));
    }
}
