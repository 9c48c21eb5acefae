//! Audit sink trait and error types.

use async_trait::async_trait;

use crate::domain::audit_event::AuditEvent;

/// Errors that can occur while delivering an audit event.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("Audit transport error: {0}")]
    Transport(String),

    #[error("Audit collector rejected event with status {0}")]
    Rejected(u16),
}

/// Result type for audit delivery.
pub type AuditResult<T> = Result<T, AuditError>;

/// Destination for audit events.
///
/// Called only from the audit worker, never on the request path. Errors are
/// reported back so the worker can log them; they never reach a client.
///
/// # Implementations
///
/// - [`crate::infrastructure::audit::HttpAuditSink`] - Remote log collector over HTTP
/// - [`crate::infrastructure::audit::NullAuditSink`] - Local `tracing` output only
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Delivers one event, truncating its message to the sink limit.
    async fn send(&self, event: &AuditEvent) -> AuditResult<()>;
}
