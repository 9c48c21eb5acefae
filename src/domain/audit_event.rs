//! Audit event model for fire-and-forget audit logging.

use serde::Serialize;
use tokio::sync::mpsc;
use tracing::debug;

/// Maximum number of characters of an audit message that leave the process.
pub const MAX_AUDIT_MESSAGE_CHARS: usize = 48;

/// Severity of an audit event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditLevel {
    Info,
    Warn,
    Error,
}

impl AuditLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// A single audit record passed from request handling to the audit worker.
///
/// The message is kept whole here; sinks apply the
/// [`MAX_AUDIT_MESSAGE_CHARS`] limit through [`AuditEvent::truncated_message`].
///
/// # Usage Flow
///
/// 1. Created by [`AuditLogger`] inside a service call
/// 2. Sent to a bounded channel (non-blocking, dropped when full)
/// 3. Shipped by [`crate::domain::audit_worker::run_audit_worker`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    pub level: AuditLevel,
    pub package: &'static str,
    pub message: String,
}

impl AuditEvent {
    pub fn new(level: AuditLevel, package: &'static str, message: impl Into<String>) -> Self {
        Self {
            level,
            package,
            message: message.into(),
        }
    }

    /// Returns the message cut to at most [`MAX_AUDIT_MESSAGE_CHARS`] characters.
    ///
    /// Cuts on a character boundary, never inside a multi-byte character.
    pub fn truncated_message(&self) -> &str {
        truncate_chars(&self.message, MAX_AUDIT_MESSAGE_CHARS)
    }
}

/// Returns the longest prefix of `s` holding at most `max` characters.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Handle used by services to emit audit events without waiting on delivery.
///
/// Cloning is cheap. A logger built with [`AuditLogger::disabled`] discards
/// every event.
#[derive(Debug, Clone)]
pub struct AuditLogger {
    tx: Option<mpsc::Sender<AuditEvent>>,
}

impl AuditLogger {
    pub fn new(tx: mpsc::Sender<AuditEvent>) -> Self {
        Self { tx: Some(tx) }
    }

    pub fn disabled() -> Self {
        Self { tx: None }
    }

    pub fn info(&self, package: &'static str, message: impl Into<String>) {
        self.emit(AuditEvent::new(AuditLevel::Info, package, message));
    }

    pub fn warn(&self, package: &'static str, message: impl Into<String>) {
        self.emit(AuditEvent::new(AuditLevel::Warn, package, message));
    }

    pub fn error(&self, package: &'static str, message: impl Into<String>) {
        self.emit(AuditEvent::new(AuditLevel::Error, package, message));
    }

    /// Queues an event; a full or closed queue drops it.
    pub fn emit(&self, event: AuditEvent) {
        let Some(tx) = &self.tx else {
            return;
        };

        if let Err(e) = tx.try_send(event) {
            debug!("Audit event dropped: {}", e);
        }
    }

    /// Returns true while the audit worker is still receiving.
    pub fn is_open(&self) -> bool {
        self.tx.as_ref().is_some_and(|tx| !tx.is_closed())
    }

    /// Remaining queue capacity, `None` when disabled.
    pub fn capacity(&self) -> Option<usize> {
        self.tx.as_ref().map(|tx| tx.capacity())
    }
}
