//! Audit sink that only writes to the local log.

use super::service::{AuditResult, AuditSink};
use crate::domain::audit_event::AuditEvent;
use async_trait::async_trait;
use tracing::debug;

/// An audit sink with no remote collector.
///
/// Used when `AUDIT_LOG_URL` is not configured and in tests. Events are
/// emitted at `debug` level so they stay out of normal output.
pub struct NullAuditSink;

impl NullAuditSink {
    pub fn new() -> Self {
        debug!("Using NullAuditSink (remote audit disabled)");
        Self
    }
}

impl Default for NullAuditSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditSink for NullAuditSink {
    async fn send(&self, event: &AuditEvent) -> AuditResult<()> {
        debug!(
            level = event.level.as_str(),
            package = event.package,
            "audit: {}",
            event.truncated_message()
        );
        Ok(())
    }
}
