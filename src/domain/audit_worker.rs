//! Background worker draining the audit queue.

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::domain::audit_event::AuditEvent;
use crate::infrastructure::audit::AuditSink;

/// Ships queued audit events to `sink` until every sender is dropped.
///
/// Delivery failures are logged and swallowed; the worker never stops on a
/// sink error.
pub async fn run_audit_worker(mut rx: mpsc::Receiver<AuditEvent>, sink: Arc<dyn AuditSink>) {
    while let Some(event) = rx.recv().await {
        if let Err(e) = sink.send(&event).await {
            warn!(
                level = event.level.as_str(),
                package = event.package,
                "Audit delivery failed: {}",
                e
            );
        }
    }

    debug!("Audit queue closed, worker exiting");
}
