//! Audit delivery to an external log collector.
//!
//! Provides an [`AuditSink`] trait with two implementations:
//! - [`HttpAuditSink`] - Remote collector over HTTP
//! - [`NullAuditSink`] - Local log only, for disabled audit and tests

mod http_sink;
mod null_sink;
mod service;

pub use http_sink::HttpAuditSink;
pub use null_sink::NullAuditSink;
pub use service::{AuditError, AuditResult, AuditSink};

#[cfg(test)]
pub use service::MockAuditSink;
