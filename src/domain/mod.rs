//! Domain layer containing business entities and contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`audit_event`] - Audit event model and the non-blocking [`audit_event::AuditLogger`]
//! - [`audit_worker`] - Background audit delivery worker
//!
//! # Design Principles
//!
//! - Repository traits define contracts implemented by the infrastructure layer
//! - Business logic is encapsulated in services (see [`crate::application::services`])
//!
//! # Audit Flow
//!
//! 1. A service calls [`audit_event::AuditLogger`] while handling a request
//! 2. The [`audit_event::AuditEvent`] is pushed onto a bounded channel (never blocks)
//! 3. [`audit_worker::run_audit_worker`] hands events to the configured sink
//! 4. Sink failures are logged and dropped

pub mod audit_event;
pub mod audit_worker;
pub mod entities;
pub mod repositories;
