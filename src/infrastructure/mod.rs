//! Infrastructure layer for storage and external integrations.
//!
//! # Modules
//!
//! - [`audit`] - Audit sinks (remote HTTP collector and local-only)
//! - [`persistence`] - In-memory repository implementations

pub mod audit;
pub mod persistence;
