//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization; request shape
//! checks use `validator`.

pub mod health;
pub mod login;
pub mod shorten;
pub mod stats;
