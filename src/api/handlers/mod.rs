//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod access;
pub mod health;
pub mod login;
pub mod shorten;

pub use access::access_handler;
pub use health::health_handler;
pub use login::login_handler;
pub use shorten::shorten_handler;
