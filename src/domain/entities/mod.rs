//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures; the rules that create and resolve them
//! live in the store and service layers.
//!
//! # Entity Types
//!
//! - [`Alias`] - A short code mapped to a target URL with an expiry
//! - [`NewAlias`] - Input for creating an alias
//! - [`IssuedToken`] - A bearer token handed out by the login endpoint

pub mod alias;
pub mod token;

pub use alias::{Alias, DEFAULT_VALIDITY_MINUTES, MAX_VALIDITY_MINUTES, NewAlias};
pub use token::IssuedToken;
