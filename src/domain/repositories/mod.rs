//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access behind the Repository pattern. Concrete
//! implementations live in `crate::infrastructure::persistence`.
//!
//! # Available Repositories
//!
//! - [`AliasRepository`] - Alias creation, resolution and click counting
//! - [`TokenRepository`] - Bearer tokens issued at login
//!
//! # Testing
//!
//! Mock implementations are generated via `mockall` under `cfg(test)`. See
//! `tests/repository_alias.rs` for behaviour of the in-memory store.

pub mod alias_repository;
pub mod token_repository;

pub use alias_repository::AliasRepository;
pub use token_repository::TokenRepository;

#[cfg(test)]
pub use alias_repository::MockAliasRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
