//! In-memory repository implementations.
//!
//! State lives only for the life of the process; nothing is written to disk.

mod memory_alias_repository;
mod memory_token_repository;

pub use memory_alias_repository::{DEFAULT_MAX_CODE_ATTEMPTS, InMemoryAliasRepository};
pub use memory_token_repository::InMemoryTokenRepository;
