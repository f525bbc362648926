//! In-memory repository implementations
//!
//! Selected with `server.in_memory_store = true`; state is lost on restart.

mod refresh_token_repository;
mod user_repository;

pub use refresh_token_repository::InMemoryRefreshTokenRepository;
pub use user_repository::InMemoryUserRepository;
