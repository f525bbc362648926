//! Value objects representing immutable domain concepts.

pub mod auth_context;
pub mod auth_response;

// Re-export commonly used types
pub use auth_context::AuthContext;
pub use auth_response::AuthResponse;
