//! Domain entities representing core business objects.

pub mod token;
pub mod user;

// Re-export commonly used types
pub use token::{
    Claims, IssuedRefreshToken, RefreshToken, RevocationReason, TokenPair, TokenState,
};
pub use user::{User, UserRole};
