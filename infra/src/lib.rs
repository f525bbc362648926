//! # Infrastructure Layer
//!
//! Concrete implementations of the `sb_core` repository traits.
//!
//! - **Database**: MySQL implementations using SQLx. Conditional writes are
//!   `UPDATE ... WHERE version = ?` statements inside transactions.
//! - **Memory**: in-process stores with the same conditional write semantics,
//!   used by API tests and local runs without a database.

// Re-export core types for convenience
pub use sb_core::errors::*;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// In-memory repository implementations
pub mod memory;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
