//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for bonus pool operations
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum BonusPoolError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BonusPoolError {
    /// Whether the error came from a contract, pool or directory accessor.
    ///
    /// Accessor failures must reach the caller untouched: they are never
    /// folded into an empty or zero bonus result.
    pub fn is_accessor_failure(&self) -> bool {
        matches!(self, Self::Database(_) | Self::Network(_) | Self::Timeout(_))
    }
}

/// Result type alias for bonus pool operations
pub type Result<T> = std::result::Result<T, BonusPoolError>;
