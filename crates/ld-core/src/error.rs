//! Error types for the lucky-draw workspace

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum LdError {
    #[error("card game not initialized")]
    CardGameNotInitialized,

    #[error("card game not finished revealing ({revealed} of {total} cards revealed)")]
    CardGameNotRevealed { revealed: usize, total: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias
pub type LdResult<T> = Result<T, LdError>;
