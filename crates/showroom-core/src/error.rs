//! Error types for Showroom page behaviors
//!
//! None of these ever reach the visitor. Callers in the page layer log them
//! and carry on with the feature disabled or the default applied.

use thiserror::Error;

/// Main error type for Showroom operations
#[derive(Error, Debug)]
pub enum ShowroomError {
    /// Theme identifier outside the supported set
    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    /// Preference storage unavailable or rejected the operation
    #[error("Storage error: {0}")]
    Storage(String),

    /// Settings override could not be parsed
    #[error("Settings error: {0}")]
    Settings(#[from] serde_json::Error),

    /// Log filter rejected or a global subscriber already installed
    #[error("Logging error: {0}")]
    Logging(String),
}

/// Result type alias using ShowroomError
pub type ShowroomResult<T> = Result<T, ShowroomError>;
