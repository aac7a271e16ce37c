//! Error types for ClipCast.

use thiserror::Error;

/// Main error type for ClipCast operations.
///
/// Interactive edit operations never produce errors — invalid edits are
/// silent no-ops. Errors are reserved for the persistence and media
/// boundaries, where I/O and format problems genuinely occur.
#[derive(Error, Debug)]
pub enum ClipcastError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Media error: {0}")]
    Media(String),

    #[error("Timeline error: {0}")]
    Timeline(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for ClipCast operations.
pub type Result<T> = std::result::Result<T, ClipcastError>;
