//! Error type for the fallible boundaries of the library.
//!
//! Editing operations never fail: out-of-range input is ignored. Errors
//! only arise when options, snapshots or commands arrive as JSON.

use thiserror::Error;

/// Errors raised while loading options, snapshots or commands.
#[derive(Error, Debug)]
pub enum TabError {
    /// Malformed JSON or a shape serde could not map.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Options that would make the coordinate math meaningless.
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// A snapshot whose contents break a tab invariant.
    #[error("Invalid tab: {0}")]
    Invariant(String),
}

pub type Result<T> = std::result::Result<T, TabError>;
