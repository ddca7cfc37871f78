//! Error types for head-position loading, plotting and rendering.

use thiserror::Error;

/// Errors produced by the head-position library.
#[derive(Debug, Error)]
pub enum HeadPosError {
    /// Reading or writing a file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value in a head-position log could not be parsed
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A data row did not have the expected number of columns
    #[error("Line {line}: expected {expected} columns, found {found}")]
    ColumnCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A trajectory needs at least one sample
    #[error("Trajectory has no samples")]
    EmptyTrajectory,

    /// Timestamps and poses differ in length
    #[error("Length mismatch: {times} timestamps but {poses} poses")]
    LengthMismatch { times: usize, poses: usize },

    /// Timestamps must be strictly increasing
    #[error("Timestamp at index {index} is not strictly increasing")]
    NonMonotonicTime { index: usize },

    /// NaN or infinite value in a sample
    #[error("Non-finite value in sample {index}")]
    NonFinite { index: usize },

    /// The plotting backend failed
    #[error("Render error: {0}")]
    Render(String),

    /// JSON (de)serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HeadPosError {
    /// Creates a parse error for a 1-based line number.
    pub fn parse(line: usize, msg: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: msg.into(),
        }
    }

    /// Creates a render error from any displayable backend error.
    pub fn render(err: impl std::fmt::Display) -> Self {
        Self::Render(err.to_string())
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HeadPosError>;
