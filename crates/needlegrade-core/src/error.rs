//! Record-level error types.
//!
//! A failed record is skipped with a warning and never aborts the batch;
//! batch-level failures (unreadable source, bad config) surface as `anyhow`
//! errors from the engine instead.

use std::fmt;

use thiserror::Error;

/// Which answer set of a record an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Standard,
    Response,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Standard => write!(f, "standard"),
            Side::Response => write!(f, "response"),
        }
    }
}

/// Why a single record was rejected.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The record line itself is not valid JSON or lacks the expected shape.
    #[error("malformed record: {0}")]
    Malformed(String),

    /// One side failed to parse as an answer-set mapping, or a key needed
    /// for classification is not a non-negative integer or collides with
    /// another key's position.
    #[error("{side} answer set: {message}")]
    Parse { side: Side, message: String },

    /// The record exceeds the configured maximum sequence length.
    #[error("answer set of {len} entries exceeds the configured maximum of {max}")]
    Oversized { len: usize, max: usize },
}
