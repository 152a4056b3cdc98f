//! Error types for evolving graph operations.

use thiserror::Error;

/// Errors that can occur in evograph.
///
/// An unreachable target is not an error: path queries report it as `Ok(None)`.
#[derive(Error, Debug)]
pub enum Error {
    /// Node label not present in the graph.
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// Timestamp value not present in the graph.
    #[error("timestamp not found: {0}")]
    TimestampNotFound(String),

    /// Node id beyond the current index size.
    #[error("node id {id} out of range (len {len})")]
    NodeOutOfRange { id: usize, len: usize },

    /// Timestamp id beyond the current index size.
    #[error("timestamp id {id} out of range (len {len})")]
    TimestampOutOfRange { id: usize, len: usize },

    /// A new timestamp that does not exceed every timestamp already seen.
    #[error("timestamp {timestamp} arrived after later timestamp {latest}")]
    TimestampOutOfOrder { timestamp: String, latest: String },

    /// A walk count no longer fits in `u32`.
    #[error("walk count overflows u32 after {steps} timestamps")]
    WalkCountOverflow { steps: usize },

    /// Attribute graphs require at least one attribute per edge.
    #[error("attribute edges need at least one attribute")]
    EmptyAttributes,

    /// Attribute columns cannot be named without a header row.
    #[error("attribute CSV input requires a header row")]
    MissingHeader,

    /// Malformed field in an input record.
    #[error("parse error on line {line}: {message}")]
    Parse { line: u64, message: String },

    /// CSV reader error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for evograph.
pub type Result<T> = std::result::Result<T, Error>;
