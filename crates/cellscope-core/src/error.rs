//! Error types for cellscope-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while addressing or reading cells
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid cell address format
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// A range token whose corners do not parse as coordinates
    #[error("Malformed range: {0}")]
    MalformedRange(String),

    /// Row index out of bounds
    #[error("Row index {0} out of bounds (max: {1})")]
    RowOutOfBounds(u32, u32),

    /// Column index out of bounds
    #[error("Column index {0} out of bounds (max: {1})")]
    ColumnOutOfBounds(u16, u16),

    /// Address does not exist on the active sheet
    #[error("Unknown cell: {0}")]
    UnknownCell(String),

    /// A formula chain references itself, directly or transitively
    #[error("Circular reference: {0}")]
    CircularReference(String),

    /// Dependency chain deeper than the configured limit
    #[error("Dependency chain exceeded depth limit of {0}")]
    DepthLimitExceeded(usize),
}
