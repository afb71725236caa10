//! Errors surfaced by `ChainTable` and `KeyCursor`.

use thiserror::Error;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum TableError {
    /// Rejected construction parameters.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// Bucket array or key storage could not be obtained.
    #[error("allocation failed")]
    Allocation,
    /// No entry with the requested key.
    #[error("key not found")]
    NotFound,
    /// The cursor was created from a different table.
    #[error("cursor belongs to a different table")]
    WrongTable,
    /// The table was mutated after the cursor was created.
    #[error("table was modified while a cursor was open")]
    Invalidated,
}

impl From<std::collections::TryReserveError> for TableError {
    fn from(_: std::collections::TryReserveError) -> Self {
        TableError::Allocation
    }
}
