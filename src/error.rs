//! Error types for fallible table operations.

use std::collections::TryReserveError;
use thiserror::Error;

/// The allocator could not satisfy a request (key copy, chain slot or bucket
/// array). The table is left exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("symbol table allocation failed: {0}")]
pub struct AllocError(#[from] TryReserveError);

/// Why a `put` left the table unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PutError {
    /// A binding for the key already exists; the old value is kept.
    #[error("key is already bound")]
    DuplicateKey,
    #[error(transparent)]
    OutOfMemory(#[from] AllocError),
}

impl From<TryReserveError> for PutError {
    fn from(e: TryReserveError) -> Self {
        PutError::OutOfMemory(AllocError(e))
    }
}
