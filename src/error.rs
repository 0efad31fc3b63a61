//! Error type shared by every fallible table operation.

use std::collections::TryReserveError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StrMapError {
    /// `resize` was asked for a load factor it cannot divide by.
    #[error("target load factor must be finite and positive, got {0}")]
    InvalidLoadFactor(f64),

    #[error("invalid table configuration: {0}")]
    InvalidConfig(&'static str),

    /// The allocator refused memory for a bucket array or a key copy.
    /// The table is left as it was before the call.
    #[error("failed to allocate {what}")]
    Alloc {
        what: &'static str,
        #[source]
        source: TryReserveError,
    },
}

pub type Result<T> = core::result::Result<T, StrMapError>;
