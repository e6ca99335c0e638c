//! Error types returned by the TIDE log writer.

use thiserror::Error;

/// Errors that can occur while writing a TIDE log.
#[derive(Error, Debug)]
pub enum TideError {
    /// The underlying [`ByteSink`](crate::sink::ByteSink) reported a short write, a failed
    /// seek, or a failed flush.
    #[error("I/O failure: {0}")]
    IoFailed(#[from] std::io::Error),

    /// A variable-length field exceeded the capacity of its size prefix.
    #[error("field '{field}' is {actual} bytes, which exceeds the max of {max}")]
    FieldTooLarge {
        field: &'static str,
        actual: usize,
        max: usize,
    },

    /// An argument was invalid for a reason other than field size, e.g. a [`Channel`](crate::channel::Channel)
    /// handle that wasn't returned by this writer.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// The writer has already been closed (or was poisoned by an earlier I/O failure) and can
    /// no longer accept writes.
    #[error("writer has already been finalized")]
    WriterFinalized,
}

/// Convenience alias for results returned by this crate.
pub type TideResult<T> = Result<T, TideError>;
