use std::collections::TryReserveError;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// The aligner configuration is rejected before any alignment is run.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// The input sequences are rejected.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The number of optimal alignments does not fit in a signed size.
    #[error("number of optimal alignments is larger than {}", isize::MAX)]
    PathCountOverflow,
    /// An allocation failed; all partially allocated state has been released.
    #[error("out of memory")]
    OutOfMemory,
    /// A state that well-formed builds can never reach.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<TryReserveError> for Error {
    fn from(_: TryReserveError) -> Self {
        Error::OutOfMemory
    }
}
