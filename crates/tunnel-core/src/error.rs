use std::io;
use thiserror::Error;

/// Failures the binaries need to distinguish from a plain `io::Error` when
/// deciding whether to retry, back off, or abort the process.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to bind listener on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to dial {addr}: {source}")]
    Dial {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("CONN_COUNT must be a positive integer, got {value:?}")]
    InvalidConnCount { value: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
