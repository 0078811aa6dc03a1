//! Errors that abort the whole run.
//!
//! Failing to open a file is not an error here: it is a per-file
//! [`FileOutcome`](crate::rewrite::FileOutcome) and the run goes on.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FatalError>;

#[derive(Debug, Error)]
pub enum FatalError {
    #[error("allocation of {size} bytes failed for {}", path.display())]
    Allocation { path: PathBuf, size: usize },

    #[error("{} couldn't be read: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("short read on {}: expected {expected} bytes, got {actual}", path.display())]
    ShortRead {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },

    #[error("error writing {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("no files match {pattern:?}")]
    NoMatch { pattern: String },

    #[error("couldn't write to standard output: {0}")]
    Output(#[from] std::io::Error),
}
