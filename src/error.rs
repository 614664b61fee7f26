//! Error types for report output.
//!
//! Reporting either completes (console + file) or fails with one of these.
//! Nothing is retried and there is no console-only fallback.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BulkError {
    /// The report file could not be created; nothing was printed
    #[error("failed to create report file {}: {source}", path.display())]
    CreateReport {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing or flushing the report file failed part way through
    #[error("failed to write report file {}: {source}", path.display())]
    WriteReport {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write report to console: {0}")]
    Console(#[source] io::Error),
}

pub type BulkResult<T> = Result<T, BulkError>;
