//! Error types for loading recorded histories.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while materializing a [`History`](crate::History).
///
/// Only transport and shape problems live here. Structural problems inside a
/// well-formed log (a site missing from its own sitemap, a dangling cause) are
/// reported by [`History::check_integrity`](crate::History::check_integrity).
#[derive(Error, Debug)]
pub enum HistoryError {
    /// The log file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading from a stream failed.
    #[error("failed to read history stream: {0}")]
    Read(#[from] std::io::Error),

    /// The log is not a JSON array of snapshots.
    #[error("malformed history: {0}")]
    Json(#[from] serde_json::Error),

    /// A JSON Lines log has a bad record.
    #[error("malformed snapshot on line {line}: {source}")]
    JsonLine {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}
