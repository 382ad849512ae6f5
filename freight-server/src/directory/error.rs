//! Node directory error types.

use std::path::PathBuf;

/// Errors that can occur when reading from a node directory.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// Dataset file could not be read
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Dataset JSON could not be parsed
    #[error("dataset parse error: {message}")]
    Json { message: String },

    /// A dataset row could not be turned into a transport node
    #[error("invalid {table} record {id}: {reason}")]
    InvalidRecord {
        table: &'static str,
        id: String,
        reason: String,
    },

    /// The backing store is not reachable
    #[error("node directory unavailable: {0}")]
    Unavailable(String),
}
