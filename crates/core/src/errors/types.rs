//! Core error type definitions

use std::path::PathBuf;

/// Result type alias for pipestat operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for pipestat operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No cache pointer anywhere in the search space resolved to a directory
    #[error(
        "could not find a pointer to a pipestat cache from '{}'; did you forget to run `pipestat init`?",
        .searched_from.display()
    )]
    CacheNotFound { searched_from: PathBuf },

    /// File system operations
    #[error("file system {operation} operation failed for '{}': {source}", .path.display())]
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// A per-invocation job file could not be parsed into a job descriptor
    #[error("malformed job file '{}': {source}", .path.display())]
    MalformedJob {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A status record written by the executor could not be parsed
    #[error("malformed status file '{}': {source}", .path.display())]
    MalformedStatus {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A complete status record is missing a field the executor must always write
    #[error("status record for job '{job_id}' is complete but has no '{field}'\n{diagnostic}")]
    StatusInvariant {
        job_id: String,
        field: &'static str,
        diagnostic: String,
    },

    /// Configuration errors
    #[error("configuration error: {message}")]
    Configuration { message: String },
}
