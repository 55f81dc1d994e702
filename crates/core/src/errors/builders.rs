//! Builder methods for creating errors with context

use super::types::Error;
use std::path::PathBuf;

// Helper methods for creating errors with context
impl Error {
    /// Create a cache-not-found error
    #[must_use]
    pub fn cache_not_found(searched_from: impl Into<PathBuf>) -> Self {
        Error::CacheNotFound {
            searched_from: searched_from.into(),
        }
    }

    /// Create a file system error with context
    #[must_use]
    pub fn file_system(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Error::FileSystem {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }

    #[must_use]
    pub fn malformed_job(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Error::MalformedJob {
            path: path.into(),
            source,
        }
    }

    #[must_use]
    pub fn malformed_status(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Error::MalformedStatus {
            path: path.into(),
            source,
        }
    }

    /// Create a status invariant violation carrying a dump of the offending state
    #[must_use]
    pub fn status_invariant(
        job_id: impl Into<String>,
        field: &'static str,
        diagnostic: impl Into<String>,
    ) -> Self {
        Error::StatusInvariant {
            job_id: job_id.into(),
            field,
            diagnostic: diagnostic.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Whether the error means no cache could be located
    pub fn is_cache_not_found(&self) -> bool {
        matches!(self, Error::CacheNotFound { .. })
    }
}
