//! Attaching a human-readable reason to foreign errors

use super::types::{Error, Result};

pub trait ResultExt<T> {
    /// Convert the error into an [`Error::Configuration`] prefixed with `reason`
    fn context(self, reason: &str) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn context(self, reason: &str) -> Result<T> {
        self.map_err(|e| Error::configuration(format!("{reason}: {}", e.into())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_context_prefixes_reason() {
        let res: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let msg = res
            .context("failed to determine the working directory")
            .unwrap_err()
            .to_string();
        assert!(msg.starts_with(
            "configuration error: failed to determine the working directory:"
        ));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn test_cache_not_found_message_mentions_init() {
        let err = Error::cache_not_found("/work/project");
        assert!(err.is_cache_not_found());
        assert!(err.to_string().contains("pipestat init"));
        assert!(err.to_string().contains("/work/project"));
    }
}
