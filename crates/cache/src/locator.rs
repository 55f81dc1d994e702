//! Locating the cache directory through pointer files
//!
//! The search first walks from the start directory up to the filesystem root,
//! then falls back to every directory below the search root (the current
//! working directory unless overridden). The first pointer whose target exists
//! wins. Stale pointers and unreadable candidates never abort the search.

use crate::layout::CacheDirectory;
use pipestat_core::{Error, Result, CACHE_POINTER};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};
use walkdir::WalkDir;

/// Locate the cache for `start_dir`, falling back to the current directory tree
pub fn locate(start_dir: &Path) -> Result<CacheDirectory> {
    CacheLocator::new(start_dir).locate()
}

#[derive(Debug, Clone)]
pub struct CacheLocator {
    start_dir: PathBuf,
    search_root: Option<PathBuf>,
}

impl CacheLocator {
    pub fn new(start_dir: impl Into<PathBuf>) -> Self {
        Self {
            start_dir: start_dir.into(),
            search_root: None,
        }
    }

    /// Directory whose subtree is searched when no ancestor holds a pointer
    pub fn search_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.search_root = Some(root.into());
        self
    }

    pub fn locate(&self) -> Result<CacheDirectory> {
        let start = self
            .start_dir
            .canonicalize()
            .unwrap_or_else(|_| self.start_dir.clone());

        for dir in start.ancestors() {
            if let Some(cache) = probe(dir) {
                return Ok(CacheDirectory::new(cache));
            }
        }

        let root = match &self.search_root {
            Some(root) => root.clone(),
            None => std::env::current_dir()
                .map_err(|e| Error::file_system(".", "read current directory", e))?,
        };
        debug!(root = %root.display(), "No pointer above start directory, searching below");

        let subdirs = WalkDir::new(&root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.file_type().is_dir());

        for entry in subdirs {
            match entry {
                Ok(entry) => {
                    if let Some(cache) = probe(entry.path()) {
                        return Ok(CacheDirectory::new(cache));
                    }
                }
                Err(e) if is_permission_denied(&e) => debug!("Permission denied, skipping: {e}"),
                Err(e) => warn!("Skipping directory that could not be read: {e}"),
            }
        }

        error!(
            "Could not find a pointer to a pipestat cache. Did you forget to run `pipestat init`?"
        );
        Err(Error::cache_not_found(start))
    }
}

/// Check `dir` for a pointer and return its target if the target exists
fn probe(dir: &Path) -> Option<PathBuf> {
    debug!(dir = %dir.display(), "Searching for cache pointer");
    let pointer = dir.join(CACHE_POINTER);

    let target = match read_pointer(&pointer) {
        Ok(Some(target)) => target,
        Ok(None) => return None,
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            debug!(pointer = %pointer.display(), "Permission denied, skipping");
            return None;
        }
        Err(e) => {
            warn!(pointer = %pointer.display(), "Could not read cache pointer: {e}");
            return None;
        }
    };

    debug!(pointer = %pointer.display(), "Found a cache pointer");
    if target.as_os_str().is_empty() {
        warn!(pointer = %pointer.display(), "Cache pointer is empty. Continuing search...");
        return None;
    }
    let target = if target.is_relative() {
        dir.join(target)
    } else {
        target
    };

    if target.exists() {
        debug!(cache = %target.display(), "Located cache");
        Some(target)
    } else {
        warn!(
            "Found a cache pointer at {} pointing to {}, but that directory does not exist. Continuing search...",
            pointer.display(),
            target.display()
        );
        None
    }
}

fn is_permission_denied(error: &walkdir::Error) -> bool {
    error
        .io_error()
        .is_some_and(|e| e.kind() == io::ErrorKind::PermissionDenied)
}

/// Read a pointer file; `Ok(None)` when there is no pointer at all
fn read_pointer(pointer: &Path) -> io::Result<Option<PathBuf>> {
    match fs::read_to_string(pointer) {
        Ok(content) => Ok(Some(PathBuf::from(content.trim()))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_pointer_trims_content() {
        let temp_dir = TempDir::new().unwrap();
        let pointer = temp_dir.path().join(CACHE_POINTER);
        fs::write(&pointer, "  /some/cache\n").unwrap();
        assert_eq!(
            read_pointer(&pointer).unwrap(),
            Some(PathBuf::from("/some/cache"))
        );
    }

    #[test]
    fn test_missing_pointer_is_not_an_error() {
        let temp_dir = TempDir::new().unwrap();
        assert!(read_pointer(&temp_dir.path().join(CACHE_POINTER))
            .unwrap()
            .is_none());
        assert!(probe(temp_dir.path()).is_none());
    }

    #[test]
    fn test_relative_pointer_resolves_against_its_directory() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("cache")).unwrap();
        fs::write(temp_dir.path().join(CACHE_POINTER), "cache\n").unwrap();
        assert_eq!(probe(temp_dir.path()), Some(temp_dir.path().join("cache")));
    }

    #[test]
    fn test_empty_pointer_is_stale() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CACHE_POINTER), "\n").unwrap();
        assert!(probe(temp_dir.path()).is_none());
    }
}
