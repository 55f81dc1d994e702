use pipestat_cache::{CacheDirectory, CacheLocator};
use pipestat_core::{Result, ResultExt};
use std::path::PathBuf;

/// Runtime settings gathered from the command line
#[derive(Debug, Clone)]
pub struct Settings {
    /// Where the upward search for a cache pointer starts
    pub start_dir: PathBuf,
    /// Directory whose subtree is searched if no ancestor has a pointer
    pub working_dir: PathBuf,
}

impl Settings {
    pub fn from_cli(start_dir: Option<PathBuf>) -> Result<Self> {
        let working_dir =
            std::env::current_dir().context("failed to determine the working directory")?;
        Ok(Self {
            start_dir: start_dir.unwrap_or_else(|| working_dir.clone()),
            working_dir,
        })
    }

    pub fn locate_cache(&self) -> Result<CacheDirectory> {
        CacheLocator::new(&self.start_dir)
            .search_root(&self.working_dir)
            .locate()
    }
}
