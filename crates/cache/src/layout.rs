//! Paths inside a cache directory

use pipestat_core::{
    CacheFile, Error, Result, ARTIFACTS_DIR, CACHE_FILE, HTML_DIR, JOBS_DIR, REPORT_DATA_DIR,
    RUN_FILE, STATUS_DIR,
};
use std::fs;
use std::path::{Path, PathBuf};

/// Root of the on-disk state for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheDirectory {
    root: PathBuf,
}

impl CacheDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The consolidated job list
    pub fn cache_file(&self) -> PathBuf {
        self.root.join(CACHE_FILE)
    }

    /// The rolled-up run snapshot handed to the renderer
    pub fn run_file(&self) -> PathBuf {
        self.root.join(RUN_FILE)
    }

    pub fn jobs_dir(&self) -> PathBuf {
        self.root.join(JOBS_DIR)
    }

    pub fn job_file(&self, job_id: &str) -> PathBuf {
        self.jobs_dir().join(format!("{job_id}.json"))
    }

    pub fn status_dir(&self) -> PathBuf {
        self.root.join(STATUS_DIR)
    }

    pub fn status_file(&self, job_id: &str) -> PathBuf {
        self.status_dir().join(format!("{job_id}.json"))
    }

    pub fn artifacts_dir(&self) -> PathBuf {
        self.root.join(ARTIFACTS_DIR)
    }

    pub fn report_data_dir(&self) -> PathBuf {
        self.root.join(REPORT_DATA_DIR)
    }

    pub fn html_dir(&self) -> PathBuf {
        self.root.join(HTML_DIR)
    }

    /// Create the cache root and every well-known subdirectory
    pub fn create_layout(&self) -> Result<()> {
        for dir in [
            self.root.clone(),
            self.jobs_dir(),
            self.status_dir(),
            self.artifacts_dir(),
            self.report_data_dir(),
            self.html_dir(),
        ] {
            fs::create_dir_all(&dir)
                .map_err(|e| Error::file_system(&dir, "create directory", e))?;
        }
        Ok(())
    }

    /// Read and parse `cache.json`
    pub fn read_cache_file(&self) -> Result<CacheFile> {
        let path = self.cache_file();
        let raw = fs::read_to_string(&path)
            .map_err(|e| Error::file_system(&path, "read cache file", e))?;
        serde_json::from_str(&raw).map_err(|e| Error::Json {
            message: format!("failed to parse '{}': {e}", path.display()),
            source: e,
        })
    }
}
