//! Registration and consolidation of job descriptors
//!
//! Every registration writes its own `jobs/<job_id>.json`, so any number of
//! processes can register concurrently without locking. Consolidation merges
//! those files into `cache.json`; it must run once, after every registration
//! for the run has finished.

use crate::layout::CacheDirectory;
use pipestat_core::{CacheFile, Error, JobDescriptor, Result};
use pipestat_utils::write_json_atomic;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct JobRegistry {
    cache: CacheDirectory,
}

impl JobRegistry {
    pub fn new(cache: CacheDirectory) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &CacheDirectory {
        &self.cache
    }

    /// Persist one descriptor as its own job file and return the file's path
    pub fn register(&self, job: &JobDescriptor) -> Result<PathBuf> {
        validate_job_id(&job.job_id)?;
        let path = self.cache.job_file(&job.job_id);
        write_json_atomic(&path, job)?;
        debug!(
            job_id = %job.job_id,
            pipeline = %job.pipeline_name,
            stage = %job.ci_stage,
            "Registered job"
        );
        Ok(path)
    }

    /// Parse every pending job file, in file-name order
    ///
    /// Fails on the first file that is not a valid descriptor.
    pub fn pending_jobs(&self) -> Result<Vec<JobDescriptor>> {
        let jobs_dir = self.cache.jobs_dir();
        let mut files = match fs::read_dir(&jobs_dir) {
            Ok(entries) => entries
                .map(|entry| entry.map(|e| e.path()))
                .collect::<io::Result<Vec<_>>>()
                .map_err(|e| Error::file_system(&jobs_dir, "list job files", e))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(Error::file_system(&jobs_dir, "list job files", e)),
        };
        files.retain(|path| is_job_file(path));
        files.sort();

        files.iter().map(|path| read_job_file(path)).collect()
    }

    /// Merge every pending job file into `cache.json`
    ///
    /// All job files are parsed before anything is written, so a malformed
    /// file leaves `cache.json` exactly as it was. Keys of `cache.json` other
    /// than `jobs` are preserved.
    pub fn consolidate(&self) -> Result<CacheFile> {
        let jobs = self.pending_jobs()?;

        let cache_path = self.cache.cache_file();
        let mut cache_file = if cache_path.exists() {
            self.cache.read_cache_file()?
        } else {
            CacheFile::default()
        };
        cache_file.jobs = jobs;

        write_json_atomic(&cache_path, &cache_file)?;
        info!(
            jobs = cache_file.jobs.len(),
            cache = %cache_path.display(),
            "Consolidated job files into cache"
        );
        Ok(cache_file)
    }
}

fn is_job_file(path: &Path) -> bool {
    path.is_file() && path.extension().is_some_and(|ext| ext == "json")
}

fn read_job_file(path: &Path) -> Result<JobDescriptor> {
    let raw =
        fs::read_to_string(path).map_err(|e| Error::file_system(path, "read job file", e))?;
    serde_json::from_str(&raw).map_err(|e| Error::malformed_job(path, e))
}

/// Job ids become file names, so they must be a single path component
fn validate_job_id(job_id: &str) -> Result<()> {
    let invalid = job_id.is_empty()
        || job_id == "."
        || job_id == ".."
        || job_id.contains(['/', '\\', '\0']);
    if invalid {
        return Err(Error::configuration(format!(
            "invalid job id '{job_id}': must be a non-empty file name"
        )));
    }
    Ok(())
}
