//! Joining the consolidated job list with executor status records

use indexmap::IndexMap;
use pipestat_cache::CacheDirectory;
use pipestat_core::{CiStage, Error, JobDescriptor, Result, StatusRecord};
use serde_json::{Map, Value};
use std::fs;
use std::io;
use tracing::debug;

/// Status records of one pipeline, bucketed by stage
///
/// All three stages exist from the moment the pipeline is created, whether or
/// not any job was registered for them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineJobs {
    stages: [Vec<StatusRecord>; 3],
}

impl PipelineJobs {
    pub fn stage(&self, stage: CiStage) -> &[StatusRecord] {
        &self.stages[stage.index()]
    }

    pub(crate) fn into_stages(self) -> impl Iterator<Item = (CiStage, Vec<StatusRecord>)> {
        CiStage::ALL.into_iter().zip(self.stages)
    }
}

/// Unrolled pipeline → stage → job tree of a run, in registration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunTree {
    /// Keys of `cache.json` other than the job list
    pub metadata: Map<String, Value>,
    pipelines: IndexMap<String, PipelineJobs>,
}

impl RunTree {
    pub fn new(metadata: Map<String, Value>) -> Self {
        Self {
            metadata,
            pipelines: IndexMap::new(),
        }
    }

    /// File a record under its pipeline and stage, creating either as needed
    pub fn insert(&mut self, record: StatusRecord) {
        let job = &record.wrapper_arguments;
        let stage = job.ci_stage.index();
        self.pipelines
            .entry(job.pipeline_name.clone())
            .or_default()
            .stages[stage]
            .push(record);
    }

    pub fn pipeline(&self, name: &str) -> Option<&PipelineJobs> {
        self.pipelines.get(name)
    }

    pub fn pipeline_names(&self) -> impl Iterator<Item = &str> {
        self.pipelines.keys().map(String::as_str)
    }

    pub(crate) fn into_parts(self) -> (Map<String, Value>, IndexMap<String, PipelineJobs>) {
        (self.metadata, self.pipelines)
    }
}

/// Builds a [`RunTree`] from the files in a cache directory
#[derive(Debug, Clone)]
pub struct StatusAggregator {
    cache: CacheDirectory,
}

impl StatusAggregator {
    pub fn new(cache: CacheDirectory) -> Self {
        Self { cache }
    }

    /// Read `cache.json` and the status record of every job listed in it
    ///
    /// `cache.json` decides which jobs exist. A job whose status file is
    /// missing has not finished (or not started) and is recorded as incomplete.
    pub fn build(&self) -> Result<RunTree> {
        let cache_file = self.cache.read_cache_file()?;
        let mut tree = RunTree::new(cache_file.metadata);
        for job in cache_file.jobs {
            let record = self.read_status(job)?;
            tree.insert(record);
        }
        Ok(tree)
    }

    fn read_status(&self, job: JobDescriptor) -> Result<StatusRecord> {
        let path = self.cache.status_file(&job.job_id);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(job_id = %job.job_id, "No status record yet, job is incomplete");
                return Ok(StatusRecord::placeholder(job));
            }
            Err(e) => return Err(Error::file_system(&path, "read status file", e)),
        };
        serde_json::from_str(&raw).map_err(|e| Error::malformed_status(&path, e))
    }
}
