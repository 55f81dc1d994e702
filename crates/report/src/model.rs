//! The rolled-up run snapshot
//!
//! Statuses on these types are derived by [`crate::rollup`]; there is no way
//! to set them from outside this crate.

use chrono::{DateTime, Utc};
use pipestat_core::{CiStage, PipelineStatus, RunStatus, StageStatus, StatusRecord};
use pipestat_utils::{elapsed_seconds, format_duration, parse_timestamp};
use serde::Serialize;
use serde_json::{Map, Value};

/// A job's status record together with its derived duration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobEntry {
    #[serde(flatten)]
    record: StatusRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration: Option<u64>,
    duration_str: Option<String>,
}

impl JobEntry {
    pub fn new(record: StatusRecord) -> Self {
        let duration = match (&record.start_time, &record.end_time) {
            (Some(start), Some(end)) => elapsed_seconds(start, end),
            _ => None,
        };
        Self {
            duration_str: duration.map(format_duration),
            duration,
            record,
        }
    }

    pub fn record(&self) -> &StatusRecord {
        &self.record
    }

    pub fn is_complete(&self) -> bool {
        self.record.complete
    }

    /// Whole seconds between start and end, when both are known
    pub fn duration(&self) -> Option<u64> {
        self.duration
    }

    /// Duration formatted as `HHh MMm SSs` with leading zero units omitted
    pub fn duration_str(&self) -> Option<&str> {
        self.duration_str.as_deref()
    }

    pub(crate) fn start_time(&self) -> Option<DateTime<Utc>> {
        self.record.start_time.as_deref().and_then(parse_timestamp)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stage {
    pub(crate) name: CiStage,
    pub(crate) url: String,
    pub(crate) jobs: Vec<JobEntry>,
    pub(crate) complete: bool,
    pub(crate) progress: u8,
    pub(crate) status: StageStatus,
}

impl Stage {
    pub fn name(&self) -> CiStage {
        self.name
    }

    /// Location of the stage's artifacts, relative to the report root
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn jobs(&self) -> &[JobEntry] {
        &self.jobs
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Percentage of complete jobs, rounded down
    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn status(&self) -> StageStatus {
        self.status
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pipeline {
    pub(crate) name: String,
    pub(crate) url: String,
    pub(crate) ci_stages: Vec<Stage>,
    pub(crate) status: PipelineStatus,
}

impl Pipeline {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Location of the pipeline's page, relative to the report root
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Always the three CI stages, in build, test, report order
    pub fn stages(&self) -> &[Stage] {
        &self.ci_stages
    }

    pub fn stage(&self, stage: CiStage) -> &Stage {
        &self.ci_stages[stage.index()]
    }

    pub fn status(&self) -> PipelineStatus {
        self.status
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Run {
    pub(crate) pipelines: Vec<Pipeline>,
    pub(crate) status: RunStatus,
    #[serde(flatten)]
    pub(crate) metadata: Map<String, Value>,
}

impl Run {
    /// Pipelines ordered with failures first, then in-progress, then successes
    pub fn pipelines(&self) -> &[Pipeline] {
        &self.pipelines
    }

    pub fn pipeline(&self, name: &str) -> Option<&Pipeline> {
        self.pipelines.iter().find(|p| p.name == name)
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// Run metadata carried over from `cache.json`
    pub fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }

    /// Every job in the run, in display order
    pub fn jobs(&self) -> impl Iterator<Item = (&Pipeline, &JobEntry)> {
        self.pipelines.iter().flat_map(|pipeline| {
            pipeline
                .ci_stages
                .iter()
                .flat_map(move |stage| stage.jobs.iter().map(move |job| (pipeline, job)))
        })
    }
}
