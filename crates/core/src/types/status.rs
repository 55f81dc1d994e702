//! Per-job status records and the statuses rolled up from them

use super::job::JobDescriptor;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Status of one job as written by the executor to `status/<job_id>.json`
///
/// Read-only to pipestat. A job without a status file is represented by
/// [`StatusRecord::placeholder`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub complete: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrapper_return_code: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command_return_code: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_reached: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stdout: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stderr: Option<Vec<String>>,
    pub wrapper_arguments: JobDescriptor,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StatusRecord {
    /// Record for a job the executor has not reported on yet
    pub fn placeholder(descriptor: JobDescriptor) -> Self {
        Self {
            complete: false,
            wrapper_return_code: None,
            command_return_code: None,
            timeout_reached: None,
            start_time: None,
            end_time: None,
            stdout: None,
            stderr: None,
            wrapper_arguments: descriptor,
            extra: Map::new(),
        }
    }

    pub fn job_id(&self) -> &str {
        &self.wrapper_arguments.job_id
    }
}

/// Rolled-up status of a stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    #[default]
    Success,
    /// A user command failed or timed out, but its wrapper succeeded
    FailIgnored,
    Fail,
}

impl StageStatus {
    /// Ordinal used for sorting; lower is more severe
    pub fn severity(self) -> u8 {
        match self {
            StageStatus::Fail => 0,
            StageStatus::FailIgnored => 1,
            StageStatus::Success => 2,
        }
    }

    pub fn is_failure(self) -> bool {
        matches!(self, StageStatus::Fail | StageStatus::FailIgnored)
    }
}

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StageStatus::Success => "success",
            StageStatus::FailIgnored => "fail_ignored",
            StageStatus::Fail => "fail",
        })
    }
}

/// Rolled-up status of a pipeline or of a whole run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    #[default]
    Success,
    InProgress,
    Fail,
}

pub type RunStatus = PipelineStatus;

impl PipelineStatus {
    /// Ordinal used for sorting; lower is more severe
    pub fn severity(self) -> u8 {
        match self {
            PipelineStatus::Fail => 0,
            PipelineStatus::InProgress => 1,
            PipelineStatus::Success => 2,
        }
    }
}

impl fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PipelineStatus::Success => "success",
            PipelineStatus::InProgress => "in_progress",
            PipelineStatus::Fail => "fail",
        })
    }
}
