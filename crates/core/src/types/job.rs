//! Job descriptors as written by `add-job` and merged into `cache.json`

use super::ci_stage::CiStage;
use crate::constants::STATS_GROUP_TAG;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;
use uuid::Uuid;

/// Immutable description of one command-execution unit
///
/// Fields this crate does not interpret are kept in `extra` so that a
/// descriptor survives consolidation byte-for-byte in meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDescriptor {
    pub job_id: String,
    pub pipeline_name: String,
    pub ci_stage: CiStage,
    pub command: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    /// Timeout in seconds, enforced by the executor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JobDescriptor {
    /// Start building a descriptor for `command` in the given pipeline stage
    pub fn builder(
        pipeline_name: impl Into<String>,
        ci_stage: CiStage,
        command: impl Into<String>,
    ) -> JobDescriptorBuilder {
        JobDescriptorBuilder {
            job_id: None,
            pipeline_name: pipeline_name.into(),
            ci_stage,
            command: command.into(),
            args: Vec::new(),
            timeout: None,
            tags: Vec::new(),
            cwd: None,
            description: None,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or_default()
    }

    /// Name of the stats group this job belongs to, if tagged with one
    ///
    /// When several `stats-group:` tags are present the last one wins, even
    /// if its name is empty; an empty name leaves the job ungrouped.
    pub fn stats_group(&self) -> Option<&str> {
        let tag = self
            .tags()
            .iter()
            .rfind(|tag| tag.split(':').next() == Some(STATS_GROUP_TAG))?;
        tag.split(':').nth(1).filter(|name| !name.is_empty())
    }
}

/// Builder for [`JobDescriptor`]; assigns a random job id unless one is given
#[derive(Debug, Clone)]
pub struct JobDescriptorBuilder {
    job_id: Option<String>,
    pipeline_name: String,
    ci_stage: CiStage,
    command: String,
    args: Vec<String>,
    timeout: Option<u64>,
    tags: Vec<String>,
    cwd: Option<PathBuf>,
    description: Option<String>,
    inputs: Vec<String>,
    outputs: Vec<String>,
}

impl JobDescriptorBuilder {
    pub fn job_id(mut self, job_id: impl Into<String>) -> Self {
        self.job_id = Some(job_id.into());
        self
    }

    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn timeout(mut self, seconds: u64) -> Self {
        self.timeout = Some(seconds);
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn inputs(mut self, inputs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.inputs = inputs.into_iter().map(Into::into).collect();
        self
    }

    pub fn outputs(mut self, outputs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.outputs = outputs.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> JobDescriptor {
        let non_empty = |v: Vec<String>| if v.is_empty() { None } else { Some(v) };
        JobDescriptor {
            job_id: self
                .job_id
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            pipeline_name: self.pipeline_name,
            ci_stage: self.ci_stage,
            command: self.command,
            args: self.args,
            timeout: self.timeout,
            tags: non_empty(self.tags),
            cwd: self.cwd,
            description: self.description,
            inputs: non_empty(self.inputs),
            outputs: non_empty(self.outputs),
            extra: Map::new(),
        }
    }
}
