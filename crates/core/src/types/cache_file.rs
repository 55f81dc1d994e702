use super::job::JobDescriptor;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The consolidated `cache.json` document
///
/// Besides the job list it carries run metadata written by `init`
/// (project, run id, version, start time); unknown keys are preserved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheFile {
    #[serde(default)]
    pub jobs: Vec<JobDescriptor>,
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl CacheFile {
    pub fn project(&self) -> Option<&str> {
        self.metadata.get("project").and_then(Value::as_str)
    }

    pub fn run_id(&self) -> Option<&str> {
        self.metadata.get("run_id").and_then(Value::as_str)
    }
}
