#![allow(dead_code)]

use pipestat_cache::{CacheDirectory, JobRegistry};
use pipestat_core::{CiStage, JobDescriptor};
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

/// A cache directory with a `cache.json`, ready for jobs and status records
pub struct Fixture {
    pub _temp_dir: TempDir,
    pub cache: CacheDirectory,
    pub registry: JobRegistry,
}

impl Fixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let cache = CacheDirectory::new(temp_dir.path().join("run"));
        cache.create_layout().unwrap();
        fs::write(
            cache.cache_file(),
            r#"{"project": "demo", "run_id": "r1", "jobs": []}"#,
        )
        .unwrap();
        Self {
            registry: JobRegistry::new(cache.clone()),
            cache,
            _temp_dir: temp_dir,
        }
    }

    pub fn add_job(
        &self,
        id: &str,
        pipeline: &str,
        stage: CiStage,
        tags: &[&str],
    ) -> JobDescriptor {
        let mut builder = JobDescriptor::builder(pipeline, stage, "make").job_id(id);
        for tag in tags {
            builder = builder.tag(*tag);
        }
        let job = builder.build();
        self.registry.register(&job).unwrap();
        job
    }

    pub fn finish(&self, job: &JobDescriptor, wrapper: i32, command: i32, start: &str, end: &str) {
        self.write_status(
            job,
            json!({
                "complete": true,
                "wrapper_return_code": wrapper,
                "command_return_code": command,
                "timeout_reached": false,
                "start_time": start,
                "end_time": end,
                "stdout": [],
                "wrapper_arguments": job,
            }),
        );
    }

    pub fn start(&self, job: &JobDescriptor, start: &str) {
        self.write_status(
            job,
            json!({
                "complete": false,
                "start_time": start,
                "wrapper_arguments": job,
            }),
        );
    }

    pub fn write_status(&self, job: &JobDescriptor, status: Value) {
        fs::write(
            self.cache.status_file(&job.job_id),
            serde_json::to_string_pretty(&status).unwrap(),
        )
        .unwrap();
    }

    pub fn consolidate(&self) {
        self.registry.consolidate().unwrap();
    }
}
