//! Deriving stage, pipeline and run statuses and their display order
//!
//! Precedence is strict at every level: `fail` beats `fail_ignored` beats
//! `success` for stages, and `fail` beats `in_progress` beats `success` for
//! pipelines and runs. Statuses are never downgraded once a more severe one
//! has been seen.

use crate::aggregator::RunTree;
use crate::model::{JobEntry, Pipeline, Run, Stage};
use chrono::{DateTime, Utc};
use pipestat_core::{CiStage, Error, PipelineStatus, Result, RunStatus, StageStatus, StatusRecord};
use tracing::{debug, warn};

/// Keys of the snapshot that are always derived, never taken from run metadata
const DERIVED_KEYS: [&str; 2] = ["pipelines", "status"];

/// Compute every status in `tree` and order it for display
pub fn roll_up(tree: RunTree) -> Result<Run> {
    let (mut metadata, pipelines) = tree.into_parts();
    for key in DERIVED_KEYS {
        if metadata.remove(key).is_some() {
            warn!(key, "Ignoring run metadata key that is computed by the rollup");
        }
    }

    let mut pipelines = pipelines
        .into_iter()
        .map(|(name, jobs)| {
            let ci_stages = jobs
                .into_stages()
                .map(|(stage, records)| roll_up_stage(&name, stage, records))
                .collect::<Result<Vec<_>>>()?;
            let status = pipeline_status(&ci_stages);
            debug!(pipeline = %name, ?status, "Rolled up pipeline");
            Ok(Pipeline {
                url: format!("pipelines/{name}/index.html"),
                name,
                ci_stages,
                status,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    pipelines.sort_by(|a, b| {
        a.status
            .severity()
            .cmp(&b.status.severity())
            .then_with(|| a.name.cmp(&b.name))
    });

    Ok(Run {
        status: run_status(&pipelines),
        pipelines,
        metadata,
    })
}

fn roll_up_stage(pipeline: &str, stage: CiStage, records: Vec<StatusRecord>) -> Result<Stage> {
    let mut jobs: Vec<JobEntry> = records.into_iter().map(JobEntry::new).collect();
    order_jobs(&mut jobs);

    let status = stage_status(&jobs)?;
    let total = jobs.len();
    let done = jobs.iter().filter(|job| job.is_complete()).count();
    let (complete, progress) = if total == 0 {
        (true, 100)
    } else {
        (done == total, (done * 100 / total) as u8)
    };

    Ok(Stage {
        name: stage,
        url: format!("artifacts/{pipeline}/{stage}/"),
        jobs,
        complete,
        progress,
        status,
    })
}

/// Status of a stage from its complete jobs
///
/// A non-zero wrapper return code means the supervising process failed and
/// makes the stage `fail`. A failed or timed-out user command only makes it
/// `fail_ignored`. A complete record lacking a field the decision needs is
/// an executor bug, reported with the stage's full state.
pub fn stage_status(jobs: &[JobEntry]) -> Result<StageStatus> {
    let mut status = StageStatus::Success;

    for record in jobs.iter().map(JobEntry::record).filter(|r| r.complete) {
        let missing = |field: &'static str| {
            Error::status_invariant(record.job_id(), field, dump_stage(jobs))
        };

        let wrapper = record
            .wrapper_return_code
            .ok_or_else(|| missing("wrapper_return_code"))?;
        if wrapper != 0 {
            status = StageStatus::Fail;
            continue;
        }

        let command = record
            .command_return_code
            .ok_or_else(|| missing("command_return_code"))?;
        let failed = command != 0
            || record
                .timeout_reached
                .ok_or_else(|| missing("timeout_reached"))?;
        if failed && status == StageStatus::Success {
            status = StageStatus::FailIgnored;
        }
    }

    Ok(status)
}

/// `fail` if any stage failed, even an ignored failure; otherwise
/// `in_progress` while any stage is incomplete
pub fn pipeline_status(stages: &[Stage]) -> PipelineStatus {
    if stages.iter().any(|stage| stage.status.is_failure()) {
        PipelineStatus::Fail
    } else if stages.iter().any(|stage| !stage.complete) {
        PipelineStatus::InProgress
    } else {
        PipelineStatus::Success
    }
}

pub fn run_status(pipelines: &[Pipeline]) -> RunStatus {
    let any = |status: PipelineStatus| pipelines.iter().any(|p| p.status == status);
    if any(PipelineStatus::Fail) {
        RunStatus::Fail
    } else if any(PipelineStatus::InProgress) {
        RunStatus::InProgress
    } else {
        RunStatus::Success
    }
}

/// Incomplete jobs first, then complete jobs by ascending start time, then
/// complete jobs without a usable start time. Stable, so jobs that compare
/// equal keep registration order.
pub fn order_jobs(jobs: &mut [JobEntry]) {
    jobs.sort_by_key(order_key);
}

fn order_key(job: &JobEntry) -> (u8, Option<DateTime<Utc>>) {
    if !job.is_complete() {
        return (0, None);
    }
    match job.start_time() {
        Some(start) => (1, Some(start)),
        None => (2, None),
    }
}

fn dump_stage(jobs: &[JobEntry]) -> String {
    serde_json::to_string_pretty(jobs)
        .unwrap_or_else(|e| format!("<stage could not be serialized: {e}>"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipestat_core::JobDescriptor;

    fn complete(id: &str, start: Option<&str>) -> JobEntry {
        let mut record = StatusRecord::placeholder(
            JobDescriptor::builder("foo", CiStage::Build, "true")
                .job_id(id)
                .build(),
        );
        record.complete = true;
        record.wrapper_return_code = Some(0);
        record.command_return_code = Some(0);
        record.timeout_reached = Some(false);
        record.start_time = start.map(str::to_string);
        JobEntry::new(record)
    }

    fn incomplete(id: &str) -> JobEntry {
        JobEntry::new(StatusRecord::placeholder(
            JobDescriptor::builder("foo", CiStage::Build, "true")
                .job_id(id)
                .build(),
        ))
    }

    fn ids(jobs: &[JobEntry]) -> Vec<&str> {
        jobs.iter().map(|j| j.record().job_id()).collect()
    }

    #[test]
    fn test_order_jobs() {
        let mut jobs = vec![
            complete("late", Some("2021-01-01T10:00:09Z")),
            complete("untimed", None),
            incomplete("pending-1"),
            complete("early", Some("2021-01-01T10:00:01Z")),
            incomplete("pending-2"),
        ];
        order_jobs(&mut jobs);
        assert_eq!(
            ids(&jobs),
            ["pending-1", "pending-2", "early", "late", "untimed"]
        );
    }

    #[test]
    fn test_incomplete_jobs_do_not_affect_status() {
        let mut jobs = vec![incomplete("a")];
        let mut record = jobs[0].record().clone();
        record.wrapper_return_code = Some(1);
        jobs.push(JobEntry::new(record));
        assert_eq!(stage_status(&jobs).unwrap(), StageStatus::Success);
    }

    #[test]
    fn test_fail_is_never_downgraded() {
        let mut failed = complete("a", None).record().clone();
        failed.wrapper_return_code = Some(2);
        let mut ignored = complete("b", None).record().clone();
        ignored.command_return_code = Some(1);
        let jobs = vec![JobEntry::new(failed), JobEntry::new(ignored), complete("c", None)];
        assert_eq!(stage_status(&jobs).unwrap(), StageStatus::Fail);
    }

    #[test]
    fn test_timeout_is_an_ignored_failure() {
        let mut timed_out = complete("a", None).record().clone();
        timed_out.timeout_reached = Some(true);
        let jobs = vec![complete("b", None), JobEntry::new(timed_out)];
        assert_eq!(stage_status(&jobs).unwrap(), StageStatus::FailIgnored);
    }

    #[test]
    fn test_missing_field_is_an_invariant_violation() {
        let mut record = complete("a", None).record().clone();
        record.wrapper_return_code = None;
        let err = stage_status(&[JobEntry::new(record)]).unwrap_err();
        match err {
            Error::StatusInvariant {
                job_id,
                field,
                diagnostic,
            } => {
                assert_eq!(job_id, "a");
                assert_eq!(field, "wrapper_return_code");
                assert!(diagnostic.contains("\"job_id\": \"a\""));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_command_code_not_required_after_wrapper_failure() {
        let mut record = complete("a", None).record().clone();
        record.wrapper_return_code = Some(1);
        record.command_return_code = None;
        record.timeout_reached = None;
        assert_eq!(
            stage_status(&[JobEntry::new(record)]).unwrap(),
            StageStatus::Fail
        );
    }
}
