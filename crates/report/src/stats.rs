//! Runtime statistics grouped by `stats-group:<name>` tags

use crate::model::Run;
use serde::Serialize;
use std::collections::BTreeMap;

/// Runtime of one job in a stats group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsRecord {
    pub pipeline: String,
    pub duration: u64,
}

/// Jobs sharing a stats group, across pipelines
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsGroup {
    pub name: String,
    /// `name` reduced to characters that are safe in a file name
    pub id: String,
    pub jobs: Vec<StatsRecord>,
}

/// Group timed jobs by their stats group, ordered by group name
///
/// Groups with fewer than two timed jobs are left out since there is nothing
/// to compare them against.
pub fn stats_groups(run: &Run) -> Vec<StatsGroup> {
    let mut groups: BTreeMap<&str, Vec<StatsRecord>> = BTreeMap::new();

    for (pipeline, job) in run.jobs() {
        let Some(duration) = job.duration() else {
            continue;
        };
        let Some(group) = job.record().wrapper_arguments.stats_group() else {
            continue;
        };
        groups.entry(group).or_default().push(StatsRecord {
            pipeline: pipeline.name().to_string(),
            duration,
        });
    }

    groups
        .into_iter()
        .filter(|(_, jobs)| jobs.len() >= 2)
        .map(|(name, jobs)| StatsGroup {
            name: name.to_string(),
            id: to_id(name),
            jobs,
        })
        .collect()
}

/// Replace every character outside `[-a-zA-Z0-9.]` with `_`
pub fn to_id(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_id() {
        assert_eq!(to_id("proof-run.v2"), "proof-run.v2");
        assert_eq!(to_id("cbmc proofs/slow"), "cbmc_proofs_slow");
        assert_eq!(to_id("ü"), "_");
    }
}
