//! Read-only access to a finished run for the renderer

use crate::aggregator::StatusAggregator;
use crate::model::Run;
use crate::rollup::roll_up;
use crate::stats::{stats_groups, StatsGroup};
use pipestat_cache::CacheDirectory;
use pipestat_core::Result;
use pipestat_utils::write_json_atomic;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct ReportDataProvider {
    run: Run,
}

impl ReportDataProvider {
    pub fn new(run: Run) -> Self {
        Self { run }
    }

    /// Aggregate and roll up the run anchored at `cache`
    pub fn from_cache(cache: &CacheDirectory) -> Result<Self> {
        let tree = StatusAggregator::new(cache.clone()).build()?;
        Ok(Self::new(roll_up(tree)?))
    }

    pub fn run(&self) -> &Run {
        &self.run
    }

    pub fn stats_groups(&self) -> Vec<StatsGroup> {
        stats_groups(&self.run)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.run)?)
    }

    /// Persist the snapshot as `run.json` in the cache directory
    pub fn write_snapshot(&self, cache: &CacheDirectory) -> Result<PathBuf> {
        let path = cache.run_file();
        write_json_atomic(&path, &self.run)?;
        info!(run = %path.display(), status = ?self.run.status(), "Wrote run snapshot");
        Ok(path)
    }
}
