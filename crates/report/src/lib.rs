//! Aggregation and rollup of a pipestat run
//!
//! [`StatusAggregator`] joins the consolidated job list with the executor's
//! status records into a pipeline → stage → job tree, [`rollup::roll_up`]
//! derives every stage, pipeline and run status from that tree, and
//! [`ReportDataProvider`] hands the result to the renderer.

pub mod aggregator;
pub mod model;
pub mod provider;
pub mod rollup;
pub mod stats;

pub use aggregator::{PipelineJobs, RunTree, StatusAggregator};
pub use model::{JobEntry, Pipeline, Run, Stage};
pub use provider::ReportDataProvider;
pub use rollup::roll_up;
pub use stats::{stats_groups, StatsGroup, StatsRecord};
