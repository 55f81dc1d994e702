use clap::{Args, Subcommand};
use pipestat_core::CiStage;
use std::path::PathBuf;

pub mod add_job;
pub mod consolidate;
pub mod init;
pub mod run_data;
pub mod stats;
pub mod status;

#[derive(Subcommand)]
pub enum Commands {
    /// Create a cache for a new run and point the current directory at it
    Init {
        /// Project name recorded with the run
        #[arg(long)]
        project: String,

        /// Where to create the cache (defaults to a fresh directory under the system temp dir)
        #[arg(long, value_name = "DIR")]
        cache_dir: Option<PathBuf>,
    },

    /// Register a job with the current run
    AddJob(AddJobArgs),

    /// Merge every registered job into the run's cache file
    Consolidate,

    /// Show the rolled-up status of every pipeline
    Status,

    /// Print the rolled-up run as JSON
    RunData {
        /// Write the snapshot to run.json in the cache instead of printing it
        #[arg(long)]
        write: bool,
    },

    /// Print runtime statistics grouped by stats-group tags
    Stats,
}

#[derive(Args)]
pub struct AddJobArgs {
    /// Pipeline the job belongs to
    #[arg(long)]
    pub pipeline: String,

    /// CI stage of the job (build, test or report)
    #[arg(long)]
    pub ci_stage: CiStage,

    /// Command the executor runs
    #[arg(long)]
    pub command: String,

    /// Explicit job id (a random id is generated otherwise)
    #[arg(long)]
    pub job_id: Option<String>,

    /// Working directory for the command
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Tag in key:value form (can be specified multiple times)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Input file (can be specified multiple times)
    #[arg(long = "input")]
    pub inputs: Vec<String>,

    /// Output file (can be specified multiple times)
    #[arg(long = "output")]
    pub outputs: Vec<String>,

    /// Arguments passed to the command
    #[arg(last = true)]
    pub args: Vec<String>,
}
