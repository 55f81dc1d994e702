use crate::commands::Commands;
use crate::settings::Settings;
use pipestat_core::Result;

impl Commands {
    pub fn execute(self, settings: &Settings) -> Result<()> {
        match self {
            Commands::Init { project, cache_dir } => {
                crate::commands::init::execute(settings, project, cache_dir)
            }
            Commands::AddJob(args) => crate::commands::add_job::execute(settings, args),
            Commands::Consolidate => crate::commands::consolidate::execute(settings),
            Commands::Status => crate::commands::status::execute(settings),
            Commands::RunData { write } => crate::commands::run_data::execute(settings, write),
            Commands::Stats => crate::commands::stats::execute(settings),
        }
    }
}
