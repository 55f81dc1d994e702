use crate::settings::Settings;
use pipestat_cache::{init_cache, InitOptions};
use pipestat_core::Result;
use std::path::PathBuf;

pub fn execute(settings: &Settings, project: String, cache_dir: Option<PathBuf>) -> Result<()> {
    let cache = init_cache(&InitOptions {
        project,
        cache_dir,
        pointer_dir: settings.working_dir.clone(),
    })?;

    tracing::info!("✓ Created run cache at {}", cache.root().display());
    tracing::info!("\nNext steps:");
    tracing::info!("  1. Register jobs with 'pipestat add-job'");
    tracing::info!("  2. Run 'pipestat consolidate' once every job is registered");
    Ok(())
}
