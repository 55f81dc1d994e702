use crate::settings::Settings;
use pipestat_cache::JobRegistry;
use pipestat_core::Result;

pub fn execute(settings: &Settings) -> Result<()> {
    let cache = settings.locate_cache()?;
    let cache_file = JobRegistry::new(cache).consolidate()?;
    tracing::info!("✓ Consolidated {} jobs", cache_file.jobs.len());
    Ok(())
}
