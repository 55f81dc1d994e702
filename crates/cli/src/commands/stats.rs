use crate::settings::Settings;
use pipestat_core::Result;
use pipestat_report::ReportDataProvider;

pub fn execute(settings: &Settings) -> Result<()> {
    let cache = settings.locate_cache()?;
    let provider = ReportDataProvider::from_cache(&cache)?;
    println!("{}", serde_json::to_string_pretty(&provider.stats_groups())?);
    Ok(())
}
