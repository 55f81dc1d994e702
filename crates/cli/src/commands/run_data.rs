use crate::settings::Settings;
use pipestat_core::Result;
use pipestat_report::ReportDataProvider;

pub fn execute(settings: &Settings, write: bool) -> Result<()> {
    let cache = settings.locate_cache()?;
    let provider = ReportDataProvider::from_cache(&cache)?;

    if write {
        let path = provider.write_snapshot(&cache)?;
        tracing::info!("✓ Wrote {}", path.display());
    } else {
        println!("{}", provider.to_json()?);
    }
    Ok(())
}
