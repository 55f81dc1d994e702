use crate::settings::Settings;
use pipestat_core::Result;
use pipestat_report::ReportDataProvider;

pub fn execute(settings: &Settings) -> Result<()> {
    let cache = settings.locate_cache()?;
    let provider = ReportDataProvider::from_cache(&cache)?;
    let run = provider.run();

    println!("run: {}", run.status());
    for pipeline in run.pipelines() {
        println!("{:<12} {}", pipeline.status().to_string(), pipeline.name());
        for stage in pipeline.stages() {
            println!(
                "  {:<7} {:<13} {:>3}%  ({} jobs)",
                stage.name().as_str(),
                stage.status().to_string(),
                stage.progress(),
                stage.jobs().len()
            );
        }
    }
    Ok(())
}
