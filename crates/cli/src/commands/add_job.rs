use super::AddJobArgs;
use crate::settings::Settings;
use pipestat_cache::JobRegistry;
use pipestat_core::{JobDescriptor, Result};

pub fn execute(settings: &Settings, args: AddJobArgs) -> Result<()> {
    let cache = settings.locate_cache()?;

    let mut builder = JobDescriptor::builder(args.pipeline, args.ci_stage, args.command)
        .args(args.args)
        .inputs(args.inputs)
        .outputs(args.outputs);
    if let Some(job_id) = args.job_id {
        builder = builder.job_id(job_id);
    }
    if let Some(cwd) = args.cwd {
        builder = builder.cwd(cwd);
    }
    if let Some(timeout) = args.timeout {
        builder = builder.timeout(timeout);
    }
    if let Some(description) = args.description {
        builder = builder.description(description);
    }
    for tag in args.tags {
        builder = builder.tag(tag);
    }
    let job = builder.build();

    JobRegistry::new(cache).register(&job)?;
    println!("{}", job.job_id);
    Ok(())
}
