use clap::Parser;
use pipestat_core::EXIT_CACHE_NOT_FOUND;
use std::path::PathBuf;

mod commands;
mod execute;
mod settings;

use commands::Commands;
use settings::Settings;

#[derive(Parser)]
#[command(name = "pipestat")]
#[command(about = "Roll up the results of parallel pipeline jobs into one run report", long_about = None)]
#[command(version)]
struct Cli {
    /// Log at debug level regardless of PIPESTAT_LOG
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory to start searching for the cache pointer from (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    start_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    if let Err(e) = pipestat_utils::tracing::init(cli.verbose) {
        eprintln!("failed to initialize logging: {e}");
    }

    let settings = Settings::from_cli(cli.start_dir)?;

    match cli.command.execute(&settings) {
        Ok(()) => Ok(()),
        // The locator has already told the user to run `pipestat init`
        Err(e) if e.is_cache_not_found() => std::process::exit(EXIT_CACHE_NOT_FOUND),
        Err(e) => Err(e.into()),
    }
}
