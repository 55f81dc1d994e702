use pipestat_core::PIPESTAT_LOG_VAR;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Re-export tracing macros for convenience
pub use tracing::{debug, error, info, instrument, trace, warn, Level};

/// Initialize the tracing system
///
/// The filter comes from `PIPESTAT_LOG` (falling back to `info`); `verbose`
/// forces `debug`. Output goes to stderr so that stdout stays free for the
/// JSON emitted by commands; ANSI colours are only used on a TTY.
pub fn init(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let filter = if verbose {
        EnvFilter::try_new("debug")?
    } else {
        EnvFilter::try_from_env(PIPESTAT_LOG_VAR).or_else(|_| EnvFilter::try_new("info"))?
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(is_tty())
        .compact()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Check if we're running in a TTY environment
fn is_tty() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stderr())
}
