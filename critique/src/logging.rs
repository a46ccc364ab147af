//! File logging for critique.
//!
//! The TUI owns the terminal, so log output goes to `critique.log` in the data
//! directory instead of stderr. The filter comes from `CRITIQUE_LOG` (same
//! syntax as `RUST_LOG`) and defaults to `info`.

use std::path::Path;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "CRITIQUE_LOG";

/// Keeps the non-blocking writer alive; dropping it flushes pending lines.
pub struct LogGuard {
    _guard: tracing_appender::non_blocking::WorkerGuard,
}

/// Installs the global subscriber writing to `<dir>/critique.log`.
///
/// # Errors
///
/// Returns `Err` if the directory cannot be created. A second call in the same
/// process leaves the first subscriber in place.
pub fn init(dir: &Path) -> std::io::Result<LogGuard> {
    std::fs::create_dir_all(dir)?;
    let appender = tracing_appender::rolling::never(dir, "critique.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init();

    Ok(LogGuard { _guard: guard })
}
