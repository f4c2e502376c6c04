use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Directory for rolling log files: `<cache_dir>/artview/logs`.
pub fn log_dir() -> Option<PathBuf> {
    dirs::cache_dir().map(|d| d.join("artview").join("logs"))
}

/// Route tracing output to a daily rolling file, since stdout belongs to the
/// terminal UI. `RUST_LOG` overrides the default `info` level.
///
/// The returned guard must live until exit or buffered lines are lost.
pub fn init() -> Option<WorkerGuard> {
    let dir = log_dir()?;
    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("artview: logging disabled, cannot create {}: {e}", dir.display());
        return None;
    }

    let appender = tracing_appender::rolling::daily(&dir, "artview-tui.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init();
    if installed.is_err() {
        return None;
    }
    Some(guard)
}
