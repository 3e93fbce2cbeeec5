//! Tracing setup for the `weavescope` binary.
//!
//! The interactive viewer owns the terminal, so logs go to a file there.
//! Headless runs (`--check`, `--commands`) log to stderr as well.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_FILTER: &str = "weavescope_tui=info,weavescope_nav=info,weavescope_model=info,warn";

/// `$WEAVESCOPE_LOG_DIR/weavescope.log`, falling back to the system temp dir.
pub fn default_log_path() -> PathBuf {
    std::env::var_os("WEAVESCOPE_LOG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
        .join("weavescope.log")
}

/// Install the global subscriber.
///
/// Keep the returned guard alive until exit; dropping it flushes the file writer.
pub fn init(filter: &str, log_file: Option<&Path>, stderr: bool) -> Result<Option<WorkerGuard>> {
    let (file_layer, guard) = match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let name = path
                .file_name()
                .with_context(|| format!("log path {} has no file name", path.display()))?;
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(fmt::layer().with_writer(writer).with_ansi(false)), Some(guard))
        }
        None => (None, None),
    };
    let stderr_layer = stderr.then(|| fmt::layer().with_writer(std::io::stderr).with_ansi(false));

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(guard)
}
