//! Tracing setup for the CLI and embedding hosts.

use std::path::Path;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming the log file.
pub const LOG_ENV_VAR: &str = "EPORTFOLIO_LOG";

/// Initialize file logging when `EPORTFOLIO_LOG` is set.
///
/// Nothing is installed otherwise, so command output on stdout/stderr
/// stays clean. The filter comes from `RUST_LOG` and defaults to `info`.
pub fn init_tracing() {
    let Some(log_path) = std::env::var_os(LOG_ENV_VAR) else {
        return;
    };

    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let unique_path = unique_log_path(Path::new(&log_path), timestamp, std::process::id());

    let file = match std::fs::File::create(&unique_path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: cannot create log file {}: {}", unique_path, e);
            return;
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    // Tests and host applications may have installed a subscriber already.
    if tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: a tracing subscriber is already installed");
    }
}

/// `{path}.{timestamp}.{pid}`, so concurrent CLI runs never share a file.
fn unique_log_path(base: &Path, timestamp: u64, pid: u32) -> String {
    format!("{}.{}.{}", base.display(), timestamp, pid)
}
