//! Structured logging setup using the `tracing` ecosystem.
//!
//! Console output goes to stderr so command output on stdout stays clean for
//! scripting. File output rotates daily and can be written as JSON.

use std::path::Path;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::AppConfig;
use crate::error::{GvError, GvResult};

const LOG_FILE_PREFIX: &str = "gvoice.log";

/// Initialize the global tracing subscriber.
///
/// # Arguments
/// * `level` - Filter directive: "trace", "debug", "info", "warn", "error",
///   or any `EnvFilter` expression such as `gv_api=debug,info`
/// * `log_dir` - Directory for log files
/// * `json_output` - If true, use JSON format for file output
pub fn init_logging(level: &str, log_dir: &Path, json_output: bool) -> GvResult<LogGuard> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact();

    let registry = tracing_subscriber::registry()
        .with(env_filter(level))
        .with(console_layer);

    let installed = if json_output {
        registry
            .with(
                fmt::layer()
                    .with_writer(non_blocking)
                    .json()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_writer(non_blocking)
                    .with_ansi(false)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init()
    };
    installed.map_err(|e| GvError::Config(format!("logging already initialized: {e}")))?;

    tracing::debug!("logging initialized at level={level}, dir={}", log_dir.display());

    Ok(LogGuard { _guard: guard })
}

/// Initialize logging from the `[logging]` section of the configuration.
///
/// `override_level` wins over the configured level (used for `--verbose`).
pub fn init_from_config(config: &AppConfig, override_level: Option<&str>) -> GvResult<LogGuard> {
    let level = override_level.unwrap_or(&config.logging.level);
    let dir = config.effective_log_dir()?;
    init_logging(level, &dir, config.logging.json_output)
}

/// Guard that keeps the non-blocking log writer alive.
/// Drop this to flush and close the log file.
pub struct LogGuard {
    _guard: tracing_appender::non_blocking::WorkerGuard,
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}
