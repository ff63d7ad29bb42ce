//! Logging setup for the client.
//!
//! Two sinks:
//! - a daily rolling file of one-line JSON records in the data directory
//! - human-readable output on stderr, on request or in debug builds
//!
//! Messages from the `log` facade are bridged into `tracing`, so
//! infrastructure code can use either. Tokens and passwords are never
//! logged by this crate.

use log::LevelFilter;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_log::LogTracer;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Layer, Registry};

pub const LOG_FILE_NAME: &str = "impacthub.log";

static LOG_DIR: OnceLock<PathBuf> = OnceLock::new();
static LOGGER_READY: OnceLock<()> = OnceLock::new();
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Install the global subscriber. Calling it again is a no-op.
///
/// `console` adds the stderr sink in release builds too.
pub fn init_logger(log_dir: PathBuf, console: bool) -> anyhow::Result<()> {
    if LOGGER_READY.get().is_some() {
        return Ok(());
    }

    std::fs::create_dir_all(&log_dir)?;
    let _ = LOG_DIR.set(log_dir.clone());

    let _ = LogTracer::builder()
        .with_max_level(LevelFilter::Trace)
        .init();

    let file_appender = rolling::daily(&log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let _ = FILE_GUARD.set(guard);

    let json_layer = fmt::layer()
        .with_writer(non_blocking)
        .json()
        .flatten_event(true)
        .with_current_span(false)
        .with_span_list(false)
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(true)
        .with_timer(fmt::time::ChronoLocal::new(
            "%Y-%m-%dT%H:%M:%S%.3f%:z".to_string(),
        ))
        .with_filter(file_filter());

    let console_layer = (console || cfg!(debug_assertions)).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_ansi(true)
            .with_timer(fmt::time::ChronoLocal::new("%H:%M:%S%.3f".to_string()))
            .with_filter(console_filter())
    });

    let subscriber = Registry::default().with(json_layer).with(console_layer);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    let _ = LOGGER_READY.set(());

    tracing::info!(
        target: "impacthub::logging",
        log_dir = %log_dir.display(),
        version = env!("CARGO_PKG_VERSION"),
        pid = std::process::id(),
        profile = if cfg!(debug_assertions) { "Debug" } else { "Release" },
        "Logger initialized"
    );

    Ok(())
}

/// Stderr-only logging, for when the log directory is unusable.
pub fn init_console_logger() {
    if LOGGER_READY.get().is_some() {
        return;
    }

    let _ = LogTracer::builder()
        .with_max_level(LevelFilter::Trace)
        .init();

    let subscriber = Registry::default().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(console_filter()),
    );

    if tracing::subscriber::set_global_default(subscriber).is_ok() {
        let _ = LOGGER_READY.set(());
    }
}

// RUST_LOG overrides both defaults
fn file_filter() -> EnvFilter {
    let default_level = if cfg!(debug_assertions) {
        "info,impacthub=debug,impacthub_infrastructure=debug,impacthub_app=debug"
    } else {
        "info"
    };

    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

fn console_filter() -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

pub fn log_dir() -> Option<PathBuf> {
    LOG_DIR.get().cloned()
}
