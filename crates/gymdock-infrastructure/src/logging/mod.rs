//! Logging setup.
//!
//! Every run writes one-line JSON records to a daily rolling file under the
//! configured log directory. The console gets either human-readable or JSON
//! lines on stderr depending on `logging.format`. Library code logs through the `log`
//! macros; `LogTracer` forwards those records into the same subscriber.
//! `RUST_LOG` overrides the configured level.

use std::path::PathBuf;
use std::sync::OnceLock;

use log::LevelFilter;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_log::LogTracer;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Layer, Registry};

use crate::config::LoggingConfig;

const LOG_FILE_PREFIX: &str = "gymdock.log";

static LOG_DIR: OnceLock<PathBuf> = OnceLock::new();
static LOGGER_READY: OnceLock<()> = OnceLock::new();
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Install the global subscriber. Calling it again is a no-op.
pub fn init_logger(config: &LoggingConfig) -> anyhow::Result<()> {
    if LOGGER_READY.get().is_some() {
        return Ok(());
    }

    let log_dir = config.log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let _ = LOG_DIR.set(log_dir.clone());

    let _ = LogTracer::builder()
        .with_max_level(LevelFilter::Trace)
        .init();

    let file_appender = rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let _ = FILE_GUARD.set(guard);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_current_span(false)
        .with_span_list(false)
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(true)
        .with_timer(fmt::time::ChronoLocal::new(
            "%Y-%m-%dT%H:%M:%S%.3f%:z".to_string(),
        ))
        .with_filter(build_filter(&config.level));

    let json_console = config.format == "json";

    let pretty_layer = (!json_console).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_ansi(true)
            .with_timer(fmt::time::ChronoLocal::new("%Y-%m-%d %H:%M:%S%.3f".to_string()))
            .with_filter(build_filter(&config.level))
    });

    let json_layer = json_console.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .json()
            .with_current_span(false)
            .with_span_list(false)
            .with_target(true)
            .with_filter(build_filter(&config.level))
    });

    let subscriber = Registry::default()
        .with(file_layer)
        .with(pretty_layer)
        .with(json_layer);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    let _ = LOGGER_READY.set(());

    tracing::info!(
        target: "gymdock::logging",
        log_dir = %log_dir.display(),
        level = %config.level,
        format = %config.format,
        version = env!("CARGO_PKG_VERSION"),
        "Logger initialized"
    );

    Ok(())
}

/// `RUST_LOG` wins over the configured level.
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter_directive(level)))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Quiet the HTTP stack unless the kiosk itself is being traced.
fn filter_directive(level: &str) -> String {
    let level = level.trim().to_lowercase();
    if level == "trace" {
        level
    } else {
        format!("{level},hyper=warn,reqwest=warn,rustls=warn")
    }
}

pub fn get_log_dir() -> Option<PathBuf> {
    LOG_DIR.get().cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive_quiets_http_stack() {
        assert_eq!(
            filter_directive(" DEBUG "),
            "debug,hyper=warn,reqwest=warn,rustls=warn"
        );
        assert_eq!(filter_directive("trace"), "trace");
        assert!(EnvFilter::try_new(filter_directive("info")).is_ok());
    }
}
