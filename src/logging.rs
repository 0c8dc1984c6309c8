//! Tracing subscriber setup.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use crate::config::LoggingConfig;

const LOG_FILE_NAME: &str = "class-board.log";

/// Build the filter: `RUST_LOG` wins over the configured level.
fn filter(config: &LoggingConfig) -> EnvFilter {
    match std::env::var("RUST_LOG") {
        Ok(rust_log) => EnvFilter::new(rust_log),
        Err(_) => EnvFilter::new(config.level.to_lowercase()),
    }
}

/// Install the global subscriber.
///
/// Console output goes to stderr so command output on stdout stays clean.
/// With a log directory configured, a daily rolling file is written too; keep
/// the returned guard alive until exit so buffered lines are flushed.
pub fn init(config: &LoggingConfig) -> Option<WorkerGuard> {
    let console = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file, guard) = match &config.directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_NAME);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let installed = tracing_subscriber::registry()
        .with(filter(config))
        .with(console)
        .with(file)
        .try_init();
    if let Err(e) = installed {
        eprintln!("Logging already initialized: {e}");
    }

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_without_directory_has_no_guard() {
        let config = LoggingConfig {
            level: "warn".to_string(),
            directory: None,
        };
        assert!(init(&config).is_none());
    }
}
