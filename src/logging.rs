//! Tracing setup: a rolling file writer plus stdout, text or JSON.

use crate::config::{LoggingConfig, Rotation};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter used when `RUST_LOG` is unset. Request spans from `TraceLayer`
/// stay at info; sqlx statement logging is limited to slow-query warnings.
pub fn filter_directives(level: &str) -> String {
    format!("{level},tower_http=info,sqlx=warn")
}

fn file_appender(config: &LoggingConfig) -> RollingFileAppender {
    match config.rotation {
        Rotation::Hourly => tracing_appender::rolling::hourly(&config.dir, &config.file),
        Rotation::Daily => tracing_appender::rolling::daily(&config.dir, &config.file),
        Rotation::Never => tracing_appender::rolling::never(&config.dir, &config.file),
    }
}

/// Install the global subscriber. Keep the guard alive for the process
/// lifetime or buffered file output is lost.
pub fn init_logging(config: &LoggingConfig) -> WorkerGuard {
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender(config));

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(&config.level)));

    let registry = tracing_subscriber::registry().with(filter);

    if config.json {
        registry
            .with(fmt::layer().json().with_writer(file_writer).with_ansi(false))
            .with(fmt::layer().json().with_ansi(false))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(file_writer)
                    .with_ansi(false),
            )
            .with(fmt::layer().with_target(false))
            .init();
    }

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directives_parse() {
        for level in ["info", "debug", "stockroom=trace"] {
            let directives = filter_directives(level);
            assert!(directives.starts_with(level));
            assert!(EnvFilter::try_new(&directives).is_ok(), "{directives}");
        }
    }
}
