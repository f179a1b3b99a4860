use tracing::Level;
use tracing_appender::non_blocking::{self, WorkerGuard};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;

/// Keeps the background log writer alive; logs are flushed when dropped.
pub struct LoggingGuard {
    _guard: WorkerGuard,
}

/// Installs the global subscriber. Logs go to stderr so stdout carries only
/// the game itself. `RUST_LOG` overrides the configured level.
pub fn init_logging(logging: &LoggingConfig) -> LoggingGuard {
    let (writer, guard) = non_blocking::NonBlockingBuilder::default()
        .lossy(false)
        .finish(std::io::stderr());

    let level = logging.level().unwrap_or(Level::WARN);
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    // Ignore error if a global subscriber is already set (e.g., when running in tests)
    if logging.json {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(filter)
            .json()
            .with_current_span(false)
            .with_span_events(FmtSpan::NONE)
            .with_writer(writer)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    } else {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_span_events(FmtSpan::NONE)
            .with_writer(writer)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    LoggingGuard { _guard: guard }
}
