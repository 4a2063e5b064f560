use anyhow::{Context, Result, anyhow};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;

/// Installs a global `tracing` subscriber writing to stderr.
///
/// `RUST_LOG` overrides the configured level. Structured mode emits one JSON
/// object per event. Fails on an unknown `tracing_level`; returns `false`
/// when another subscriber was already installed.
pub fn init_logging(logging: &LoggingConfig) -> Result<bool> {
    let level: Level = logging
        .level()
        .ok_or_else(|| anyhow!("unknown tracing level `{}`", logging.tracing_level))?;
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level.as_str())
            .with_context(|| format!("failed to build filter for level {level}"))?,
    };

    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::NONE)
        .with_writer(std::io::stderr);

    // Ignore error if a global subscriber is already set (e.g., when running in tests)
    let installed = if logging.enable_structured {
        let subscriber = builder.json().with_current_span(false).finish();
        tracing::subscriber::set_global_default(subscriber).is_ok()
    } else {
        let subscriber = builder.finish();
        tracing::subscriber::set_global_default(subscriber).is_ok()
    };

    Ok(installed)
}
