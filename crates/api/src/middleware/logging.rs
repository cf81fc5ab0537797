//! Tracing subscriber for the CMS and setup wizard binaries.
//!
//! Setup gate diagnostics (missing or incomplete config, wizard URL) are
//! emitted under `cms_api::middleware::setup_gate` and stay visible at `info`
//! even when the configured level is quieter.

use std::str::FromStr;

use thiserror::Error;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter,
};

use crate::config::LoggingConfig;

const SETUP_GATE_TARGET: &str = "cms_api::middleware::setup_gate";

/// Output format selected by `logging.format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line, with the current request span attached.
    Json,
    /// Multi-line human readable output.
    Pretty,
    /// Single-line human readable output.
    Compact,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown log format: {0}")]
pub struct UnknownLogFormat(pub String);

impl FromStr for LogFormat {
    type Err = UnknownLogFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            _ => Err(UnknownLogFormat(s.to_string())),
        }
    }
}

/// Filter directives for `level`, keeping the setup gate at `info` or louder.
pub fn default_directives(level: &str) -> String {
    match level.trim().to_ascii_lowercase().as_str() {
        "warn" | "error" | "off" => format!("{},{}=info", level, SETUP_GATE_TARGET),
        _ => level.to_string(),
    }
}

/// Installs the global subscriber for `service`. `RUST_LOG` replaces the
/// configured directives entirely. An unknown format falls back to pretty
/// output and is reported once the subscriber is up.
pub fn init_logging(config: &LoggingConfig, service: &'static str) -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.level)));

    let parsed = config.format.parse::<LogFormat>();
    let format = parsed.clone().unwrap_or(LogFormat::Pretty);

    let subscriber = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Json => subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_span_events(FmtSpan::CLOSE)
                    .with_current_span(true)
                    .with_target(true),
            )
            .try_init()?,
        LogFormat::Pretty => subscriber
            .with(
                fmt::layer()
                    .pretty()
                    .with_span_events(FmtSpan::CLOSE)
                    .with_target(true),
            )
            .try_init()?,
        LogFormat::Compact => subscriber
            .with(fmt::layer().compact().with_target(true))
            .try_init()?,
    }

    if let Err(err) = parsed {
        tracing::warn!(error = %err, "Falling back to pretty log output");
    }
    tracing::info!(service, format = ?format, level = %config.level, "Logging initialized");

    Ok(())
}
