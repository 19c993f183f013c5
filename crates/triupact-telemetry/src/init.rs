//! Subscriber initialisation and logging configuration.
//!
//! # Design
//! - One entry point installs either the JSON or the human-readable formatter.
//! - `RUST_LOG` wins over the configured level when it parses.
//! - The build SHA is recorded once and readable from anywhere afterwards.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::OnceCell;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, fmt as layer_fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::error::{Result, TelemetryError};

/// Level used when neither `RUST_LOG` nor the caller picks one.
pub const DEFAULT_LOG_LEVEL: &str = "warn";
/// Environment variable carrying the build identifier.
pub const BUILD_SHA_ENV: &str = "TRIUPACT_BUILD_SHA";

static BUILD_SHA: OnceCell<String> = OnceCell::new();

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the configured level is not a valid filter or a
/// subscriber has already been installed.
pub fn init_logging(config: &LoggingConfig<'_>) -> Result<()> {
    if !record_sha(&BUILD_SHA, config.build_sha) {
        warn!(
            kept = build_sha(),
            ignored = config.build_sha,
            "build sha already recorded"
        );
    }

    let filter = build_env_filter(config.level)?;
    match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                layer_fmt::layer()
                    .json()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(
                layer_fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    }
    .map_err(|source| TelemetryError::SubscriberInstall { source })?;

    info!(build_sha = build_sha(), format = %config.format, "logging initialised");
    Ok(())
}

/// Build SHA recorded during initialisation, `dev` before that.
#[must_use]
pub fn build_sha() -> &'static str {
    BUILD_SHA.get().map_or("dev", String::as_str)
}

/// Store `sha` in an empty cell. An identical value already present counts as recorded.
fn record_sha(cell: &OnceCell<String>, sha: &str) -> bool {
    match cell.get() {
        Some(existing) => existing == sha,
        None => cell.set(sha.to_string()).is_ok() || cell.get().is_some_and(|kept| kept == sha),
    }
}

/// Build SHA from [`BUILD_SHA_ENV`], or `dev`.
#[must_use]
pub fn resolve_build_sha() -> String {
    sha_from(std::env::var(BUILD_SHA_ENV).ok())
}

fn sha_from(value: Option<String>) -> String {
    value
        .map(|sha| sha.trim().to_string())
        .filter(|sha| !sha.is_empty())
        .unwrap_or_else(|| "dev".to_string())
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig<'a> {
    /// Filter directive such as `info` or `triupact_cli=debug`.
    pub level: &'a str,
    /// Output format.
    pub format: LogFormat,
    /// Build identifier recorded in structured logs.
    pub build_sha: &'a str,
}

impl Default for LoggingConfig<'_> {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL,
            format: LogFormat::infer(),
            build_sha: build_sha(),
        }
    }
}

/// Available output formats for the logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Structured JSON objects.
    Json,
    /// Human-readable lines.
    Pretty,
}

impl LogFormat {
    /// Pretty in debug builds, JSON in release builds.
    #[must_use]
    pub const fn infer() -> Self {
        if cfg!(debug_assertions) {
            Self::Pretty
        } else {
            Self::Json
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Pretty => "pretty",
        })
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" | "text" => Ok(Self::Pretty),
            "auto" | "" => Ok(Self::infer()),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

fn build_env_filter(level: &str) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level).map_err(|source| TelemetryError::InvalidFilter {
        directive: level.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_format_parses_variants() {
        assert_eq!("json".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!(" Pretty ".parse::<LogFormat>(), Ok(LogFormat::Pretty));
        assert_eq!("auto".parse::<LogFormat>(), Ok(LogFormat::infer()));
        assert!("xml".parse::<LogFormat>().is_err());
        assert_eq!(LogFormat::Json.to_string(), "json");
    }

    #[test]
    fn build_sha_falls_back_to_dev() {
        assert_eq!(sha_from(None), "dev");
        assert_eq!(sha_from(Some("  ".into())), "dev");
        assert_eq!(sha_from(Some("abc123\n".into())), "abc123");
    }

    #[test]
    fn build_sha_is_recorded_once() {
        let cell = OnceCell::new();
        assert!(record_sha(&cell, "abc123"));
        assert!(record_sha(&cell, "abc123"));
        assert!(!record_sha(&cell, "def456"));
        assert_eq!(cell.get().map(String::as_str), Some("abc123"));
    }

    #[test]
    fn default_config_uses_warn_level() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, DEFAULT_LOG_LEVEL);
        assert_eq!(config.format, LogFormat::infer());
    }

    #[test]
    fn init_logging_installs_subscriber_once() {
        let config = LoggingConfig {
            level: "info",
            format: LogFormat::Pretty,
            build_sha: "test",
        };
        let _ = init_logging(&config);
        assert!(init_logging(&config).is_err());
    }
}
