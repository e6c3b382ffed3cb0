//! Configuration types and CLI options.
//!
//! `FetchConfig` is the library-facing configuration consumed by the
//! [`Fetcher`](crate::Fetcher). `Config` is the binary's command-line surface
//! and converts into a `FetchConfig`.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    CONNECT_TIMEOUT_SECS, DEFAULT_BACKOFF_UNIT, DEFAULT_BIND_ADDRESS, DEFAULT_MAX_RETRIES,
    DEFAULT_PORT, MAX_REDIRECT_HOPS, MAX_RETRIES_LIMIT, REQUEST_TIMEOUT_SECS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// A configuration value that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid configuration for `{field}`: {message}")]
pub struct ConfigValidationError {
    /// Name of the offending field
    pub field: &'static str,
    /// What is wrong with it
    pub message: String,
}

impl ConfigValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Retry and transport settings for the fetcher.
///
/// Every fetch reads these values; a [`FetchRequest`](crate::FetchRequest)
/// may only override `max_retries`.
///
/// # Examples
///
/// ```
/// use browser_fetch::FetchConfig;
/// use std::time::Duration;
///
/// let config = FetchConfig {
///     max_retries: 5,
///     backoff_unit: Duration::from_millis(250),
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Attempts per fetch (initial attempt included), at least 1
    pub max_retries: u32,

    /// TCP connect timeout
    pub connect_timeout: Duration,

    /// Overall per-attempt timeout
    pub request_timeout: Duration,

    /// Backoff before attempt `i` is `2^i` of these
    pub backoff_unit: Duration,

    /// Skip TLS certificate validation. Off unless explicitly requested.
    pub accept_invalid_certs: bool,

    /// Redirect hops followed before giving up
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            connect_timeout: Duration::from_secs(CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            backoff_unit: DEFAULT_BACKOFF_UNIT,
            accept_invalid_certs: false,
            max_redirects: MAX_REDIRECT_HOPS,
        }
    }
}

impl FetchConfig {
    /// Checks that retry count and timeouts are usable.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.max_retries == 0 {
            return Err(ConfigValidationError::new(
                "max_retries",
                "must be greater than 0 (it counts the initial attempt)",
            ));
        }
        if self.max_retries > MAX_RETRIES_LIMIT {
            return Err(ConfigValidationError::new(
                "max_retries",
                format!("must be at most {MAX_RETRIES_LIMIT}"),
            ));
        }
        if self.connect_timeout.is_zero() {
            return Err(ConfigValidationError::new(
                "connect_timeout",
                "must be greater than 0",
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigValidationError::new(
                "request_timeout",
                "must be greater than 0",
            ));
        }
        if self.request_timeout < self.connect_timeout {
            return Err(ConfigValidationError::new(
                "request_timeout",
                "must not be shorter than connect_timeout",
            ));
        }
        Ok(())
    }
}

/// Command-line options for the `browser_fetch` server.
///
/// Every flag can also be supplied through the matching environment variable.
///
/// # Examples
///
/// ```bash
/// # Listen on all interfaces
/// browser_fetch --bind 0.0.0.0 --port 8080
///
/// # Shorter timeouts, more attempts
/// browser_fetch --request-timeout-seconds 15 --max-retries 5
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "browser_fetch",
    about = "Fetches pages with browser-like headers and retries transient failures."
)]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "BROWSER_FETCH_BIND", default_value = DEFAULT_BIND_ADDRESS)]
    pub bind: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Attempts per fetch, initial attempt included
    #[arg(long, env = "BROWSER_FETCH_MAX_RETRIES", default_value_t = DEFAULT_MAX_RETRIES)]
    pub max_retries: u32,

    /// TCP connect timeout in seconds
    #[arg(long, default_value_t = CONNECT_TIMEOUT_SECS)]
    pub connect_timeout_seconds: u64,

    /// Overall request timeout in seconds
    #[arg(long, default_value_t = REQUEST_TIMEOUT_SECS)]
    pub request_timeout_seconds: u64,

    /// Backoff unit in milliseconds (attempt i waits 2^i units)
    #[arg(long, default_value_t = DEFAULT_BACKOFF_UNIT.as_millis() as u64)]
    pub backoff_unit_ms: u64,

    /// Accept invalid TLS certificates. Dangerous: use only against hosts you control.
    #[arg(long)]
    pub insecure: bool,

    /// File with one User-Agent per line (lines starting with '#' are ignored)
    #[arg(long, env = "BROWSER_FETCH_USER_AGENTS")]
    pub user_agents: Option<PathBuf>,
}

impl Config {
    /// Builds the fetcher configuration from the parsed options.
    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            max_retries: self.max_retries,
            connect_timeout: Duration::from_secs(self.connect_timeout_seconds),
            request_timeout: Duration::from_secs(self.request_timeout_seconds),
            backoff_unit: Duration::from_millis(self.backoff_unit_ms),
            accept_invalid_certs: self.insecure,
            max_redirects: MAX_REDIRECT_HOPS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_fetch_config_defaults() {
        let config = FetchConfig::default();
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.backoff_unit, Duration::from_secs(1));
        assert!(!config.accept_invalid_certs, "TLS validation must be on by default");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_fetch_config_rejects_zero_retries() {
        let config = FetchConfig {
            max_retries: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.field, "max_retries");
        assert!(err.message.contains("greater than 0"));
    }

    #[test]
    fn test_fetch_config_rejects_too_many_retries() {
        let config = FetchConfig {
            max_retries: MAX_RETRIES_LIMIT + 1,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.field, "max_retries");
        assert!(err.message.contains("at most"));

        let config = FetchConfig {
            max_retries: MAX_RETRIES_LIMIT,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_fetch_config_rejects_zero_timeouts() {
        let config = FetchConfig {
            connect_timeout: Duration::ZERO,
            ..Default::default()
        };
        assert_eq!(config.validate().unwrap_err().field, "connect_timeout");

        let config = FetchConfig {
            request_timeout: Duration::ZERO,
            ..Default::default()
        };
        assert_eq!(config.validate().unwrap_err().field, "request_timeout");
    }

    #[test]
    fn test_fetch_config_rejects_request_timeout_below_connect_timeout() {
        let config = FetchConfig {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(5),
            ..Default::default()
        };
        assert_eq!(config.validate().unwrap_err().field, "request_timeout");
    }

    #[test]
    fn test_config_parse_defaults() {
        let config = Config::parse_from(["browser_fetch"]);
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(!config.insecure);
        let fetch = config.fetch_config();
        assert_eq!(fetch.max_retries, DEFAULT_MAX_RETRIES);
        assert_eq!(fetch.backoff_unit, DEFAULT_BACKOFF_UNIT);
        assert!(!fetch.accept_invalid_certs);
    }

    #[test]
    fn test_config_parse_overrides() {
        let config = Config::parse_from([
            "browser_fetch",
            "--port",
            "9090",
            "--max-retries",
            "5",
            "--request-timeout-seconds",
            "15",
            "--backoff-unit-ms",
            "100",
            "--insecure",
        ]);
        let fetch = config.fetch_config();
        assert_eq!(config.port, 9090);
        assert_eq!(fetch.max_retries, 5);
        assert_eq!(fetch.request_timeout, Duration::from_secs(15));
        assert_eq!(fetch.backoff_unit, Duration::from_millis(100));
        assert!(fetch.accept_invalid_certs);
    }
}
