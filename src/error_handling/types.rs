//! Error type definitions.
//!
//! This module defines the error categories reported in fetch outcomes and
//! the typed errors raised while building requests, transports and the server.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use serde::Serialize;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

use crate::config::ConfigValidationError;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// Error reading the User-Agent pool file.
    #[error("User-Agent pool error: {0}")]
    UserAgentPoolError(String),

    /// Fetch configuration failed validation.
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigValidationError),

    /// Error binding the HTTP listener.
    #[error("Server bind error: {0}")]
    ServerBindError(#[from] std::io::Error),
}

/// Rejections raised while constructing a [`FetchRequest`](crate::FetchRequest).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// The URL is not a syntactically valid absolute URI.
    #[error("invalid url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The URL parsed, but its scheme is not http or https.
    #[error("unsupported url scheme '{0}' (expected http or https)")]
    UnsupportedScheme(String),

    /// The URL exceeds the maximum accepted length.
    #[error("url exceeds maximum length ({length} > {max})")]
    UrlTooLong { length: usize, max: usize },

    /// A retry count of zero would never attempt the request.
    #[error("max_retries must be at least 1")]
    ZeroRetries,

    /// More attempts than any fetch is allowed.
    #[error("max_retries must be at most {max} (got {requested})")]
    TooManyRetries { requested: u32, max: u32 },
}

/// Failure of a single attempt before any HTTP response was received.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The overall request timeout elapsed.
    #[error("timed out: {0}")]
    Timeout(String),

    /// The connect timeout elapsed before a connection was established.
    #[error("connect timed out: {0}")]
    ConnectTimeout(String),

    /// Connection refused/reset, DNS failure, proxy handshake failure, ...
    #[error("{0}")]
    Connect(String),

    /// Anything else: malformed response, body decoding, redirect loop, ...
    #[error("{0}")]
    Unexpected(String),
}

impl TransportError {
    /// Maps a `reqwest::Error` onto the attempt failure kinds.
    ///
    /// Timeouts are checked first: reqwest reports connect timeouts as both
    /// `is_connect()` and `is_timeout()`.
    pub fn from_reqwest(error: &ReqwestError) -> Self {
        let cause = error_chain_message(error);
        if error.is_timeout() && error.is_connect() {
            TransportError::ConnectTimeout(cause)
        } else if error.is_timeout() {
            TransportError::Timeout(cause)
        } else if error.is_connect() || error.is_request() {
            TransportError::Connect(cause)
        } else {
            TransportError::Unexpected(cause)
        }
    }
}

/// Joins an error and its sources into one line: `outer: inner: root`.
pub fn error_chain_message(error: &(dyn std::error::Error + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// Category attached to every error outcome.
///
/// `Transient*` categories are retried while attempts remain; the others end
/// the fetch on first occurrence, except that unexpected attempt failures
/// (`TerminalProtocol`) also get the remaining attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Timeout, connection reset, DNS failure
    TransientNetwork,
    /// 5xx responses, 503 included
    TransientServer,
    /// 4xx and any other non-success, non-5xx status
    TerminalClient,
    /// Malformed response or unexpected failure during an attempt
    TerminalProtocol,
    /// The caller abandoned the fetch
    Cancelled,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::TransientNetwork => "transient network error",
            ErrorCategory::TransientServer => "transient server error",
            ErrorCategory::TerminalClient => "client error",
            ErrorCategory::TerminalProtocol => "protocol error",
            ErrorCategory::Cancelled => "cancelled",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[derive(Debug)]
    struct Inner;
    impl std::fmt::Display for Inner {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("connection reset by peer")
        }
    }
    impl std::error::Error for Inner {}

    #[derive(Debug)]
    struct Outer(Inner);
    impl std::fmt::Display for Outer {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("error sending request")
        }
    }
    impl std::error::Error for Outer {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_error_chain_message_joins_sources() {
        let err = Outer(Inner);
        assert_eq!(
            error_chain_message(&err),
            "error sending request: connection reset by peer"
        );
    }

    #[test]
    fn test_error_chain_message_single() {
        let err = Inner;
        assert_eq!(error_chain_message(&err), "connection reset by peer");
    }

    #[test]
    fn test_error_category_display_is_unique() {
        let labels: std::collections::HashSet<&str> =
            ErrorCategory::iter().map(|c| c.as_str()).collect();
        assert_eq!(labels.len(), ErrorCategory::iter().count());
    }

    #[test]
    fn test_error_category_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorCategory::TransientServer).unwrap();
        assert_eq!(json, "\"transient_server\"");
    }

    #[test]
    fn test_request_error_messages() {
        let err = RequestError::UnsupportedScheme("ftp".to_string());
        assert!(err.to_string().contains("ftp"));
        assert!(RequestError::ZeroRetries.to_string().contains("at least 1"));
        let err = RequestError::TooManyRetries {
            requested: 1000,
            max: 10,
        };
        assert_eq!(err.to_string(), "max_retries must be at most 10 (got 1000)");
    }
}
