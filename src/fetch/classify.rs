//! Attempt classification.
//!
//! Each attempt's result is mapped to a [`Verdict`]. The retry loop only reads
//! the verdict's tag: success and failures end the fetch, retryable failures
//! continue it while attempts remain.

use std::time::Duration;

use crate::config::HTTP_STATUS_SERVICE_UNAVAILABLE;
use crate::error_handling::{ErrorCategory, TransportError};

use super::outcome::FetchOutcome;
use super::transport::RawResponse;

/// A failed attempt, ready to become the terminal outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub category: ErrorCategory,
    pub message: String,
}

impl Failure {
    fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }

    pub fn into_outcome(self) -> FetchOutcome {
        FetchOutcome::Error {
            message: self.message,
            category: self.category,
        }
    }
}

/// What the loop should do after an attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// 2xx: return success.
    Success { final_url: String, body: String },
    /// Try again if attempts remain, otherwise report the failure.
    Retry(Failure),
    /// Report the failure now.
    Fail(Failure),
}

/// Inputs that shape terminal messages.
#[derive(Debug, Clone, Copy)]
pub struct ClassifyContext {
    /// Attempts the fetch is allowed; a retryable failure only becomes
    /// terminal on the last of them
    pub max_attempts: u32,
    /// Quoted when a connection could not be established in time
    pub connect_timeout: Duration,
    /// Quoted when the whole request ran out of time
    pub request_timeout: Duration,
}

impl ClassifyContext {
    fn timed_out(&self, limit: Duration) -> Failure {
        Failure::new(
            ErrorCategory::TransientNetwork,
            format!(
                "request timed out after {}s ({} attempts)",
                limit.as_secs_f64(),
                self.max_attempts
            ),
        )
    }
}

fn reason(status: reqwest::StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("Unknown")
}

/// Classifies one attempt.
///
/// | Condition | Verdict | Category |
/// |---|---|---|
/// | 503 | retry | `TransientServer` |
/// | other 5xx | retry | `TransientServer` |
/// | 2xx | success | |
/// | any other status | fail | `TerminalClient` |
/// | timeout | retry | `TransientNetwork` |
/// | connection failure | retry | `TransientNetwork` |
/// | unexpected failure | retry | `TerminalProtocol` |
pub fn classify(result: Result<RawResponse, TransportError>, ctx: &ClassifyContext) -> Verdict {
    match result {
        Ok(response) => classify_response(response, ctx),
        Err(TransportError::Timeout(_)) => Verdict::Retry(ctx.timed_out(ctx.request_timeout)),
        Err(TransportError::ConnectTimeout(_)) => {
            Verdict::Retry(ctx.timed_out(ctx.connect_timeout))
        }
        Err(TransportError::Connect(cause)) => Verdict::Retry(Failure::new(
            ErrorCategory::TransientNetwork,
            format!("request failed: {cause}"),
        )),
        Err(TransportError::Unexpected(cause)) => Verdict::Retry(Failure::new(
            ErrorCategory::TerminalProtocol,
            format!("unexpected error: {cause}"),
        )),
    }
}

fn classify_response(response: RawResponse, ctx: &ClassifyContext) -> Verdict {
    let status = response.status;
    let code = status.as_u16();

    if code == HTTP_STATUS_SERVICE_UNAVAILABLE {
        return Verdict::Retry(Failure::new(
            ErrorCategory::TransientServer,
            format!(
                "server unavailable after {} attempts (HTTP 503 Service Unavailable); \
                 the target may be blocking automated requests or be temporarily down",
                ctx.max_attempts
            ),
        ));
    }
    if status.is_server_error() {
        return Verdict::Retry(Failure::new(
            ErrorCategory::TransientServer,
            format!("HTTP error {code}: {}", reason(status)),
        ));
    }
    if status.is_success() {
        return Verdict::Success {
            final_url: response.final_url.to_string(),
            body: response.body,
        };
    }
    Verdict::Fail(Failure::new(
        ErrorCategory::TerminalClient,
        format!("HTTP error {code}: {}", reason(status)),
    ))
}
