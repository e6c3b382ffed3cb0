//! Fetch outcomes and their wire representation.

use serde::{Deserialize, Serialize};

use crate::error_handling::ErrorCategory;

/// Terminal result of a fetch. Exactly one is produced per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A 2xx response was received.
    Success {
        /// URL after following redirects
        final_url: String,
        /// Response body decoded as text
        body: String,
    },
    /// The fetch failed; `message` is meant for humans.
    Error {
        message: String,
        category: ErrorCategory,
    },
}

impl FetchOutcome {
    pub fn error(category: ErrorCategory, message: impl Into<String>) -> Self {
        FetchOutcome::Error {
            message: message.into(),
            category,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success { .. })
    }

    /// The error category, `None` on success.
    pub fn category(&self) -> Option<ErrorCategory> {
        match self {
            FetchOutcome::Success { .. } => None,
            FetchOutcome::Error { category, .. } => Some(*category),
        }
    }
}

/// `status` field of [`FetchResponse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchStatus {
    Success,
    Error,
}

/// Output record: `url` and `page_source` only on success, `message` only on error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchResponse {
    pub status: FetchStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FetchResponse {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: FetchStatus::Error,
            url: None,
            page_source: None,
            message: Some(message.into()),
        }
    }
}

impl From<FetchOutcome> for FetchResponse {
    fn from(outcome: FetchOutcome) -> Self {
        match outcome {
            FetchOutcome::Success { final_url, body } => Self {
                status: FetchStatus::Success,
                url: Some(final_url),
                page_source: Some(body),
                message: None,
            },
            FetchOutcome::Error { message, .. } => Self::error(message),
        }
    }
}
