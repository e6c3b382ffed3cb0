//! Server data structures.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

use crate::error_handling::{ErrorCategory, FetchStats};
use crate::fetch::Fetcher;

/// Shared state for the HTTP adapter
#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<Fetcher>,
    pub start_time: Arc<Instant>,
}

impl AppState {
    pub fn new(fetcher: Fetcher) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            start_time: Arc::new(Instant::now()),
        }
    }

    pub fn stats(&self) -> &Arc<FetchStats> {
        self.fetcher.stats()
    }
}

/// JSON body of `POST /fetch`
#[derive(Debug, Clone, Deserialize)]
pub struct FetchPayload {
    pub url: String,
    /// `"k1=v1; k2=v2"`
    #[serde(default)]
    pub cookies: Option<String>,
    /// `http://`, `https://` or `socks5://` proxy URI
    #[serde(default)]
    pub proxy: Option<String>,
    /// Attempt count override, `1..=MAX_RETRIES_LIMIT`; larger values get 422
    #[serde(default)]
    pub max_retries: Option<u32>,
}

/// JSON response for `/status` endpoint
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub fetches: usize,
    pub successes: usize,
    pub attempts: usize,
    pub retries: usize,
    pub failures: FailureCounts,
    pub uptime_seconds: f64,
}

#[derive(Debug, Serialize)]
pub struct FailureCounts {
    pub total: usize,
    pub transient_network: usize,
    pub transient_server: usize,
    pub terminal_client: usize,
    pub terminal_protocol: usize,
    pub cancelled: usize,
}

impl FailureCounts {
    pub fn from_stats(stats: &FetchStats) -> Self {
        Self {
            total: stats.total_failures(),
            transient_network: stats.failure_count(ErrorCategory::TransientNetwork),
            transient_server: stats.failure_count(ErrorCategory::TransientServer),
            terminal_client: stats.failure_count(ErrorCategory::TerminalClient),
            terminal_protocol: stats.failure_count(ErrorCategory::TerminalProtocol),
            cancelled: stats.failure_count(ErrorCategory::Cancelled),
        }
    }
}
