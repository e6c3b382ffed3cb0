//! Resilient page fetching.
//!
//! This module implements the retry loop around single GET attempts:
//! - request preparation (headers, cookies, proxy) once per fetch
//! - exponential backoff between attempts (`2^i` units before attempt `i`)
//! - classification of every attempt into a [`Verdict`]
//! - cancellation of pending backoff sleeps and in-flight requests

mod attempt;
mod classify;
mod outcome;
mod request;
mod transport;

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::config::FetchConfig;
use crate::error_handling::{ErrorCategory, FetchStats, InitializationError};
use crate::request::PreparedRequest;
use crate::user_agent::UserAgentPool;

pub use attempt::{backoff_for, retry_schedule, Attempt};
pub use classify::{classify, ClassifyContext, Failure, Verdict};
pub use outcome::{FetchOutcome, FetchResponse, FetchStatus};
pub use request::FetchRequest;
pub use transport::{
    HttpConnector, HttpSession, RawResponse, ReqwestConnector, ReqwestSession,
};

/// Fetches pages, retrying transient failures.
///
/// A `Fetcher` holds no per-fetch state: one instance (typically behind an
/// `Arc`) serves any number of concurrent fetches.
///
/// # Examples
///
/// ```no_run
/// use browser_fetch::{FetchConfig, FetchRequest, Fetcher};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let fetcher = Fetcher::new(FetchConfig::default())?;
/// let request = FetchRequest::new("https://www.example.com/")?;
/// let outcome = fetcher.fetch(&request).await;
/// println!("{}", serde_json::to_string(&browser_fetch::FetchResponse::from(outcome))?);
/// # Ok(())
/// # }
/// ```
pub struct Fetcher<C = ReqwestConnector> {
    config: FetchConfig,
    connector: C,
    user_agents: UserAgentPool,
    stats: Arc<FetchStats>,
}

impl Fetcher<ReqwestConnector> {
    /// Creates a fetcher backed by `reqwest`.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::ConfigError` if `config` fails
    /// validation, or `InitializationError::HttpClientError` if the shared
    /// HTTP client cannot be built.
    pub fn new(config: FetchConfig) -> Result<Self, InitializationError> {
        config.validate()?;
        let connector = ReqwestConnector::new(config.clone())?;
        Self::with_connector(config, connector)
    }
}

impl<C: HttpConnector> Fetcher<C> {
    /// Creates a fetcher that sends attempts through `connector`.
    pub fn with_connector(config: FetchConfig, connector: C) -> Result<Self, InitializationError> {
        config.validate()?;
        Ok(Self {
            config,
            connector,
            user_agents: UserAgentPool::default(),
            stats: Arc::new(FetchStats::new()),
        })
    }

    /// Replaces the built-in User-Agent pool.
    pub fn with_user_agents(mut self, user_agents: UserAgentPool) -> Self {
        self.user_agents = user_agents;
        self
    }

    /// Records into `stats` instead of a private counter set.
    pub fn with_stats(mut self, stats: Arc<FetchStats>) -> Self {
        self.stats = stats;
        self
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    pub fn stats(&self) -> &Arc<FetchStats> {
        &self.stats
    }

    /// Fetches `request`, retrying transient failures.
    ///
    /// Always produces exactly one outcome; failures never escape as errors.
    pub async fn fetch(&self, request: &FetchRequest) -> FetchOutcome {
        self.fetch_with_cancel(request, &CancellationToken::new())
            .await
    }

    /// Like [`fetch`](Self::fetch), but gives up as soon as `cancel` fires.
    ///
    /// Cancellation aborts a pending backoff or an in-flight request, and no
    /// attempt starts once it has been observed. The outcome is then an error
    /// in [`ErrorCategory::Cancelled`].
    pub async fn fetch_with_cancel(
        &self,
        request: &FetchRequest,
        cancel: &CancellationToken,
    ) -> FetchOutcome {
        self.stats.record_fetch();
        let outcome = self.run(request, cancel).await;
        match &outcome {
            FetchOutcome::Success { .. } => self.stats.record_success(),
            FetchOutcome::Error { category, .. } => self.stats.record_failure(*category),
        }
        outcome
    }

    async fn run(&self, request: &FetchRequest, cancel: &CancellationToken) -> FetchOutcome {
        let url = request.url();
        let max_attempts = request.max_retries().unwrap_or(self.config.max_retries);
        let prepared = PreparedRequest::build(
            url,
            request.cookies(),
            request.proxy(),
            &self.user_agents,
        );

        let session = match self.connector.connect(&prepared.proxy) {
            Ok(session) => session,
            Err(e) => {
                log::warn!("Cannot fetch {url}: {e}");
                return FetchOutcome::error(ErrorCategory::TerminalClient, e.to_string());
            }
        };
        log::debug!(
            "Fetching {url} via {} (up to {max_attempts} attempts, {} cookies)",
            prepared.proxy.redacted(),
            prepared.cookies.len()
        );

        let ctx = ClassifyContext {
            max_attempts,
            connect_timeout: self.config.connect_timeout,
            request_timeout: self.config.request_timeout,
        };
        let mut attempts_made = 0u32;

        for attempt in retry_schedule(max_attempts, self.config.backoff_unit) {
            if !attempt.is_first() {
                self.stats.record_retry();
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return cancelled(url, attempts_made),
                    _ = tokio::time::sleep(attempt.backoff) => {}
                }
            }
            if cancel.is_cancelled() {
                return cancelled(url, attempts_made);
            }

            attempts_made += 1;
            self.stats.record_attempt();
            log::debug!(
                "Attempt {}/{max_attempts} for {url}",
                attempt.index + 1
            );

            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => return cancelled(url, attempts_made),
                result = session.get(&prepared) => result,
            };

            let is_last = attempt.index + 1 >= max_attempts;
            match classify(result, &ctx) {
                Verdict::Success { final_url, body } => {
                    log::info!(
                        "Fetched {url} in {attempts_made} attempt(s) ({} bytes)",
                        body.len()
                    );
                    return FetchOutcome::Success { final_url, body };
                }
                Verdict::Retry(failure) if !is_last => {
                    let next = backoff_for(attempt.index + 1, self.config.backoff_unit);
                    log::info!(
                        "Attempt {}/{max_attempts} for {url} failed ({}): {}; retrying in {:?}",
                        attempt.index + 1,
                        failure.category,
                        failure.message,
                        next
                    );
                }
                Verdict::Retry(failure) | Verdict::Fail(failure) => {
                    log::warn!("Giving up on {url}: {}", failure.message);
                    return failure.into_outcome();
                }
            }
        }

        // Every path through the last attempt returns above
        log::warn!("Giving up on {url}: no terminal outcome after {max_attempts} attempts");
        FetchOutcome::error(
            ErrorCategory::TransientNetwork,
            format!("failed after {max_attempts} attempts"),
        )
    }
}

fn cancelled(url: &url::Url, attempts_made: u32) -> FetchOutcome {
    log::info!("Fetch of {url} cancelled after {attempts_made} attempt(s)");
    FetchOutcome::error(
        ErrorCategory::Cancelled,
        format!("fetch cancelled after {attempts_made} attempt(s)"),
    )
}
