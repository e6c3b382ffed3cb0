//! Transport seam between the retry loop and the network.
//!
//! The fetcher asks an [`HttpConnector`] for one [`HttpSession`] per fetch
//! (routing is fixed for the whole fetch) and sends every attempt through it.
//! [`ReqwestConnector`] is the production implementation; tests supply
//! scripted ones.

use std::future::Future;

use reqwest::StatusCode;
use url::Url;

use crate::config::FetchConfig;
use crate::error_handling::{error_chain_message, InitializationError, TransportError};
use crate::initialization::build_client;
use crate::request::{PreparedRequest, ProxyConfig};

/// What an attempt got back from the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: StatusCode,
    /// URL of the final response, after redirects
    pub final_url: Url,
    /// Body text; only read for 2xx responses
    pub body: String,
}

/// Produces the per-fetch session for a routing configuration.
pub trait HttpConnector: Send + Sync {
    type Session: HttpSession;

    /// Fails when `proxy` cannot be turned into a working transport.
    fn connect(&self, proxy: &ProxyConfig) -> Result<Self::Session, TransportError>;
}

/// Sends attempts of a single fetch.
pub trait HttpSession: Send + Sync {
    /// Issues one GET. Redirects and timeouts are the session's business.
    fn get(
        &self,
        request: &PreparedRequest,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send;
}

/// `reqwest`-backed connector.
///
/// The direct-connection client is built once and shared by every fetch
/// (`reqwest::Client` pools connections and is safe for concurrent use).
/// Proxied fetches get their own client.
#[derive(Debug, Clone)]
pub struct ReqwestConnector {
    config: FetchConfig,
    direct: reqwest::Client,
}

impl ReqwestConnector {
    pub fn new(config: FetchConfig) -> Result<Self, InitializationError> {
        let direct = build_client(&config, &ProxyConfig::Direct)?;
        Ok(Self { config, direct })
    }
}

impl HttpConnector for ReqwestConnector {
    type Session = ReqwestSession;

    fn connect(&self, proxy: &ProxyConfig) -> Result<ReqwestSession, TransportError> {
        if proxy.is_direct() {
            return Ok(ReqwestSession {
                client: self.direct.clone(),
            });
        }
        let client = build_client(&self.config, proxy).map_err(|e| {
            TransportError::Unexpected(format!(
                "invalid proxy configuration {}: {}",
                proxy.redacted(),
                error_chain_message(&e)
            ))
        })?;
        Ok(ReqwestSession { client })
    }
}

/// One fetch's `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestSession {
    client: reqwest::Client,
}

impl HttpSession for ReqwestSession {
    async fn get(&self, request: &PreparedRequest) -> Result<RawResponse, TransportError> {
        let response = self
            .client
            .get(request.url.clone())
            .headers(request.headers.clone())
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(&e))?;

        let status = response.status();
        let final_url = response.url().clone();
        let body = if status.is_success() {
            response
                .text()
                .await
                .map_err(|e| TransportError::from_reqwest(&e))?
        } else {
            String::new()
        };

        Ok(RawResponse {
            status,
            final_url,
            body,
        })
    }
}
