//! HTTP client initialization.
//!
//! This module builds the `reqwest::Client` each fetch sends its attempts
//! through, configured from [`FetchConfig`] and routed per [`ProxyConfig`].

use reqwest::ClientBuilder;

use crate::config::FetchConfig;
use crate::request::ProxyConfig;

/// Builds an HTTP client for one routing configuration.
///
/// Creates a `reqwest::Client` configured with:
/// - Connect and overall timeouts from `config`
/// - Redirect following (up to `config.max_redirects` hops)
/// - HTTP/2 when negotiated via ALPN, rustls TLS backend
/// - Transparent gzip/brotli/deflate decoding
/// - No environment proxies for direct connections; `proxy` otherwise
///   (SOCKS5 through reqwest's `socks` feature)
/// - Certificate validation unless `config.accept_invalid_certs` is set
///
/// # Errors
///
/// Returns a `reqwest::Error` if the proxy URI is unusable or client
/// creation fails.
pub fn build_client(
    config: &FetchConfig,
    proxy: &ProxyConfig,
) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = ClientBuilder::new()
        .connect_timeout(config.connect_timeout)
        .timeout(config.request_timeout)
        .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
        .gzip(true)
        .brotli(true)
        .deflate(true);

    builder = match proxy {
        ProxyConfig::Direct => builder.no_proxy(),
        ProxyConfig::Forward { uri } | ProxyConfig::Socks { uri } => {
            builder.proxy(reqwest::Proxy::all(uri.as_str())?)
        }
    };

    if config.accept_invalid_certs {
        log::warn!("TLS certificate validation is disabled for this client");
        builder = builder.danger_accept_invalid_certs(true);
    }

    builder.build()
}
