//! Validated fetch input.

use url::Url;

use crate::config::{MAX_RETRIES_LIMIT, MAX_URL_LENGTH};
use crate::error_handling::RequestError;

/// One fetch to perform. Immutable once constructed.
///
/// # Examples
///
/// ```
/// use browser_fetch::FetchRequest;
///
/// let request = FetchRequest::new("https://www.amazon.com/")?
///     .with_cookies("session-id=123-456; session-token=abc123")
///     .with_max_retries(5)?;
/// assert_eq!(request.max_retries(), Some(5));
/// # Ok::<(), browser_fetch::RequestError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    url: Url,
    cookies: Option<String>,
    proxy: Option<String>,
    max_retries: Option<u32>,
}

impl FetchRequest {
    /// Validates `url` as an absolute http/https URI.
    pub fn new(url: &str) -> Result<Self, RequestError> {
        let url = url.trim();
        if url.len() > MAX_URL_LENGTH {
            return Err(RequestError::UrlTooLong {
                length: url.len(),
                max: MAX_URL_LENGTH,
            });
        }
        let parsed = Url::parse(url).map_err(|e| RequestError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        match parsed.scheme() {
            "http" | "https" => {}
            other => return Err(RequestError::UnsupportedScheme(other.to_string())),
        }
        if parsed.host_str().map_or(true, str::is_empty) {
            return Err(RequestError::InvalidUrl {
                url: url.to_string(),
                reason: "missing host".to_string(),
            });
        }

        Ok(Self {
            url: parsed,
            cookies: None,
            proxy: None,
            max_retries: None,
        })
    }

    /// Raw cookie string, `"k1=v1; k2=v2"`.
    pub fn with_cookies(mut self, cookies: impl Into<String>) -> Self {
        self.cookies = Some(cookies.into());
        self
    }

    /// Proxy URI: `http://`, `https://` or `socks5://`, credentials optional.
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Overrides the fetcher's attempt count for this request.
    ///
    /// Accepts `1..=MAX_RETRIES_LIMIT`.
    pub fn with_max_retries(mut self, max_retries: u32) -> Result<Self, RequestError> {
        if max_retries == 0 {
            return Err(RequestError::ZeroRetries);
        }
        if max_retries > MAX_RETRIES_LIMIT {
            return Err(RequestError::TooManyRetries {
                requested: max_retries,
                max: MAX_RETRIES_LIMIT,
            });
        }
        self.max_retries = Some(max_retries);
        Ok(self)
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn cookies(&self) -> Option<&str> {
        self.cookies.as_deref()
    }

    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    /// Per-request override, if any.
    pub fn max_retries(&self) -> Option<u32> {
        self.max_retries
    }
}
