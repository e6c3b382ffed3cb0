//! Browser-like request headers.
//!
//! These headers mimic a desktop Chrome navigation to avoid header-based bot
//! detection. The set is fixed; only the User-Agent varies between fetches and
//! the Referer follows the target site.
//!
//! # Note on TLS Fingerprinting
//!
//! JA3/JA4 fingerprinting will still identify rustls. Headers only address
//! header analysis.

use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::config::headers as values;
use crate::user_agent::generate_user_agent;
use crate::config::FALLBACK_CHROME_VERSION;

/// Returns the target site's root (`scheme://host[:port]/`), used as Referer.
pub fn site_root(target: &Url) -> String {
    format!("{}/", target.origin().ascii_serialization())
}

/// Builds the full header set for one fetch.
///
/// `user_agent` comes from the [`UserAgentPool`](crate::UserAgentPool); a
/// value that is not a legal header value is replaced by the default Chrome
/// agent.
pub fn browser_headers(target: &Url, user_agent: &str) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(16);

    let user_agent = HeaderValue::from_str(user_agent).unwrap_or_else(|_| {
        log::warn!("User-Agent {:?} is not a valid header value, using default", user_agent);
        HeaderValue::from_str(&generate_user_agent(FALLBACK_CHROME_VERSION))
            .unwrap_or_else(|_| HeaderValue::from_static("Mozilla/5.0"))
    });
    headers.insert(header::USER_AGENT, user_agent);
    headers.insert(header::ACCEPT, HeaderValue::from_static(values::ACCEPT_DOCUMENT));
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static(values::ACCEPT_LANGUAGE),
    );
    headers.insert(
        header::ACCEPT_ENCODING,
        HeaderValue::from_static(values::ACCEPT_ENCODING),
    );
    if let Ok(referer) = HeaderValue::from_str(&site_root(target)) {
        headers.insert(header::REFERER, referer);
    }
    headers.insert(header::CONNECTION, HeaderValue::from_static(values::CONNECTION));
    headers.insert(
        header::UPGRADE_INSECURE_REQUESTS,
        HeaderValue::from_static("1"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-dest"),
        HeaderValue::from_static(values::SEC_FETCH_DEST),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-mode"),
        HeaderValue::from_static(values::SEC_FETCH_MODE),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-site"),
        HeaderValue::from_static(values::SEC_FETCH_SITE),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-user"),
        HeaderValue::from_static(values::SEC_FETCH_USER),
    );
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(values::CACHE_CONTROL),
    );
    headers.insert(header::DNT, HeaderValue::from_static("1"));
    headers.insert(
        HeaderName::from_static("sec-ch-ua"),
        HeaderValue::from_static(values::SEC_CH_UA),
    );
    headers.insert(
        HeaderName::from_static("sec-ch-ua-mobile"),
        HeaderValue::from_static(values::SEC_CH_UA_MOBILE),
    );
    headers.insert(
        HeaderName::from_static("sec-ch-ua-platform"),
        HeaderValue::from_static(values::SEC_CH_UA_PLATFORM),
    );

    headers
}
