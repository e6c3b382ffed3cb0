//! Browser header values.
//!
//! These values mimic a desktop Chrome navigation. They are sent verbatim
//! on every attempt; only the User-Agent varies between fetches.

/// Accept header for top-level document navigation
pub const ACCEPT_DOCUMENT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7";
/// Accept-Language header
pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
/// Accept-Encoding header (decoded transparently by the HTTP client)
pub const ACCEPT_ENCODING: &str = "gzip, deflate, br";
/// Connection header
pub const CONNECTION: &str = "keep-alive";
/// Cache-Control header
pub const CACHE_CONTROL: &str = "max-age=0";

// Fetch metadata headers
pub const SEC_FETCH_DEST: &str = "document";
pub const SEC_FETCH_MODE: &str = "navigate";
pub const SEC_FETCH_SITE: &str = "same-origin";
pub const SEC_FETCH_USER: &str = "?1";

// Client hint headers
pub const SEC_CH_UA: &str = r#""Not_A Brand";v="8", "Chromium";v="120", "Google Chrome";v="120""#;
pub const SEC_CH_UA_MOBILE: &str = "?0";
pub const SEC_CH_UA_PLATFORM: &str = r#""Windows""#;
