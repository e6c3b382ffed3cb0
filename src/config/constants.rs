//! Configuration constants.
//!
//! This module defines the defaults used throughout the application:
//! retry policy, network timeouts, and server binding.

use std::time::Duration;

// Retry strategy
/// Maximum number of attempts per fetch (initial attempt + retries)
/// Set to 3 = initial attempt + 2 retries
pub const DEFAULT_MAX_RETRIES: u32 = 3;
/// Upper bound on attempts per fetch, for configuration and per-request
/// overrides alike (10 attempts at the default unit already wait ~17 minutes)
pub const MAX_RETRIES_LIMIT: u32 = 10;
/// Unit of the exponential backoff: attempt `i` waits `2^i` units
pub const DEFAULT_BACKOFF_UNIT: Duration = Duration::from_secs(1);

// Network operation timeouts
/// TCP connection timeout in seconds
pub const CONNECT_TIMEOUT_SECS: u64 = 10;
/// Overall request timeout in seconds (connect + TLS + headers + body)
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

// Redirect handling
/// Maximum number of redirect hops to follow
/// Prevents infinite redirect loops and excessive request chains
pub const MAX_REDIRECT_HOPS: usize = 10;

// Server binding
/// Default address the HTTP adapter listens on
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
/// Default port the HTTP adapter listens on
pub const DEFAULT_PORT: u16 = 8000;

/// Maximum URL length (2048 characters), matching common browser and server limits.
pub const MAX_URL_LENGTH: usize = 2048;

/// Fallback Chrome version used when building the default User-Agent pool
pub const FALLBACK_CHROME_VERSION: &str = "131.0.0.0";

// HTTP status codes (for clarity and consistency)
pub const HTTP_STATUS_SERVICE_UNAVAILABLE: u16 = 503;
