//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, retry policy, etc.)
//! - Browser header values
//! - Library and CLI configuration types

mod constants;
pub mod headers;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, ConfigValidationError, FetchConfig, LogFormat, LogLevel};
