//! Error handling and fetch statistics.
//!
//! This module provides:
//! - Error categories carried by error outcomes
//! - Typed errors for request construction, transports and initialization
//! - Thread-safe fetch statistics

mod stats;
mod types;

// Re-export public API
pub use stats::FetchStats;
pub use types::{
    error_chain_message, ErrorCategory, InitializationError, RequestError, TransportError,
};
