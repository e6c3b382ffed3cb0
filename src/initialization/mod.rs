//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - HTTP clients (timeouts, redirects, proxy routing)
//! - Logger
//! - User-Agent pool
//!
//! All initialization functions return proper error types for error handling.

mod client;
mod logger;

use std::path::Path;

use crate::error_handling::InitializationError;
use crate::user_agent::UserAgentPool;

// Re-export public API
pub use client::build_client;
pub use logger::init_logger_with;

/// Initializes the User-Agent pool.
///
/// Loads `path` when given, otherwise returns the built-in desktop pool.
pub async fn init_user_agents(path: Option<&Path>) -> Result<UserAgentPool, InitializationError> {
    match path {
        Some(path) => UserAgentPool::from_file(path).await,
        None => Ok(UserAgentPool::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_init_user_agents_default() {
        let pool = init_user_agents(None).await.unwrap();
        assert!(!pool.is_empty());
    }

    #[tokio::test]
    async fn test_init_user_agents_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# pool\nAgent/1.0\n\nAgent/2.0").unwrap();
        let pool = init_user_agents(Some(file.path())).await.unwrap();
        assert_eq!(pool.len(), 2);
    }

    #[tokio::test]
    async fn test_init_user_agents_missing_file() {
        let result = init_user_agents(Some(Path::new("/nonexistent/agents.txt"))).await;
        assert!(matches!(
            result,
            Err(InitializationError::UserAgentPoolError(_))
        ));
    }
}
