//! User-Agent pool and selection.
//!
//! Each fetch presents one User-Agent drawn from a pool. The draw goes
//! through a [`UserAgentSelector`] so callers (and tests) can replace the
//! default random choice with a deterministic one.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use rand::Rng;
use tokio::fs;

use crate::config::FALLBACK_CHROME_VERSION;
use crate::error_handling::InitializationError;

/// Picks an index into a non-empty pool of `pool_len` User-Agents.
pub trait UserAgentSelector: Send + Sync {
    /// Returns an index; values `>= pool_len` wrap around.
    fn select(&self, pool_len: usize) -> usize;
}

/// Uniform random choice using the thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSelector;

impl UserAgentSelector for RandomSelector {
    fn select(&self, pool_len: usize) -> usize {
        rand::rng().random_range(0..pool_len)
    }
}

/// Always the same entry. Used to pin output in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedSelector(pub usize);

impl UserAgentSelector for FixedSelector {
    fn select(&self, _pool_len: usize) -> usize {
        self.0
    }
}

/// Generates a desktop Chrome User-Agent string with the given version.
pub fn generate_user_agent(chrome_version: &str) -> String {
    format!(
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{} Safari/537.36",
        chrome_version
    )
}

fn default_agents() -> Vec<String> {
    vec![
        generate_user_agent(FALLBACK_CHROME_VERSION),
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36".to_string(),
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36 Edg/131.0.0.0".to_string(),
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0".to_string(),
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/18.1 Safari/605.1.15".to_string(),
        "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36".to_string(),
    ]
}

/// A non-empty set of User-Agent strings plus the selector that draws from it.
///
/// Cloning is cheap: the agents and the selector are shared.
#[derive(Clone)]
pub struct UserAgentPool {
    agents: Arc<[String]>,
    selector: Arc<dyn UserAgentSelector>,
}

impl fmt::Debug for UserAgentPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserAgentPool")
            .field("agents", &self.agents.len())
            .finish_non_exhaustive()
    }
}

impl Default for UserAgentPool {
    fn default() -> Self {
        Self {
            agents: default_agents().into(),
            selector: Arc::new(RandomSelector),
        }
    }
}

impl UserAgentPool {
    /// Creates a pool with random selection.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::UserAgentPoolError` if `agents` is empty
    /// once blank entries are removed.
    pub fn new<I, S>(agents: I) -> Result<Self, InitializationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let agents: Vec<String> = agents
            .into_iter()
            .map(Into::into)
            .map(|agent| agent.trim().to_string())
            .filter(|agent| !agent.is_empty())
            .collect();
        if agents.is_empty() {
            return Err(InitializationError::UserAgentPoolError(
                "pool must contain at least one User-Agent".to_string(),
            ));
        }
        Ok(Self {
            agents: agents.into(),
            selector: Arc::new(RandomSelector),
        })
    }

    /// Loads a pool from a file with one User-Agent per line.
    ///
    /// Blank lines and lines starting with `#` are skipped.
    pub async fn from_file(path: &Path) -> Result<Self, InitializationError> {
        let contents = fs::read_to_string(path).await.map_err(|e| {
            InitializationError::UserAgentPoolError(format!(
                "failed to read {}: {}",
                path.display(),
                e
            ))
        })?;
        let pool = Self::new(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('#')),
        )?;
        log::info!(
            "Loaded {} User-Agent(s) from {}",
            pool.len(),
            path.display()
        );
        Ok(pool)
    }

    /// Replaces the selector, keeping the agents.
    pub fn with_selector(mut self, selector: impl UserAgentSelector + 'static) -> Self {
        self.selector = Arc::new(selector);
        self
    }

    /// Draws one User-Agent.
    pub fn pick(&self) -> &str {
        let index = self.selector.select(self.agents.len()) % self.agents.len();
        &self.agents[index]
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Always false: construction rejects empty pools.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn agents(&self) -> &[String] {
        &self.agents
    }
}
