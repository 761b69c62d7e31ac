//! Engine configuration.
//!
//! Selects the assignment strategy and bounds the problem size. Can be
//! built in code, parsed from JSON, or read from the environment.
//!
//! # Environment
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `REVIEW_ASSIGNMENT` | `MIP` or `CMACRA` selects exact; anything else the heuristic |
//! | `REVIEW_ASSIGNMENT_SEED` | Fixed seed for the random source (optional) |
//! | `REVIEW_ASSIGNMENT_PAGE_SIZE` | Proposals per solver page |

use serde::{Deserialize, Serialize};

use crate::error::{AssignError, AssignResult};

/// Proposals per exact-optimizer page.
pub const DEFAULT_PAGE_SIZE: usize = 100;
/// Maximum size of the general reviewer pool handed to the optimizers.
pub const DEFAULT_POOL_LIMIT: usize = 200;
/// Base weight of the affinity reward.
pub const DEFAULT_REWARD_WEIGHT: f64 = 100.0;
/// Branch-and-bound node budget per solve.
pub const DEFAULT_NODE_LIMIT: u64 = 50_000;

/// Assignment strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Integer program solved per page.
    Exact,
    /// Randomized greedy assignment, no solver required.
    #[default]
    Heuristic,
}

impl Strategy {
    /// Maps a deployment setting value to a strategy.
    ///
    /// `MIP` and `CMACRA` (case-insensitive) select [`Strategy::Exact`];
    /// every other value falls through to [`Strategy::Heuristic`].
    pub fn from_setting(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "MIP" | "CMACRA" | "EXACT" => Strategy::Exact,
            _ => Strategy::Heuristic,
        }
    }
}

/// Configuration for one assignment run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Strategy used for both the general and committee passes.
    pub strategy: Strategy,
    /// Proposals per exact-optimizer page.
    pub page_size: usize,
    /// Cap on the general reviewer pool after shuffling.
    pub pool_limit: usize,
    /// Base weight of the affinity reward.
    pub reward_weight: f64,
    /// Node budget for the in-crate branch-and-bound backend.
    pub node_limit: u64,
    /// Fixed random seed. `None` draws from the thread RNG.
    pub seed: Option<u64>,
    /// Rerun with the heuristic when the exact strategy produces nothing.
    pub fallback_to_heuristic: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            page_size: DEFAULT_PAGE_SIZE,
            pool_limit: DEFAULT_POOL_LIMIT,
            reward_weight: DEFAULT_REWARD_WEIGHT,
            node_limit: DEFAULT_NODE_LIMIT,
            seed: None,
            fallback_to_heuristic: false,
        }
    }
}

impl EngineConfig {
    /// Creates a configuration for the given strategy with default limits.
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Default::default()
        }
    }

    /// Sets the page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the general pool cap.
    pub fn with_pool_limit(mut self, pool_limit: usize) -> Self {
        self.pool_limit = pool_limit;
        self
    }

    /// Sets the reward base weight.
    pub fn with_reward_weight(mut self, weight: f64) -> Self {
        self.reward_weight = weight;
        self
    }

    /// Sets the branch-and-bound node budget.
    pub fn with_node_limit(mut self, node_limit: u64) -> Self {
        self.node_limit = node_limit;
        self
    }

    /// Fixes the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables the heuristic fallback for failed exact runs.
    pub fn with_fallback(mut self, enabled: bool) -> Self {
        self.fallback_to_heuristic = enabled;
        self
    }

    /// Parses a configuration from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> AssignResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| AssignError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads the configuration from `REVIEW_ASSIGNMENT*` environment variables.
    pub fn from_env() -> AssignResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> AssignResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(value) = lookup("REVIEW_ASSIGNMENT") {
            config.strategy = Strategy::from_setting(&value);
        }
        if let Some(value) = lookup("REVIEW_ASSIGNMENT_SEED") {
            let seed = value.trim().parse::<u64>().map_err(|e| {
                AssignError::ConfigParse(format!("REVIEW_ASSIGNMENT_SEED='{value}': {e}"))
            })?;
            config.seed = Some(seed);
        }
        if let Some(value) = lookup("REVIEW_ASSIGNMENT_PAGE_SIZE") {
            config.page_size = value.trim().parse::<usize>().map_err(|e| {
                AssignError::ConfigParse(format!("REVIEW_ASSIGNMENT_PAGE_SIZE='{value}': {e}"))
            })?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Checks the configuration for values the optimizers cannot work with.
    pub fn validate(&self) -> AssignResult<()> {
        if self.page_size == 0 {
            return Err(AssignError::InvalidConfig("page_size must be positive".into()));
        }
        if self.pool_limit == 0 {
            return Err(AssignError::InvalidConfig("pool_limit must be positive".into()));
        }
        if !self.reward_weight.is_finite() || self.reward_weight < 0.0 {
            return Err(AssignError::InvalidConfig(format!(
                "reward_weight must be a non-negative number, got {}",
                self.reward_weight
            )));
        }
        Ok(())
    }
}
