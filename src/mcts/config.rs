//! MCTS configuration parameters.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MCTSConfig {
    /// UCB1 exploration constant (default: sqrt(2) = 1.414).
    /// Higher values favor exploration over exploitation.
    pub exploration_constant: f64,

    /// Iterations per search. This is the only termination condition unless
    /// `time_budget` is set. Values below 1 are treated as 1.
    pub max_iterations: u32,

    /// Maximum placements ahead of the root, counting both tree expansion and
    /// playout. Values below 1 are treated as 1.
    pub max_depth: u32,

    /// Random seed for the search RNG.
    /// Same seed produces deterministic searches.
    pub seed: u64,

    /// Optional wall-clock budget checked between iterations.
    /// `None` runs exactly `max_iterations` iterations.
    pub time_budget: Option<Duration>,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        Self {
            exploration_constant: std::f64::consts::SQRT_2,
            max_iterations: 500,
            max_depth: 3,
            seed: 42,
            time_budget: None,
        }
    }
}

impl MCTSConfig {
    /// Create a new config with custom exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Create a new config with custom iteration count.
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Create a new config with custom max depth.
    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    /// Create a new config with custom seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Stop searching once `budget` has elapsed.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }

    /// Iteration count actually used by the search.
    #[inline]
    #[must_use]
    pub fn effective_iterations(&self) -> u32 {
        self.max_iterations.max(1)
    }

    /// Depth limit actually used by the search.
    #[inline]
    #[must_use]
    pub fn effective_depth(&self) -> u32 {
        self.max_depth.max(1)
    }
}
