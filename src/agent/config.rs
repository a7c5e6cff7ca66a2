//! Per-agent configuration.
//!
//! Agents are configured explicitly at construction time, either from a
//! `Difficulty` preset or through `AgentConfigBuilder`. Interval, iteration
//! budget and randomness tighten together as difficulty rises.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{Faction, DEFAULT_PLACEMENT_RADIUS};
use crate::error::ConfigError;
use crate::mcts::MCTSConfig;

/// Difficulty presets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    /// All presets from easiest to hardest.
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    /// Seconds between decisions.
    #[must_use]
    pub fn decision_interval(self) -> f64 {
        match self {
            Difficulty::Easy => 5.0,
            Difficulty::Medium => 3.0,
            Difficulty::Hard => 2.0,
            Difficulty::Expert => 1.0,
        }
    }

    #[must_use]
    pub fn max_iterations(self) -> u32 {
        match self {
            Difficulty::Easy => 200,
            Difficulty::Medium => 500,
            Difficulty::Hard => 1000,
            Difficulty::Expert => 2000,
        }
    }

    #[must_use]
    pub fn max_depth(self) -> u32 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 3,
            Difficulty::Hard => 4,
            Difficulty::Expert => 5,
        }
    }

    #[must_use]
    pub fn max_candidates(self) -> usize {
        match self {
            Difficulty::Easy => 10,
            Difficulty::Medium => 15,
            Difficulty::Hard => 20,
            Difficulty::Expert => 25,
        }
    }

    #[must_use]
    pub fn random_placement_chance(self) -> f64 {
        match self {
            Difficulty::Easy => 0.40,
            Difficulty::Medium => 0.20,
            Difficulty::Hard => 0.08,
            Difficulty::Expert => 0.01,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        };
        f.write_str(name)
    }
}

/// Configuration for one agent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Faction this agent places for.
    pub faction: Faction,

    /// Seconds between decision cycles.
    pub decision_interval: f64,

    /// MCTS iterations per planned decision.
    pub max_iterations: u32,

    /// MCTS placement depth.
    pub max_depth: u32,

    /// Candidates kept by the filter before search.
    pub max_candidates: usize,

    /// Probability of skipping search for a uniform random legal cell.
    pub random_placement_chance: f64,

    /// UCB1 exploration constant.
    pub exploration_constant: f64,

    /// Influence radius assumed for this agent's simulated placements.
    pub placement_radius: f64,

    /// Seed for the agent's decision RNG and planner.
    pub seed: u64,

    /// Optional wall-clock cap per search.
    pub time_budget: Option<Duration>,
}

impl AgentConfig {
    /// Preset configuration for `difficulty`.
    #[must_use]
    pub fn for_difficulty(faction: Faction, difficulty: Difficulty) -> Self {
        Self {
            faction,
            decision_interval: difficulty.decision_interval(),
            max_iterations: difficulty.max_iterations(),
            max_depth: difficulty.max_depth(),
            max_candidates: difficulty.max_candidates(),
            random_placement_chance: difficulty.random_placement_chance(),
            exploration_constant: std::f64::consts::SQRT_2,
            placement_radius: DEFAULT_PLACEMENT_RADIUS,
            seed: 42,
            time_budget: None,
        }
    }

    /// Start a builder from the `Medium` preset.
    #[must_use]
    pub fn builder(faction: Faction) -> AgentConfigBuilder {
        AgentConfigBuilder::new(faction)
    }

    /// Check every field is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.decision_interval.is_finite() || self.decision_interval <= 0.0 {
            return Err(ConfigError::InvalidInterval(self.decision_interval));
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        if self.max_candidates == 0 {
            return Err(ConfigError::ZeroCandidates);
        }
        if !(0.0..=1.0).contains(&self.random_placement_chance) {
            return Err(ConfigError::InvalidRandomChance(self.random_placement_chance));
        }
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(ConfigError::InvalidExploration(self.exploration_constant));
        }
        Ok(())
    }

    /// Planner configuration derived from this agent's settings.
    #[must_use]
    pub fn mcts_config(&self) -> MCTSConfig {
        let config = MCTSConfig::default()
            .with_exploration(self.exploration_constant)
            .with_iterations(self.max_iterations)
            .with_max_depth(self.max_depth)
            .with_seed(self.seed);
        match self.time_budget {
            Some(budget) => config.with_time_budget(budget),
            None => config,
        }
    }
}

/// Builder for `AgentConfig`.
#[derive(Clone, Debug)]
pub struct AgentConfigBuilder {
    config: AgentConfig,
}

impl AgentConfigBuilder {
    pub fn new(faction: Faction) -> Self {
        Self {
            config: AgentConfig::for_difficulty(faction, Difficulty::Medium),
        }
    }

    /// Reset tuning fields to a difficulty preset, keeping faction and seed.
    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        let seed = self.config.seed;
        let radius = self.config.placement_radius;
        self.config = AgentConfig::for_difficulty(self.config.faction, difficulty);
        self.config.seed = seed;
        self.config.placement_radius = radius;
        self
    }

    pub fn decision_interval(mut self, seconds: f64) -> Self {
        self.config.decision_interval = seconds;
        self
    }

    pub fn max_iterations(mut self, iterations: u32) -> Self {
        self.config.max_iterations = iterations;
        self
    }

    pub fn max_depth(mut self, depth: u32) -> Self {
        self.config.max_depth = depth;
        self
    }

    pub fn max_candidates(mut self, candidates: usize) -> Self {
        self.config.max_candidates = candidates;
        self
    }

    pub fn random_placement_chance(mut self, chance: f64) -> Self {
        self.config.random_placement_chance = chance;
        self
    }

    pub fn exploration_constant(mut self, c: f64) -> Self {
        self.config.exploration_constant = c;
        self
    }

    pub fn placement_radius(mut self, radius: f64) -> Self {
        self.config.placement_radius = radius;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn time_budget(mut self, budget: Duration) -> Self {
        self.config.time_budget = Some(budget);
        self
    }

    /// Validate and return the configuration.
    pub fn build(self) -> Result<AgentConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
