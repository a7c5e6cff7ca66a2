//! Configuration errors.
//!
//! Only construction-time validation can fail. Runtime "nothing to do"
//! conditions are reported as data (`PlacementAction::INVALID`,
//! `CycleOutcome::Skipped`).

use thiserror::Error;

/// Invalid agent or planner configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("decision interval must be positive, got {0}")]
    InvalidInterval(f64),

    #[error("max_iterations must be at least 1")]
    ZeroIterations,

    #[error("max_depth must be at least 1")]
    ZeroDepth,

    #[error("max_candidates must be at least 1")]
    ZeroCandidates,

    #[error("random placement chance must be in [0, 1], got {0}")]
    InvalidRandomChance(f64),

    #[error("exploration constant must be finite and non-negative, got {0}")]
    InvalidExploration(f64),
}
