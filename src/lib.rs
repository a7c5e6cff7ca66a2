//! # outpost-planner
//!
//! Placement planning for AI factions in a grid-based territory game.
//! Factions place outposts on free cells; connected outposts form
//! triangles that capture enemy outposts inside them.
//!
//! ## Architecture
//!
//! - **Snapshot Planning**: Each decision plans against a private
//!   `BoardState` snapshot. The host world is only touched through
//!   `execute_placement` and `deduct`.
//!
//! - **Persistent Data Structures**: O(1) board cloning via `im-rs`, so
//!   search nodes each own their board.
//!
//! - **Deterministic Search**: Given a seed, board and candidate list the
//!   planner always returns the same placement.
//!
//! ## Modules
//!
//! - `core`: Factions, positions, outposts, boards, actions, RNG
//! - `eval`: Triangle geometry and the six-term board evaluator
//! - `strategy`: Heuristic candidate filter
//! - `mcts`: Monte Carlo Tree Search over placements
//! - `agent`: Difficulty presets, collaborator traits and the decision loop
//! - `sandbox`: In-memory host world
//! - `error`: Configuration errors

pub mod agent;
pub mod core;
pub mod error;
pub mod eval;
pub mod mcts;
pub mod sandbox;
pub mod strategy;

// Re-export commonly used types
pub use crate::core::{
    BoardState, Cell, Faction, GridPos, Outpost, PlacementAction, PlannerRng, Point2, WorldPos,
    DEFAULT_PLACEMENT_RADIUS,
};

pub use crate::eval::{EvaluationBreakdown, EvaluationWeights, Evaluator, TriangleEvaluator};

pub use crate::strategy::{CandidateFilter, FilterWeights};

pub use crate::mcts::{MCTSConfig, MCTSPlanner, SearchStats};

pub use crate::agent::{
    Agent, AgentConfig, AgentConfigBuilder, AgentPool, AgentStats, CycleOutcome, DecisionPath,
    Difficulty, SkipReason, World,
};

pub use crate::error::ConfigError;

pub use crate::sandbox::{GridWorld, GridWorldBuilder};
