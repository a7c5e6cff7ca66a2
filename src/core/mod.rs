//! Core planner types: factions, coordinates, outposts, board, actions, RNG.
//!
//! These are the building blocks shared by the evaluator, the candidate
//! filter, the MCTS planner and the agent loop.

pub mod faction;
pub mod geometry;
pub mod outpost;
pub mod board;
pub mod action;
pub mod rng;

pub use faction::Faction;
pub use geometry::{GridPos, Point2, WorldPos};
pub use outpost::{Cell, Outpost};
pub use board::{BoardState, DEFAULT_PLACEMENT_RADIUS};
pub use action::PlacementAction;
pub use rng::PlannerRng;
