//! Monte Carlo Tree Search over filtered placement candidates.
//!
//! ## Overview
//!
//! - **UCB1 selection** through fully expanded nodes
//! - **Random expansion** of one untried candidate per iteration
//! - **Random playouts** scored by an `Evaluator`
//! - **Robust-child answer**: the most visited root child wins
//! - **Arena tree**: nodes refer to each other by `NodeId`
//!
//! ## Usage
//!
//! ```rust
//! use outpost_planner::core::{BoardState, Cell, Faction, WorldPos};
//! use outpost_planner::mcts::{MCTSConfig, MCTSPlanner};
//!
//! let board = BoardState::new(8, 8);
//! let candidates: Vec<Cell> = board
//!     .available_cells()
//!     .iter()
//!     .map(|p| Cell::new(*p, WorldPos::new(p.x as f64, 0.0, p.y as f64)))
//!     .collect();
//!
//! let mut planner = MCTSPlanner::new(MCTSConfig::default().with_iterations(200));
//! let action = planner.find_best_placement(&board, Faction::new(0), &candidates);
//! assert!(action.is_valid());
//! ```

pub mod config;
pub mod node;
pub mod policy;
pub mod search;
pub mod stats;
pub mod tree;

// Re-export main types
pub use config::MCTSConfig;
pub use node::{NodeId, SearchNode};
pub use policy::{PlayoutPolicy, RandomPlayout, SelectionPolicy, UCB1};
pub use search::MCTSPlanner;
pub use stats::SearchStats;
pub use tree::{SearchTree, TreeStats};
