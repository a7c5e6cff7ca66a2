//! MCTS policies for selection and playout.
//!
//! Policies are trait-based to allow customization:
//! - `SelectionPolicy`: How to choose which child to descend into (UCB1)
//! - `PlayoutPolicy`: How to roll a leaf board forward before evaluation

use crate::core::{BoardState, Cell, Faction, PlacementAction, PlannerRng};

use super::config::MCTSConfig;
use super::node::{NodeId, SearchNode};
use super::tree::SearchTree;

// =============================================================================
// Selection Policy
// =============================================================================

/// Policy for selecting which child node to explore.
pub trait SelectionPolicy: Send + Sync {
    /// Pick a child of `node`. Returns `None` if it has no children.
    fn select(&self, tree: &SearchTree, node: NodeId, config: &MCTSConfig) -> Option<NodeId>;
}

/// UCB1 (Upper Confidence Bound) selection policy.
///
/// Balances exploitation (high mean score) with exploration (low visits).
/// Formula: Q(a) + c * sqrt(ln(N) / n(a)). Unvisited children score
/// infinity and are always taken first; ties keep the earliest child.
#[derive(Clone, Debug, Default)]
pub struct UCB1;

impl UCB1 {
    /// UCB1 value of `child` under a parent with `parent_visits` visits.
    #[must_use]
    pub fn score(child: &SearchNode, parent_visits: u32, exploration_constant: f64) -> f64 {
        if child.visit_count == 0 {
            return f64::INFINITY;
        }
        let ln_parent = (parent_visits.max(1) as f64).ln();
        let exploitation = child.total_score / child.visit_count as f64;
        let exploration = exploration_constant * (ln_parent / child.visit_count as f64).sqrt();
        exploitation + exploration
    }
}

impl SelectionPolicy for UCB1 {
    fn select(&self, tree: &SearchTree, node: NodeId, config: &MCTSConfig) -> Option<NodeId> {
        let parent = tree.get(node);
        let mut best: Option<(NodeId, f64)> = None;

        for &child in &parent.children {
            let value = Self::score(tree.get(child), parent.visit_count, config.exploration_constant);
            if best.map_or(true, |(_, b)| value > b) {
                best = Some((child, value));
            }
        }

        best.map(|(id, _)| id)
    }
}

// =============================================================================
// Playout Policy
// =============================================================================

/// Policy for rolling a board forward from a leaf before evaluation.
pub trait PlayoutPolicy: Send + Sync {
    /// Place `faction`'s outposts on `board` from `depth` until `max_depth`.
    ///
    /// Returns the number of placements made.
    fn playout(
        &self,
        board: &mut BoardState,
        faction: Faction,
        candidates: &[Cell],
        depth: u32,
        max_depth: u32,
        rng: &mut PlannerRng,
    ) -> u32;
}

/// Uniform random playout policy.
///
/// Places outposts on uniformly chosen still-free candidate cells until the
/// depth limit is reached or no candidates remain.
#[derive(Clone, Debug, Default)]
pub struct RandomPlayout;

impl PlayoutPolicy for RandomPlayout {
    fn playout(
        &self,
        board: &mut BoardState,
        faction: Faction,
        candidates: &[Cell],
        depth: u32,
        max_depth: u32,
        rng: &mut PlannerRng,
    ) -> u32 {
        let mut open: Vec<Cell> = candidates
            .iter()
            .filter(|c| !board.is_occupied(c.grid))
            .copied()
            .collect();

        let mut depth = depth;
        let mut placed = 0;

        while depth < max_depth && !open.is_empty() {
            let idx = rng.gen_range_usize(0..open.len());
            let cell = open.swap_remove(idx);
            if board.place(&PlacementAction::at(cell, faction)) {
                placed += 1;
            }
            depth += 1;
        }

        placed
    }
}
