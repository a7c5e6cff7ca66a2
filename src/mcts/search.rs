//! Core MCTS search algorithm.
//!
//! Each iteration selects a leaf with UCB1, expands one untried placement,
//! rolls the board forward with random placements, scores the result with the
//! evaluator, and backpropagates the score to the root. The tree is rebuilt
//! from scratch for every decision.

use std::time::Instant;

use log::{debug, trace};

use crate::core::{BoardState, Cell, Faction, PlacementAction, PlannerRng};
use crate::eval::{Evaluator, TriangleEvaluator};

use super::config::MCTSConfig;
use super::node::{NodeId, SearchNode};
use super::policy::{PlayoutPolicy, RandomPlayout, SelectionPolicy, UCB1};
use super::stats::SearchStats;
use super::tree::SearchTree;

/// Main MCTS planner.
///
/// Owns the configuration, policies and RNG. The search tree from the most
/// recent call is kept for inspection until the next search replaces it.
pub struct MCTSPlanner {
    /// Search configuration.
    config: MCTSConfig,

    /// Board evaluator used to score playouts.
    evaluator: Box<dyn Evaluator>,

    /// Selection policy.
    selection: Box<dyn SelectionPolicy>,

    /// Playout policy.
    playout: Box<dyn PlayoutPolicy>,

    /// RNG for expansion choices; playouts use forks of it.
    rng: PlannerRng,

    /// Tree from the last search.
    tree: Option<SearchTree>,

    /// Search statistics.
    stats: SearchStats,
}

impl MCTSPlanner {
    /// Create a planner with the default triangle evaluator.
    pub fn new(config: MCTSConfig) -> Self {
        let rng = PlannerRng::new(config.seed);
        Self {
            config,
            evaluator: Box::new(TriangleEvaluator::default()),
            selection: Box::new(UCB1),
            playout: Box::new(RandomPlayout),
            rng,
            tree: None,
            stats: SearchStats::default(),
        }
    }

    /// Set a custom evaluator.
    pub fn with_evaluator<V: Evaluator + 'static>(mut self, evaluator: V) -> Self {
        self.evaluator = Box::new(evaluator);
        self
    }

    /// Set a custom selection policy.
    pub fn with_selection<S: SelectionPolicy + 'static>(mut self, selection: S) -> Self {
        self.selection = Box::new(selection);
        self
    }

    /// Set a custom playout policy.
    pub fn with_playout<P: PlayoutPolicy + 'static>(mut self, playout: P) -> Self {
        self.playout = Box::new(playout);
        self
    }

    /// Search for the best placement for `faction` among `candidates`.
    ///
    /// Returns `PlacementAction::INVALID` when there is nothing to place.
    /// The returned score is the chosen child's mean playout score.
    pub fn find_best_placement(
        &mut self,
        board: &BoardState,
        faction: Faction,
        candidates: &[Cell],
    ) -> PlacementAction {
        let start = Instant::now();
        self.stats.reset();

        if candidates.is_empty() {
            self.tree = None;
            return PlacementAction::INVALID;
        }

        self.stats.candidates = candidates.len() as u32;
        let mut tree = SearchTree::new(SearchNode::root(board.clone(), faction));

        for _ in 0..self.config.effective_iterations() {
            // At least one iteration runs regardless of budget
            if let Some(budget) = self.config.time_budget {
                if self.stats.iterations > 0 && start.elapsed() >= budget {
                    self.stats.cancelled = true;
                    break;
                }
            }
            self.iteration(&mut tree, faction, candidates);
            self.stats.iterations += 1;
        }

        self.stats.time_us = start.elapsed().as_micros() as u64;

        let action = match tree.most_visited_child() {
            Some(best) => {
                let node = tree.get(best);
                node.incoming_action.with_score(node.mean_score())
            }
            None => PlacementAction::INVALID,
        };

        debug!(
            "{} search: {} iterations, {} nodes, {} us -> {}",
            faction,
            self.stats.iterations,
            tree.len(),
            self.stats.time_us,
            action,
        );

        self.tree = Some(tree);
        action
    }

    /// Single MCTS iteration: select, expand, simulate, backpropagate.
    fn iteration(&mut self, tree: &mut SearchTree, faction: Faction, candidates: &[Cell]) {
        let leaf = self.select(tree);
        let node = self.expand(tree, leaf, faction, candidates);
        let score = self.simulate(tree, node, faction, candidates);
        tree.backpropagate(node, score);
        trace!("iteration: leaf {} simulated {} score {:.3}", leaf, node, score);
    }

    /// Descend through fully expanded nodes by the selection policy.
    fn select(&self, tree: &SearchTree) -> NodeId {
        let mut current = tree.root();
        loop {
            let node = tree.get(current);
            if !node.fully_expanded || !node.has_children() {
                return current;
            }
            match self.selection.select(tree, current, &self.config) {
                Some(child) => current = child,
                None => return current,
            }
        }
    }

    /// Expand one untried placement under `node_id`, if any remain.
    fn expand(
        &mut self,
        tree: &mut SearchTree,
        node_id: NodeId,
        faction: Faction,
        candidates: &[Cell],
    ) -> NodeId {
        let node = tree.get(node_id);
        if node.fully_expanded || node.depth >= self.config.effective_depth() {
            return node_id;
        }

        let untried: Vec<Cell> = candidates
            .iter()
            .filter(|c| !node.tried.contains(&c.grid) && !node.board.is_occupied(c.grid))
            .copied()
            .collect();

        if untried.is_empty() {
            tree.get_mut(node_id).fully_expanded = true;
            return node_id;
        }

        let cell = untried[self.rng.gen_range_usize(0..untried.len())];
        let action = PlacementAction::at(cell, faction);
        let depth = node.depth + 1;

        let mut board = node.board.clone();
        board.place(&action);

        let parent = tree.get_mut(node_id);
        parent.tried.insert(cell.grid);
        if untried.len() == 1 {
            parent.fully_expanded = true;
        }

        let child = tree.add_child(SearchNode::new(board, faction, action, node_id, depth));

        self.stats.nodes_expanded += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);

        child
    }

    /// Random playout from a clone of the node's board, scored for `faction`.
    fn simulate(
        &mut self,
        tree: &SearchTree,
        node_id: NodeId,
        faction: Faction,
        candidates: &[Cell],
    ) -> f64 {
        let node = tree.get(node_id);
        let mut board = node.board.clone();
        let mut sim_rng = self.rng.fork();

        let placed = self.playout.playout(
            &mut board,
            faction,
            candidates,
            node.depth,
            self.config.effective_depth(),
            &mut sim_rng,
        );
        self.stats.simulations += 1;
        self.stats.playout_placements += u64::from(placed);

        self.evaluator.evaluate(&board, faction)
    }

    /// Get search statistics from the last search.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Get the tree from the last search.
    #[must_use]
    pub fn tree(&self) -> Option<&SearchTree> {
        self.tree.as_ref()
    }

    /// Root actions and their visit counts from the last search.
    pub fn root_visits(&self) -> Vec<(PlacementAction, u32)> {
        let Some(tree) = &self.tree else {
            return Vec::new();
        };
        tree.root_node()
            .children
            .iter()
            .map(|&c| {
                let node = tree.get(c);
                (node.incoming_action, node.visit_count)
            })
            .collect()
    }

    /// Get the configuration.
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }

    /// Replace the configuration. The RNG keeps its current stream.
    pub fn set_config(&mut self, config: MCTSConfig) {
        self.config = config;
    }
}
