//! Geometric board evaluation.
//!
//! Scores a board for one faction from six weighted heuristics built around
//! dominant triangles and spatial spacing. Evaluation is a pure function of
//! the board and faction: outposts are visited in board order and terms are
//! summed in a fixed order, so repeated calls are bit-identical.

use serde::{Deserialize, Serialize};

use crate::core::{BoardState, Faction, Outpost, PlacementAction};

use super::triangles::{count_connected_pairs, find_triangles, Triangle};
use super::weights::EvaluationWeights;

/// Scores a board from one faction's point of view.
///
/// The planner scores playouts through this trait, so hosts can swap in
/// their own evaluation.
pub trait Evaluator: Send + Sync {
    /// Score `board` for `faction`. Higher is better.
    fn evaluate(&self, board: &BoardState, faction: Faction) -> f64;

    /// Score change for `faction` if `action` were committed.
    ///
    /// The new outpost belongs to the action's own faction, which may differ
    /// from `faction`.
    fn evaluate_delta(&self, board: &BoardState, action: &PlacementAction, faction: Faction) -> f64 {
        let mut after = board.clone();
        if !after.place(action) {
            return 0.0;
        }
        self.evaluate(&after, faction) - self.evaluate(board, faction)
    }

    /// Score change for the acting faction itself.
    fn evaluate_action_delta(&self, board: &BoardState, action: &PlacementAction) -> f64 {
        self.evaluate_delta(board, action, action.faction)
    }
}

/// Unweighted per-heuristic values for one faction.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationBreakdown {
    /// Own triangles, plus 2 per enemy contained in each.
    pub triangle_completion: f64,

    /// Connected pairs of own outposts.
    pub triangle_potential: f64,

    /// (enemy outpost, own triangle) containment pairs.
    pub enemy_capture: f64,

    /// Sum of `1 / (1 + 0.1 * distance_to_center)` over own outposts.
    pub territory_control: f64,

    /// Neighbour proximity plus group-size bonuses.
    pub clustering: f64,

    /// Own outposts near edges of, or inside, enemy triangles.
    pub enemy_disruption: f64,
}

impl EvaluationBreakdown {
    /// Weighted sum of all terms.
    #[must_use]
    pub fn total(&self, weights: &EvaluationWeights) -> f64 {
        weights.triangle_completion * self.triangle_completion
            + weights.triangle_potential * self.triangle_potential
            + weights.enemy_capture * self.enemy_capture
            + weights.territory_control * self.territory_control
            + weights.clustering * self.clustering
            + weights.enemy_disruption * self.enemy_disruption
    }
}

/// The dominant-triangle evaluator.
#[derive(Clone, Debug, Default)]
pub struct TriangleEvaluator {
    weights: EvaluationWeights,
}

impl TriangleEvaluator {
    #[must_use]
    pub fn new(weights: EvaluationWeights) -> Self {
        Self { weights }
    }

    #[must_use]
    pub fn weights(&self) -> &EvaluationWeights {
        &self.weights
    }

    /// Compute every heuristic term for `faction`.
    #[must_use]
    pub fn breakdown(&self, board: &BoardState, faction: Faction) -> EvaluationBreakdown {
        let own: Vec<&Outpost> = board.outposts_of(faction).collect();
        let enemies: Vec<&Outpost> = board.outposts_not_of(faction).collect();

        let own_triangles = find_triangles(&own);

        let mut breakdown = EvaluationBreakdown::default();

        for tri in &own_triangles {
            let contained = tri.count_contained(enemies.iter().copied()) as f64;
            breakdown.triangle_completion += 1.0 + 2.0 * contained;
            breakdown.enemy_capture += contained;
        }

        breakdown.triangle_potential = count_connected_pairs(&own) as f64;
        breakdown.territory_control = territory_control(board, &own);
        breakdown.clustering = clustering(&own);
        breakdown.enemy_disruption = self.enemy_disruption(board, faction, &own);

        breakdown
    }

    fn enemy_disruption(&self, board: &BoardState, faction: Faction, own: &[&Outpost]) -> f64 {
        if own.is_empty() {
            return 0.0;
        }

        let mut score = 0.0;
        for enemy in board.factions().into_iter().filter(|f| *f != faction) {
            let theirs: Vec<&Outpost> = board.outposts_of(enemy).collect();
            for tri in find_triangles(&theirs) {
                score += disruption_against(&tri, own, self.weights.disruption_edge_distance);
            }
        }
        score
    }
}

impl Evaluator for TriangleEvaluator {
    fn evaluate(&self, board: &BoardState, faction: Faction) -> f64 {
        self.breakdown(board, faction).total(&self.weights)
    }
}

fn territory_control(board: &BoardState, own: &[&Outpost]) -> f64 {
    let (cx, cy) = board.center();
    own.iter()
        .map(|o| 1.0 / (1.0 + 0.1 * o.grid_position.distance_to(cx, cy)))
        .sum()
}

fn clustering(own: &[&Outpost]) -> f64 {
    let mut score = 0.0;

    for (i, outpost) in own.iter().enumerate() {
        let radius = outpost.influence_radius;
        if radius <= 0.0 {
            continue;
        }
        let reach = 3.0 * radius;
        let ideal = 1.5 * radius;

        let mut neighbours = 0;
        for (j, other) in own.iter().enumerate() {
            if i == j {
                continue;
            }
            let d = outpost.distance(other);
            if d <= reach {
                neighbours += 1;
                score += (1.0 - (d - ideal).abs() / ideal).max(0.0);
            }
        }

        if (2..=4).contains(&neighbours) {
            score += 1.0;
        }
    }

    score
}

/// Disruption contributed by `own` outposts against one enemy triangle.
fn disruption_against(tri: &Triangle<'_>, own: &[&Outpost], edge_distance: f64) -> f64 {
    let mut score = 0.0;
    for outpost in own {
        let p = outpost.planar();
        if tri.edge_distance(p) <= edge_distance {
            score += 0.5;
        }
        if tri.strictly_contains(p) {
            score += 1.0;
        }
    }
    score
}
