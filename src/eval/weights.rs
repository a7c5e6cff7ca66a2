//! Heuristic weights for board evaluation.

use serde::{Deserialize, Serialize};

/// Weights applied to the six evaluation heuristics.
///
/// The defaults are reproducible starting values, not a tuned strategy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvaluationWeights {
    /// Per own triangle, plus a bonus per enemy it contains.
    pub triangle_completion: f64,

    /// Per connected pair of own outposts.
    pub triangle_potential: f64,

    /// Per (enemy outpost, own triangle) containment.
    pub enemy_capture: f64,

    /// Closeness of own outposts to the board center.
    pub territory_control: f64,

    /// Spacing of own outposts relative to their radius.
    pub clustering: f64,

    /// Own outposts sitting on or inside enemy triangles.
    pub enemy_disruption: f64,

    /// Perpendicular distance at which an outpost counts as near an enemy
    /// triangle edge.
    pub disruption_edge_distance: f64,
}

impl Default for EvaluationWeights {
    fn default() -> Self {
        Self {
            triangle_completion: 100.0,
            triangle_potential: 50.0,
            enemy_capture: 200.0,
            territory_control: 10.0,
            clustering: 20.0,
            enemy_disruption: 80.0,
            disruption_edge_distance: 3.0,
        }
    }
}

impl EvaluationWeights {
    pub fn with_triangle_completion(mut self, w: f64) -> Self {
        self.triangle_completion = w;
        self
    }

    pub fn with_triangle_potential(mut self, w: f64) -> Self {
        self.triangle_potential = w;
        self
    }

    pub fn with_enemy_capture(mut self, w: f64) -> Self {
        self.enemy_capture = w;
        self
    }

    pub fn with_territory_control(mut self, w: f64) -> Self {
        self.territory_control = w;
        self
    }

    pub fn with_clustering(mut self, w: f64) -> Self {
        self.clustering = w;
        self
    }

    pub fn with_enemy_disruption(mut self, w: f64) -> Self {
        self.enemy_disruption = w;
        self
    }
}
