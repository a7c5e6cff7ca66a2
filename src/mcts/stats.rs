//! Per-search counters, reset at the start of every `find_best_placement`.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Root candidates offered to the search.
    pub candidates: u32,

    pub iterations: u32,

    /// Children added to the tree.
    pub nodes_expanded: u32,

    /// Leaf boards scored by the evaluator.
    pub simulations: u32,

    /// Outposts placed across all playouts.
    pub playout_placements: u64,

    /// Deepest expanded node, in placements below the root.
    pub max_depth: u32,

    /// Wall-clock duration in microseconds.
    pub time_us: u64,

    /// Set when the time budget stopped the loop early.
    pub cancelled: bool,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn iterations_per_second(&self) -> f64 {
        match self.time_us {
            0 => 0.0,
            us => f64::from(self.iterations) * 1e6 / us as f64,
        }
    }

    /// Average placements per playout.
    #[must_use]
    pub fn mean_playout_length(&self) -> f64 {
        match self.simulations {
            0 => 0.0,
            n => self.playout_placements as f64 / f64::from(n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates_with_no_work() {
        let stats = SearchStats::new();
        assert_eq!(stats.iterations_per_second(), 0.0);
        assert_eq!(stats.mean_playout_length(), 0.0);
    }

    #[test]
    fn test_rates() {
        let stats = SearchStats {
            iterations: 500,
            simulations: 500,
            playout_placements: 1250,
            time_us: 250_000,
            ..SearchStats::default()
        };

        assert_eq!(stats.iterations_per_second(), 2000.0);
        assert_eq!(stats.mean_playout_length(), 2.5);
    }

    #[test]
    fn test_reset_clears_cancellation() {
        let mut stats = SearchStats {
            iterations: 12,
            cancelled: true,
            ..SearchStats::default()
        };
        stats.reset();
        assert_eq!(stats, SearchStats::default());
    }
}
