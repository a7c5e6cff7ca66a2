//! Heuristic candidate reduction.
//!
//! Bounds the planner's branching factor by ranking every legal cell with
//! five cheap placement heuristics and keeping the top K.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::core::{BoardState, Cell, Faction, GridPos, Outpost, Point2};
use crate::eval::{find_triangles, Triangle};

/// Weights for the five placement heuristics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterWeights {
    /// Per connected own pair the candidate would close into a triangle.
    pub triangle_completion: f64,

    /// Closeness of the nearest-friendly distance to `optimal_distance`.
    pub distance_optimality: f64,

    /// Per enemy outpost a completed triangle would enclose.
    pub encirclement: f64,

    /// Candidate sits on or inside an enemy triangle.
    pub disruption: f64,

    /// Alignment with the outward direction toward the board center.
    pub expansion: f64,

    /// Preferred world distance to the nearest friendly outpost.
    pub optimal_distance: f64,

    /// Edge distance at which a candidate counts as disrupting.
    pub disruption_edge_distance: f64,
}

impl Default for FilterWeights {
    fn default() -> Self {
        Self {
            triangle_completion: 100.0,
            distance_optimality: 30.0,
            encirclement: 80.0,
            disruption: 60.0,
            expansion: 20.0,
            optimal_distance: 6.0,
            disruption_edge_distance: 3.0,
        }
    }
}

impl FilterWeights {
    pub fn with_optimal_distance(mut self, distance: f64) -> Self {
        self.optimal_distance = distance;
        self
    }

    pub fn with_triangle_completion(mut self, w: f64) -> Self {
        self.triangle_completion = w;
        self
    }

    pub fn with_distance_optimality(mut self, w: f64) -> Self {
        self.distance_optimality = w;
        self
    }

    pub fn with_encirclement(mut self, w: f64) -> Self {
        self.encirclement = w;
        self
    }

    pub fn with_disruption(mut self, w: f64) -> Self {
        self.disruption = w;
        self
    }

    pub fn with_expansion(mut self, w: f64) -> Self {
        self.expansion = w;
        self
    }
}

/// Per-call precomputation shared by every candidate.
struct FilterContext<'a> {
    faction: Faction,
    radius: f64,
    own: Vec<&'a Outpost>,
    enemies: Vec<&'a Outpost>,
    connected_pairs: Vec<(&'a Outpost, &'a Outpost)>,
    enemy_triangles: Vec<Triangle<'a>>,
    center: (f64, f64),
    centroid: Option<(f64, f64)>,
}

impl<'a> FilterContext<'a> {
    fn new(board: &'a BoardState, faction: Faction) -> Self {
        let own: Vec<&Outpost> = board.outposts_of(faction).collect();
        let enemies: Vec<&Outpost> = board.outposts_not_of(faction).collect();

        let mut connected_pairs = Vec::new();
        for i in 0..own.len() {
            for j in (i + 1)..own.len() {
                if own[i].is_connected(own[j]) {
                    connected_pairs.push((own[i], own[j]));
                }
            }
        }

        let mut enemy_triangles = Vec::new();
        for enemy in board.factions().into_iter().filter(|f| *f != faction) {
            let theirs: Vec<&Outpost> = board.outposts_of(enemy).collect();
            enemy_triangles.extend(find_triangles(&theirs));
        }

        let centroid = if own.is_empty() {
            None
        } else {
            let n = own.len() as f64;
            let sx: f64 = own.iter().map(|o| o.grid_position.x as f64).sum();
            let sy: f64 = own.iter().map(|o| o.grid_position.y as f64).sum();
            Some((sx / n, sy / n))
        };

        Self {
            faction,
            radius: board.placement_radius(),
            own,
            enemies,
            connected_pairs,
            enemy_triangles,
            center: board.center(),
            centroid,
        }
    }

    fn hypothetical(&self, cell: &Cell) -> Outpost {
        Outpost::new(u32::MAX, cell.grid, cell.world, self.faction, self.radius)
    }
}

/// Ranks legal cells and keeps the most promising ones.
#[derive(Clone, Debug, Default)]
pub struct CandidateFilter {
    weights: FilterWeights,
}

impl CandidateFilter {
    #[must_use]
    pub fn new(weights: FilterWeights) -> Self {
        Self { weights }
    }

    #[must_use]
    pub fn weights(&self) -> &FilterWeights {
        &self.weights
    }

    /// Keep the `max_candidates` best cells for `faction`.
    ///
    /// Inputs no larger than `max_candidates` come back unchanged. Otherwise
    /// the result is sorted by descending score; ties keep their input order.
    #[must_use]
    pub fn filter(
        &self,
        board: &BoardState,
        faction: Faction,
        candidates: &[Cell],
        max_candidates: usize,
    ) -> Vec<Cell> {
        if candidates.len() <= max_candidates {
            return candidates.to_vec();
        }

        let ctx = FilterContext::new(board, faction);
        let mut scored: Vec<(Cell, f64)> = candidates
            .iter()
            .map(|cell| {
                let score = self.score_with(&ctx, cell);
                // NaN ranks last
                (*cell, if score.is_nan() { f64::NEG_INFINITY } else { score })
            })
            .collect();

        // Vec::sort_by is stable
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(max_candidates);

        trace!(
            "filtered {} candidates to {} for {} (best {:?})",
            candidates.len(),
            scored.len(),
            faction,
            scored.first().map(|(c, s)| (c.grid, *s)),
        );

        scored.into_iter().map(|(cell, _)| cell).collect()
    }

    /// Weighted heuristic score of placing `faction`'s outpost on `cell`.
    #[must_use]
    pub fn score(&self, board: &BoardState, faction: Faction, cell: &Cell) -> f64 {
        let ctx = FilterContext::new(board, faction);
        self.score_with(&ctx, cell)
    }

    fn score_with(&self, ctx: &FilterContext<'_>, cell: &Cell) -> f64 {
        let w = &self.weights;
        let candidate = ctx.hypothetical(cell);

        let (completion, encirclement) = completion_and_encirclement(ctx, &candidate);

        w.triangle_completion * completion
            + w.distance_optimality * distance_optimality(ctx, &candidate, w.optimal_distance)
            + w.encirclement * encirclement
            + w.disruption * disruption(ctx, cell.planar(), w.disruption_edge_distance)
            + w.expansion * expansion(ctx, cell.grid)
    }
}

/// Triangles the candidate would close, and enemies those triangles enclose.
fn completion_and_encirclement(ctx: &FilterContext<'_>, candidate: &Outpost) -> (f64, f64) {
    let mut completed = 0.0;
    let mut enclosed = 0.0;

    for &(a, b) in &ctx.connected_pairs {
        if candidate.is_connected(a) && candidate.is_connected(b) {
            completed += 1.0;
            let tri = Triangle::new(a, b, candidate);
            enclosed += tri.count_contained(ctx.enemies.iter().copied()) as f64;
        }
    }

    (completed, enclosed)
}

/// Peaks at 1 when the nearest friendly is exactly `optimal` away.
fn distance_optimality(ctx: &FilterContext<'_>, candidate: &Outpost, optimal: f64) -> f64 {
    if optimal <= 0.0 {
        return 0.0;
    }
    let nearest = ctx
        .own
        .iter()
        .map(|o| o.distance(candidate))
        .fold(f64::INFINITY, f64::min);

    if nearest.is_finite() {
        (1.0 - (nearest - optimal).abs() / optimal).max(0.0)
    } else {
        0.0
    }
}

fn disruption(ctx: &FilterContext<'_>, p: Point2, edge_distance: f64) -> f64 {
    let mut score = 0.0;
    for tri in &ctx.enemy_triangles {
        if tri.strictly_contains(p) {
            score += 1.0;
        } else if tri.edge_distance(p) <= edge_distance {
            score += 0.5;
        }
    }
    score
}

/// Direction alignment from the own centroid toward the board center.
///
/// With no own outposts, closeness to the board center instead.
fn expansion(ctx: &FilterContext<'_>, pos: GridPos) -> f64 {
    let (cx, cy) = ctx.center;
    let Some((gx, gy)) = ctx.centroid else {
        return 1.0 / (1.0 + 0.1 * pos.distance_to(cx, cy));
    };

    let outward = Point2::new(cx - gx, cy - gy).normalized();
    let toward = Point2::new(pos.x as f64 - gx, pos.y as f64 - gy).normalized();

    match (outward, toward) {
        (Some(o), Some(t)) => o.dot(t).max(0.0),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::WorldPos;

    const A: Faction = Faction(0);
    const B: Faction = Faction(1);

    fn cell(x: i32, y: i32) -> Cell {
        Cell::new(GridPos::new(x, y), WorldPos::new(x as f64, 0.0, y as f64))
    }

    fn outpost(id: u32, x: i32, y: i32, faction: Faction) -> Outpost {
        Outpost::new(
            id,
            GridPos::new(x, y),
            WorldPos::new(x as f64, 0.0, y as f64),
            faction,
            4.0,
        )
    }

    fn all_cells(board: &BoardState) -> Vec<Cell> {
        board
            .available_cells()
            .iter()
            .map(|p| cell(p.x, p.y))
            .collect()
    }

    #[test]
    fn test_small_input_unchanged() {
        let board = BoardState::new(10, 10);
        let input = vec![cell(9, 9), cell(0, 0), cell(5, 5)];
        let out = CandidateFilter::default().filter(&board, A, &input, 3);
        assert_eq!(out, input);
    }

    #[test]
    fn test_truncates_to_k() {
        let board = BoardState::new(10, 10);
        let input = all_cells(&board);
        let out = CandidateFilter::default().filter(&board, A, &input, 7);

        assert_eq!(out.len(), 7);
        assert!(out.iter().all(|c| input.contains(c)));
    }

    #[test]
    fn test_first_placement_prefers_center() {
        let board = BoardState::new(10, 10);
        let input = all_cells(&board);
        let out = CandidateFilter::default().filter(&board, A, &input, 1);
        assert_eq!(out[0].grid, GridPos::new(5, 5));
    }

    #[test]
    fn test_completion_cell_ranks_first() {
        let board = BoardState::from_snapshot(
            20,
            20,
            vec![outpost(0, 2, 2, A), outpost(1, 6, 2, A)],
            |_| true,
        );
        let input = vec![cell(18, 18), cell(4, 5), cell(0, 19)];
        let out = CandidateFilter::default().filter(&board, A, &input, 1);
        assert_eq!(out[0].grid, GridPos::new(4, 5));
    }

    #[test]
    fn test_ties_keep_input_order() {
        let board = BoardState::new(10, 10);
        // All zero-weight so every candidate ties
        let weights = FilterWeights::default()
            .with_triangle_completion(0.0)
            .with_distance_optimality(0.0)
            .with_encirclement(0.0)
            .with_disruption(0.0)
            .with_expansion(0.0);
        let input = vec![cell(3, 3), cell(1, 1), cell(7, 2), cell(0, 9)];
        let out = CandidateFilter::new(weights).filter(&board, A, &input, 3);
        assert_eq!(out, input[..3].to_vec());
    }

    #[test]
    fn test_encirclement_rewarded() {
        let board = BoardState::from_snapshot(
            20,
            20,
            vec![outpost(0, 0, 0, A), outpost(1, 6, 0, A), outpost(2, 2, 1, B)],
            |_| true,
        );
        let filter = CandidateFilter::default();
        // Both close a triangle; only (1,5) encloses the enemy at (2,1)
        let enclosing = filter.score(&board, A, &cell(1, 5));
        let empty = filter.score(&board, A, &cell(3, -4));
        assert!(enclosing > empty);
    }

    #[test]
    fn test_disruption_scores_enemy_triangle() {
        let board = BoardState::from_snapshot(
            20,
            20,
            vec![outpost(0, 0, 0, B), outpost(1, 5, 0, B), outpost(2, 0, 5, B)],
            |_| true,
        );
        let weights = FilterWeights::default().with_expansion(0.0);
        let filter = CandidateFilter::new(weights);

        let inside = filter.score(&board, A, &cell(1, 1));
        let far = filter.score(&board, A, &cell(19, 19));
        assert_eq!(inside, 60.0);
        assert_eq!(far, 0.0);
    }

    fn only(weights: FilterWeights) -> CandidateFilter {
        CandidateFilter::new(weights)
    }

    fn zeroed() -> FilterWeights {
        FilterWeights::default()
            .with_triangle_completion(0.0)
            .with_distance_optimality(0.0)
            .with_encirclement(0.0)
            .with_disruption(0.0)
            .with_expansion(0.0)
    }

    #[test]
    fn test_distance_optimality_peaks_at_optimal_distance() {
        let board = BoardState::from_snapshot(20, 20, vec![outpost(0, 1, 1, A)], |_| true);
        let filter = only(zeroed().with_distance_optimality(30.0));

        assert_eq!(filter.score(&board, A, &cell(7, 1)), 30.0);
        assert_eq!(filter.score(&board, A, &cell(4, 1)), 15.0);
        assert_eq!(filter.score(&board, A, &cell(10, 1)), 15.0);
        assert_eq!(filter.score(&board, A, &cell(19, 1)), 0.0);

        let custom = only(zeroed().with_distance_optimality(30.0).with_optimal_distance(3.0));
        assert_eq!(custom.score(&board, A, &cell(4, 1)), 30.0);
    }

    #[test]
    fn test_expansion_follows_centroid_to_center() {
        // Centroid (1, 1), center (10, 10)
        let board = BoardState::from_snapshot(20, 20, vec![outpost(0, 1, 1, A)], |_| true);
        let filter = only(zeroed().with_expansion(20.0));

        let straight = filter.score(&board, A, &cell(7, 7));
        let diagonal = filter.score(&board, A, &cell(7, 1));
        let behind = filter.score(&board, A, &cell(0, 0));

        assert!((straight - 20.0).abs() < 1e-9);
        assert!((diagonal - 20.0 * std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-9);
        assert_eq!(behind, 0.0);
        assert_eq!(filter.score(&board, A, &cell(1, 1)), 0.0);
    }

    #[test]
    fn test_nan_scores_sort_without_panicking() {
        let board = BoardState::from_snapshot(20, 20, vec![outpost(0, 1, 1, A)], |_| true);
        let input: Vec<Cell> = (0..8).map(|x| cell(x + 4, 1)).collect();

        // Every score is NaN: all tie at the bottom and keep input order
        let poisoned = only(FilterWeights::default().with_expansion(f64::NAN));
        let out = poisoned.filter(&board, A, &input, 5);
        assert_eq!(out, input[..5].to_vec());
    }
}
