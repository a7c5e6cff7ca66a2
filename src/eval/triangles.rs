//! Dominant triangle enumeration.
//!
//! A dominant triangle is an unordered triple of same-faction outposts that
//! are pairwise connected. Triangles are derived on demand and never stored
//! on the board.
//!
//! Enumeration is O(n³) over one faction's outposts. That is fine for tens of
//! outposts; boards with hundreds would want a grid-bucket index to prune
//! candidate triples first.

use crate::core::geometry::{
    distance_to_triangle_edges, point_in_triangle, point_strictly_in_triangle, Point2,
};
use crate::core::Outpost;

/// Three pairwise-connected outposts.
#[derive(Clone, Copy, Debug)]
pub struct Triangle<'a> {
    pub vertices: [&'a Outpost; 3],
}

impl<'a> Triangle<'a> {
    #[must_use]
    pub fn new(a: &'a Outpost, b: &'a Outpost, c: &'a Outpost) -> Self {
        Self { vertices: [a, b, c] }
    }

    fn corners(&self) -> (Point2, Point2, Point2) {
        (
            self.vertices[0].planar(),
            self.vertices[1].planar(),
            self.vertices[2].planar(),
        )
    }

    /// Whether `outpost` is one of the triangle's own vertices.
    #[must_use]
    pub fn has_vertex(&self, outpost: &Outpost) -> bool {
        self.vertices.iter().any(|v| v.id == outpost.id)
    }

    /// Boundary-inclusive containment of a ground-plane point.
    #[must_use]
    pub fn contains(&self, p: Point2) -> bool {
        let (a, b, c) = self.corners();
        point_in_triangle(p, a, b, c)
    }

    /// Strict interior containment.
    #[must_use]
    pub fn strictly_contains(&self, p: Point2) -> bool {
        let (a, b, c) = self.corners();
        point_strictly_in_triangle(p, a, b, c)
    }

    /// Distance from `p` to the nearest edge.
    #[must_use]
    pub fn edge_distance(&self, p: Point2) -> f64 {
        let (a, b, c) = self.corners();
        distance_to_triangle_edges(p, a, b, c)
    }

    /// Number of `others` inside this triangle (vertices excluded).
    pub fn count_contained<'b>(&self, others: impl IntoIterator<Item = &'b Outpost>) -> usize {
        others
            .into_iter()
            .filter(|o| !self.has_vertex(o) && self.contains(o.planar()))
            .count()
    }
}

/// Count pairs of connected outposts.
#[must_use]
pub fn count_connected_pairs(outposts: &[&Outpost]) -> usize {
    let mut count = 0;
    for i in 0..outposts.len() {
        for j in (i + 1)..outposts.len() {
            if outposts[i].is_connected(outposts[j]) {
                count += 1;
            }
        }
    }
    count
}

/// Enumerate every pairwise-connected triple.
///
/// The caller passes outposts of a single faction. Triples are produced in
/// index order `(i < j < k)`, so the output is deterministic for a given
/// input order.
#[must_use]
pub fn find_triangles<'a>(outposts: &[&'a Outpost]) -> Vec<Triangle<'a>> {
    let n = outposts.len();
    let mut triangles = Vec::new();
    if n < 3 {
        return triangles;
    }

    for i in 0..n {
        for j in (i + 1)..n {
            if !outposts[i].is_connected(outposts[j]) {
                continue;
            }
            for k in (j + 1)..n {
                if outposts[i].is_connected(outposts[k]) && outposts[j].is_connected(outposts[k]) {
                    triangles.push(Triangle::new(outposts[i], outposts[j], outposts[k]));
                }
            }
        }
    }

    triangles
}
