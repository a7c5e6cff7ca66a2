//! Grid and world coordinates plus the 2D primitives used by the evaluator.
//!
//! World positions are three-dimensional with `y` as the vertical axis. All
//! area-control geometry works on the ground-plane projection `(x, z)`.

use serde::{Deserialize, Serialize};

/// Integer cell coordinate on the placement grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    /// Sentinel used by invalid placement actions.
    pub const INVALID: GridPos = GridPos { x: -1, y: -1 };

    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Both coordinates non-negative.
    #[inline]
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.x >= 0 && self.y >= 0
    }

    /// Euclidean distance to a point in grid space.
    #[must_use]
    pub fn distance_to(self, px: f64, py: f64) -> f64 {
        let dx = self.x as f64 - px;
        let dy = self.y as f64 - py;
        (dx * dx + dy * dy).sqrt()
    }
}

impl std::fmt::Display for GridPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// World-space position. `y` is up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl WorldPos {
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Project onto the ground plane, dropping the vertical axis.
    #[inline]
    #[must_use]
    pub fn planar(self) -> Point2 {
        Point2::new(self.x, self.z)
    }

    /// Ground-plane distance to another position.
    #[inline]
    #[must_use]
    pub fn distance(self, other: WorldPos) -> f64 {
        self.planar().distance(other.planar())
    }
}

/// A point (or vector) on the ground plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    #[must_use]
    pub fn distance(self, other: Point2) -> f64 {
        (self - other).length()
    }

    #[inline]
    #[must_use]
    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    #[inline]
    #[must_use]
    pub fn dot(self, other: Point2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Unit vector in the same direction, or `None` for a zero vector.
    #[must_use]
    pub fn normalized(self) -> Option<Point2> {
        let len = self.length();
        if len <= f64::EPSILON {
            None
        } else {
            Some(Point2::new(self.x / len, self.y / len))
        }
    }
}

impl std::ops::Sub for Point2 {
    type Output = Point2;

    fn sub(self, rhs: Point2) -> Point2 {
        Point2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Signed area term of `p` relative to the directed edge `a -> b`.
#[inline]
#[must_use]
pub fn edge_sign(p: Point2, a: Point2, b: Point2) -> f64 {
    (p.x - b.x) * (a.y - b.y) - (a.x - b.x) * (p.y - b.y)
}

/// Boundary-inclusive point-in-triangle test.
///
/// Inside when the three edge signs are not mixed. Rotating or reflecting the
/// vertex order flips all signs together, so the result is order-independent.
#[must_use]
pub fn point_in_triangle(p: Point2, a: Point2, b: Point2, c: Point2) -> bool {
    let d1 = edge_sign(p, a, b);
    let d2 = edge_sign(p, b, c);
    let d3 = edge_sign(p, c, a);

    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;

    !(has_neg && has_pos)
}

/// Strict interior test: points on an edge or vertex are outside.
#[must_use]
pub fn point_strictly_in_triangle(p: Point2, a: Point2, b: Point2, c: Point2) -> bool {
    let d1 = edge_sign(p, a, b);
    let d2 = edge_sign(p, b, c);
    let d3 = edge_sign(p, c, a);

    (d1 > 0.0 && d2 > 0.0 && d3 > 0.0) || (d1 < 0.0 && d2 < 0.0 && d3 < 0.0)
}

/// Perpendicular distance from `p` to the segment `a..b`, clamped to the
/// segment's endpoints.
#[must_use]
pub fn distance_to_segment(p: Point2, a: Point2, b: Point2) -> f64 {
    let ab = b - a;
    let len_sq = ab.dot(ab);
    if len_sq <= f64::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    let closest = Point2::new(a.x + ab.x * t, a.y + ab.y * t);
    p.distance(closest)
}

/// Smallest distance from `p` to any edge of the triangle.
#[must_use]
pub fn distance_to_triangle_edges(p: Point2, a: Point2, b: Point2, c: Point2) -> f64 {
    distance_to_segment(p, a, b)
        .min(distance_to_segment(p, b, c))
        .min(distance_to_segment(p, c, a))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri() -> (Point2, Point2, Point2) {
        (Point2::new(0.0, 0.0), Point2::new(3.0, 0.0), Point2::new(0.0, 3.0))
    }

    #[test]
    fn test_grid_pos_validity() {
        assert!(GridPos::new(0, 0).is_valid());
        assert!(GridPos::new(4, 9).is_valid());
        assert!(!GridPos::INVALID.is_valid());
        assert!(!GridPos::new(3, -1).is_valid());
        assert_eq!(format!("{}", GridPos::new(2, 5)), "(2, 5)");
    }

    #[test]
    fn test_world_distance_ignores_height() {
        let a = WorldPos::new(0.0, 10.0, 0.0);
        let b = WorldPos::new(3.0, -4.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
    }

    #[test]
    fn test_point_in_triangle() {
        let (a, b, c) = tri();
        assert!(point_in_triangle(Point2::new(1.0, 1.0), a, b, c));
        assert!(!point_in_triangle(Point2::new(3.0, 3.0), a, b, c));
        // Edge and vertex are inside for the inclusive test
        assert!(point_in_triangle(Point2::new(1.5, 0.0), a, b, c));
        assert!(point_in_triangle(a, a, b, c));
    }

    #[test]
    fn test_point_in_triangle_vertex_order() {
        let (a, b, c) = tri();
        let p = Point2::new(1.0, 1.0);
        let q = Point2::new(-1.0, 1.0);
        for (x, y, z) in [(a, b, c), (b, c, a), (c, a, b), (a, c, b), (c, b, a), (b, a, c)] {
            assert!(point_in_triangle(p, x, y, z));
            assert!(!point_in_triangle(q, x, y, z));
        }
    }

    #[test]
    fn test_strict_interior() {
        let (a, b, c) = tri();
        assert!(point_strictly_in_triangle(Point2::new(1.0, 1.0), a, b, c));
        assert!(!point_strictly_in_triangle(Point2::new(1.5, 0.0), a, b, c));
        assert!(!point_strictly_in_triangle(b, a, b, c));
    }

    #[test]
    fn test_distance_to_segment() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(4.0, 0.0);

        assert_eq!(distance_to_segment(Point2::new(2.0, 3.0), a, b), 3.0);
        // Beyond the endpoint, distance is to the endpoint
        assert_eq!(distance_to_segment(Point2::new(7.0, 4.0), a, b), 5.0);
        // Degenerate segment
        assert_eq!(distance_to_segment(Point2::new(0.0, 2.0), a, a), 2.0);
    }

    #[test]
    fn test_normalized() {
        assert!(Point2::new(0.0, 0.0).normalized().is_none());
        let n = Point2::new(3.0, 4.0).normalized().unwrap();
        assert!((n.length() - 1.0).abs() < 1e-12);
    }
}
