//! Board evaluation around dominant triangles.
//!
//! - `weights`: Tunable heuristic weights
//! - `triangles`: Connectivity and triangle enumeration
//! - `evaluator`: The `Evaluator` trait and the six-term `TriangleEvaluator`

pub mod evaluator;
pub mod triangles;
pub mod weights;

pub use evaluator::{EvaluationBreakdown, Evaluator, TriangleEvaluator};
pub use triangles::{count_connected_pairs, find_triangles, Triangle};
pub use weights::EvaluationWeights;
