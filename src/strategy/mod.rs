//! Pre-search strategy: candidate ranking and reduction.

pub mod filter;

pub use filter::{CandidateFilter, FilterWeights};
