//! Reference host world for tests, benchmarks and demos.

pub mod world;

pub use world::{GridWorld, GridWorldBuilder};
