//! Autonomous placement agents.
//!
//! - `config`: Difficulty presets and validated per-agent configuration
//! - `world`: Collaborator traits implemented by the host
//! - `controller`: The fixed-interval decision loop
//! - `pool`: Several independent agents sharing one host world

pub mod config;
pub mod controller;
pub mod pool;
pub mod world;

pub use config::{AgentConfig, AgentConfigBuilder, Difficulty};
pub use controller::{legal_cells, snapshot, Agent, AgentStats, CycleOutcome, DecisionPath, SkipReason};
pub use pool::AgentPool;
pub use world::{Economy, GridTopology, PlacementExecutor, World, WorldQuery};
