//! Several agents sharing one host world.

use crate::core::Faction;
use crate::error::ConfigError;

use super::config::AgentConfig;
use super::controller::{Agent, CycleOutcome};
use super::world::World;

/// Independent agents ticked in insertion order.
///
/// Agents share nothing but the world. Each plans against its own
/// snapshot taken when its timer fires.
#[derive(Default)]
pub struct AgentPool {
    agents: Vec<Agent>,
}

impl AgentPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and add an agent from `config`.
    pub fn spawn(&mut self, config: AgentConfig) -> Result<(), ConfigError> {
        self.agents.push(Agent::new(config)?);
        Ok(())
    }

    /// Add an already-built agent.
    pub fn push(&mut self, agent: Agent) {
        self.agents.push(agent);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Agent placing for `faction`, if any.
    #[must_use]
    pub fn get(&self, faction: Faction) -> Option<&Agent> {
        self.agents.iter().find(|a| a.faction() == faction)
    }

    pub fn agents(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter()
    }

    /// Advance every agent by `dt` seconds, returning the cycles that ran.
    pub fn tick<W: World>(&mut self, dt: f64, world: &mut W) -> Vec<(Faction, CycleOutcome)> {
        self.agents
            .iter_mut()
            .filter_map(|agent| agent.tick(dt, &mut *world).map(|outcome| (agent.faction(), outcome)))
            .collect()
    }
}
