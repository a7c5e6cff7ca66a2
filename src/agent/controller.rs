//! Per-agent decision loop.
//!
//! Each agent runs on its own fixed-interval timer. When it fires, the agent
//! checks funds, snapshots the board, enumerates legal cells, then either
//! picks a uniformly random cell or runs the candidate filter and MCTS
//! planner. A valid result is forwarded to the placement executor.
//!
//! Cycles run to completion synchronously. Agents plan against their own
//! snapshot, which may be stale by the time the placement executes.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::core::{BoardState, Cell, Faction, PlacementAction, PlannerRng};
use crate::error::ConfigError;
use crate::eval::Evaluator;
use crate::mcts::MCTSPlanner;
use crate::strategy::CandidateFilter;

use super::config::AgentConfig;
use super::world::{GridTopology, World, WorldQuery};

/// How a decision was reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionPath {
    /// Uniform random legal cell, no search.
    Random,
    /// Candidate filter followed by MCTS.
    Planned,
}

/// Why a cycle did nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// Funds check failed; no search was run.
    InsufficientFunds,
    /// No legal empty cell exists.
    NoLegalCells,
    /// The planner returned the invalid sentinel.
    NoValidAction,
}

/// Result of one decision cycle.
#[derive(Clone, Debug, PartialEq)]
pub enum CycleOutcome {
    Skipped(SkipReason),
    /// Placement executed and cost deducted.
    Placed { action: PlacementAction, path: DecisionPath },
    /// Executor refused the placement; nothing was deducted.
    Rejected { action: PlacementAction, path: DecisionPath },
}

impl CycleOutcome {
    #[must_use]
    pub fn is_placed(&self) -> bool {
        matches!(self, CycleOutcome::Placed { .. })
    }

    /// The path taken, if a decision was made.
    #[must_use]
    pub fn path(&self) -> Option<DecisionPath> {
        match self {
            CycleOutcome::Skipped(_) => None,
            CycleOutcome::Placed { path, .. } | CycleOutcome::Rejected { path, .. } => Some(*path),
        }
    }
}

/// Counters over an agent's lifetime.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentStats {
    pub cycles: u64,
    pub skipped: u64,
    pub random_decisions: u64,
    pub searches_run: u64,
    pub placements: u64,
    pub rejections: u64,
}

/// An autonomous placement agent for one faction.
pub struct Agent {
    config: AgentConfig,
    filter: CandidateFilter,
    planner: MCTSPlanner,
    rng: PlannerRng,
    /// Seconds accumulated toward the next cycle.
    elapsed: f64,
    stats: AgentStats,
}

impl Agent {
    /// Create an agent, validating its configuration.
    pub fn new(config: AgentConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let planner = MCTSPlanner::new(config.mcts_config());
        // Separate stream from the planner's
        let rng = PlannerRng::new(config.seed ^ 0xA5A5_A5A5_A5A5_A5A5);
        Ok(Self {
            config,
            filter: CandidateFilter::default(),
            planner,
            rng,
            elapsed: 0.0,
            stats: AgentStats::default(),
        })
    }

    /// Use a custom candidate filter.
    pub fn with_filter(mut self, filter: CandidateFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Use a custom evaluator for search.
    pub fn with_evaluator<V: Evaluator + 'static>(mut self, evaluator: V) -> Self {
        self.planner = self.planner.with_evaluator(evaluator);
        self
    }

    #[must_use]
    pub fn faction(&self) -> Faction {
        self.config.faction
    }

    #[must_use]
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    #[must_use]
    pub fn stats(&self) -> &AgentStats {
        &self.stats
    }

    #[must_use]
    pub fn planner(&self) -> &MCTSPlanner {
        &self.planner
    }

    /// Advance the timer by `dt` seconds, running a cycle if it fires.
    ///
    /// At most one cycle runs per call; any further backlog is dropped.
    pub fn tick<W: World>(&mut self, dt: f64, world: &mut W) -> Option<CycleOutcome> {
        self.elapsed += dt.max(0.0);
        let interval = self.config.decision_interval;
        if self.elapsed < interval {
            return None;
        }
        self.elapsed = (self.elapsed - interval) % interval;
        Some(self.run_cycle(world))
    }

    /// Run one decision cycle now.
    pub fn run_cycle<W: World>(&mut self, world: &mut W) -> CycleOutcome {
        let faction = self.config.faction;
        self.stats.cycles += 1;

        if !world.can_afford(faction) {
            return self.skip(SkipReason::InsufficientFunds);
        }

        let board = snapshot(&*world, self.config.placement_radius);
        let legal = legal_cells(&board, &*world);
        if legal.is_empty() {
            return self.skip(SkipReason::NoLegalCells);
        }

        let (action, path) = self.decide(&board, &legal);
        if !action.is_valid() {
            return self.skip(SkipReason::NoValidAction);
        }

        if world.execute_placement(action.grid_position, faction) {
            world.deduct(faction);
            self.stats.placements += 1;
            debug!("{} placed at {} via {:?}", faction, action.grid_position, path);
            CycleOutcome::Placed { action, path }
        } else {
            self.stats.rejections += 1;
            warn!("{} placement at {} was rejected", faction, action.grid_position);
            CycleOutcome::Rejected { action, path }
        }
    }

    /// Choose an action for the given snapshot and legal cells.
    ///
    /// Takes the random path with probability `random_placement_chance`;
    /// otherwise filters candidates and searches.
    pub fn decide(&mut self, board: &BoardState, legal: &[Cell]) -> (PlacementAction, DecisionPath) {
        let faction = self.config.faction;
        if legal.is_empty() {
            return (PlacementAction::INVALID, DecisionPath::Random);
        }

        if self.rng.gen_bool(self.config.random_placement_chance) {
            self.stats.random_decisions += 1;
            let cell = legal[self.rng.gen_range_usize(0..legal.len())];
            return (PlacementAction::at(cell, faction), DecisionPath::Random);
        }

        self.stats.searches_run += 1;
        let candidates = self.filter.filter(board, faction, legal, self.config.max_candidates);
        let action = self.planner.find_best_placement(board, faction, &candidates);
        (action, DecisionPath::Planned)
    }

    fn skip(&mut self, reason: SkipReason) -> CycleOutcome {
        self.stats.skipped += 1;
        debug!("{} skipped cycle: {:?}", self.config.faction, reason);
        CycleOutcome::Skipped(reason)
    }
}

/// Build a board snapshot from the host world.
pub fn snapshot<W: GridTopology + WorldQuery + ?Sized>(world: &W, placement_radius: f64) -> BoardState {
    let (width, height) = world.dimensions();
    BoardState::from_snapshot(width, height, world.current_outposts(), |pos| {
        world.is_cell_legal(pos)
    })
    .with_placement_radius(placement_radius)
}

/// Legal empty cells of `board` with their world coordinates.
pub fn legal_cells<W: GridTopology + ?Sized>(board: &BoardState, world: &W) -> Vec<Cell> {
    board
        .available_cells()
        .iter()
        .map(|&pos| Cell::new(pos, world.grid_to_world(pos)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::world::PlacementExecutor;
    use crate::agent::Difficulty;
    use crate::core::GridPos;
    use crate::sandbox::{GridWorld, GridWorldBuilder};

    const ME: Faction = Faction(0);
    const THEM: Faction = Faction(1);

    fn agent(chance: f64) -> Agent {
        let config = AgentConfig::builder(ME)
            .max_iterations(32)
            .max_depth(2)
            .random_placement_chance(chance)
            .build()
            .unwrap();
        Agent::new(config).unwrap()
    }

    fn world() -> GridWorld {
        GridWorldBuilder::new().size(5, 5).build(&[ME, THEM])
    }

    #[test]
    fn test_planned_cycle_places_and_deducts() {
        let mut agent = agent(0.0);
        let mut world = world();

        let outcome = agent.run_cycle(&mut world);

        assert!(outcome.is_placed());
        assert_eq!(outcome.path(), Some(DecisionPath::Planned));
        assert_eq!(world.funds(ME), 900);
        assert_eq!(world.outposts().len(), 1);
        assert_eq!(agent.stats().searches_run, 1);
        assert_eq!(agent.stats().placements, 1);
    }

    #[test]
    fn test_random_cycle_skips_search() {
        let mut agent = agent(1.0);
        let mut world = world();

        let outcome = agent.run_cycle(&mut world);

        assert_eq!(outcome.path(), Some(DecisionPath::Random));
        assert_eq!(agent.stats().random_decisions, 1);
        assert_eq!(agent.stats().searches_run, 0);
        assert_eq!(agent.planner().stats().iterations, 0);
    }

    #[test]
    fn test_insufficient_funds_skips() {
        let mut agent = agent(0.0);
        let mut world = world();
        world.set_funds(ME, 10);

        let outcome = agent.run_cycle(&mut world);

        assert_eq!(outcome, CycleOutcome::Skipped(SkipReason::InsufficientFunds));
        assert_eq!(agent.stats().searches_run, 0);
        assert!(world.outposts().is_empty());
    }

    #[test]
    fn test_no_legal_cells_skips() {
        let blocked = (0..2).flat_map(|x| (0..2).map(move |y| GridPos::new(x, y)));
        let mut world = GridWorldBuilder::new().size(2, 2).blocked(blocked).build(&[ME]);
        let mut agent = agent(0.0);

        assert_eq!(agent.run_cycle(&mut world), CycleOutcome::Skipped(SkipReason::NoLegalCells));
        assert_eq!(world.funds(ME), 1_000);
    }

    #[test]
    fn test_tick_fires_on_interval() {
        let config = AgentConfig::builder(ME)
            .difficulty(Difficulty::Medium)
            .max_iterations(8)
            .build()
            .unwrap();
        let mut agent = Agent::new(config).unwrap();
        let mut world = world();

        assert!(agent.tick(1.0, &mut world).is_none());
        assert!(agent.tick(1.5, &mut world).is_none());
        assert!(agent.tick(0.5, &mut world).is_some());
        assert!(agent.tick(2.5, &mut world).is_none());
        assert!(agent.tick(0.5, &mut world).is_some());
        assert_eq!(agent.stats().cycles, 2);
    }

    #[test]
    fn test_snapshot_and_legal_cells() {
        let mut world = GridWorldBuilder::new()
            .size(3, 3)
            .blocked([GridPos::new(2, 2)])
            .build(&[ME, THEM]);
        world.execute_placement(GridPos::new(1, 1), THEM);

        let board = snapshot(&world, 5.0);
        assert_eq!(board.placement_radius(), 5.0);
        assert_eq!(board.outpost_count(), 1);
        assert!(board.is_occupied(GridPos::new(1, 1)));

        let cells = legal_cells(&board, &world);
        assert_eq!(cells.len(), 7);
        assert!(cells.iter().all(|c| c.grid != GridPos::new(2, 2) && c.grid != GridPos::new(1, 1)));
    }
}
