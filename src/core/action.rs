//! Placement actions.
//!
//! A `PlacementAction` is the planner's single output per decision cycle. The
//! `INVALID` sentinel stands for "nothing to do" and is returned as data
//! rather than as an error.

use serde::{Deserialize, Serialize};

use super::faction::Faction;
use super::geometry::{GridPos, WorldPos};
use super::outpost::Cell;

/// A recommended outpost placement.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacementAction {
    pub grid_position: GridPos,
    pub world_position: WorldPos,
    pub faction: Faction,
    /// Planner's estimate for this action (mean playout score for MCTS).
    pub score: f64,
}

impl PlacementAction {
    /// No legal action exists.
    pub const INVALID: PlacementAction = PlacementAction {
        grid_position: GridPos::INVALID,
        world_position: WorldPos::new(0.0, 0.0, 0.0),
        faction: Faction(0),
        score: f64::NEG_INFINITY,
    };

    #[must_use]
    pub fn new(grid_position: GridPos, world_position: WorldPos, faction: Faction) -> Self {
        Self {
            grid_position,
            world_position,
            faction,
            score: 0.0,
        }
    }

    /// Action placing `faction`'s outpost on `cell`.
    #[must_use]
    pub fn at(cell: Cell, faction: Faction) -> Self {
        Self::new(cell.grid, cell.world, faction)
    }

    /// Set the score.
    #[must_use]
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }

    /// Both grid coordinates are non-negative.
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.grid_position.is_valid()
    }

    /// The target cell.
    #[must_use]
    pub fn cell(&self) -> Cell {
        Cell::new(self.grid_position, self.world_position)
    }
}

impl std::fmt::Display for PlacementAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_valid() {
            write!(f, "{} -> {} ({:.2})", self.faction, self.grid_position, self.score)
        } else {
            write!(f, "Invalid")
        }
    }
}
