//! Outpost records and candidate cells.

use serde::{Deserialize, Serialize};

use super::faction::Faction;
use super::geometry::{GridPos, Point2, WorldPos};

/// A placed unit occupying one grid cell with a spatial influence radius.
///
/// Immutable once created. Moving an outpost or changing its radius is
/// modelled as remove + add on the board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Outpost {
    pub id: u32,
    pub grid_position: GridPos,
    pub world_position: WorldPos,
    pub faction: Faction,
    /// Owned by the primary (human or host-designated) agent.
    pub is_primary_agent_owned: bool,
    pub influence_radius: f64,
}

impl Outpost {
    /// Create an outpost not owned by the primary agent.
    #[must_use]
    pub fn new(
        id: u32,
        grid_position: GridPos,
        world_position: WorldPos,
        faction: Faction,
        influence_radius: f64,
    ) -> Self {
        Self {
            id,
            grid_position,
            world_position,
            faction,
            is_primary_agent_owned: false,
            influence_radius,
        }
    }

    /// Mark the outpost as owned by the primary agent.
    #[must_use]
    pub fn primary(mut self) -> Self {
        self.is_primary_agent_owned = true;
        self
    }

    /// Ground-plane position.
    #[inline]
    #[must_use]
    pub fn planar(&self) -> Point2 {
        self.world_position.planar()
    }

    #[inline]
    #[must_use]
    pub fn distance(&self, other: &Outpost) -> f64 {
        self.world_position.distance(other.world_position)
    }

    /// Whether two outposts can form a triangle edge.
    ///
    /// Uses the larger of the two radii, so a big outpost can reach a small
    /// one that could not reach it back on its own radius.
    #[must_use]
    pub fn is_connected(&self, other: &Outpost) -> bool {
        self.distance(other) <= 2.0 * self.influence_radius.max(other.influence_radius)
    }
}

/// A placement location: grid cell plus its resolved world coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub grid: GridPos,
    pub world: WorldPos,
}

impl Cell {
    #[must_use]
    pub const fn new(grid: GridPos, world: WorldPos) -> Self {
        Self { grid, world }
    }

    #[inline]
    #[must_use]
    pub fn planar(&self) -> Point2 {
        self.world.planar()
    }
}
