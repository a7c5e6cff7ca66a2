//! Collaborator interfaces the agent loop depends on.
//!
//! The planner never owns the authoritative board. Hosts implement these
//! traits over their grid, world state and economy; the agent only reads
//! through them and mutates exclusively via `execute_placement` and `deduct`.

use crate::core::{Faction, GridPos, Outpost, WorldPos};

/// Grid storage and coordinate conversion.
pub trait GridTopology {
    /// Grid width and height in cells.
    fn dimensions(&self) -> (i32, i32);

    /// Whether an outpost may ever be placed on `pos` (terrain, bounds).
    fn is_cell_legal(&self, pos: GridPos) -> bool;

    /// World-space position of a cell.
    fn grid_to_world(&self, pos: GridPos) -> WorldPos;
}

/// Read access to the outposts currently in the world.
pub trait WorldQuery {
    fn current_outposts(&self) -> Vec<Outpost>;
}

/// Funds bookkeeping for placements.
pub trait Economy {
    /// Whether `faction` can pay for one placement.
    fn can_afford(&self, faction: Faction) -> bool;

    /// Charge `faction` for one placement.
    fn deduct(&mut self, faction: Faction);
}

/// Commits placements to the authoritative board.
pub trait PlacementExecutor {
    /// Place `faction`'s outpost on `pos`. Returns `false` if refused.
    fn execute_placement(&mut self, pos: GridPos, faction: Faction) -> bool;
}

/// Everything an agent needs from its host.
pub trait World: GridTopology + WorldQuery + Economy + PlacementExecutor {}

impl<T: GridTopology + WorldQuery + Economy + PlacementExecutor> World for T {}
