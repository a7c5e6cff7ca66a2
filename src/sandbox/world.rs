//! In-memory grid world implementing every agent collaborator.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::agent::{Economy, GridTopology, PlacementExecutor, WorldQuery};
use crate::core::{Faction, GridPos, Outpost, WorldPos};

/// A flat grid with blocked cells, per-faction funds and a fixed
/// placement cost.
///
/// Cell `(x, y)` maps to world `(x * cell_size, 0, y * cell_size)`.
#[derive(Clone, Debug)]
pub struct GridWorld {
    width: i32,
    height: i32,
    cell_size: f64,
    blocked: FxHashSet<GridPos>,
    outposts: Vec<Outpost>,
    funds: FxHashMap<Faction, i64>,
    placement_cost: i64,
    outpost_radius: f64,
    primary: Option<Faction>,
    next_id: u32,
}

/// Builder for creating a GridWorld.
pub struct GridWorldBuilder {
    width: i32,
    height: i32,
    cell_size: f64,
    blocked: Vec<GridPos>,
    starting_funds: i64,
    placement_cost: i64,
    outpost_radius: f64,
    primary: Option<Faction>,
}

impl Default for GridWorldBuilder {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            cell_size: 1.0,
            blocked: Vec::new(),
            starting_funds: 1_000,
            placement_cost: 100,
            outpost_radius: 4.0,
            primary: None,
        }
    }
}

impl GridWorldBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(mut self, width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "Grid must be non-empty");
        self.width = width;
        self.height = height;
        self
    }

    pub fn cell_size(mut self, size: f64) -> Self {
        self.cell_size = size;
        self
    }

    pub fn blocked(mut self, cells: impl IntoIterator<Item = GridPos>) -> Self {
        self.blocked.extend(cells);
        self
    }

    pub fn starting_funds(mut self, funds: i64) -> Self {
        self.starting_funds = funds;
        self
    }

    pub fn placement_cost(mut self, cost: i64) -> Self {
        self.placement_cost = cost;
        self
    }

    pub fn outpost_radius(mut self, radius: f64) -> Self {
        self.outpost_radius = radius;
        self
    }

    /// Faction whose outposts are flagged as primary-agent owned.
    pub fn primary(mut self, faction: Faction) -> Self {
        self.primary = Some(faction);
        self
    }

    /// Build the world with funds for `factions`.
    pub fn build(self, factions: &[Faction]) -> GridWorld {
        let funds = factions.iter().map(|&f| (f, self.starting_funds)).collect();
        GridWorld {
            width: self.width,
            height: self.height,
            cell_size: self.cell_size,
            blocked: self.blocked.into_iter().collect(),
            outposts: Vec::new(),
            funds,
            placement_cost: self.placement_cost,
            outpost_radius: self.outpost_radius,
            primary: self.primary,
            next_id: 0,
        }
    }
}

impl GridWorld {
    /// Current funds of `faction` (0 if unknown).
    #[must_use]
    pub fn funds(&self, faction: Faction) -> i64 {
        self.funds.get(&faction).copied().unwrap_or(0)
    }

    pub fn set_funds(&mut self, faction: Faction, funds: i64) {
        self.funds.insert(faction, funds);
    }

    /// All outposts in placement order.
    #[must_use]
    pub fn outposts(&self) -> &[Outpost] {
        &self.outposts
    }

    /// Remove an outpost, e.g. after an authoritative capture.
    pub fn remove_outpost(&mut self, id: u32) -> Option<Outpost> {
        let index = self.outposts.iter().position(|o| o.id == id)?;
        Some(self.outposts.remove(index))
    }

    fn in_bounds(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    fn is_occupied(&self, pos: GridPos) -> bool {
        self.outposts.iter().any(|o| o.grid_position == pos)
    }
}

impl GridTopology for GridWorld {
    fn dimensions(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    fn is_cell_legal(&self, pos: GridPos) -> bool {
        self.in_bounds(pos) && !self.blocked.contains(&pos)
    }

    fn grid_to_world(&self, pos: GridPos) -> WorldPos {
        WorldPos::new(pos.x as f64 * self.cell_size, 0.0, pos.y as f64 * self.cell_size)
    }
}

impl WorldQuery for GridWorld {
    fn current_outposts(&self) -> Vec<Outpost> {
        self.outposts.clone()
    }
}

impl Economy for GridWorld {
    fn can_afford(&self, faction: Faction) -> bool {
        self.funds(faction) >= self.placement_cost
    }

    fn deduct(&mut self, faction: Faction) {
        *self.funds.entry(faction).or_insert(0) -= self.placement_cost;
    }
}

impl PlacementExecutor for GridWorld {
    fn execute_placement(&mut self, pos: GridPos, faction: Faction) -> bool {
        if !self.is_cell_legal(pos) || self.is_occupied(pos) {
            return false;
        }

        let mut outpost = Outpost::new(
            self.next_id,
            pos,
            self.grid_to_world(pos),
            faction,
            self.outpost_radius,
        );
        if self.primary == Some(faction) {
            outpost = outpost.primary();
        }

        self.next_id += 1;
        self.outposts.push(outpost);
        true
    }
}
