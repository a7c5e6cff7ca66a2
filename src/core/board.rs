//! Board snapshot used by the evaluator, filter and planner.
//!
//! ## BoardState
//!
//! An immutable-by-convention snapshot of all placed outposts and free cells:
//! - Outposts in placement order
//! - Occupied cells (one per outpost)
//! - Available cells (legal and unoccupied)
//!
//! Uses `im` persistent data structures so `clone()` is O(1) and each
//! simulation branch gets an independent copy that shares structure but never
//! shares mutation. Ordered sets keep iteration deterministic, which seeded
//! searches rely on.

use im::{OrdSet, Vector};
use serde::{Deserialize, Serialize};

use super::action::PlacementAction;
use super::faction::Faction;
use super::geometry::GridPos;
use super::outpost::Outpost;

/// Default influence radius for outposts created by simulated placements.
pub const DEFAULT_PLACEMENT_RADIUS: f64 = 4.0;

/// Snapshot of the placement board.
///
/// Invariants: `occupied_cells` and `available_cells` are disjoint, and every
/// outpost's grid position is in `occupied_cells`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BoardState {
    width: i32,
    height: i32,
    outposts: Vector<Outpost>,
    occupied_cells: OrdSet<GridPos>,
    available_cells: OrdSet<GridPos>,

    /// In-bounds cells the legality predicate rejected at snapshot time.
    blocked_cells: OrdSet<GridPos>,

    /// Radius given to outposts created through `place`.
    placement_radius: f64,

    /// ID assigned to the next outpost created through `place`.
    next_id: u32,
}

impl BoardState {
    /// Create an empty board with every in-bounds cell available.
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        Self::from_snapshot(width, height, std::iter::empty(), |_| true)
    }

    /// Build a board from the outposts currently in the world.
    ///
    /// A cell is available when it is in bounds, `is_legal` accepts it, and
    /// no outpost occupies it. Outposts sharing a cell with an earlier one are
    /// dropped so the cell invariants hold.
    pub fn from_snapshot(
        width: i32,
        height: i32,
        outposts: impl IntoIterator<Item = Outpost>,
        is_legal: impl Fn(GridPos) -> bool,
    ) -> Self {
        let mut board = Self {
            width: width.max(0),
            height: height.max(0),
            outposts: Vector::new(),
            occupied_cells: OrdSet::new(),
            available_cells: OrdSet::new(),
            blocked_cells: OrdSet::new(),
            placement_radius: DEFAULT_PLACEMENT_RADIUS,
            next_id: 0,
        };

        for outpost in outposts {
            board.add_outpost(outpost);
        }

        for y in 0..board.height {
            for x in 0..board.width {
                let pos = GridPos::new(x, y);
                if !is_legal(pos) {
                    board.blocked_cells.insert(pos);
                } else if !board.occupied_cells.contains(&pos) {
                    board.available_cells.insert(pos);
                }
            }
        }

        board
    }

    /// Set the radius assigned to outposts created through `place`.
    #[must_use]
    pub fn with_placement_radius(mut self, radius: f64) -> Self {
        self.placement_radius = radius;
        self
    }

    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[must_use]
    pub fn placement_radius(&self) -> f64 {
        self.placement_radius
    }

    /// Grid-space center of the board.
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (self.width as f64 / 2.0, self.height as f64 / 2.0)
    }

    // === Outposts ===

    /// All outposts in placement order.
    #[must_use]
    pub fn outposts(&self) -> &Vector<Outpost> {
        &self.outposts
    }

    /// Number of outposts on the board.
    #[must_use]
    pub fn outpost_count(&self) -> usize {
        self.outposts.len()
    }

    /// Outposts owned by `faction`.
    pub fn outposts_of(&self, faction: Faction) -> impl Iterator<Item = &Outpost> + '_ {
        self.outposts.iter().filter(move |o| o.faction == faction)
    }

    /// Outposts owned by anyone other than `faction`.
    pub fn outposts_not_of(&self, faction: Faction) -> impl Iterator<Item = &Outpost> + '_ {
        self.outposts.iter().filter(move |o| o.faction != faction)
    }

    /// Number of outposts owned by `faction`.
    #[must_use]
    pub fn count_of(&self, faction: Faction) -> usize {
        self.outposts_of(faction).count()
    }

    /// Distinct factions present on the board, in ascending order.
    #[must_use]
    pub fn factions(&self) -> Vec<Faction> {
        let set: OrdSet<Faction> = self.outposts.iter().map(|o| o.faction).collect();
        set.into_iter().collect()
    }

    /// Look up an outpost by ID.
    #[must_use]
    pub fn get(&self, id: u32) -> Option<&Outpost> {
        self.outposts.iter().find(|o| o.id == id)
    }

    /// Add an outpost.
    ///
    /// Returns `false` and leaves the board unchanged if the cell is already
    /// occupied.
    pub fn add_outpost(&mut self, outpost: Outpost) -> bool {
        if self.occupied_cells.contains(&outpost.grid_position) {
            return false;
        }

        self.available_cells.remove(&outpost.grid_position);
        self.occupied_cells.insert(outpost.grid_position);
        self.next_id = self.next_id.max(outpost.id.saturating_add(1));
        self.outposts.push_back(outpost);
        true
    }

    /// Commit a placement action as a new outpost owned by the action's faction.
    ///
    /// The outpost receives the board's placement radius and a fresh ID.
    pub fn place(&mut self, action: &PlacementAction) -> bool {
        if !action.is_valid() {
            return false;
        }
        let outpost = Outpost::new(
            self.next_id,
            action.grid_position,
            action.world_position,
            action.faction,
            self.placement_radius,
        );
        self.add_outpost(outpost)
    }

    /// Remove an outpost by ID.
    ///
    /// Its cell becomes available again only if it is in bounds and was legal
    /// when the snapshot was taken.
    pub fn remove_outpost(&mut self, id: u32) -> Option<Outpost> {
        let index = self.outposts.iter().position(|o| o.id == id)?;
        let outpost = self.outposts.remove(index);
        let pos = outpost.grid_position;
        self.occupied_cells.remove(&pos);
        if self.in_bounds(pos) && !self.blocked_cells.contains(&pos) {
            self.available_cells.insert(pos);
        }
        Some(outpost)
    }

    // === Cells ===

    #[must_use]
    pub fn occupied_cells(&self) -> &OrdSet<GridPos> {
        &self.occupied_cells
    }

    #[must_use]
    pub fn available_cells(&self) -> &OrdSet<GridPos> {
        &self.available_cells
    }

    #[must_use]
    pub fn is_occupied(&self, pos: GridPos) -> bool {
        self.occupied_cells.contains(&pos)
    }

    #[must_use]
    pub fn is_available(&self, pos: GridPos) -> bool {
        self.available_cells.contains(&pos)
    }

    #[must_use]
    pub fn in_bounds(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::WorldPos;

    fn outpost(id: u32, x: i32, y: i32, faction: u8) -> Outpost {
        Outpost::new(
            id,
            GridPos::new(x, y),
            WorldPos::new(x as f64, 0.0, y as f64),
            Faction::new(faction),
            4.0,
        )
    }

    fn assert_invariants(board: &BoardState) {
        for pos in board.occupied_cells().iter() {
            assert!(!board.available_cells().contains(pos));
        }
        for o in board.outposts() {
            assert!(board.occupied_cells().contains(&o.grid_position));
        }
        assert_eq!(board.occupied_cells().len(), board.outpost_count());
    }

    #[test]
    fn test_new_board() {
        let board = BoardState::new(10, 10);

        assert_eq!(board.available_cells().len(), 100);
        assert_eq!(board.outpost_count(), 0);
        assert_eq!(board.center(), (5.0, 5.0));
        assert_invariants(&board);
    }

    #[test]
    fn test_from_snapshot_respects_legality() {
        let board = BoardState::from_snapshot(
            4,
            4,
            vec![outpost(0, 1, 1, 0), outpost(1, 2, 2, 1)],
            |pos| pos.x != 3,
        );

        assert_eq!(board.outpost_count(), 2);
        // 12 legal cells minus 2 occupied
        assert_eq!(board.available_cells().len(), 10);
        assert!(!board.is_available(GridPos::new(3, 0)));
        assert!(board.is_occupied(GridPos::new(1, 1)));
        assert_invariants(&board);
    }

    #[test]
    fn test_add_and_remove() {
        let mut board = BoardState::new(5, 5);

        assert!(board.add_outpost(outpost(7, 2, 2, 0)));
        assert!(!board.is_available(GridPos::new(2, 2)));
        assert_invariants(&board);

        // Same cell again is rejected
        assert!(!board.add_outpost(outpost(8, 2, 2, 1)));
        assert_eq!(board.outpost_count(), 1);

        let removed = board.remove_outpost(7).unwrap();
        assert_eq!(removed.grid_position, GridPos::new(2, 2));
        assert!(board.is_available(GridPos::new(2, 2)));
        assert!(board.remove_outpost(7).is_none());
        assert_invariants(&board);
    }

    #[test]
    fn test_remove_keeps_blocked_cell_unavailable() {
        let blocked = GridPos::new(3, 3);
        let mut board = BoardState::from_snapshot(
            4,
            4,
            vec![outpost(0, 3, 3, 0), outpost(1, 9, 9, 1)],
            |pos| pos != blocked,
        );
        assert!(board.is_occupied(blocked));

        board.remove_outpost(0).unwrap();
        assert!(!board.is_occupied(blocked));
        assert!(!board.is_available(blocked));

        // Out-of-bounds cells never become available either
        board.remove_outpost(1).unwrap();
        assert!(!board.is_available(GridPos::new(9, 9)));
        assert_eq!(board.available_cells().len(), 15);
        assert_invariants(&board);
    }

    #[test]
    fn test_place_assigns_fresh_ids() {
        let mut board = BoardState::new(5, 5).with_placement_radius(2.5);
        board.add_outpost(outpost(10, 0, 0, 0));

        let action = PlacementAction::new(GridPos::new(1, 1), WorldPos::new(1.0, 0.0, 1.0), Faction::new(2));
        assert!(board.place(&action));

        let placed = board.outposts().last().unwrap();
        assert_eq!(placed.id, 11);
        assert_eq!(placed.faction, Faction::new(2));
        assert_eq!(placed.influence_radius, 2.5);

        assert!(!board.place(&PlacementAction::INVALID));
        assert_invariants(&board);
    }

    #[test]
    fn test_faction_queries() {
        let mut board = BoardState::new(5, 5);
        board.add_outpost(outpost(0, 0, 0, 0));
        board.add_outpost(outpost(1, 1, 0, 1));
        board.add_outpost(outpost(2, 2, 0, 0));
        board.add_outpost(outpost(3, 3, 0, 2));

        assert_eq!(board.count_of(Faction::new(0)), 2);
        assert_eq!(board.outposts_not_of(Faction::new(0)).count(), 2);
        assert_eq!(board.factions(), vec![Faction::new(0), Faction::new(1), Faction::new(2)]);
        assert_eq!(board.get(3).unwrap().faction, Faction::new(2));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut board = BoardState::new(5, 5);
        board.add_outpost(outpost(0, 0, 0, 0));

        let mut branch = board.clone();
        branch.add_outpost(outpost(1, 4, 4, 1));
        branch.remove_outpost(0);

        assert_eq!(board.outpost_count(), 1);
        assert!(board.is_occupied(GridPos::new(0, 0)));
        assert!(board.is_available(GridPos::new(4, 4)));
        assert_eq!(branch.outpost_count(), 1);
    }
}
