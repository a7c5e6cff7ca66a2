//! MCTS search nodes.
//!
//! Nodes live in the `SearchTree` arena and refer to each other through
//! `NodeId` indices: the parent index is stored per node and children as an
//! index list, so the tree has a single owner and no reference cycles.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::core::{BoardState, Faction, GridPos, PlacementAction};

/// Index into the SearchTree node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value representing no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Create a new node ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Check if this is the NONE sentinel.
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// Get the raw index value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "NodeId(NONE)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

/// A node in the search tree.
#[derive(Clone, Debug)]
pub struct SearchNode {
    /// Board after `incoming_action` was applied. Owned by this node.
    pub board: BoardState,

    /// Faction the search is planning for.
    pub faction: Faction,

    /// Action that led here (`PlacementAction::INVALID` for the root).
    pub incoming_action: PlacementAction,

    /// Parent node (NONE for root).
    pub parent: NodeId,

    /// Expanded children.
    /// SmallVec optimizes for typical filtered branching factors.
    pub children: SmallVec<[NodeId; 8]>,

    pub visit_count: u32,
    pub total_score: f64,

    /// Depth in tree (root = 0).
    pub depth: u32,

    /// Every untried action has been consumed.
    pub fully_expanded: bool,

    /// Cells already expanded from this node.
    pub tried: FxHashSet<GridPos>,
}

impl SearchNode {
    /// Create a new node.
    pub fn new(
        board: BoardState,
        faction: Faction,
        incoming_action: PlacementAction,
        parent: NodeId,
        depth: u32,
    ) -> Self {
        Self {
            board,
            faction,
            incoming_action,
            parent,
            children: SmallVec::new(),
            visit_count: 0,
            total_score: 0.0,
            depth,
            fully_expanded: false,
            tried: FxHashSet::default(),
        }
    }

    /// Create a root node for the current board snapshot.
    pub fn root(board: BoardState, faction: Faction) -> Self {
        Self::new(board, faction, PlacementAction::INVALID, NodeId::NONE, 0)
    }

    /// Mean simulation score (0 when unvisited).
    #[must_use]
    pub fn mean_score(&self) -> f64 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.total_score / self.visit_count as f64
        }
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id() {
        let id = NodeId::new(5);
        assert_eq!(id.raw(), 5);
        assert!(!id.is_none());
        assert_eq!(format!("{}", id), "NodeId(5)");

        assert!(NodeId::NONE.is_none());
        assert_eq!(format!("{}", NodeId::NONE), "NodeId(NONE)");
    }

    #[test]
    fn test_node_root() {
        let node = SearchNode::root(BoardState::new(4, 4), Faction::new(0));

        assert!(node.is_root());
        assert_eq!(node.depth, 0);
        assert_eq!(node.visit_count, 0);
        assert!(!node.incoming_action.is_valid());
        assert!(!node.fully_expanded);
        assert!(!node.has_children());
    }

    #[test]
    fn test_mean_score() {
        let mut node = SearchNode::root(BoardState::new(4, 4), Faction::new(0));

        // No visits = 0 score
        assert_eq!(node.mean_score(), 0.0);

        node.visit_count = 4;
        node.total_score = 30.0;
        assert_eq!(node.mean_score(), 7.5);
    }
}
