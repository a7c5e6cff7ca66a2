//! Arena-based search tree.
//!
//! Uses a flat `Vec<SearchNode>` with index-based references. The whole arena
//! is dropped at the end of a decision cycle.

use super::node::{NodeId, SearchNode};

/// Arena-based search tree.
///
/// Nodes are stored in a flat vector and referenced by `NodeId` indices.
#[derive(Clone, Debug)]
pub struct SearchTree {
    /// All nodes in the tree.
    nodes: Vec<SearchNode>,

    /// The root node ID (always 0).
    root: NodeId,
}

impl SearchTree {
    /// Create a new tree around a root node.
    pub fn new(root: SearchNode) -> Self {
        Self::with_capacity(root, 1024)
    }

    /// Create a tree with custom initial capacity.
    pub fn with_capacity(root: SearchNode, capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(root);
        Self {
            nodes,
            root: NodeId::new(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get the root node.
    #[must_use]
    pub fn root_node(&self) -> &SearchNode {
        self.get(self.root)
    }

    /// Get a node by ID.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a child node and link it under its parent.
    pub fn add_child(&mut self, node: SearchNode) -> NodeId {
        let parent = node.parent;
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(node);
        if !parent.is_none() {
            self.get_mut(parent).children.push(id);
        }
        id
    }

    /// Add `score` to every node from `from` up to the root.
    pub fn backpropagate(&mut self, from: NodeId, score: f64) {
        let mut current = from;
        while !current.is_none() {
            let node = self.get_mut(current);
            node.visit_count += 1;
            node.total_score += score;
            current = node.parent;
        }
    }

    /// Root child with the most visits. Ties go to the earliest expanded.
    #[must_use]
    pub fn most_visited_child(&self) -> Option<NodeId> {
        let mut best: Option<(NodeId, u32)> = None;
        for &child in &self.root_node().children {
            let visits = self.get(child).visit_count;
            if best.map_or(true, |(_, v)| visits > v) {
                best = Some((child, visits));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all nodes.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SearchNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId::new(i as u32), n))
    }

    /// Get statistics about the tree.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        TreeStats {
            node_count: self.nodes.len(),
            max_depth: self.nodes.iter().map(|n| n.depth).max().unwrap_or(0),
            leaf_count: self.nodes.iter().filter(|n| !n.has_children()).count(),
            fully_expanded_count: self.nodes.iter().filter(|n| n.fully_expanded).count(),
            root_children: self.root_node().children.len(),
        }
    }
}

/// Statistics about the search tree.
#[derive(Clone, Debug, Default)]
pub struct TreeStats {
    /// Total number of nodes.
    pub node_count: usize,

    /// Maximum depth reached.
    pub max_depth: u32,

    /// Nodes without children.
    pub leaf_count: usize,

    /// Nodes whose untried actions are exhausted.
    pub fully_expanded_count: usize,

    /// Actions considered at the root.
    pub root_children: usize,
}

impl TreeStats {
    /// Average children per interior node.
    #[must_use]
    pub fn branching_factor(&self) -> f64 {
        let interior = self.node_count.saturating_sub(self.leaf_count);
        if interior == 0 {
            0.0
        } else {
            (self.node_count - 1) as f64 / interior as f64
        }
    }
}
