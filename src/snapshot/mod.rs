//! Structural export for visualizers
//!
//! Order number = 1-based position in the order sequence
//!   (deepest sentinel-side node = 1, root = node count).
//! Entries are listed root first.

use std::fmt;

#[cfg(feature = "visualize")]
use serde::Serialize;

use crate::tree::{AdaptiveTree, NodeKind};
use crate::Symbol;

/// Label shown for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(Serialize))]
#[cfg_attr(feature = "visualize", serde(tag = "type", content = "symbol", rename_all = "lowercase"))]
pub enum NodeLabel {
    /// Symbol leaf
    Symbol(Symbol),
    /// The NYT leaf
    Sentinel,
    /// Internal node (no text)
    Internal,
}

impl fmt::Display for NodeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeLabel::Symbol(' ') => f.write_str("space"),
            NodeLabel::Symbol(symbol) => write!(f, "{symbol}"),
            NodeLabel::Sentinel => f.write_str("nyt"),
            NodeLabel::Internal => Ok(()),
        }
    }
}

/// Shape class of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(Serialize))]
#[cfg_attr(feature = "visualize", serde(rename_all = "lowercase"))]
pub enum NodeShape {
    /// Has two children
    Internal,
    /// Symbol or sentinel leaf
    Leaf,
}

/// One node of a snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(Serialize))]
pub struct SnapshotNode {
    /// Display order number
    pub order: usize,
    /// Weight at capture time
    pub weight: u64,
    /// Node label
    pub label: NodeLabel,
    /// Internal vs leaf
    pub shape: NodeShape,
    /// Distance from the root
    pub depth: usize,
    /// Order number of the left child
    pub left: Option<usize>,
    /// Order number of the right child
    pub right: Option<usize>,
}

/// Frozen copy of the tree structure
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(Serialize))]
pub struct TreeSnapshot {
    nodes: Vec<SnapshotNode>,
}

impl TreeSnapshot {
    /// Capture the current shape of `tree`.
    pub fn capture(tree: &AdaptiveTree) -> Self {
        let order = tree.order_sequence();
        let mut order_numbers = vec![0usize; tree.len()];
        for (position, id) in order.iter().enumerate() {
            order_numbers[id.index()] = position + 1;
        }

        let mut depths = vec![0usize; tree.len()];
        let mut nodes = Vec::with_capacity(order.len());

        // level order (root first) = order sequence reversed
        for &id in order.iter().rev() {
            let Some(node) = tree.node(id) else { continue };
            let depth = depths[id.index()];
            let children = node.children();
            if let Some((left, right)) = children {
                depths[left.index()] = depth + 1;
                depths[right.index()] = depth + 1;
            }

            let label = match node.kind() {
                NodeKind::Internal => NodeLabel::Internal,
                NodeKind::Symbol(symbol) => NodeLabel::Symbol(symbol),
                NodeKind::Sentinel => NodeLabel::Sentinel,
            };

            nodes.push(SnapshotNode {
                order: order_numbers[id.index()],
                weight: node.weight(),
                label,
                shape: if node.is_internal() {
                    NodeShape::Internal
                } else {
                    NodeShape::Leaf
                },
                depth,
                left: children.map(|(left, _)| order_numbers[left.index()]),
                right: children.map(|(_, right)| order_numbers[right.index()]),
            });
        }

        Self { nodes }
    }

    /// Nodes, root first
    pub fn nodes(&self) -> &[SnapshotNode] {
        &self.nodes
    }

    /// Node with the given order number
    pub fn by_order(&self, order: usize) -> Option<&SnapshotNode> {
        // nodes are stored by descending order number
        let len = self.nodes.len();
        if order == 0 || order > len {
            return None;
        }
        self.nodes.get(len - order)
    }

    /// Root entry
    pub fn root(&self) -> Option<&SnapshotNode> {
        self.nodes.first()
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the snapshot holds no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
