//! Adaptive Huffman tree
//!
//! Arena of nodes addressed by `NodeId`:
//!   children are owning indices held by the parent,
//!   parents are plain back-indices (no cycles to collect).
//!
//! Invariants after every mutation:
//!   - full binary tree, exactly one sentinel leaf (weight 0)
//!   - internal weight = left + right
//!   - sibling property: weights non-decreasing along the order sequence

mod exchange;
mod node;
mod traversal;
mod update;

use std::collections::HashMap;

use thiserror::Error;

use crate::codes::Code;
use crate::Symbol;

pub use node::{Node, NodeId, NodeKind};
pub use traversal::LevelOrder;
pub use update::Update;

/// Internal-consistency faults raised while maintaining the tree.
///
/// None of these are expected during correct operation; each one aborts the
/// mutation that detected it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The maintainer asked to exchange a node with itself.
    #[error("cannot exchange node {0} with itself")]
    SelfExchange(NodeId),

    /// The root has no slot to exchange.
    #[error("cannot exchange root node {0}")]
    RootExchange(NodeId),

    /// Exchanging along an ancestor chain would detach a subtree from the tree.
    #[error("cannot exchange node {ancestor} with its descendant {descendant}")]
    AncestorExchange {
        /// Node closer to the root
        ancestor: NodeId,
        /// Node inside the ancestor's subtree
        descendant: NodeId,
    },

    /// Only symbol leaves accept external weight increments.
    #[error("node {0} is not a symbol leaf")]
    NotASymbolLeaf(NodeId),

    /// A single node kept finding exchange partners.
    #[error("node {node} exceeded {limit} consecutive exchanges")]
    ExchangeLimit {
        /// Node being maintained
        node: NodeId,
        /// Number of exchanges allowed
        limit: usize,
    },

    /// Id does not address a node in this tree.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// Shape or weight bookkeeping is broken at a node.
    #[error("structural violation at node {node}: {reason}")]
    Structure {
        /// Offending node
        node: NodeId,
        /// What is wrong
        reason: &'static str,
    },

    /// Order sequence has a weight decrease.
    #[error("sibling property violated at order position {position}: weight {weight} precedes {next_weight}")]
    SiblingProperty {
        /// Zero-based position in the order sequence
        position: usize,
        /// Weight at `position`
        weight: u64,
        /// Smaller weight found at `position + 1`
        next_weight: u64,
    },
}

/// Adaptive Huffman tree owned by one encoding session.
///
/// Starts as a single sentinel leaf acting as root and only ever grows: each
/// first occurrence adds one internal node and one symbol leaf.
#[derive(Debug, Clone)]
pub struct AdaptiveTree {
    nodes: Vec<Node>,
    root: NodeId,

    /// Direct handle on the NYT leaf, O(1) access on every new symbol
    sentinel: NodeId,

    /// Symbol → leaf index
    leaves: HashMap<Symbol, NodeId>,
}

impl AdaptiveTree {
    /// Create tree holding only the sentinel leaf
    pub fn new() -> Self {
        let sentinel = NodeId::new(0);
        Self {
            nodes: vec![Node::sentinel()],
            root: sentinel,
            sentinel,
            leaves: HashMap::new(),
        }
    }

    /// Current root
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The NYT leaf
    pub fn sentinel(&self) -> NodeId {
        self.sentinel
    }

    /// Look up a node
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Leaf currently holding `symbol`
    pub fn leaf(&self, symbol: Symbol) -> Option<NodeId> {
        self.leaves.get(&symbol).copied()
    }

    /// Check whether `symbol` has been observed
    pub fn contains(&self, symbol: Symbol) -> bool {
        self.leaves.contains_key(&symbol)
    }

    /// Number of nodes (always odd: 2 · symbols + 1)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Never true: the sentinel is always present.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of distinct symbols observed
    pub fn symbol_count(&self) -> usize {
        self.leaves.len()
    }

    /// Root weight = total occurrences processed
    pub fn total_weight(&self) -> u64 {
        self.nodes[self.root.index()].weight()
    }

    /// Weight of a node (0 for unknown ids)
    pub fn weight(&self, id: NodeId) -> u64 {
        self.node(id).map(Node::weight).unwrap_or(0)
    }

    /// Number of edges from the root to `id`
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = id;
        while let Some(parent) = self.node(current).and_then(Node::parent) {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// Longest root-to-leaf path, in edges
    pub fn height(&self) -> usize {
        self.level_order()
            .filter(|&id| self.nodes[id.index()].is_leaf())
            .map(|id| self.depth(id))
            .max()
            .unwrap_or(0)
    }

    /// Current code of a node: `0` per left edge, `1` per right edge.
    ///
    /// Walks the parent chain, so cost is O(depth).
    pub fn code_of(&self, id: NodeId) -> Result<Code, TreeError> {
        let mut bits = Vec::new();
        let mut current = id;
        let mut node = self.get(current)?;

        while let Some(parent) = node.parent() {
            let parent_node = self.get(parent)?;
            bits.push(parent_node.right() == Some(current));
            current = parent;
            node = parent_node;
        }

        bits.reverse();
        Ok(Code::from_bits(bits))
    }

    /// Check every structural invariant and the sibling property.
    ///
    /// O(n); intended for tests and `verify_invariants` sessions.
    pub fn validate(&self) -> Result<(), TreeError> {
        let mut reached = 0;
        let mut sentinels = 0;

        for id in self.level_order() {
            reached += 1;
            let node = &self.nodes[id.index()];

            match (node.kind(), node.children()) {
                (NodeKind::Internal, Some((left, right))) => {
                    let left_node = self.get(left)?;
                    let right_node = self.get(right)?;
                    if left_node.parent() != Some(id) || right_node.parent() != Some(id) {
                        return Err(TreeError::Structure {
                            node: id,
                            reason: "child does not point back to its parent",
                        });
                    }
                    if node.weight() != left_node.weight() + right_node.weight() {
                        return Err(TreeError::Structure {
                            node: id,
                            reason: "internal weight differs from sum of children",
                        });
                    }
                }
                (NodeKind::Internal, None) => {
                    return Err(TreeError::Structure {
                        node: id,
                        reason: "internal node without children",
                    });
                }
                (_, Some(_)) => {
                    return Err(TreeError::Structure {
                        node: id,
                        reason: "leaf with children",
                    });
                }
                (NodeKind::Sentinel, None) => {
                    sentinels += 1;
                    if node.weight() != 0 || id != self.sentinel {
                        return Err(TreeError::Structure {
                            node: id,
                            reason: "sentinel must be the tracked weight-0 leaf",
                        });
                    }
                }
                (NodeKind::Symbol(symbol), None) => {
                    if self.leaf(symbol) != Some(id) {
                        return Err(TreeError::Structure {
                            node: id,
                            reason: "symbol leaf missing from index",
                        });
                    }
                }
            }
        }

        if sentinels != 1 {
            return Err(TreeError::Structure {
                node: self.sentinel,
                reason: "tree must hold exactly one sentinel",
            });
        }
        if reached != self.nodes.len() {
            return Err(TreeError::Structure {
                node: self.root,
                reason: "nodes unreachable from the root",
            });
        }

        self.check_sibling_property()
    }

    /// Check only the ordering invariant.
    pub fn check_sibling_property(&self) -> Result<(), TreeError> {
        let order = self.order_sequence();
        for (position, pair) in order.windows(2).enumerate() {
            let weight = self.weight(pair[0]);
            let next_weight = self.weight(pair[1]);
            if weight > next_weight {
                return Err(TreeError::SiblingProperty {
                    position,
                    weight,
                    next_weight,
                });
            }
        }
        Ok(())
    }

    fn get(&self, id: NodeId) -> Result<&Node, TreeError> {
        self.nodes.get(id.index()).ok_or(TreeError::UnknownNode(id))
    }

    fn get_mut(&mut self, id: NodeId) -> Result<&mut Node, TreeError> {
        self.nodes
            .get_mut(id.index())
            .ok_or(TreeError::UnknownNode(id))
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Install `left`/`right` under `parent`, fixing both back-references.
    fn set_children(&mut self, parent: NodeId, left: NodeId, right: NodeId) -> Result<(), TreeError> {
        self.get_mut(parent)?.set_children(left, right);
        self.get_mut(left)?.set_parent(Some(parent));
        self.get_mut(right)?.set_parent(Some(parent));
        Ok(())
    }
}

impl Default for AdaptiveTree {
    fn default() -> Self {
        Self::new()
    }
}
