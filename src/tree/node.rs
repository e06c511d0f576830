//! Arena node representation
//!
//! Node = (kind, weight, parent, children) addressed by a stable `NodeId`
//!   Internal: two owned children, weight = left + right
//!   Symbol:   one symbol, weight = occurrence count
//!   Sentinel: the single NYT leaf, weight fixed at 0

use std::fmt;

use crate::Symbol;

/// Stable index of a node inside the tree arena.
///
/// Ids are never reused: nodes are only ever appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the node in the arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Variant of a tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Joins two subtrees; carries no symbol.
    Internal,

    /// Leaf for a symbol that has been observed at least once.
    Symbol(Symbol),

    /// The not-yet-transmitted leaf standing for every unseen symbol.
    Sentinel,
}

/// Tree node stored in the arena
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    kind: NodeKind,
    weight: u64,

    /// Non-owning back-reference (None only at the root)
    parent: Option<NodeId>,

    /// Owned child slots (left, right); both present or both absent
    children: Option<(NodeId, NodeId)>,
}

impl Node {
    /// Fresh internal node; weight is filled in by propagation.
    pub(crate) fn internal() -> Self {
        Self {
            kind: NodeKind::Internal,
            weight: 0,
            parent: None,
            children: None,
        }
    }

    /// Symbol leaf for a first occurrence (weight 1).
    pub(crate) fn leaf(symbol: Symbol) -> Self {
        Self {
            kind: NodeKind::Symbol(symbol),
            weight: 1,
            parent: None,
            children: None,
        }
    }

    pub(crate) fn sentinel() -> Self {
        Self {
            kind: NodeKind::Sentinel,
            weight: 0,
            parent: None,
            children: None,
        }
    }

    /// Node variant
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Current weight (occurrence count for leaves, subtree total otherwise)
    #[inline]
    pub fn weight(&self) -> u64 {
        self.weight
    }

    /// Parent node, `None` for the root
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children as (left, right), `None` for leaves
    #[inline]
    pub fn children(&self) -> Option<(NodeId, NodeId)> {
        self.children
    }

    /// Left child, if internal
    pub fn left(&self) -> Option<NodeId> {
        self.children.map(|(left, _)| left)
    }

    /// Right child, if internal
    pub fn right(&self) -> Option<NodeId> {
        self.children.map(|(_, right)| right)
    }

    /// Symbol carried by a symbol leaf
    pub fn symbol(&self) -> Option<Symbol> {
        match self.kind {
            NodeKind::Symbol(symbol) => Some(symbol),
            _ => None,
        }
    }

    /// Check if internal
    #[inline]
    pub fn is_internal(&self) -> bool {
        self.kind == NodeKind::Internal
    }

    /// Check if leaf (symbol or sentinel)
    #[inline]
    pub fn is_leaf(&self) -> bool {
        !self.is_internal()
    }

    /// Check if this is the NYT leaf
    #[inline]
    pub fn is_sentinel(&self) -> bool {
        self.kind == NodeKind::Sentinel
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }

    pub(crate) fn set_children(&mut self, left: NodeId, right: NodeId) {
        debug_assert!(self.is_internal(), "only internal nodes own children");
        self.children = Some((left, right));
    }

    pub(crate) fn set_weight(&mut self, weight: u64) {
        debug_assert!(!self.is_sentinel(), "sentinel weight is fixed at 0");
        self.weight = weight;
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            NodeKind::Internal => write!(f, "internal({})", self.weight),
            NodeKind::Symbol(symbol) => write!(f, "{:?}({})", symbol, self.weight),
            NodeKind::Sentinel => write!(f, "nyt(0)"),
        }
    }
}
