//! Weight propagation and insertion
//!
//! One occurrence:
//!   seen before → leaf weight += 1
//!   first time  → sentinel splits into internal(sentinel, new leaf)
//! then, from the leaf up to the root:
//!   while an exchange candidate exists: exchange
//!   parent weight = left + right; move to parent
//!
//! Iterative throughout; depth of the walk never grows the call stack.

use tracing::trace;

use super::{AdaptiveTree, Node, NodeId, TreeError};
use crate::Symbol;

/// Outcome of one processed occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Update {
    /// Leaf holding the symbol after the update
    pub leaf: NodeId,

    /// Whether the sentinel was split for this symbol
    pub first_occurrence: bool,

    /// Number of structural exchanges performed
    pub exchanges: usize,
}

impl AdaptiveTree {
    /// Process one occurrence of `symbol`.
    pub fn observe(&mut self, symbol: Symbol) -> Result<Update, TreeError> {
        match self.leaf(symbol) {
            Some(leaf) => {
                let exchanges = self.increment(leaf)?;
                Ok(Update {
                    leaf,
                    first_occurrence: false,
                    exchanges,
                })
            }
            None => {
                let (leaf, exchanges) = self.insert(symbol)?;
                Ok(Update {
                    leaf,
                    first_occurrence: true,
                    exchanges,
                })
            }
        }
    }

    /// Bump a symbol leaf by one and restore the ordering.
    ///
    /// The only external weight write; internal and sentinel nodes refuse it.
    pub(crate) fn increment(&mut self, leaf: NodeId) -> Result<usize, TreeError> {
        let node = self.get_mut(leaf)?;
        if node.symbol().is_none() {
            return Err(TreeError::NotASymbolLeaf(leaf));
        }
        let weight = node.weight() + 1;
        node.set_weight(weight);
        self.propagate(leaf)
    }

    /// Split the sentinel to introduce `symbol`.
    ///
    /// The sentinel keeps its identity and only moves one level down.
    fn insert(&mut self, symbol: Symbol) -> Result<(NodeId, usize), TreeError> {
        let sentinel = self.sentinel;
        let old_parent = self.get(sentinel)?.parent();

        let internal = self.push(Node::internal());
        let leaf = self.push(Node::leaf(symbol));

        match old_parent {
            Some(parent) => {
                let (left, right) = self.child_slots(parent)?;
                if left == sentinel {
                    self.set_children(parent, internal, right)?;
                } else {
                    self.set_children(parent, left, internal)?;
                }
            }
            None => self.root = internal,
        }

        let (left, right) = self.assign_children_by_weight(sentinel, leaf);
        self.set_children(internal, left, right)?;
        self.leaves.insert(symbol, leaf);

        let exchanges = self.propagate(leaf)?;
        Ok((leaf, exchanges))
    }

    /// Walk from `start` to the root, exchanging and re-summing on the way.
    fn propagate(&mut self, start: NodeId) -> Result<usize, TreeError> {
        let limit = self.nodes.len();
        let mut current = start;
        let mut exchanges = 0;
        let mut local = 0;

        loop {
            if let Some(candidate) = self.find_exchange_candidate(current) {
                local += 1;
                if local > limit {
                    return Err(TreeError::ExchangeLimit {
                        node: current,
                        limit,
                    });
                }
                self.exchange(current, candidate)?;
                exchanges += 1;
                continue;
            }

            match self.get(current)?.parent() {
                Some(parent) => {
                    self.recompute_weight(parent)?;
                    current = parent;
                    local = 0;
                }
                None => break,
            }
        }

        trace!(start = start.index(), exchanges, "propagation reached root");
        Ok(exchanges)
    }

    /// Set an internal node's weight to the sum of its children.
    pub(crate) fn recompute_weight(&mut self, id: NodeId) -> Result<(), TreeError> {
        let (left, right) = self.child_slots(id)?;
        let weight = self.get(left)?.weight() + self.get(right)?.weight();
        self.get_mut(id)?.set_weight(weight);
        Ok(())
    }
}
