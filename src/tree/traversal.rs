//! Level-order indexer
//!
//! Breadth-first from the root, RIGHT child before LEFT child.
//! Reversed, this is the order sequence: deepest/leftmost node first,
//! root last. Position p in the order sequence is order number p + 1.
//!
//! Recomputed on every call; the tree mutates after every use.

use std::collections::VecDeque;

use super::{AdaptiveTree, NodeId};

/// Lazy breadth-first iterator over every node of the tree.
///
/// Restartable: call [`AdaptiveTree::level_order`] again for a fresh pass.
#[derive(Debug, Clone)]
pub struct LevelOrder<'a> {
    tree: &'a AdaptiveTree,
    queue: VecDeque<NodeId>,
}

impl<'a> LevelOrder<'a> {
    fn new(tree: &'a AdaptiveTree) -> Self {
        let mut queue = VecDeque::with_capacity(tree.len());
        queue.push_back(tree.root());
        Self { tree, queue }
    }
}

impl Iterator for LevelOrder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.queue.pop_front()?;
        if let Some((left, right)) = self.tree.node(id).and_then(|node| node.children()) {
            self.queue.push_back(right);
            self.queue.push_back(left);
        }
        Some(id)
    }
}

impl AdaptiveTree {
    /// Breadth-first pass from the root (right before left)
    pub fn level_order(&self) -> LevelOrder<'_> {
        LevelOrder::new(self)
    }

    /// Order sequence: level order reversed, root last.
    pub fn order_sequence(&self) -> Vec<NodeId> {
        let mut order: Vec<NodeId> = self.level_order().collect();
        order.reverse();
        order
    }
}
