//! Sibling-property maintenance
//!
//! After a node's weight grows by one, every node between it and the first
//! node of at least the new weight in the order sequence is lighter and out
//! of place. The maintainer picks the last of those (never the node's own
//! parent) and swaps the two subtrees.
//!
//! Tie-break convention for siblings of equal weight: an internal node takes
//! the right slot and a leaf the left one; two nodes of the same class keep
//! the slots they were offered in.

use std::cmp::Ordering;

use tracing::trace;

use super::{AdaptiveTree, NodeId, TreeError};

impl AdaptiveTree {
    /// Find the node `target` must trade places with, if any.
    ///
    /// Scans the order sequence from `target` toward the root end and stops at
    /// the first node whose weight is at least `target`'s.
    pub fn find_exchange_candidate(&self, target: NodeId) -> Option<NodeId> {
        let target_node = self.node(target)?;
        let weight = target_node.weight();
        let parent = target_node.parent();

        let order = self.order_sequence();
        let position = order.iter().position(|&id| id == target)?;

        let mut candidate = None;
        for &id in &order[position + 1..] {
            if self.weight(id) >= weight {
                break;
            }
            if Some(id) == parent {
                continue;
            }
            candidate = Some(id);
        }
        candidate
    }

    /// Swap the tree positions of `a` and `b` together with their subtrees.
    pub(crate) fn exchange(&mut self, a: NodeId, b: NodeId) -> Result<(), TreeError> {
        if a == b {
            return Err(TreeError::SelfExchange(a));
        }
        let parent_a = self.get(a)?.parent().ok_or(TreeError::RootExchange(a))?;
        let parent_b = self.get(b)?.parent().ok_or(TreeError::RootExchange(b))?;

        if self.is_ancestor(a, b) {
            return Err(TreeError::AncestorExchange {
                ancestor: a,
                descendant: b,
            });
        }
        if self.is_ancestor(b, a) {
            return Err(TreeError::AncestorExchange {
                ancestor: b,
                descendant: a,
            });
        }

        trace!(
            a = a.index(),
            b = b.index(),
            weight_a = self.weight(a),
            weight_b = self.weight(b),
            "exchanging nodes"
        );

        if parent_a == parent_b {
            let (left, right) = self.child_slots(parent_a)?;
            return self.set_children(parent_a, right, left);
        }

        let (a_is_left, sibling_a) = self.slot_of(parent_a, a)?;
        let (b_is_left, sibling_b) = self.slot_of(parent_b, b)?;

        // b moves into a's slot next to a's old sibling, a into b's
        let (left, right) = if a_is_left {
            self.assign_children_by_weight(b, sibling_a)
        } else {
            self.assign_children_by_weight(sibling_a, b)
        };
        self.set_children(parent_a, left, right)?;

        let (left, right) = if b_is_left {
            self.assign_children_by_weight(a, sibling_b)
        } else {
            self.assign_children_by_weight(sibling_b, a)
        };
        self.set_children(parent_b, left, right)
    }

    /// Decide (left, right) for two nodes about to become siblings.
    ///
    /// Lighter node goes left. On equal weight an internal node goes right
    /// of a leaf; otherwise the offered order is kept.
    pub(crate) fn assign_children_by_weight(&self, first: NodeId, second: NodeId) -> (NodeId, NodeId) {
        match self.weight(first).cmp(&self.weight(second)) {
            Ordering::Less => (first, second),
            Ordering::Greater => (second, first),
            Ordering::Equal => {
                let first_internal = self.node(first).map_or(false, |node| node.is_internal());
                let second_internal = self.node(second).map_or(false, |node| node.is_internal());
                if first_internal && !second_internal {
                    (second, first)
                } else {
                    (first, second)
                }
            }
        }
    }

    /// Check if `ancestor` lies on the parent chain of `node`
    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.node(node).and_then(|n| n.parent());
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.node(id).and_then(|n| n.parent());
        }
        false
    }

    pub(super) fn child_slots(&self, parent: NodeId) -> Result<(NodeId, NodeId), TreeError> {
        self.get(parent)?.children().ok_or(TreeError::Structure {
            node: parent,
            reason: "parent without children",
        })
    }

    /// (is the left child, sibling) of `child` under `parent`
    fn slot_of(&self, parent: NodeId, child: NodeId) -> Result<(bool, NodeId), TreeError> {
        let (left, right) = self.child_slots(parent)?;
        if left == child {
            Ok((true, right))
        } else if right == child {
            Ok((false, left))
        } else {
            Err(TreeError::Structure {
                node: child,
                reason: "node missing from its parent's child slots",
            })
        }
    }
}
