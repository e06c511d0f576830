use std::collections::HashMap;

use super::Code;
use crate::tree::AdaptiveTree;
use crate::Symbol;

/// One row of the code table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeEntry {
    /// Symbol held by the leaf
    pub symbol: Symbol,
    /// Occurrences seen so far
    pub weight: u64,
    /// Current codeword
    pub code: Code,
}

/// Symbol → (count, code) mapping for one tree shape.
///
/// Entries are stored in left-to-right leaf order; callers that need a
/// display order assign it themselves (see [`crate::snapshot`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    entries: Vec<CodeEntry>,
    index: HashMap<Symbol, usize>,
}

impl CodeTable {
    /// Walk the tree and collect every symbol leaf with its code.
    ///
    /// Explicit stack; the sentinel contributes nothing.
    pub fn derive(tree: &AdaptiveTree) -> Self {
        let mut entries = Vec::with_capacity(tree.symbol_count());
        let mut stack = vec![(tree.root(), Code::new())];

        while let Some((id, code)) = stack.pop() {
            let Some(node) = tree.node(id) else { continue };
            if let Some((left, right)) = node.children() {
                stack.push((right, code.child(true)));
                stack.push((left, code.child(false)));
            } else if let Some(symbol) = node.symbol() {
                entries.push(CodeEntry {
                    symbol,
                    weight: node.weight(),
                    code,
                });
            }
        }

        let index = entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| (entry.symbol, idx))
            .collect();

        Self { entries, index }
    }

    /// Entry for `symbol`
    pub fn get(&self, symbol: Symbol) -> Option<&CodeEntry> {
        self.index.get(&symbol).map(|&idx| &self.entries[idx])
    }

    /// Codeword for `symbol`
    pub fn code(&self, symbol: Symbol) -> Option<&Code> {
        self.get(symbol).map(|entry| &entry.code)
    }

    /// Iterate entries in leaf order
    pub fn iter(&self) -> std::slice::Iter<'_, CodeEntry> {
        self.entries.iter()
    }

    /// Number of symbols
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no symbol has been observed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all occurrence counts
    pub fn total_weight(&self) -> u64 {
        self.entries.iter().map(|entry| entry.weight).sum()
    }
}

impl<'a> IntoIterator for &'a CodeTable {
    type Item = &'a CodeEntry;
    type IntoIter = std::slice::Iter<'a, CodeEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
