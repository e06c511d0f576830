//! Prefix codes derived from the tree
//!
//! Code = path from the root: left edge → 0, right edge → 1.
//! Valid only for the tree shape it was derived from.

mod table;

pub use table::{CodeEntry, CodeTable};

use std::fmt;

use bitvec::prelude::*;

/// Bit string of one codeword, most significant (root-side) bit first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Code {
    bits: BitVec<u8, Msb0>,
}

impl Code {
    /// Empty code (the root's path)
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from root-to-node edge directions (`true` = right)
    pub fn from_bits<I: IntoIterator<Item = bool>>(bits: I) -> Self {
        Self {
            bits: bits.into_iter().collect(),
        }
    }

    /// Code extended by one edge
    pub fn child(&self, right: bool) -> Self {
        let mut bits = self.bits.clone();
        bits.push(right);
        Self { bits }
    }

    /// Number of bits
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Returns `true` for the zero-length code
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Iterate over the bits, root side first
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().by_vals()
    }

    /// Underlying bit slice
    pub fn as_bitslice(&self) -> &BitSlice<u8, Msb0> {
        &self.bits
    }

    /// Check if `self` is a prefix of `other` (every code is a prefix of itself)
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(self.bits.as_bitslice())
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}
