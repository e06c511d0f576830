//! # Adaptive Huffman Coding (FGK)
//!
//! Builds a binary prefix-code tree over a symbol stream one occurrence at a
//! time, so codes can be emitted online without a frequency pass.
//!
//! ## Core Algorithm
//!
//! 1. **Sentinel split**: an unseen symbol replaces the NYT leaf with
//!    internal(NYT, new leaf)
//! 2. **Weight bump**: a seen symbol's leaf gains one occurrence
//! 3. **Exchange**: while a lighter node sits after the changed node in the
//!    order sequence, swap the two subtrees
//! 4. **Propagation**: re-sum the parent and repeat up to the root
//!
//! Result: after every occurrence the order sequence has non-decreasing
//! weight (sibling property), so the tree is an optimal prefix code for the
//! counts seen so far.
//!
//! ## Usage Example
//!
//! ```
//! use adaptive_huffman::{Encoder, EncoderConfig};
//!
//! let mut encoder = Encoder::new(EncoderConfig::default());
//! encoder.encode_all("abracadabra".chars())?;
//!
//! let table = encoder.code_table();
//! assert_eq!(table.code('a').map(|c| c.to_string()), Some("0".to_string()));
//! # Ok::<(), adaptive_huffman::EncodeError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod codes;    // Code bit strings and code table derivation
pub mod packing;  // MSB-first bit packing of a stream
pub mod report;   // Tables and DOT rendering
pub mod snapshot; // Structural export for visualizers
pub mod stats;    // Average code length and entropy
pub mod tree;     // Arena tree and sibling-property maintenance

pub use codes::{Code, CodeEntry, CodeTable};
pub use packing::{PackedStream, PackingError};
pub use snapshot::TreeSnapshot;
pub use stats::CodeStatistics;
pub use tree::{AdaptiveTree, NodeId, NodeKind, TreeError};

use thiserror::Error;
use tracing::debug;

/// Symbol alphabet: Unicode scalar values
pub type Symbol = char;

/// Session configuration
#[derive(Debug, Clone, Default)]
pub struct EncoderConfig {
    /// Run full tree validation after every occurrence
    pub verify_invariants: bool,

    /// Upper bound on distinct symbols (None = unbounded)
    pub max_symbols: Option<usize>,
}

impl EncoderConfig {
    /// Validating configuration for tests and debugging runs
    pub fn strict() -> Self {
        Self {
            verify_invariants: true,
            max_symbols: None,
        }
    }

    /// Configuration bounded to `max_symbols` distinct symbols
    pub fn with_alphabet(max_symbols: usize) -> Self {
        Self {
            verify_invariants: false,
            max_symbols: Some(max_symbols),
        }
    }

    /// Reject configurations no stream could satisfy
    pub fn validate(&self) -> Result<(), EncodeError> {
        if self.max_symbols == Some(0) {
            return Err(EncodeError::InvalidConfig(
                "alphabet bound must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Errors that can occur while encoding
#[derive(Error, Debug)]
pub enum EncodeError {
    /// Tree maintenance hit an internal-consistency fault
    #[error("tree maintenance failed: {0}")]
    Tree(#[from] TreeError),

    /// Packing referenced an unseen symbol
    #[error("packing failed: {0}")]
    Packing(#[from] PackingError),

    /// A new symbol would exceed the configured alphabet bound
    #[error("alphabet exhausted: more than {limit} distinct symbols")]
    AlphabetExhausted {
        /// Configured bound
        limit: usize,
    },

    /// Configuration rejected by [`EncoderConfig::validate`]
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// What happened for one occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    /// Zero-based step index
    pub step: usize,

    /// Symbol processed
    pub symbol: Symbol,

    /// Whether the symbol was new
    pub first_occurrence: bool,

    /// Code transmitted for this occurrence, taken before the update:
    /// the leaf's code, or the sentinel's code as escape for a new symbol
    pub emitted: Code,

    /// Structural exchanges caused by the update
    pub exchanges: usize,
}

/// Encoding session
///
/// Owns the tree for the whole stream; one occurrence is fully processed
/// before the next one is accepted.
#[derive(Debug)]
pub struct Encoder {
    tree: AdaptiveTree,
    config: EncoderConfig,
    steps: usize,
}

impl Encoder {
    /// Create session with an empty (sentinel-only) tree
    pub fn new(config: EncoderConfig) -> Self {
        Self {
            tree: AdaptiveTree::new(),
            config,
            steps: 0,
        }
    }

    /// Create session after validating `config`
    pub fn try_new(config: EncoderConfig) -> Result<Self, EncodeError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Process one occurrence of `symbol`
    pub fn encode(&mut self, symbol: Symbol) -> Result<StepReport, EncodeError> {
        let known = self.tree.leaf(symbol);
        if known.is_none() {
            if let Some(limit) = self.config.max_symbols {
                if self.tree.symbol_count() >= limit {
                    return Err(EncodeError::AlphabetExhausted { limit });
                }
            }
        }

        let emitted = self
            .tree
            .code_of(known.unwrap_or_else(|| self.tree.sentinel()))?;
        let update = self.tree.observe(symbol)?;

        if self.config.verify_invariants {
            self.tree.validate()?;
        }

        let step = self.steps;
        self.steps += 1;

        debug!(
            step,
            symbol = %symbol.escape_debug(),
            first = update.first_occurrence,
            exchanges = update.exchanges,
            emitted = %emitted,
            "encoded symbol"
        );

        Ok(StepReport {
            step,
            symbol,
            first_occurrence: update.first_occurrence,
            emitted,
            exchanges: update.exchanges,
        })
    }

    /// Process every symbol of `stream` in order
    pub fn encode_all<I>(&mut self, stream: I) -> Result<Vec<StepReport>, EncodeError>
    where
        I: IntoIterator<Item = Symbol>,
    {
        stream.into_iter().map(|symbol| self.encode(symbol)).collect()
    }

    /// Current tree
    pub fn tree(&self) -> &AdaptiveTree {
        &self.tree
    }

    /// Session configuration
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Occurrences processed so far
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Derive the code table for the current tree
    pub fn code_table(&self) -> CodeTable {
        CodeTable::derive(&self.tree)
    }

    /// Capture the current tree structure
    pub fn snapshot(&self) -> TreeSnapshot {
        TreeSnapshot::capture(&self.tree)
    }

    /// Statistics of the current code table
    pub fn statistics(&self) -> CodeStatistics {
        CodeStatistics::from_table(&self.code_table())
    }

    /// Pack `stream` with the current codes
    pub fn pack<I>(&self, stream: I) -> Result<PackedStream, EncodeError>
    where
        I: IntoIterator<Item = Symbol>,
    {
        Ok(packing::pack(stream, &self.code_table())?)
    }
}
