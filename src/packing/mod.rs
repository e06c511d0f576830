//! Bit packing of a symbol stream
//!
//! Codes are concatenated in stream order, MSB first; the last byte is
//! padded with zero bits.

use bitvec::prelude::*;
use thiserror::Error;

use crate::codes::CodeTable;
use crate::Symbol;

/// Errors raised while packing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PackingError {
    /// Stream contains a symbol the code table has never seen.
    #[error("no code for symbol {symbol:?} at stream position {position}")]
    UnknownSymbol {
        /// Offending symbol
        symbol: Symbol,
        /// Zero-based position in the stream
        position: usize,
    },
}

/// Packed representation of a coded stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedStream {
    bits: BitVec<u8, Msb0>,
    bit_len: usize,
}

impl PackedStream {
    /// Number of meaningful bits (padding excluded)
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Number of bytes including padding
    pub fn byte_len(&self) -> usize {
        self.bits.len() / 8
    }

    /// Meaningful bits, padding excluded
    pub fn bits(&self) -> &BitSlice<u8, Msb0> {
        &self.bits[..self.bit_len]
    }

    /// Packed bytes
    pub fn as_bytes(&self) -> &[u8] {
        self.bits.as_raw_slice()
    }

    /// Consume into packed bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.bits.into_vec()
    }
}

/// Pack `stream` using the codes in `table`.
///
/// Fails on the first symbol without a code, nothing is dropped silently.
pub fn pack<I>(stream: I, table: &CodeTable) -> Result<PackedStream, PackingError>
where
    I: IntoIterator<Item = Symbol>,
{
    let mut bits: BitVec<u8, Msb0> = BitVec::new();

    for (position, symbol) in stream.into_iter().enumerate() {
        let code = table
            .code(symbol)
            .ok_or(PackingError::UnknownSymbol { symbol, position })?;
        bits.extend_from_bitslice(code.as_bitslice());
    }

    let bit_len = bits.len();
    while bits.len() % 8 != 0 {
        bits.push(false);
    }

    Ok(PackedStream { bits, bit_len })
}
