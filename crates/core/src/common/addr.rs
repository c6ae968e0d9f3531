//! Address Decomposition.
//!
//! This module splits a 64-bit memory address into the three fields a cache
//! looks at. It provides the following:
//! 1. **Decoding:** Tag, set index, and block offset extraction for a given `(s, b)`.
//! 2. **Reassembly:** The exact inverse, used to check that no address bit is lost.
//!
//! Layout for `s` set-index bits and `b` block-offset bits:
//!
//! ```text
//!  63                    s+b   s+b-1       b   b-1        0
//! +-------------------------+---------------+-------------+
//! |           tag           |   set index   |   offset    |
//! +-------------------------+---------------+-------------+
//! ```

use super::constants::{low_mask, shl, shr};

/// An address split into its cache-relevant fields.
///
/// Transient: produced for a single access and never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AddressParts {
    /// High-order bits identifying the block within its set.
    pub tag: u64,
    /// Middle bits selecting the set.
    pub set_index: u64,
    /// Low-order bits selecting the byte within the block.
    pub offset: u64,
}

impl AddressParts {
    /// Reassembles the original address from its parts.
    ///
    /// Inverse of [`decode`] for the same `s` and `b`.
    ///
    /// # Arguments
    ///
    /// * `set_index_bits` - Number of set-index bits (`s`).
    /// * `block_offset_bits` - Number of block-offset bits (`b`).
    pub fn assemble(&self, set_index_bits: u32, block_offset_bits: u32) -> u64 {
        shl(self.tag, set_index_bits + block_offset_bits)
            | shl(self.set_index, block_offset_bits)
            | self.offset
    }
}

/// Splits `address` into tag, set index, and block offset.
///
/// Pure integer arithmetic; the caller guarantees `s + b <= 64`. When
/// `s + b == 64` the tag is always 0.
///
/// # Arguments
///
/// * `address` - The full 64-bit address.
/// * `set_index_bits` - Number of set-index bits (`s`).
/// * `block_offset_bits` - Number of block-offset bits (`b`).
#[inline]
pub const fn decode(address: u64, set_index_bits: u32, block_offset_bits: u32) -> AddressParts {
    AddressParts {
        tag: shr(address, set_index_bits + block_offset_bits),
        set_index: shr(address, block_offset_bits) & low_mask(set_index_bits),
        offset: address & low_mask(block_offset_bits),
    }
}
