//! Cache Geometry.
//!
//! A validated `(s, E, b)` triple. Once built it is immutable; every cache
//! derives its set count and address split from it.

use serde::Serialize;

use super::addr::{AddressParts, decode};
use super::constants::ADDRESS_BITS;
use super::error::GeometryError;
use crate::cache::Line;

/// Shape of a set-associative cache.
///
/// * `s` - set-index bits; the cache has `2^s` sets.
/// * `E` - associativity; every set holds exactly `E` lines.
/// * `b` - block-offset bits; every block spans `2^b` bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Geometry {
    set_index_bits: u32,
    associativity: usize,
    block_offset_bits: u32,
}

impl Geometry {
    /// Validates and builds a geometry.
    ///
    /// # Arguments
    ///
    /// * `set_index_bits` - Number of set-index bits (`s`).
    /// * `associativity` - Lines per set (`E`), at least 1.
    /// * `block_offset_bits` - Number of block-offset bits (`b`).
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroAssociativity`] when `E == 0`,
    /// [`GeometryError::AddressBitsExceeded`] when `s + b > 64`, and
    /// [`GeometryError::CapacityOverflow`] when `2^s * E` lines cannot be indexed
    /// on the host.
    pub fn new(
        set_index_bits: u32,
        associativity: usize,
        block_offset_bits: u32,
    ) -> Result<Self, GeometryError> {
        if associativity == 0 {
            return Err(GeometryError::ZeroAssociativity);
        }

        let too_wide = set_index_bits
            .checked_add(block_offset_bits)
            .is_none_or(|bits| bits > ADDRESS_BITS);
        if too_wide {
            return Err(GeometryError::AddressBitsExceeded {
                set_index_bits,
                block_offset_bits,
            });
        }

        let fits = 1usize
            .checked_shl(set_index_bits)
            .and_then(|sets| sets.checked_mul(associativity))
            .and_then(|lines| lines.checked_mul(size_of::<Line>()))
            .is_some_and(|bytes| bytes <= isize::MAX.unsigned_abs());
        if !fits {
            return Err(GeometryError::CapacityOverflow {
                set_index_bits,
                associativity,
            });
        }

        Ok(Self {
            set_index_bits,
            associativity,
            block_offset_bits,
        })
    }

    /// Number of set-index bits (`s`).
    #[inline]
    pub const fn set_index_bits(&self) -> u32 {
        self.set_index_bits
    }

    /// Lines per set (`E`).
    #[inline]
    pub const fn associativity(&self) -> usize {
        self.associativity
    }

    /// Number of block-offset bits (`b`).
    #[inline]
    pub const fn block_offset_bits(&self) -> u32 {
        self.block_offset_bits
    }

    /// Number of sets (`2^s`).
    #[inline]
    pub const fn num_sets(&self) -> usize {
        1 << self.set_index_bits
    }

    /// Block size in bytes (`2^b`), saturating at `u64::MAX` for `b == 64`.
    pub const fn block_bytes(&self) -> u64 {
        match 1u64.checked_shl(self.block_offset_bits) {
            Some(bytes) => bytes,
            None => u64::MAX,
        }
    }

    /// Total modeled capacity in bytes (`2^s * E * 2^b`), saturating.
    pub const fn capacity_bytes(&self) -> u64 {
        (self.num_sets() as u64)
            .saturating_mul(self.associativity as u64)
            .saturating_mul(self.block_bytes())
    }

    /// Splits `address` according to this geometry.
    #[inline]
    pub const fn decode(&self, address: u64) -> AddressParts {
        decode(address, self.set_index_bits, self.block_offset_bits)
    }
}
