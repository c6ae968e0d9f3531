//! Global Simulator Constants.
//!
//! Address-width constants and the bit-mask helpers used by address decomposition.

/// Width of a memory address in bits.
pub const ADDRESS_BITS: u32 = u64::BITS;

/// Returns a mask with the low `bits` bits set.
///
/// Saturates to `u64::MAX` for `bits >= 64` instead of overflowing the shift.
///
/// # Arguments
///
/// * `bits` - Number of low-order bits to set.
#[inline]
pub const fn low_mask(bits: u32) -> u64 {
    if bits >= ADDRESS_BITS {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Logical right shift that yields 0 once the shift reaches the address width.
#[inline]
pub const fn shr(value: u64, bits: u32) -> u64 {
    if bits >= ADDRESS_BITS { 0 } else { value >> bits }
}

/// Logical left shift that yields 0 once the shift reaches the address width.
#[inline]
pub const fn shl(value: u64, bits: u32) -> u64 {
    if bits >= ADDRESS_BITS { 0 } else { value << bits }
}
