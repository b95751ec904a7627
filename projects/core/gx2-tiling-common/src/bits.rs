//! Extraction and insertion of arbitrary bit ranges.
//!
//! Bit 0 is the least significant bit. All functions operate on [`u32`],
//! which is wide enough for every coordinate and register field used by the
//! R600 addressing scheme.
//!
//! The `start + count <= 32` bound is a caller guaranteed precondition; it is
//! checked with debug assertions only.

/// Returns the `count`-bit field of `value` that begins at bit `start`.
///
/// # Examples
///
/// ```
/// use gx2_tiling_common::bits::extract_bits;
///
/// assert_eq!(extract_bits(0b1101_0110, 4, 4), 0b1101);
/// assert_eq!(extract_bits(0xFFFF_FFFF, 0, 32), 0xFFFF_FFFF);
/// ```
#[inline(always)]
pub const fn extract_bits(value: u32, start: u32, count: u32) -> u32 {
    debug_assert!(start + count <= u32::BITS);
    if count == 0 {
        return 0;
    }
    (value >> start) & field_mask(count)
}

/// Returns `target` with the `count`-bit field starting at bit `start`
/// replaced by the low `count` bits of `value`.
///
/// # Examples
///
/// ```
/// use gx2_tiling_common::bits::insert_bits;
///
/// assert_eq!(insert_bits(0xFF00_FFFF, 0x0D, 16, 8), 0xFF0D_FFFF);
/// ```
#[inline(always)]
pub const fn insert_bits(target: u32, value: u32, start: u32, count: u32) -> u32 {
    debug_assert!(start + count <= u32::BITS);
    if count == 0 {
        return target;
    }
    let mask = field_mask(count) << start;
    (target & !mask) | ((value << start) & mask)
}

/// Returns bit `index` of `value` as `0` or `1`.
#[inline(always)]
pub const fn bit(value: u32, index: u32) -> u32 {
    extract_bits(value, index, 1)
}

/// XOR-folds all bits of `value` into a single bit.
#[inline(always)]
pub const fn parity(value: u32) -> u32 {
    value.count_ones() & 1
}

#[inline(always)]
const fn field_mask(count: u32) -> u32 {
    if count >= u32::BITS {
        u32::MAX
    } else {
        (1 << count) - 1
    }
}
