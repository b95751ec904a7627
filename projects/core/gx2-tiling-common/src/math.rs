//! Integer helpers used by the surface layout calculations.
//!
//! None of these use floating point, so results are identical across
//! platforms.

use crate::InvariantError;

/// Returns `true` if `value` is a non-zero power of two.
#[inline(always)]
pub const fn is_pow2(value: u32) -> bool {
    value.is_power_of_two()
}

/// Rounds `value` up to a multiple of `align`, which must be a power of two.
#[inline(always)]
pub const fn pow2_align(value: u32, align: u32) -> u32 {
    debug_assert!(align.is_power_of_two());
    (value + align - 1) & !(align - 1)
}

/// Rounds `value` up to a multiple of `align`, which may be any non-zero value.
#[inline]
pub const fn round_up(value: u32, align: u32) -> u32 {
    if is_pow2(align) {
        pow2_align(value, align)
    } else {
        value.div_ceil(align) * align
    }
}

/// Returns the smallest power of two that is `>= value`.
///
/// Zero rounds up to one. Values above `2^31` saturate at `2^31`.
#[inline]
pub const fn next_pow2(value: u32) -> u32 {
    if value > 0x8000_0000 {
        0x8000_0000
    } else if value == 0 {
        1
    } else {
        value.next_power_of_two()
    }
}

/// Base 2 logarithm of a power of two.
#[inline(always)]
pub const fn log2(value: u32) -> u32 {
    debug_assert!(value.is_power_of_two());
    value.trailing_zeros()
}

/// Divides `dividend` by `divisor`, failing if the result would be truncated.
///
/// # Errors
///
/// - [`InvariantError::DivisionByZero`] if `divisor` is zero.
/// - [`InvariantError::InexactDivision`] if `dividend` is not a multiple of `divisor`.
#[inline]
pub fn exact_div(dividend: u64, divisor: u64) -> Result<u64, InvariantError> {
    if divisor == 0 {
        return Err(InvariantError::DivisionByZero(dividend));
    }
    if dividend % divisor != 0 {
        return Err(InvariantError::InexactDivision { dividend, divisor });
    }
    Ok(dividend / divisor)
}

/// [`exact_div`] for 32-bit operands.
#[inline]
pub fn exact_div_u32(dividend: u32, divisor: u32) -> Result<u32, InvariantError> {
    // The quotient of two u32 values always fits in a u32.
    exact_div(dividend as u64, divisor as u64).map(|quotient| quotient as u32)
}

/// Narrows a `u64` into a `u32`.
///
/// # Errors
///
/// [`InvariantError::Overflow`] if `value` does not fit.
#[inline]
pub fn to_u32(value: u64) -> Result<u32, InvariantError> {
    u32::try_from(value).map_err(|_| InvariantError::Overflow(value))
}
