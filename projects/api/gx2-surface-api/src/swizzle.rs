//! The `swizzle` word of a GX2 surface.

use bitfield::bitfield;
use gx2_tiling::AddrConfig;

/// Mip level stored in [`Gx2SwizzleRegister::mip_swizzle_level`] when every
/// level of a macro tiled surface stays macro tiled.
pub const DEFAULT_MIP_SWIZZLE_LEVEL: u32 = 13;

bitfield! {
    /// Raw `swizzle` value of a `GX2Surface`.
    ///
    /// Bit layout:
    /// - Bits 0-7: Unused
    /// - Bits 8-15: Base address swizzle, in units of 256 bytes (`base256b`)
    /// - Bits 16-23: First mip level that is no longer macro tiled
    /// - Bits 24-31: Unused
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Gx2SwizzleRegister(u32);
    impl Debug;
    u32;

    /// Base address swizzle (8 bits)
    pub base256b, set_base256b: 15, 8;
    /// First non macro tiled mip level (8 bits)
    pub mip_swizzle_level, set_mip_swizzle_level: 23, 16;
}

impl Gx2SwizzleRegister {
    /// Keeps every bit except the mip swizzle level.
    pub(crate) const MIP_LEVEL_CLEAR_MASK: u32 = 0xFF00_FFFF;

    /// The raw register value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Clears [`Gx2SwizzleRegister::mip_swizzle_level`].
    #[inline]
    pub(crate) const fn without_mip_level(self) -> Self {
        Self(self.0 & Self::MIP_LEVEL_CLEAR_MASK)
    }

    /// Same register with `base256b` replaced.
    #[inline]
    pub const fn with_base256b(self, base256b: u8) -> Self {
        Self((self.0 & 0xFFFF_00FF) | ((base256b as u32) << 8))
    }

    /// Pipe swizzle encoded in `base256b`.
    pub fn pipe_swizzle(&self, config: &AddrConfig) -> u32 {
        self.groups(config) & (config.pipes() - 1)
    }

    /// Bank swizzle encoded in `base256b`.
    pub fn bank_swizzle(&self, config: &AddrConfig) -> u32 {
        (self.groups(config) / config.pipes()) & (config.banks() - 1)
    }

    /// `base256b` in units of pipe interleave groups.
    fn groups(&self, config: &AddrConfig) -> u32 {
        self.base256b() / (config.pipe_interleave_bytes() >> 8)
    }
}

impl From<u32> for Gx2SwizzleRegister {
    #[inline]
    fn from(value: u32) -> Self {
        Self(value)
    }
}
