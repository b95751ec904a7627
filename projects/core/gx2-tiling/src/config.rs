//! Hardware address configuration.
//!
//! The R600 memory controller interleaves surfaces across a fixed number of
//! pipes and banks. Those counts, along with the interleave granularities,
//! are read from the `GB_TILING_CONFIG` register. [`AddrConfig::WIIU`] holds
//! the values used by the Wii U (`0x44902`).

use crate::error::ConfigError;
use bitfield::bitfield;
use gx2_tiling_common::math::log2;

bitfield! {
    /// Raw `GB_TILING_CONFIG` register value.
    ///
    /// Bit layout:
    /// - Bits 1-3: Pipe tiling (`pipes = 1 << n`)
    /// - Bits 4-5: Bank tiling (`banks = 4 << n`)
    /// - Bits 6-7: Group size (`pipe interleave bytes = 256 << n`, only 0 is supported)
    /// - Bits 8-10: Row tiling (`row size = 1024 << n`)
    /// - Bits 11-13: Bank swaps (`swap size = 128 << n`)
    /// - Bits 14-15: Sample split (`split size = 1024 << n`)
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct GbTilingConfig(u32);
    impl Debug;
    u32;

    /// Pipe tiling (3 bits)
    pub pipe_tiling, set_pipe_tiling: 3, 1;
    /// Bank tiling (2 bits)
    pub bank_tiling, set_bank_tiling: 5, 4;
    /// Group size (2 bits)
    pub group_size, set_group_size: 7, 6;
    /// Row tiling (3 bits)
    pub row_tiling, set_row_tiling: 10, 8;
    /// Bank swaps (3 bits)
    pub bank_swaps, set_bank_swaps: 13, 11;
    /// Sample split (2 bits)
    pub sample_split, set_sample_split: 15, 14;
}

/// Decoded hardware address configuration.
///
/// All values are powers of two. Construct through [`AddrConfig::from_tiling_config`]
/// or use [`AddrConfig::WIIU`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddrConfig {
    pipes: u32,
    banks: u32,
    pipe_interleave_bytes: u32,
    row_size: u32,
    swap_size: u32,
    split_size: u32,
}

impl AddrConfig {
    /// The `GB_TILING_CONFIG` value programmed on the Wii U.
    pub const WIIU_TILING_CONFIG: u32 = 0x44902;

    /// Wii U configuration: 2 pipes, 4 banks, 256 byte groups, 2048 byte rows,
    /// 256 byte bank swaps and a 2048 byte sample split.
    pub const WIIU: AddrConfig = AddrConfig {
        pipes: 2,
        banks: 4,
        pipe_interleave_bytes: 256,
        row_size: 2048,
        swap_size: 256,
        split_size: 2048,
    };

    /// Decodes a raw `GB_TILING_CONFIG` register value.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidHardwareConfig`] when a field holds a value the
    /// R600 addressing scheme does not define (more than 8 pipes, more than 8
    /// banks, groups other than 256 bytes, or a row larger than 8 KiB).
    pub fn from_tiling_config(value: u32) -> Result<Self, ConfigError> {
        let reg = GbTilingConfig(value);

        if reg.pipe_tiling() > 3 {
            return Err(ConfigError::InvalidHardwareConfig("pipe tiling"));
        }
        if reg.bank_tiling() > 1 {
            return Err(ConfigError::InvalidHardwareConfig("bank tiling"));
        }
        if reg.group_size() != 0 {
            return Err(ConfigError::InvalidHardwareConfig("group size"));
        }
        if reg.row_tiling() > 3 {
            return Err(ConfigError::InvalidHardwareConfig("row tiling"));
        }

        Ok(Self {
            pipes: 1 << reg.pipe_tiling(),
            banks: 4 << reg.bank_tiling(),
            pipe_interleave_bytes: 256,
            row_size: 1024 << reg.row_tiling(),
            swap_size: 128 << reg.bank_swaps(),
            split_size: 1024 << reg.sample_split(),
        })
    }

    /// Number of memory pipes (1, 2, 4 or 8).
    #[inline(always)]
    pub const fn pipes(&self) -> u32 {
        self.pipes
    }

    /// Number of memory banks (4 or 8).
    #[inline(always)]
    pub const fn banks(&self) -> u32 {
        self.banks
    }

    /// Bytes stored contiguously in one pipe before moving to the next.
    #[inline(always)]
    pub const fn pipe_interleave_bytes(&self) -> u32 {
        self.pipe_interleave_bytes
    }

    /// DRAM row size in bytes.
    #[inline(always)]
    pub const fn row_size(&self) -> u32 {
        self.row_size
    }

    /// Bank swap granularity in bytes.
    #[inline(always)]
    pub const fn swap_size(&self) -> u32 {
        self.swap_size
    }

    /// Micro tiles larger than this are split across slices by sample.
    #[inline(always)]
    pub const fn split_size(&self) -> u32 {
        self.split_size
    }

    #[inline(always)]
    pub(crate) const fn pipe_bits(&self) -> u32 {
        log2(self.pipes)
    }

    #[inline(always)]
    pub(crate) const fn bank_bits(&self) -> u32 {
        log2(self.banks)
    }

    #[inline(always)]
    pub(crate) const fn group_bits(&self) -> u32 {
        log2(self.pipe_interleave_bytes)
    }
}

impl Default for AddrConfig {
    fn default() -> Self {
        Self::WIIU
    }
}
