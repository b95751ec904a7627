//! Macro tile geometry and the pipe/bank hash.
//!
//! Each 8x8 micro tile of a macro tiled surface is assigned to one pipe and
//! one bank by XOR-folding selected bits of its coordinates. A macro tile is
//! the smallest rectangle in which every `(pipe, bank)` pair appears exactly
//! once; its shape depends on the pipe and bank counts and on the tile mode's
//! aspect ratio.
//!
//! The hash tables below are keyed by pipe and bank count. Every output bit
//! is the parity of `(x & x_mask) ^ (y & y_mask)`. For banks, `y` is first
//! divided by the number of pipes.

use crate::config::AddrConfig;
use crate::tile_mode::TileMode;
use gx2_tiling_common::bits::parity;
use gx2_tiling_common::InvariantError;

/// Width of a micro tile, in elements.
pub const MICRO_TILE_WIDTH: u32 = 8;
/// Height of a micro tile, in elements.
pub const MICRO_TILE_HEIGHT: u32 = 8;
/// Elements in one slice of a micro tile.
pub const MICRO_TILE_PIXELS: u32 = MICRO_TILE_WIDTH * MICRO_TILE_HEIGHT;

/// One output bit of the pipe or bank hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashBit {
    /// Bits of `x` folded into this output bit.
    pub x_mask: u32,
    /// Bits of `y` folded into this output bit.
    pub y_mask: u32,
}

const fn hash_bit(x_mask: u32, y_mask: u32) -> HashBit {
    HashBit { x_mask, y_mask }
}

const PIPE_HASH_2: [HashBit; 1] = [hash_bit(1 << 3, 1 << 3)];
const PIPE_HASH_4: [HashBit; 2] = [hash_bit(1 << 4, 1 << 3), hash_bit(1 << 3, 1 << 4)];
const PIPE_HASH_8: [HashBit; 3] = [
    hash_bit(1 << 5, 1 << 3),
    hash_bit((1 << 5) | (1 << 4), 1 << 4),
    hash_bit(1 << 3, 1 << 5),
];

const BANK_HASH_4: [HashBit; 2] = [hash_bit(1 << 3, 1 << 4), hash_bit(1 << 4, 1 << 3)];
const BANK_HASH_8: [HashBit; 3] = [
    hash_bit(1 << 3, 1 << 5),
    hash_bit(1 << 4, (1 << 4) | (1 << 5)),
    hash_bit(1 << 5, 1 << 3),
];

/// Bank permutation applied per bank swap column in `2B`/`3B` modes.
const BANK_SWAP_ORDER: [u32; 8] = [0, 1, 3, 2, 6, 7, 5, 4];

/// Pipe hash table for a pipe count.
#[inline]
pub const fn pipe_hash(pipes: u32) -> &'static [HashBit] {
    match pipes {
        2 => &PIPE_HASH_2,
        4 => &PIPE_HASH_4,
        8 => &PIPE_HASH_8,
        _ => &[],
    }
}

/// Bank hash table for a bank count.
#[inline]
pub const fn bank_hash(banks: u32) -> &'static [HashBit] {
    match banks {
        8 => &BANK_HASH_8,
        _ => &BANK_HASH_4,
    }
}

#[inline(always)]
fn fold(table: &[HashBit], x: u32, y: u32) -> u32 {
    let mut result = 0;
    for (index, entry) in table.iter().enumerate() {
        result |= parity((x & entry.x_mask) ^ (y & entry.y_mask)) << index;
    }
    result
}

/// Geometry constants of one tile mode on one hardware configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacroTileGeometry {
    tile_mode: TileMode,
    bits_per_element: u32,
    sample_count: u32,
    config: AddrConfig,
    micro_tile_width: u32,
    micro_tile_height: u32,
    thickness: u32,
    macro_tile_width: u32,
    macro_tile_height: u32,
    rotation: u32,
}

impl MacroTileGeometry {
    /// Derives the geometry of `tile_mode` for elements of `bits_per_element`.
    ///
    /// Linear modes have a 1x1 micro and macro tile. 1D modes use 8x8 micro
    /// tiles with no macro tiling (macro tile = micro tile). 2D/3D modes build
    /// macro tiles of `8 * banks / aspect` by `8 * pipes * aspect` elements.
    pub const fn resolve(
        tile_mode: TileMode,
        bits_per_element: u32,
        sample_count: u32,
        config: &AddrConfig,
    ) -> Self {
        let pipes = config.pipes();
        let banks = config.banks();
        let thickness = tile_mode.thickness();

        let (micro_tile_width, micro_tile_height) = if tile_mode.is_linear() {
            (1, 1)
        } else {
            (MICRO_TILE_WIDTH, MICRO_TILE_HEIGHT)
        };

        let (macro_tile_width, macro_tile_height) = if tile_mode.is_macro_tiled() {
            let aspect = tile_mode.macro_aspect_ratio();
            (
                MICRO_TILE_WIDTH * banks / aspect,
                MICRO_TILE_HEIGHT * pipes * aspect,
            )
        } else {
            (micro_tile_width, micro_tile_height)
        };

        let rotation = if !tile_mode.is_macro_tiled() {
            0
        } else if tile_mode.is_3d() {
            if pipes < 4 {
                1
            } else {
                pipes / 2 - 1
            }
        } else {
            pipes * (banks / 2 - 1)
        };

        Self {
            tile_mode,
            bits_per_element,
            sample_count,
            config: *config,
            micro_tile_width,
            micro_tile_height,
            thickness,
            macro_tile_width,
            macro_tile_height,
            rotation,
        }
    }

    /// The tile mode this geometry describes.
    #[inline(always)]
    pub const fn tile_mode(&self) -> TileMode {
        self.tile_mode
    }

    /// Number of memory pipes.
    #[inline(always)]
    pub const fn pipes(&self) -> u32 {
        self.config.pipes()
    }

    /// Number of memory banks.
    #[inline(always)]
    pub const fn banks(&self) -> u32 {
        self.config.banks()
    }

    /// Micro tile width in elements.
    #[inline(always)]
    pub const fn micro_tile_width(&self) -> u32 {
        self.micro_tile_width
    }

    /// Micro tile height in elements.
    #[inline(always)]
    pub const fn micro_tile_height(&self) -> u32 {
        self.micro_tile_height
    }

    /// Depth slices per micro tile.
    #[inline(always)]
    pub const fn thickness(&self) -> u32 {
        self.thickness
    }

    /// Macro tile width in elements.
    #[inline(always)]
    pub const fn macro_tile_width(&self) -> u32 {
        self.macro_tile_width
    }

    /// Macro tile height in elements.
    #[inline(always)]
    pub const fn macro_tile_height(&self) -> u32 {
        self.macro_tile_height
    }

    /// Per-slice rotation of the combined pipe/bank index.
    #[inline(always)]
    pub const fn rotation(&self) -> u32 {
        self.rotation
    }

    /// `true` for `2B`/`3B` modes.
    #[inline(always)]
    pub const fn is_bank_swapped(&self) -> bool {
        self.tile_mode.is_bank_swapped()
    }

    /// Bits in one micro tile, all samples included.
    #[inline(always)]
    pub const fn micro_tile_bits(&self) -> u64 {
        self.sample_count as u64
            * self.bits_per_element as u64
            * self.thickness as u64
            * (self.micro_tile_width * self.micro_tile_height) as u64
    }

    /// Bytes in one micro tile, all samples included.
    #[inline(always)]
    pub const fn micro_tile_bytes(&self) -> u64 {
        self.micro_tile_bits() / 8
    }

    /// Bytes in one macro tile, all samples and slices of a slab included.
    #[inline(always)]
    pub const fn macro_tile_bytes(&self) -> u64 {
        self.micro_tile_bytes()
            * (self.macro_tile_width / self.micro_tile_width) as u64
            * (self.macro_tile_height / self.micro_tile_height) as u64
    }

    /// Pipe of the micro tile containing `(x, y)`, before swizzle and rotation.
    #[inline(always)]
    pub fn pipe_from_coord(&self, x: u32, y: u32) -> u32 {
        fold(pipe_hash(self.pipes()), x, y)
    }

    /// Bank of the micro tile containing `(x, y)`, before swizzle and rotation.
    #[inline(always)]
    pub fn bank_from_coord(&self, x: u32, y: u32) -> u32 {
        fold(bank_hash(self.banks()), x, y / self.pipes())
    }

    /// Bank permutation for the given bank swap column.
    #[inline(always)]
    pub const fn bank_swap(&self, swap_index: u32) -> u32 {
        BANK_SWAP_ORDER[(swap_index & (self.banks() - 1)) as usize]
    }

    /// Width in elements of one bank swap column for a surface of `pitch` elements.
    ///
    /// Returns `Ok(0)` for modes without bank swapping.
    ///
    /// # Errors
    ///
    /// [`InvariantError::ZeroBankSwapWidth`] if a bank swapped mode resolves
    /// to a zero width, which would make bank swap columns undefined.
    pub fn bank_swapped_width(&self, pitch: u32) -> Result<u32, InvariantError> {
        if !self.is_bank_swapped() {
            return Ok(0);
        }

        let config = &self.config;
        let bpp = self.bits_per_element;
        let bytes_per_sample = 8 * bpp;
        let samples_per_tile = config.split_size() / bytes_per_sample;
        let slices_per_tile = if samples_per_tile != 0 {
            (self.sample_count / samples_per_tile).max(1)
        } else {
            1
        };

        let samples = if self.tile_mode.is_thick() {
            4
        } else {
            self.sample_count
        };

        let bytes_per_tile_slice = samples * bytes_per_sample / slices_per_tile;
        let swap_tiles = ((config.swap_size() >> 1) / bpp).max(1);
        let swap_width = swap_tiles * MICRO_TILE_WIDTH * config.banks();
        let height_bytes = samples
            * self.tile_mode.macro_aspect_ratio()
            * config.pipes()
            * bpp
            / slices_per_tile;
        let swap_max = config.pipes() * config.banks() * config.row_size() / height_bytes;
        let swap_min = config.pipe_interleave_bytes() * MICRO_TILE_WIDTH * config.banks()
            / bytes_per_tile_slice;

        let mut width = swap_max.min(swap_min.max(swap_width));
        let pitch = pitch.max(1);
        while width >= 2 * pitch {
            width >>= 1;
        }

        if width == 0 {
            return Err(InvariantError::ZeroBankSwapWidth);
        }
        Ok(width)
    }
}
