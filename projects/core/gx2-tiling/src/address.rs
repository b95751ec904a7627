//! Translation of element coordinates into byte offsets.
//!
//! # Micro tiles
//!
//! Within an 8x8 micro tile, the bits of `x` and `y` are interleaved into a
//! 6 bit element index in an order that depends on the element size (depth
//! buffers use a fixed order). Thick modes append bits 0 and 1 of the slice.
//!
//! # Macro tiles
//!
//! Micro tiles are spread across pipes and banks by the hash in
//! [`geometry`](crate::geometry). The pipe and bank are then rotated by the
//! swizzle and the slice, and inserted into the final address above the pipe
//! interleave bits:
//!
//! ```text
//! | offset >> group bits | bank | pipe | offset & group mask |
//! ```

use crate::error::{CoordinateError, TilingError};
use crate::geometry::{MICRO_TILE_HEIGHT, MICRO_TILE_WIDTH};
use crate::surface_info::SurfaceInfo;
use gx2_tiling_common::math::exact_div;
use likely_stable::unlikely;

/// Location of one element (sample) in a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TexelCoord {
    /// Column, in elements.
    pub x: u32,
    /// Row, in elements.
    pub y: u32,
    /// Depth slice or array layer.
    pub slice: u32,
    /// MSAA sample.
    pub sample: u32,
}

impl TexelCoord {
    /// Creates a coordinate.
    #[inline(always)]
    pub const fn new(x: u32, y: u32, slice: u32, sample: u32) -> Self {
        Self {
            x,
            y,
            slice,
            sample,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Src {
    X(u32),
    Y(u32),
}

use Src::{X, Y};

const DEPTH_ORDER: [Src; 6] = [X(0), Y(0), X(1), Y(1), X(2), Y(2)];
const ORDER_8: [Src; 6] = [X(0), X(1), X(2), Y(1), Y(0), Y(2)];
const ORDER_16: [Src; 6] = [X(0), X(1), X(2), Y(0), Y(1), Y(2)];
const ORDER_32: [Src; 6] = [X(0), X(1), Y(0), X(2), Y(1), Y(2)];
const ORDER_64: [Src; 6] = [X(0), Y(0), X(1), X(2), Y(1), Y(2)];
const ORDER_128: [Src; 6] = [Y(0), X(0), X(1), X(2), Y(1), Y(2)];

const fn pixel_order(bits_per_element: u32, is_depth: bool) -> &'static [Src; 6] {
    if is_depth {
        return &DEPTH_ORDER;
    }
    match bits_per_element {
        8 => &ORDER_8,
        16 => &ORDER_16,
        64 => &ORDER_64,
        128 => &ORDER_128,
        _ => &ORDER_32,
    }
}

#[derive(Debug, Clone, Copy)]
enum Addressing {
    Linear,
    Micro {
        micro_tile_bytes: u64,
    },
    Macro(MacroParams),
}

#[derive(Debug, Clone, Copy)]
struct MacroParams {
    micro_tile_bits: u64,
    /// Number of slices one micro tile's samples are split across.
    splits: u64,
    tile_slice_bits: u64,
    /// Bytes per slab within one split.
    slice_bytes: u64,
    macro_tile_bytes: u64,
    macro_tiles_per_row: u64,
    swizzle: u32,
}

/// Maps element coordinates of one surface to byte offsets.
///
/// Construction does all per-surface work; [`AddressTranslator::address`]
/// only does per-element arithmetic.
#[derive(Debug, Clone, Copy)]
pub struct AddressTranslator {
    info: SurfaceInfo,
    addressing: Addressing,
    order: &'static [Src; 6],
}

impl AddressTranslator {
    /// Prepares translation for the layout `info`.
    ///
    /// # Errors
    ///
    /// [`TilingError::Invariant`] if the layout's sizes do not divide into
    /// whole tiles, which indicates a bug in the layout calculation.
    pub fn new(info: &SurfaceInfo) -> Result<Self, TilingError> {
        let descriptor = info.descriptor();
        let geometry = info.geometry();
        let mode = info.tile_mode();

        let addressing = if mode.is_linear() {
            Addressing::Linear
        } else if mode.is_micro_tiled() {
            Addressing::Micro {
                micro_tile_bytes: geometry.micro_tile_bytes(),
            }
        } else {
            let config = info.config();
            let samples = descriptor.sample_count() as u64;
            let micro_tile_bits = geometry.micro_tile_bits();
            let micro_tile_bytes = micro_tile_bits / 8;
            let split_size = config.split_size() as u64;

            let splits = if samples > 1 && micro_tile_bytes > split_size {
                let samples_per_slice = split_size / (micro_tile_bytes / samples);
                samples / samples_per_slice
            } else {
                1
            };

            Addressing::Macro(MacroParams {
                micro_tile_bits,
                splits,
                tile_slice_bits: micro_tile_bits / splits,
                slice_bytes: exact_div(info.bytes_per_slice(), splits)?,
                macro_tile_bytes: exact_div(geometry.macro_tile_bytes(), splits)?,
                macro_tiles_per_row: (info.pitch() / geometry.macro_tile_width()) as u64,
                swizzle: descriptor.pipe_swizzle() + config.pipes() * descriptor.bank_swizzle(),
            })
        };

        Ok(Self {
            info: *info,
            addressing,
            order: pixel_order(descriptor.bits_per_element(), descriptor.is_depth()),
        })
    }

    /// The layout addresses are computed for.
    #[inline(always)]
    pub const fn info(&self) -> &SurfaceInfo {
        &self.info
    }

    /// Returns `true` if `coord` lies inside the logical surface.
    #[inline]
    pub fn contains(&self, coord: TexelCoord) -> bool {
        coord.x < self.info.width()
            && coord.y < self.info.height()
            && coord.slice < self.info.depth()
            && coord.sample < self.info.descriptor().sample_count()
    }

    /// Byte offset of the element at `coord`, relative to the surface base.
    ///
    /// # Errors
    ///
    /// [`CoordinateError::OutOfRange`] if `coord` lies outside the logical surface.
    #[inline]
    pub fn address(&self, coord: TexelCoord) -> Result<u64, CoordinateError> {
        if unlikely(!self.contains(coord)) {
            return Err(CoordinateError::OutOfRange {
                x: coord.x,
                y: coord.y,
                slice: coord.slice,
                sample: coord.sample,
                width: self.info.width(),
                height: self.info.height(),
                depth: self.info.depth(),
                samples: self.info.descriptor().sample_count(),
            });
        }
        Ok(self.address_unchecked(coord))
    }

    /// [`AddressTranslator::address`] for coordinates known to be in range.
    #[inline]
    pub(crate) fn address_unchecked(&self, coord: TexelCoord) -> u64 {
        match self.addressing {
            Addressing::Linear => self.linear_address(coord),
            Addressing::Micro { micro_tile_bytes } => self.micro_address(coord, micro_tile_bytes),
            Addressing::Macro(params) => self.macro_address(coord, &params),
        }
    }

    #[inline(always)]
    fn linear_address(&self, coord: TexelCoord) -> u64 {
        let info = &self.info;
        let row = (coord.sample as u64 * info.padded_depth() as u64 + coord.slice as u64)
            * info.padded_height() as u64
            + coord.y as u64;
        (row * info.pitch() as u64 + coord.x as u64)
            * info.descriptor().bytes_per_element() as u64
    }

    #[inline(always)]
    fn pixel_index(&self, coord: TexelCoord) -> u32 {
        let mut index = 0;
        for (bit, src) in self.order.iter().enumerate() {
            let value = match *src {
                X(n) => (coord.x >> n) & 1,
                Y(n) => (coord.y >> n) & 1,
            };
            index |= value << bit;
        }

        if self.info.geometry().thickness() > 1 {
            index |= (coord.slice & 3) << 6;
        }
        index
    }

    #[inline(always)]
    fn micro_address(&self, coord: TexelCoord, micro_tile_bytes: u64) -> u64 {
        let info = &self.info;
        let tiles_per_row = (info.pitch() / MICRO_TILE_WIDTH) as u64;
        let tile_x = (coord.x / MICRO_TILE_WIDTH) as u64;
        let tile_y = (coord.y / MICRO_TILE_HEIGHT) as u64;

        let tile_offset = micro_tile_bytes * (tile_x + tile_y * tiles_per_row);
        let slab = (coord.slice / info.geometry().thickness()) as u64;
        let slice_offset = slab * info.bytes_per_slice();
        let pixel_offset =
            info.descriptor().bits_per_element() as u64 * self.pixel_index(coord) as u64 / 8;

        tile_offset + slice_offset + pixel_offset
    }

    fn macro_address(&self, coord: TexelCoord, params: &MacroParams) -> u64 {
        let MacroParams {
            micro_tile_bits,
            splits,
            tile_slice_bits,
            slice_bytes,
            macro_tile_bytes,
            macro_tiles_per_row,
            swizzle,
        } = *params;

        let info = &self.info;
        let descriptor = info.descriptor();
        let geometry = info.geometry();
        let config = info.config();
        let bpp = descriptor.bits_per_element() as u64;
        let samples = descriptor.sample_count() as u64;
        let thickness = geometry.thickness();
        let pipes = config.pipes();
        let banks = config.banks();

        // Offset of the element within its micro tile, in bits.
        let pixel_index = self.pixel_index(coord) as u64;
        let sample = coord.sample as u64;
        let mut element_offset = if descriptor.is_depth() {
            bpp * sample + samples * bpp * pixel_index
        } else {
            sample * (micro_tile_bits / samples) + bpp * pixel_index
        };

        let mut sample_slice = 0;
        if splits > 1 {
            sample_slice = element_offset / tile_slice_bits;
            element_offset %= tile_slice_bits;
        }
        let element_offset = element_offset / 8;

        let mut bank_pipe = geometry.pipe_from_coord(coord.x, coord.y)
            + pipes * geometry.bank_from_coord(coord.x, coord.y);
        let slice_in = if thickness > 1 {
            coord.slice >> 2
        } else {
            coord.slice
        };
        bank_pipe ^= pipes * sample_slice as u32 * ((banks >> 1) + 1)
            ^ (swizzle + slice_in * geometry.rotation());
        bank_pipe %= pipes * banks;
        let pipe = bank_pipe % pipes;
        let mut bank = bank_pipe / pipes;

        let slice_offset =
            slice_bytes * ((sample_slice + splits * coord.slice as u64) / thickness as u64);

        let macro_tile_x = coord.x / geometry.macro_tile_width();
        let macro_tile_y = coord.y / geometry.macro_tile_height();
        let macro_offset =
            (macro_tile_x as u64 + macro_tiles_per_row * macro_tile_y as u64) * macro_tile_bytes;

        if geometry.is_bank_swapped() {
            let swap_index = geometry.macro_tile_width() * macro_tile_x / info.bank_swap_width();
            bank ^= geometry.bank_swap(swap_index);
        }

        let pipe_bits = config.pipe_bits();
        let bank_bits = config.bank_bits();
        let group_bits = config.group_bits();
        let group_mask = (1u64 << group_bits) - 1;

        let total = element_offset + ((macro_offset + slice_offset) >> (pipe_bits + bank_bits));
        ((total & !group_mask) << (pipe_bits + bank_bits))
            | (total & group_mask)
            | ((pipe as u64) << group_bits)
            | ((bank as u64) << (pipe_bits + group_bits))
    }
}

/// Byte offset of the element at `coord` in the surface laid out as `info`.
///
/// Builds an [`AddressTranslator`] per call; prefer one translator when
/// translating many coordinates of the same surface.
pub fn compute_surface_address(info: &SurfaceInfo, coord: TexelCoord) -> Result<u64, TilingError> {
    Ok(AddressTranslator::new(info)?.address(coord)?)
}
