//! Copying elements between two layouts of a surface.
//!
//! [`untile`] and [`tile`] convert between a surface's layout and its
//! [`linear_equivalent`](SurfaceInfo::linear_equivalent). [`copy_surface`]
//! copies between any two layouts, scaling with nearest-neighbour sampling
//! when the widths or heights differ. [`copy_slices`] copies only the first
//! slices, as volume mip levels hold fewer slices than they are sized for.
//!
//! Padding bytes of the destination are left untouched.

use crate::address::{AddressTranslator, TexelCoord};
use crate::error::{BufferError, CoordinateError, InvariantError, TilingError};
use crate::surface_info::SurfaceInfo;
use alloc::vec;
use alloc::vec::Vec;
use log::trace;

/// Untiles `tiled`, returning the surface as tightly packed rows.
///
/// # Errors
///
/// - [`BufferError::SourceTooSmall`] if `tiled` holds fewer than
///   [`SurfaceInfo::total_bytes`] bytes.
/// - [`TilingError::Invariant`] if the layout is internally inconsistent.
pub fn untile(info: &SurfaceInfo, tiled: &[u8]) -> Result<Vec<u8>, TilingError> {
    let linear = info.linear_equivalent()?;
    let mut output = vec![0u8; buffer_len(linear.total_bytes())?];
    copy_surface(info, tiled, &linear, &mut output)?;
    Ok(output)
}

/// Untiles `tiled` into `linear`, laid out as [`SurfaceInfo::linear_equivalent`].
///
/// # Errors
///
/// As [`untile`], plus [`BufferError::OutputBufferTooSmall`] if `linear` is
/// smaller than the linear equivalent's total size.
pub fn untile_into(info: &SurfaceInfo, tiled: &[u8], linear: &mut [u8]) -> Result<(), TilingError> {
    let linear_info = info.linear_equivalent()?;
    copy_surface(info, tiled, &linear_info, linear)
}

/// Tiles tightly packed rows into the layout `info`.
///
/// The returned buffer is [`SurfaceInfo::total_bytes`] long; padding is zeroed.
///
/// # Errors
///
/// - [`BufferError::SourceTooSmall`] if `linear` is smaller than the linear
///   equivalent's total size.
/// - [`TilingError::Invariant`] if the layout is internally inconsistent.
pub fn tile(info: &SurfaceInfo, linear: &[u8]) -> Result<Vec<u8>, TilingError> {
    let mut output = vec![0u8; buffer_len(info.total_bytes())?];
    tile_into(info, linear, &mut output)?;
    Ok(output)
}

/// Tiles tightly packed rows from `linear` into `tiled`.
///
/// # Errors
///
/// As [`tile`], plus [`BufferError::OutputBufferTooSmall`] if `tiled` holds
/// fewer than [`SurfaceInfo::total_bytes`] bytes.
pub fn tile_into(info: &SurfaceInfo, linear: &[u8], tiled: &mut [u8]) -> Result<(), TilingError> {
    let linear_info = info.linear_equivalent()?;
    copy_surface(&linear_info, linear, info, tiled)
}

/// Copies every element of `src` (laid out as `src_info`) into `dst` (laid
/// out as `dst_info`).
///
/// When the widths or heights differ, each destination element is read from
/// `(src_width * x / dst_width, src_height * y / dst_height)`.
///
/// # Errors
///
/// - [`BufferError::SurfaceMismatch`] if element size, slice count or sample
///   count differ.
/// - [`BufferError::SourceTooSmall`] / [`BufferError::OutputBufferTooSmall`]
///   if a buffer is smaller than its layout.
pub fn copy_surface(
    src_info: &SurfaceInfo,
    src: &[u8],
    dst_info: &SurfaceInfo,
    dst: &mut [u8],
) -> Result<(), TilingError> {
    copy_slices(src_info, src, dst_info, dst, dst_info.depth())
}

/// Copies slices `0..slices` of `src` into `dst`, as [`copy_surface`] does.
///
/// Elements of the remaining slices are left untouched.
///
/// # Errors
///
/// As [`copy_surface`], plus [`CoordinateError::SliceCountOutOfRange`] if
/// `slices` exceeds the depth of the surfaces.
pub fn copy_slices(
    src_info: &SurfaceInfo,
    src: &[u8],
    dst_info: &SurfaceInfo,
    dst: &mut [u8],
    slices: u32,
) -> Result<(), TilingError> {
    let src_desc = src_info.descriptor();
    let dst_desc = dst_info.descriptor();

    if src_desc.bits_per_element() != dst_desc.bits_per_element() {
        return Err(BufferError::SurfaceMismatch("bits per element").into());
    }
    if src_info.depth() != dst_info.depth() {
        return Err(BufferError::SurfaceMismatch("depth or array size").into());
    }
    if src_desc.sample_count() != dst_desc.sample_count() {
        return Err(BufferError::SurfaceMismatch("sample count").into());
    }
    if slices > dst_info.depth() {
        return Err(CoordinateError::SliceCountOutOfRange {
            slices,
            depth: dst_info.depth(),
        }
        .into());
    }

    if (src.len() as u64) < src_info.total_bytes() {
        return Err(BufferError::SourceTooSmall {
            needed: src_info.total_bytes(),
            actual: src.len() as u64,
        }
        .into());
    }
    if (dst.len() as u64) < dst_info.total_bytes() {
        return Err(BufferError::OutputBufferTooSmall {
            needed: dst_info.total_bytes(),
            actual: dst.len() as u64,
        }
        .into());
    }

    trace!(
        "copy {}x{} {:?} -> {}x{} {:?}, {slices} slices",
        src_info.width(),
        src_info.height(),
        src_info.tile_mode(),
        dst_info.width(),
        dst_info.height(),
        dst_info.tile_mode()
    );

    let copier = Copier {
        src: AddressTranslator::new(src_info)?,
        dst: AddressTranslator::new(dst_info)?,
        bytes_per_element: src_desc.bytes_per_element() as usize,
        slices,
    };

    #[cfg(feature = "multithreaded")]
    {
        if dst_info.tile_mode().is_linear() {
            copier.copy_rows_parallel(src, dst)?;
            return Ok(());
        }
    }

    copier.copy_all(src, dst);
    Ok(())
}

fn buffer_len(total_bytes: u64) -> Result<usize, InvariantError> {
    usize::try_from(total_bytes).map_err(|_| InvariantError::Overflow(total_bytes))
}

struct Copier {
    src: AddressTranslator,
    dst: AddressTranslator,
    bytes_per_element: usize,
    slices: u32,
}

impl Copier {
    /// Source coordinate sampled for destination coordinate `(x, y)`.
    #[inline(always)]
    fn source_coord(&self, x: u32, y: u32, slice: u32, sample: u32) -> TexelCoord {
        let src = self.src.info();
        let dst = self.dst.info();
        let src_x = (src.width() as u64 * x as u64 / dst.width() as u64) as u32;
        let src_y = (src.height() as u64 * y as u64 / dst.height() as u64) as u32;
        TexelCoord::new(src_x, src_y, slice, sample)
    }

    #[inline(always)]
    fn copy_element(&self, src: &[u8], dst: &mut [u8], coord: TexelCoord) {
        let src_offset = self.src.address_unchecked(self.source_coord(
            coord.x,
            coord.y,
            coord.slice,
            coord.sample,
        )) as usize;
        let dst_offset = self.dst.address_unchecked(coord) as usize;
        let len = self.bytes_per_element;
        dst[dst_offset..dst_offset + len].copy_from_slice(&src[src_offset..src_offset + len]);
    }

    fn copy_all(&self, src: &[u8], dst: &mut [u8]) {
        let info = self.dst.info();
        for sample in 0..info.descriptor().sample_count() {
            for slice in 0..self.slices {
                for y in 0..info.height() {
                    for x in 0..info.width() {
                        self.copy_element(src, dst, TexelCoord::new(x, y, slice, sample));
                    }
                }
            }
        }
    }

    /// Linear destinations store every row contiguously, so rows are filled in parallel.
    #[cfg(feature = "multithreaded")]
    fn copy_rows_parallel(&self, src: &[u8], dst: &mut [u8]) -> Result<(), TilingError> {
        use rayon::prelude::*;

        let info = self.dst.info();
        let row_bytes = buffer_len(info.pitch() as u64 * self.bytes_per_element as u64)?;
        let total_len = buffer_len(info.total_bytes())?;
        let padded_height = info.padded_height() as usize;
        let padded_depth = info.padded_depth() as usize;

        dst[..total_len]
            .par_chunks_mut(row_bytes)
            .enumerate()
            .for_each(|(index, row)| {
                let y = (index % padded_height) as u32;
                let slice = ((index / padded_height) % padded_depth) as u32;
                let sample = (index / (padded_height * padded_depth)) as u32;
                if y >= info.height() || slice >= self.slices {
                    return;
                }

                let len = self.bytes_per_element;
                for x in 0..info.width() {
                    let src_offset =
                        self.src.address_unchecked(self.source_coord(x, y, slice, sample)) as usize;
                    let dst_offset = x as usize * len;
                    row[dst_offset..dst_offset + len]
                        .copy_from_slice(&src[src_offset..src_offset + len]);
                }
            });
        Ok(())
    }
}
