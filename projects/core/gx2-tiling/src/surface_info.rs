//! Surface layout: effective tile mode, padding, pitch, sizes and alignments.
//!
//! # Tile mode demotion
//!
//! The requested tile mode is not always the one used:
//!
//! - Thick modes are made thin for multisampled surfaces, depth buffers and
//!   element sizes where one thick micro tile would be split across slices.
//! - On mip levels above 0, bank swapping is dropped and levels smaller than
//!   one macro tile fall back to 1D tiling. Levels with fewer than 4 slices
//!   are made thin.
//! - Multisampled surfaces always end up thin and macro tiled, as micro tiles
//!   have no room for samples.
//!
//! # Padding
//!
//! Mip levels above 0 first round their dimensions up to powers of two. Pitch
//! is then aligned to the mode's pitch alignment, height to one macro tile
//! (or micro tile) and thick slice counts to the tile thickness.

use crate::config::AddrConfig;
use crate::descriptor::{SurfaceDescriptor, SurfaceKind};
use crate::error::TilingError;
use crate::geometry::{MacroTileGeometry, MICRO_TILE_HEIGHT, MICRO_TILE_PIXELS, MICRO_TILE_WIDTH};
use crate::tile_mode::TileMode;
use gx2_tiling_common::math::{exact_div, next_pow2, pow2_align, round_up};
use log::{debug, trace};

/// Layout of one mip level of a surface.
///
/// A pure function of its [`SurfaceDescriptor`]: equal descriptors always
/// produce equal (bit identical) infos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceInfo {
    descriptor: SurfaceDescriptor,
    tile_mode: TileMode,
    geometry: MacroTileGeometry,
    padded_width: u32,
    padded_height: u32,
    padded_depth: u32,
    pitch: u32,
    pitch_align: u32,
    height_align: u32,
    depth_align: u32,
    bytes_per_slice: u64,
    total_bytes: u64,
    base_alignment: u32,
    bank_swap_width: u32,
}

impl SurfaceInfo {
    /// Computes the layout of the surface described by `descriptor`.
    ///
    /// # Errors
    ///
    /// [`TilingError::Invariant`] if a size that must divide exactly does not.
    /// This indicates a bug rather than bad input.
    pub fn compute(descriptor: &SurfaceDescriptor) -> Result<Self, TilingError> {
        let requested = descriptor.tile_mode();
        let tile_mode = effective_tile_mode(descriptor);
        if tile_mode != requested {
            debug!(
                "{}x{}x{} level {}: tile mode {:?} demoted to {:?}",
                descriptor.width(),
                descriptor.height(),
                descriptor.depth_or_array_size(),
                descriptor.mip_level(),
                requested,
                tile_mode
            );
        }

        let extent = Extent::of(descriptor);
        let layout = if tile_mode.is_linear() {
            linear_layout(descriptor, tile_mode, extent)
        } else if tile_mode.is_micro_tiled() {
            micro_layout(descriptor, tile_mode, extent)
        } else {
            macro_layout(descriptor, tile_mode, extent)?
        };

        let bpp = descriptor.bits_per_element();
        let samples = descriptor.sample_count();
        let geometry =
            MacroTileGeometry::resolve(layout.tile_mode, bpp, samples, descriptor.config());
        let thickness = geometry.thickness();

        let slab_bits = layout.pitch as u64
            * layout.height as u64
            * thickness as u64
            * bpp as u64
            * samples as u64;
        let bytes_per_slice = exact_div(slab_bits, 8)?;
        let slabs = exact_div(layout.slices as u64, thickness as u64)?;
        let total_bytes = bytes_per_slice * slabs;
        let bank_swap_width = geometry.bank_swapped_width(layout.pitch)?;

        let info = Self {
            descriptor: *descriptor,
            tile_mode: layout.tile_mode,
            geometry,
            padded_width: round_up(extent.pitch, geometry.macro_tile_width()),
            padded_height: layout.height,
            padded_depth: layout.slices,
            pitch: layout.pitch,
            pitch_align: layout.align.pitch,
            height_align: layout.align.height,
            depth_align: thickness,
            bytes_per_slice,
            total_bytes,
            base_alignment: layout.align.base,
            bank_swap_width,
        };

        trace!(
            "{:?} level {}: pitch {} height {} slices {} size {} align {}",
            info.tile_mode,
            descriptor.mip_level(),
            info.pitch,
            info.padded_height,
            info.padded_depth,
            info.total_bytes,
            info.base_alignment
        );
        Ok(info)
    }

    /// The same surface stored as tightly packed rows ([`TileMode::LinearGeneral`]
    /// at level 0), with rows of exactly `width * bytes_per_element` bytes.
    ///
    /// This is the layout produced by [`untile`](crate::untile).
    pub fn linear_equivalent(&self) -> Result<SurfaceInfo, TilingError> {
        let descriptor = self
            .descriptor
            .to_builder()
            .tile_mode(TileMode::LinearGeneral)
            .mip_level(0)
            .pipe_swizzle(0)
            .bank_swizzle(0)
            .display(false)
            .build()?;
        SurfaceInfo::compute(&descriptor)
    }

    /// The descriptor this layout was computed from.
    #[inline(always)]
    pub const fn descriptor(&self) -> &SurfaceDescriptor {
        &self.descriptor
    }

    /// Hardware configuration of the surface.
    #[inline(always)]
    pub const fn config(&self) -> &AddrConfig {
        self.descriptor.config()
    }

    /// The tile mode actually used, after demotion.
    #[inline(always)]
    pub const fn tile_mode(&self) -> TileMode {
        self.tile_mode
    }

    /// Geometry of [`SurfaceInfo::tile_mode`].
    #[inline(always)]
    pub const fn geometry(&self) -> &MacroTileGeometry {
        &self.geometry
    }

    /// Logical width in elements.
    #[inline(always)]
    pub const fn width(&self) -> u32 {
        self.descriptor.width()
    }

    /// Logical height in elements.
    #[inline(always)]
    pub const fn height(&self) -> u32 {
        self.descriptor.height()
    }

    /// Logical depth or slice count.
    #[inline(always)]
    pub const fn depth(&self) -> u32 {
        self.descriptor.depth_or_array_size()
    }

    /// Width rounded up to a whole number of macro tiles.
    #[inline(always)]
    pub const fn padded_width(&self) -> u32 {
        self.padded_width
    }

    /// Height rounded up to a whole number of macro tiles.
    #[inline(always)]
    pub const fn padded_height(&self) -> u32 {
        self.padded_height
    }

    /// Slice count after padding.
    #[inline(always)]
    pub const fn padded_depth(&self) -> u32 {
        self.padded_depth
    }

    /// Row stride in elements.
    #[inline(always)]
    pub const fn pitch(&self) -> u32 {
        self.pitch
    }

    /// Alignment of [`SurfaceInfo::pitch`], in elements.
    #[inline(always)]
    pub const fn pitch_align(&self) -> u32 {
        self.pitch_align
    }

    /// Alignment of [`SurfaceInfo::padded_height`], in elements.
    #[inline(always)]
    pub const fn height_align(&self) -> u32 {
        self.height_align
    }

    /// Alignment of [`SurfaceInfo::padded_depth`], in slices.
    #[inline(always)]
    pub const fn depth_align(&self) -> u32 {
        self.depth_align
    }

    /// Bytes in one slab of [`MacroTileGeometry::thickness`] slices, all samples included.
    #[inline(always)]
    pub const fn bytes_per_slice(&self) -> u64 {
        self.bytes_per_slice
    }

    /// Size of the whole level in bytes.
    #[inline(always)]
    pub const fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    /// Required alignment of the level's base address, in bytes.
    #[inline(always)]
    pub const fn base_alignment(&self) -> u32 {
        self.base_alignment
    }

    /// Width in elements of a bank swap column, 0 unless bank swapped.
    #[inline(always)]
    pub const fn bank_swap_width(&self) -> u32 {
        self.bank_swap_width
    }
}

/// Resolves the tile mode a surface is actually laid out with.
pub fn effective_tile_mode(descriptor: &SurfaceDescriptor) -> TileMode {
    let samples = descriptor.sample_count();
    let mut mode = sample_tile_mode(descriptor.tile_mode(), descriptor);
    if descriptor.mip_level() > 0 {
        mode = mip_tile_mode(mode, descriptor);
    }

    if samples > 1 {
        if mode.is_micro_tiled() {
            mode = TileMode::Tiled2DThin1;
        } else if mode.is_thick() {
            mode = thin_variant(mode);
        }
    }
    mode
}

const fn thin_variant(mode: TileMode) -> TileMode {
    match mode {
        TileMode::Tiled1DThick => TileMode::Tiled1DThin1,
        TileMode::Tiled2DThick => TileMode::Tiled2DThin1,
        TileMode::Tiled2BThick => TileMode::Tiled2BThin1,
        TileMode::Tiled3DThick => TileMode::Tiled3DThin1,
        TileMode::Tiled3BThick => TileMode::Tiled3BThin1,
        other => other,
    }
}

/// Number of slices one micro tile of `mode` is split into by the split size.
fn tile_slices(mode: TileMode, descriptor: &SurfaceDescriptor) -> u32 {
    let bytes_per_sample = descriptor.bits_per_element() * MICRO_TILE_PIXELS / 8;
    let samples = if mode.is_thick() {
        4
    } else {
        descriptor.sample_count()
    };

    let samples_per_tile = descriptor.config().split_size() / bytes_per_sample;
    if samples_per_tile == 0 {
        1
    } else {
        (samples / samples_per_tile).max(1)
    }
}

/// Tile mode after the sample count, depth ordering and tile splitting are
/// accounted for.
///
/// A 1D thick surface with 2 or 4 samples becomes [`TileMode::Tiled2DThick`]
/// here, as addrlib's `computeSurfaceMipLevelTileMode` does. Unlike addrlib,
/// [`effective_tile_mode`] then makes it [`TileMode::Tiled2DThin1`]: thick
/// layouts are only addressed with a single sample.
fn sample_tile_mode(base: TileMode, descriptor: &SurfaceDescriptor) -> TileMode {
    let samples = descriptor.sample_count();
    let is_depth = descriptor.is_depth();

    let mut mode = base;
    if samples > 1 || is_depth || tile_slices(base, descriptor) > 1 {
        mode = match base {
            TileMode::Tiled2DThick => TileMode::Tiled2DThin1,
            TileMode::Tiled3DThick => TileMode::Tiled3DThin1,
            TileMode::Tiled2BThick => TileMode::Tiled2BThin1,
            TileMode::Tiled3BThick => TileMode::Tiled3BThin1,
            other => other,
        };
    }

    match base {
        TileMode::Tiled1DThin1 if samples > 1 => TileMode::Tiled2DThin1,
        TileMode::Tiled1DThick if samples == 2 || samples == 4 => TileMode::Tiled2DThick,
        TileMode::Tiled1DThick if samples > 1 || is_depth => TileMode::Tiled1DThin1,
        _ => mode,
    }
}

fn mip_tile_mode(mode: TileMode, descriptor: &SurfaceDescriptor) -> TileMode {
    let config = descriptor.config();
    let width = next_pow2(descriptor.width());
    let height = next_pow2(descriptor.height());
    let slices = next_pow2(descriptor.depth_or_array_size());

    let mut mode = mode.without_bank_swap();
    let geometry = MacroTileGeometry::resolve(
        mode,
        descriptor.bits_per_element(),
        descriptor.sample_count(),
        config,
    );

    let group = config.pipe_interleave_bytes() as u64;
    let micro_tile_bytes = geometry.micro_tile_bytes();
    let width_align_factor = if micro_tile_bytes < group {
        (group / micro_tile_bytes).max(1) as u32
    } else {
        1
    };

    let too_small = width < width_align_factor * geometry.macro_tile_width()
        || height < geometry.macro_tile_height();
    mode = match mode {
        TileMode::Tiled2DThin1
        | TileMode::Tiled2DThin2
        | TileMode::Tiled2DThin4
        | TileMode::Tiled3DThin1
            if too_small =>
        {
            TileMode::Tiled1DThin1
        }
        TileMode::Tiled2DThick | TileMode::Tiled3DThick if too_small => TileMode::Tiled1DThick,
        other => other,
    };

    if slices < 4 {
        mode = match mode {
            TileMode::Tiled1DThick => TileMode::Tiled1DThin1,
            TileMode::Tiled2DThick => TileMode::Tiled2DThin1,
            TileMode::Tiled3DThick => TileMode::Tiled3DThin1,
            other => other,
        };
    }

    sample_tile_mode(mode, descriptor)
}

/// Dimensions before alignment.
#[derive(Debug, Clone, Copy)]
struct Extent {
    pitch: u32,
    height: u32,
    slices: u32,
    /// Number of dimensions to pad (0 = all).
    pad_dims: u32,
    is_cube: bool,
}

impl Extent {
    fn of(descriptor: &SurfaceDescriptor) -> Self {
        let width = descriptor.width();
        let height = descriptor.height();
        let slices = descriptor.depth_or_array_size();
        let is_cube = descriptor.kind() == SurfaceKind::Cube;

        if descriptor.mip_level() == 0 {
            return Self {
                pitch: width,
                height,
                slices,
                pad_dims: if is_cube { 2 } else { 0 },
                is_cube,
            };
        }

        let (slices, pad_dims) = if is_cube {
            (slices, if slices <= 1 { 2 } else { 0 })
        } else {
            (next_pow2(slices), 0)
        };

        Self {
            pitch: next_pow2(width),
            height: next_pow2(height),
            slices,
            pad_dims,
            is_cube,
        }
    }

    fn pad(self, mode: TileMode, align: &Alignments) -> (u32, u32, u32) {
        let pad_dims = if self.pad_dims == 0 { 3 } else { self.pad_dims };
        let thickness = mode.thickness();

        let pitch = round_up(self.pitch, align.pitch);
        let height = if pad_dims > 1 {
            round_up(self.height, align.height)
        } else {
            self.height
        };

        let mut slices = self.slices;
        if pad_dims > 2 || thickness > 1 {
            if self.is_cube {
                slices = next_pow2(slices);
            }
            if thickness > 1 {
                slices = pow2_align(slices, thickness);
            }
        }
        (pitch, height, slices)
    }
}

#[derive(Debug, Clone, Copy)]
struct Alignments {
    base: u32,
    pitch: u32,
    height: u32,
}

struct Layout {
    tile_mode: TileMode,
    align: Alignments,
    pitch: u32,
    height: u32,
    slices: u32,
}

impl Layout {
    fn new(tile_mode: TileMode, extent: Extent, align: Alignments) -> Self {
        let (pitch, height, slices) = extent.pad(tile_mode, &align);
        Self {
            tile_mode,
            align,
            pitch,
            height,
            slices,
        }
    }
}

#[inline]
fn display_pitch_align(descriptor: &SurfaceDescriptor, pitch_align: u32) -> u32 {
    if descriptor.is_display() {
        pow2_align(pitch_align, 32)
    } else {
        pitch_align
    }
}

fn linear_layout(descriptor: &SurfaceDescriptor, mode: TileMode, extent: Extent) -> Layout {
    let group = descriptor.config().pipe_interleave_bytes();
    let (base, pitch) = match mode {
        TileMode::LinearAligned => (
            group,
            (8 * group / descriptor.bits_per_element()).max(64),
        ),
        _ => (1, 1),
    };

    let align = Alignments {
        base,
        pitch: display_pitch_align(descriptor, pitch),
        height: 1,
    };
    Layout::new(mode, extent, align)
}

fn micro_layout(descriptor: &SurfaceDescriptor, mode: TileMode, extent: Extent) -> Layout {
    let mode = if descriptor.mip_level() > 0 && mode == TileMode::Tiled1DThick && extent.slices < 4 {
        TileMode::Tiled1DThin1
    } else {
        mode
    };

    let group = descriptor.config().pipe_interleave_bytes();
    let pitch = (group
        / descriptor.bits_per_element()
        / descriptor.sample_count()
        / mode.thickness())
    .max(MICRO_TILE_WIDTH);

    let align = Alignments {
        base: group,
        pitch: display_pitch_align(descriptor, pitch),
        height: MICRO_TILE_HEIGHT,
    };
    Layout::new(mode, extent, align)
}

fn macro_alignments(descriptor: &SurfaceDescriptor, mode: TileMode) -> Alignments {
    let config = descriptor.config();
    let bpp = descriptor.bits_per_element();
    let samples = descriptor.sample_count();
    let thickness = mode.thickness();
    let group = config.pipe_interleave_bytes();
    let geometry = MacroTileGeometry::resolve(mode, bpp, samples, config);
    let macro_width = geometry.macro_tile_width();
    let macro_height = geometry.macro_tile_height();

    let pitch = display_pitch_align(
        descriptor,
        macro_width.max(macro_width * (group / bpp / (8 * thickness) / samples)),
    );
    let height = macro_height;

    let macro_tile_bytes = samples * (bpp * macro_height * macro_width / 8);
    let base = if thickness == 1 {
        macro_tile_bytes.max(samples * height * bpp * pitch / 8)
    } else {
        group.max(4 * height * bpp * pitch / 8)
    };

    let micro_tile_bytes = thickness * samples * bpp * MICRO_TILE_PIXELS / 8;
    let slices_per_micro_tile = if micro_tile_bytes < config.split_size() {
        1
    } else {
        micro_tile_bytes / config.split_size()
    };

    Alignments {
        base: base / slices_per_micro_tile,
        pitch,
        height,
    }
}

fn macro_layout(
    descriptor: &SurfaceDescriptor,
    mode: TileMode,
    extent: Extent,
) -> Result<Layout, TilingError> {
    let requested = descriptor.tile_mode();
    if descriptor.mip_level() > 0
        && requested.is_macro_tiled()
        && requested.is_thick()
        && !mode.is_thick()
    {
        // Thick levels made thin keep the thick mode's size threshold.
        let thick = macro_alignments(descriptor, requested);
        let pitch_align_factor = (32 / descriptor.bits_per_element()).max(1);
        if extent.pitch < thick.pitch * pitch_align_factor || extent.height < thick.height {
            debug!(
                "level {} too small for {:?}, using {:?}",
                descriptor.mip_level(),
                mode,
                TileMode::Tiled1DThin1
            );
            return Ok(micro_layout(descriptor, TileMode::Tiled1DThin1, extent));
        }
    }

    let mut align = macro_alignments(descriptor, mode);
    let geometry = MacroTileGeometry::resolve(
        mode,
        descriptor.bits_per_element(),
        descriptor.sample_count(),
        descriptor.config(),
    );
    let swap_width = geometry.bank_swapped_width(descriptor.width())?;
    if swap_width > align.pitch {
        align.pitch = swap_width;
    }

    Ok(Layout::new(mode, extent, align))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    #[test]
    fn wiiu_2d_thin1_64x64_32bpp() {
        let info = SurfaceInfo::compute(&descriptor_2d(TileMode::Tiled2DThin1, 64, 64, 32)).unwrap();
        assert_eq!(info.tile_mode(), TileMode::Tiled2DThin1);
        assert_eq!(info.pitch_align(), 32);
        assert_eq!(info.height_align(), 16);
        assert_eq!(info.pitch(), 64);
        assert_eq!(info.padded_width(), 64);
        assert_eq!(info.padded_height(), 64);
        assert_eq!(info.padded_depth(), 1);
        assert_eq!(info.bytes_per_slice(), 16384);
        assert_eq!(info.total_bytes(), 16384);
        assert_eq!(info.base_alignment(), 2048);
        assert_eq!(info.bank_swap_width(), 0);
    }

    #[test]
    fn single_element_linear_surface() {
        let info = SurfaceInfo::compute(&descriptor_2d(TileMode::LinearGeneral, 1, 1, 32)).unwrap();
        assert_eq!(info.pitch(), 1);
        assert_eq!(info.padded_height(), 1);
        assert_eq!(info.total_bytes(), 4);
        assert_eq!(info.base_alignment(), 1);
    }

    #[test]
    fn linear_aligned_pads_pitch_only() {
        let info = SurfaceInfo::compute(&descriptor_2d(TileMode::LinearAligned, 100, 10, 32)).unwrap();
        assert_eq!(info.pitch_align(), 64);
        assert_eq!(info.pitch(), 128);
        assert_eq!(info.padded_height(), 10);
        assert_eq!(info.total_bytes(), 128 * 10 * 4);
        assert_eq!(info.base_alignment(), 256);
    }

    #[test]
    fn micro_tiled_8bpp_alignment() {
        let info = SurfaceInfo::compute(&descriptor_2d(TileMode::Tiled1DThin1, 30, 20, 8)).unwrap();
        assert_eq!(info.pitch_align(), 32);
        assert_eq!(info.pitch(), 32);
        assert_eq!(info.padded_height(), 24);
        assert_eq!(info.total_bytes(), 768);
        assert_eq!(info.base_alignment(), 256);
    }

    #[test]
    fn non_multiple_dimensions_pad_to_macro_tiles() {
        let info = SurfaceInfo::compute(&descriptor_2d(TileMode::Tiled2DThin1, 40, 20, 32)).unwrap();
        assert_eq!(info.padded_width(), 64);
        assert_eq!(info.padded_height(), 32);
        assert_eq!(info.pitch(), 64);
        assert_eq!(info.padded_width() % info.geometry().macro_tile_width(), 0);
        assert_eq!(info.padded_height() % info.geometry().macro_tile_height(), 0);
    }

    #[test]
    fn small_mip_level_falls_back_to_1d() {
        let descriptor = descriptor_2d(TileMode::Tiled2DThin1, 16, 16, 32)
            .to_builder()
            .mip_level(1)
            .build()
            .unwrap();
        let info = SurfaceInfo::compute(&descriptor).unwrap();
        assert_eq!(info.tile_mode(), TileMode::Tiled1DThin1);
        assert_eq!(info.pitch(), 16);
        assert_eq!(info.padded_height(), 16);
        assert_eq!(info.total_bytes(), 1024);
    }

    #[test]
    fn mip_levels_round_to_powers_of_two() {
        let descriptor = descriptor_2d(TileMode::LinearAligned, 100, 50, 32)
            .to_builder()
            .mip_level(1)
            .build()
            .unwrap();
        let info = SurfaceInfo::compute(&descriptor).unwrap();
        assert_eq!(info.pitch(), 128);
        assert_eq!(info.padded_height(), 64);
    }

    #[test]
    fn thick_volume_keeps_four_slices_per_slab() {
        let descriptor = SurfaceDescriptor::builder()
            .width(64)
            .height(64)
            .depth_or_array_size(2)
            .bits_per_element(32)
            .tile_mode(TileMode::Tiled2DThick)
            .kind(SurfaceKind::Volume)
            .build()
            .unwrap();
        let info = SurfaceInfo::compute(&descriptor).unwrap();
        assert_eq!(info.tile_mode(), TileMode::Tiled2DThick);
        assert_eq!(info.padded_depth(), 4);
        assert_eq!(info.depth_align(), 4);
        assert_eq!(info.bytes_per_slice(), 64 * 64 * 4 * 4);
        assert_eq!(info.total_bytes(), 64 * 64 * 4 * 4);
        assert_eq!(info.base_alignment(), 8192);
    }

    #[rstest]
    #[case(32, 1, true, TileMode::Tiled2DThin1)] // depth buffer
    #[case(128, 1, false, TileMode::Tiled2DThin1)] // micro tile split across slices
    #[case(32, 4, false, TileMode::Tiled2DThin1)] // multisampled
    #[case(64, 1, false, TileMode::Tiled2DThick)]
    fn thick_demotion(
        #[case] bpp: u32,
        #[case] samples: u32,
        #[case] is_depth: bool,
        #[case] expected: TileMode,
    ) {
        let descriptor = SurfaceDescriptor::builder()
            .width(64)
            .height(64)
            .depth_or_array_size(4)
            .bits_per_element(bpp)
            .sample_count(samples)
            .depth_buffer(is_depth)
            .tile_mode(TileMode::Tiled2DThick)
            .build()
            .unwrap();
        assert_eq!(effective_tile_mode(&descriptor), expected);
    }

    #[rstest]
    #[case(TileMode::Tiled1DThin1, 2, TileMode::Tiled2DThin1)]
    #[case(TileMode::Tiled1DThick, 2, TileMode::Tiled2DThin1)]
    #[case(TileMode::Tiled1DThick, 4, TileMode::Tiled2DThin1)]
    #[case(TileMode::Tiled1DThick, 8, TileMode::Tiled2DThin1)]
    #[case(TileMode::Tiled3BThick, 2, TileMode::Tiled3BThin1)]
    #[case(TileMode::LinearAligned, 4, TileMode::LinearAligned)]
    fn multisampled_surfaces_are_thin_and_macro_tiled(
        #[case] requested: TileMode,
        #[case] samples: u32,
        #[case] expected: TileMode,
    ) {
        let descriptor = SurfaceDescriptor::builder()
            .width(64)
            .height(64)
            .bits_per_element(32)
            .sample_count(samples)
            .tile_mode(requested)
            .build()
            .unwrap();
        assert_eq!(effective_tile_mode(&descriptor), expected);
    }

    #[rstest]
    #[case(2, TileMode::Tiled2DThick)]
    #[case(4, TileMode::Tiled2DThick)]
    #[case(8, TileMode::Tiled1DThin1)]
    fn multisampled_1d_thick_sample_mode(#[case] samples: u32, #[case] expected: TileMode) {
        let descriptor = SurfaceDescriptor::builder()
            .width(64)
            .height(64)
            .bits_per_element(32)
            .sample_count(samples)
            .tile_mode(TileMode::Tiled1DThick)
            .build()
            .unwrap();
        assert_eq!(sample_tile_mode(TileMode::Tiled1DThick, &descriptor), expected);
        assert_eq!(effective_tile_mode(&descriptor), TileMode::Tiled2DThin1);
    }

    #[test]
    fn thick_mip_below_threshold_falls_back_to_1d() {
        let descriptor = SurfaceDescriptor::builder()
            .width(64)
            .height(64)
            .depth_or_array_size(2)
            .bits_per_element(8)
            .tile_mode(TileMode::Tiled2DThick)
            .kind(SurfaceKind::Volume)
            .mip_level(1)
            .build()
            .unwrap();
        assert_eq!(effective_tile_mode(&descriptor), TileMode::Tiled2DThin1);

        let info = SurfaceInfo::compute(&descriptor).unwrap();
        assert_eq!(info.tile_mode(), TileMode::Tiled1DThin1);
    }

    #[test]
    fn bank_swapped_pitch_grows_to_swap_width() {
        let info = SurfaceInfo::compute(&descriptor_2d(TileMode::Tiled2BThin1, 100, 64, 32)).unwrap();
        assert_eq!(info.pitch_align(), 128);
        assert_eq!(info.pitch(), 128);
        assert_eq!(info.padded_height(), 64);
        assert_eq!(info.bank_swap_width(), 128);
    }

    #[test]
    fn bank_swap_dropped_on_mip_levels() {
        let descriptor = descriptor_2d(TileMode::Tiled2BThin1, 128, 128, 32)
            .to_builder()
            .mip_level(1)
            .build()
            .unwrap();
        let info = SurfaceInfo::compute(&descriptor).unwrap();
        assert_eq!(info.tile_mode(), TileMode::Tiled2DThin1);
        assert_eq!(info.bank_swap_width(), 0);
    }

    #[test]
    fn display_surfaces_align_pitch_to_32() {
        let descriptor = descriptor_2d(TileMode::LinearGeneral, 10, 2, 32)
            .to_builder()
            .display(true)
            .build()
            .unwrap();
        let info = SurfaceInfo::compute(&descriptor).unwrap();
        assert_eq!(info.pitch(), 32);
        assert_eq!(info.total_bytes(), 32 * 2 * 4);
    }

    #[rstest]
    #[case(SurfaceKind::Cube, 6, 0, 6)]
    #[case(SurfaceKind::Cube, 6, 1, 8)]
    #[case(SurfaceKind::Array, 3, 0, 3)]
    #[case(SurfaceKind::Array, 3, 1, 4)]
    fn slice_padding(
        #[case] kind: SurfaceKind,
        #[case] slices: u32,
        #[case] level: u32,
        #[case] expected: u32,
    ) {
        let descriptor = SurfaceDescriptor::builder()
            .width(64)
            .height(64)
            .depth_or_array_size(slices)
            .bits_per_element(32)
            .tile_mode(TileMode::Tiled2DThin1)
            .kind(kind)
            .mip_level(level)
            .build()
            .unwrap();
        let info = SurfaceInfo::compute(&descriptor).unwrap();
        assert_eq!(info.padded_depth(), expected);
        assert_eq!(info.total_bytes(), info.bytes_per_slice() * expected as u64);
    }

    #[test]
    fn sample_split_reduces_base_alignment() {
        let descriptor = descriptor_2d(TileMode::Tiled2DThin1, 64, 64, 64)
            .to_builder()
            .sample_count(8)
            .build()
            .unwrap();
        let info = SurfaceInfo::compute(&descriptor).unwrap();
        assert_eq!(info.pitch(), 64);
        assert_eq!(info.base_alignment(), 16384);
        assert_eq!(info.total_bytes(), 64 * 64 * 8 * 8);
    }

    #[test]
    fn linear_equivalent_is_tightly_packed() {
        let descriptor = SurfaceDescriptor::builder()
            .width(37)
            .height(5)
            .depth_or_array_size(3)
            .bits_per_element(16)
            .tile_mode(TileMode::Tiled2BThick)
            .mip_level(2)
            .pipe_swizzle(1)
            .build()
            .unwrap();
        let linear = SurfaceInfo::compute(&descriptor).unwrap().linear_equivalent().unwrap();
        assert_eq!(linear.tile_mode(), TileMode::LinearGeneral);
        assert_eq!(linear.pitch(), 37);
        assert_eq!(linear.total_bytes(), 37 * 5 * 3 * 2);
    }

    #[test]
    fn equal_descriptors_give_equal_infos() {
        let descriptor = descriptor_2d(TileMode::Tiled3BThin1, 123, 45, 16);
        assert_eq!(
            SurfaceInfo::compute(&descriptor).unwrap(),
            SurfaceInfo::compute(&descriptor).unwrap()
        );
    }
}
