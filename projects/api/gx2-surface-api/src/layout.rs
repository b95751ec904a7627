//! Memory layout of a whole GX2 surface: every mip level, slice and sample.
//!
//! Level 0 lives in the surface's image buffer. Levels 1 and above are packed
//! one after another into a separate mipmap buffer, each aligned to its own
//! base alignment.
//!
//! # Tile mode selection
//!
//! A surface with [`Gx2TileMode::Default`] first gets the mode picked by
//! [`Gx2Surface::default_tile_mode`]. When that mode is tiled, level 0 may
//! then change it twice:
//!
//! - The mode is replaced with the one level 0 is actually laid out with.
//! - Surfaces narrower than one pitch alignment and shorter than one height
//!   alignment fall back to 1D tiling.
//!
//! # Swizzle register
//!
//! Bits 16-23 of the swizzle register record the first mip level that is no
//! longer macro tiled (13 when none is). When a level after the first mip
//! stops being macro tiled, its offset is additionally padded by the low 16
//! bits of the register.

use crate::error::Gx2Error;
use crate::surface::{Gx2Surface, Gx2SurfaceDim, Gx2TileMode};
use crate::swizzle::{Gx2SwizzleRegister, DEFAULT_MIP_SWIZZLE_LEVEL};
use gx2_tiling::{AddrConfig, SurfaceDescriptor, SurfaceInfo, SurfaceKind, TileMode};
use log::{debug, trace};

/// Maximum number of mip levels of a surface, including level 0.
pub const MAX_MIP_LEVELS: u32 = 14;

/// Element size that is laid out as three 32-bit elements.
const EXPANDED_BITS_PER_ELEMENT: u32 = 96;

/// Size, alignment and mip placement of a [`Gx2Surface`].
///
/// Produced by [`Gx2Surface::calc_size_and_alignment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Gx2SurfaceLayout {
    surface: Gx2Surface,
    image_size: u64,
    mipmap_size: u64,
    mip_level_offset: [u64; 13],
    alignment: u32,
    pitch: u32,
}

impl Gx2SurfaceLayout {
    /// The surface with its tile mode, mip count and swizzle register resolved.
    ///
    /// Computing the layout of this surface again yields this layout.
    #[inline(always)]
    pub const fn surface(&self) -> &Gx2Surface {
        &self.surface
    }

    /// The resolved tile mode; never [`Gx2TileMode::Default`].
    #[inline(always)]
    pub const fn tile_mode(&self) -> Gx2TileMode {
        self.surface.tile_mode()
    }

    /// Number of mip levels, clamped to the full chain.
    #[inline(always)]
    pub const fn mip_levels(&self) -> u32 {
        self.surface.mip_levels()
    }

    /// The resolved swizzle register.
    #[inline(always)]
    pub const fn swizzle(&self) -> Gx2SwizzleRegister {
        self.surface.swizzle()
    }

    /// Size of the image buffer: level 0, plus the chroma plane for NV12.
    #[inline(always)]
    pub const fn image_size(&self) -> u64 {
        self.image_size
    }

    /// Size of the mipmap buffer holding levels 1 and above.
    #[inline(always)]
    pub const fn mipmap_size(&self) -> u64 {
        self.mipmap_size
    }

    /// `GX2Surface.mipLevelOffset`.
    ///
    /// Entry 0 is the offset of level 1 from the start of the image (or of
    /// the chroma plane for NV12). Entry `n` for `n >= 1` is the offset of
    /// level `n + 1` within the mipmap buffer.
    #[inline(always)]
    pub const fn mip_level_offset(&self) -> &[u64; 13] {
        &self.mip_level_offset
    }

    /// Required alignment of the image buffer.
    #[inline(always)]
    pub const fn alignment(&self) -> u32 {
        self.alignment
    }

    /// Row stride of level 0, in elements.
    #[inline(always)]
    pub const fn pitch(&self) -> u32 {
        self.pitch
    }

    /// Offset of `level` within the buffer holding it: the image buffer for
    /// level 0, the mipmap buffer otherwise.
    ///
    /// # Errors
    ///
    /// [`Gx2Error::MipLevelOutOfRange`] if `level` is not part of the chain.
    pub fn level_offset(&self, level: u32) -> Result<u64, Gx2Error> {
        self.check_level(level)?;
        Ok(match level {
            0 | 1 => 0,
            _ => self.mip_level_offset[level as usize - 1],
        })
    }

    /// Layout of one mip level, all slices included.
    ///
    /// # Errors
    ///
    /// [`Gx2Error::MipLevelOutOfRange`] if `level` is not part of the chain.
    pub fn level_info(&self, level: u32) -> Result<SurfaceInfo, Gx2Error> {
        self.check_level(level)?;
        self.surface.level_info(self.surface.tile_mode(), level)
    }

    fn check_level(&self, level: u32) -> Result<(), Gx2Error> {
        if level >= self.mip_levels() {
            return Err(Gx2Error::MipLevelOutOfRange {
                level,
                levels: self.mip_levels(),
            });
        }
        Ok(())
    }
}

impl Gx2Surface {
    /// Resolves the tile mode and computes the size, alignment and mip
    /// offsets of the surface (`GX2CalcSurfaceSizeAndAlignment`).
    ///
    /// # Errors
    ///
    /// [`Gx2Error::Tiling`] if a mip level cannot be described, for example
    /// because its element size is not supported by its tile mode.
    pub fn calc_size_and_alignment(&self) -> Result<Gx2SurfaceLayout, Gx2Error> {
        let mut tile_mode = self.tile_mode();
        let mut use_level0_mode = false;
        if tile_mode == Gx2TileMode::Default {
            let mode = self.default_tile_mode();
            use_level0_mode = mode != TileMode::LinearAligned;
            tile_mode = mode.into();
        }

        let mip_levels = self
            .mip_levels()
            .min(self.full_mip_chain())
            .min(MAX_MIP_LEVELS)
            .max(1);

        let mut swizzle = self.swizzle().without_mip_level();
        if tile_mode.is_macro_tiled() {
            swizzle.set_mip_swizzle_level(DEFAULT_MIP_SWIZZLE_LEVEL);
        }

        let mut level0 = self.level_info(tile_mode, 0)?;
        if use_level0_mode {
            let actual = Gx2TileMode::Addr(level0.tile_mode());
            if actual != tile_mode {
                debug!("level 0 laid out as {actual:?}, replacing {tile_mode:?}");
                tile_mode = actual;
                level0 = self.level_info(tile_mode, 0)?;
                if !tile_mode.is_macro_tiled() {
                    swizzle = swizzle.without_mip_level();
                }
            }

            if self.width() < level0.pitch_align() && self.height() < level0.height_align() {
                let small = if tile_mode == Gx2TileMode::Addr(TileMode::Tiled2DThick) {
                    TileMode::Tiled1DThick
                } else {
                    TileMode::Tiled1DThin1
                };
                debug!(
                    "{}x{} surface smaller than one {:?} tile, using {:?}",
                    self.width(),
                    self.height(),
                    tile_mode,
                    small
                );
                tile_mode = small.into();
                level0 = self.level_info(tile_mode, 0)?;
                swizzle = swizzle.without_mip_level();
            }
        }

        let mut mip_level_offset = [0u64; 13];
        let mut level1_offset = 0;
        let mut previous_size = level0.total_bytes();
        let mut tracked_mode = tile_mode;
        for level in 1..mip_levels {
            let info = self.level_info(tile_mode, level)?;

            let mut pad = 0;
            if tracked_mode.is_macro_tiled() && !info.tile_mode().is_macro_tiled() {
                swizzle.set_mip_swizzle_level(level);
                if level > 1 {
                    pad = (swizzle.raw() & 0xFFFF) as u64;
                }
                tracked_mode = info.tile_mode().into();
            }

            let align = info.base_alignment() as u64;
            pad += (align - previous_size % align) % align;
            if level == 1 {
                level1_offset = previous_size + pad;
            } else {
                let index = level as usize;
                mip_level_offset[index - 1] = previous_size + pad + mip_level_offset[index - 2];
            }

            trace!(
                "level {level}: {:?}, {} bytes, align {}, pad {pad}",
                info.tile_mode(),
                info.total_bytes(),
                info.base_alignment()
            );
            previous_size = info.total_bytes();
        }

        let mipmap_size = if mip_levels > 1 {
            previous_size + mip_level_offset[mip_levels as usize - 2]
        } else {
            0
        };
        mip_level_offset[0] = level1_offset;

        let alignment = level0.base_alignment();
        let mut image_size = level0.total_bytes();
        if self.format().is_nv12() {
            let align = alignment as u64;
            let pad = (align - image_size % align) % align;
            mip_level_offset[0] = image_size + pad;
            image_size = mip_level_offset[0] + image_size / 2;
        }

        let pitch = if self.format().bits_per_element() == EXPANDED_BITS_PER_ELEMENT {
            level0.pitch() / 3
        } else {
            level0.pitch()
        };

        let surface = self.with_layout_fields(tile_mode, mip_levels, swizzle);
        trace!(
            "{:?} {}x{}x{}: {mip_levels} levels, image {image_size}, mipmaps {mipmap_size}",
            tile_mode,
            self.width(),
            self.height(),
            self.depth()
        );

        Ok(Gx2SurfaceLayout {
            surface,
            image_size,
            mipmap_size,
            mip_level_offset,
            alignment,
            pitch,
        })
    }

    /// Layout of `level` when the surface uses `tile_mode`.
    pub(crate) fn level_info(
        &self,
        tile_mode: Gx2TileMode,
        level: u32,
    ) -> Result<SurfaceInfo, Gx2Error> {
        let descriptor = self.level_descriptor(tile_mode, level)?;
        Ok(SurfaceInfo::compute(&descriptor)?)
    }

    /// Number of slices of `level` that hold data.
    ///
    /// Every level of a volume is sized for the full depth, but level `n`
    /// only stores `depth >> n` of those slices.
    pub(crate) fn stored_slices(&self, level: u32) -> u32 {
        match self.dim() {
            Gx2SurfaceDim::TextureCube => self.depth().max(6),
            Gx2SurfaceDim::Texture3D => (self.depth() >> level).max(1),
            dim if dim.is_array() => self.depth(),
            _ => 1,
        }
    }

    /// Describes `level` in elements, for the tiling crate.
    ///
    /// - BCn dimensions are converted from pixels to 4x4 blocks.
    /// - 96-bit formats are laid out as three 32-bit elements per pixel, as
    ///   addrlib expands `32_32_32` formats (`expandX = 3`). Component `c` of
    ///   pixel `x` is element `3 * x + c` of its row.
    /// - [`Gx2TileMode::LinearSpecial`] levels are described as unpadded level
    ///   0 surfaces of the level's size.
    pub(crate) fn level_descriptor(
        &self,
        tile_mode: Gx2TileMode,
        level: u32,
    ) -> Result<SurfaceDescriptor, Gx2Error> {
        let config = AddrConfig::WIIU;
        let format = self.format();

        let mut width = format.elements((self.width() >> level).max(1));
        let height = if self.dim().is_1d() {
            1
        } else {
            format.elements((self.height() >> level).max(1))
        };

        let (depth, kind) = match self.dim() {
            Gx2SurfaceDim::TextureCube => (self.depth().max(6), SurfaceKind::Cube),
            Gx2SurfaceDim::Texture3D => (self.depth().max(1), SurfaceKind::Volume),
            dim if dim.is_array() => (self.depth(), SurfaceKind::Array),
            _ => (1, SurfaceKind::Array),
        };

        let (mode, mip_level) = match tile_mode {
            Gx2TileMode::LinearSpecial => (TileMode::LinearGeneral, 0),
            Gx2TileMode::Addr(mode) => (mode, level),
            Gx2TileMode::Default => (self.default_tile_mode(), level),
        };

        let mut bits_per_element = format.bits_per_element();
        if bits_per_element == EXPANDED_BITS_PER_ELEMENT {
            bits_per_element = 32;
            width *= 3;
        }

        let swizzle = self.swizzle();
        let descriptor = SurfaceDescriptor::builder()
            .width(width)
            .height(height)
            .depth_or_array_size(depth)
            .bits_per_element(bits_per_element)
            .tile_mode(mode)
            .sample_count(self.aa().samples())
            .mip_level(mip_level)
            .pipe_swizzle(swizzle.pipe_swizzle(&config))
            .bank_swizzle(swizzle.bank_swizzle(&config))
            .kind(kind)
            .depth_buffer(self.surface_use().depth_buffer())
            .display(self.surface_use().scan_buffer())
            .config(config)
            .build()?;
        Ok(descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    #[test]
    fn rgba8_256x256_full_chain() {
        let surface = rgba_surface(256, 256)
            .to_builder()
            .mip_levels(9)
            .build()
            .unwrap();
        let layout = surface.calc_size_and_alignment().unwrap();

        assert_eq!(layout.tile_mode(), Gx2TileMode::Addr(TileMode::Tiled2DThin1));
        assert_eq!(layout.mip_levels(), 9);
        assert_eq!(layout.image_size(), 262144);
        assert_eq!(layout.alignment(), 2048);
        assert_eq!(layout.pitch(), 256);
        assert_eq!(layout.mipmap_size(), 88064);
        assert_eq!(
            layout.mip_level_offset(),
            &[262144, 65536, 81920, 86016, 87040, 87296, 87552, 87808, 0, 0, 0, 0, 0]
        );
        // Level 4 (16x16) is the first level below one 32x16 macro tile.
        assert_eq!(layout.swizzle().mip_swizzle_level(), 4);
        assert_eq!(
            layout.level_info(4).unwrap().tile_mode(),
            TileMode::Tiled1DThin1
        );
    }

    #[test]
    fn base_swizzle_pads_first_micro_tiled_level() {
        let surface = rgba_surface(256, 256)
            .to_builder()
            .mip_levels(9)
            .swizzle(0x100)
            .build()
            .unwrap();
        let layout = surface.calc_size_and_alignment().unwrap();

        assert_eq!(layout.swizzle().raw(), 0x40100);
        assert_eq!(&layout.mip_level_offset()[..4], &[262144, 65536, 81920, 86272]);
        assert_eq!(layout.mipmap_size(), 88320);
    }

    #[test]
    fn macro_tiled_chain_keeps_default_swizzle_level() {
        let surface = rgba_surface(256, 256)
            .to_builder()
            .mip_levels(3)
            .build()
            .unwrap();
        let layout = surface.calc_size_and_alignment().unwrap();
        assert_eq!(layout.swizzle().raw(), 0xD0000);
        assert_eq!(layout.mipmap_size(), 65536 + 16384);
        assert_eq!(layout.mip_level_offset()[0], 262144);
        assert_eq!(layout.mip_level_offset()[1], 65536);
    }

    #[test]
    fn single_level_has_no_mipmaps() {
        let layout = rgba_surface(64, 64).calc_size_and_alignment().unwrap();
        assert_eq!(layout.mip_levels(), 1);
        assert_eq!(layout.image_size(), 16384);
        assert_eq!(layout.mipmap_size(), 0);
        assert_eq!(layout.mip_level_offset(), &[0; 13]);
    }

    #[test]
    fn small_default_surface_falls_back_to_1d() {
        let layout = rgba_surface(16, 8).calc_size_and_alignment().unwrap();
        assert_eq!(layout.tile_mode(), Gx2TileMode::Addr(TileMode::Tiled1DThin1));
        assert_eq!(layout.swizzle().raw(), 0);
        assert_eq!(layout.image_size(), 512);
        assert_eq!(layout.alignment(), 256);
        assert_eq!(layout.pitch(), 16);
    }

    #[test]
    fn explicit_tile_mode_is_kept_for_small_surfaces() {
        let surface = rgba_surface(16, 8)
            .to_builder()
            .tile_mode(TileMode::Tiled2DThin1)
            .build()
            .unwrap();
        let layout = surface.calc_size_and_alignment().unwrap();
        assert_eq!(layout.tile_mode(), Gx2TileMode::Addr(TileMode::Tiled2DThin1));
        assert_eq!(layout.swizzle().raw(), 0xD0000);
        assert_eq!(layout.image_size(), 2048);
        assert_eq!(layout.alignment(), 2048);
        assert_eq!(layout.pitch(), 32);
    }

    #[test]
    fn default_1d_surface_is_linear_aligned() {
        let surface = Gx2Surface::builder()
            .dim(Gx2SurfaceDim::Texture1D)
            .width(100)
            .format(Gx2SurfaceFormat::UNORM_R8)
            .build()
            .unwrap();
        let layout = surface.calc_size_and_alignment().unwrap();
        assert_eq!(layout.tile_mode(), Gx2TileMode::Addr(TileMode::LinearAligned));
        assert_eq!(layout.pitch(), 256);
        assert_eq!(layout.image_size(), 256);
        assert_eq!(layout.alignment(), 256);
        assert_eq!(layout.swizzle().raw(), 0);
    }

    #[test]
    fn default_volume_is_thick() {
        let surface = rgba_surface(64, 64)
            .to_builder()
            .dim(Gx2SurfaceDim::Texture3D)
            .depth(4)
            .build()
            .unwrap();
        let layout = surface.calc_size_and_alignment().unwrap();
        assert_eq!(layout.tile_mode(), Gx2TileMode::Addr(TileMode::Tiled2DThick));
        assert_eq!(layout.image_size(), 64 * 64 * 4 * 4);
    }

    #[test]
    fn bc1_dimensions_are_in_blocks() {
        let surface = Gx2Surface::builder()
            .width(64)
            .height(64)
            .format(Gx2SurfaceFormat::UNORM_BC1)
            .build()
            .unwrap();
        let layout = surface.calc_size_and_alignment().unwrap();
        let info = layout.level_info(0).unwrap();
        assert_eq!(info.width(), 16);
        assert_eq!(info.height(), 16);
        assert_eq!(layout.pitch(), 32);
        assert_eq!(layout.image_size(), 4096);
        assert_eq!(layout.alignment(), 4096);
    }

    #[test]
    fn nv12_appends_chroma_plane() {
        let surface = Gx2Surface::builder()
            .width(64)
            .height(64)
            .format(Gx2SurfaceFormat::UNORM_NV12)
            .build()
            .unwrap();
        let layout = surface.calc_size_and_alignment().unwrap();
        assert_eq!(layout.pitch(), 128);
        assert_eq!(layout.alignment(), 2048);
        assert_eq!(layout.mip_level_offset()[0], 8192);
        assert_eq!(layout.image_size(), 8192 + 4096);
    }

    #[test]
    fn linear_special_is_tightly_packed() {
        let surface = rgba_surface(100, 30)
            .to_builder()
            .mip_levels(3)
            .tile_mode(Gx2TileMode::LinearSpecial)
            .build()
            .unwrap();
        let layout = surface.calc_size_and_alignment().unwrap();
        assert_eq!(layout.alignment(), 1);
        assert_eq!(layout.pitch(), 100);
        assert_eq!(layout.image_size(), 100 * 30 * 4);
        assert_eq!(layout.mip_level_offset()[0], 100 * 30 * 4);
        assert_eq!(layout.mip_level_offset()[1], 50 * 15 * 4);
        assert_eq!(layout.mipmap_size(), (50 * 15 + 25 * 7) * 4);
    }

    #[test]
    fn expanded_formats_report_pixel_pitch() {
        let surface = Gx2Surface::builder()
            .width(64)
            .height(64)
            .format(Gx2SurfaceFormat::FLOAT_R32_G32_B32)
            .build()
            .unwrap();
        let layout = surface.calc_size_and_alignment().unwrap();
        let info = layout.level_info(0).unwrap();
        assert_eq!(info.width(), 192);
        assert_eq!(info.descriptor().bits_per_element(), 32);
        assert_eq!(layout.pitch(), 64);
        assert_eq!(layout.image_size(), 64 * 64 * 12);
    }

    #[rstest]
    #[case(Gx2SurfaceDim::TextureCube, 1, 6)]
    #[case(Gx2SurfaceDim::TextureCube, 12, 12)]
    #[case(Gx2SurfaceDim::Texture2DArray, 3, 3)]
    #[case(Gx2SurfaceDim::Texture2D, 3, 1)]
    #[case(Gx2SurfaceDim::Texture3D, 8, 8)]
    fn slice_count_follows_dim(#[case] dim: Gx2SurfaceDim, #[case] depth: u32, #[case] slices: u32) {
        let surface = rgba_surface(32, 32).to_builder().dim(dim).depth(depth).build().unwrap();
        let layout = surface.calc_size_and_alignment().unwrap();
        assert_eq!(layout.level_info(0).unwrap().depth(), slices);
    }

    #[test]
    fn volume_levels_are_sized_for_full_depth() {
        let surface = rgba_surface(64, 64)
            .to_builder()
            .dim(Gx2SurfaceDim::Texture3D)
            .depth(8)
            .mip_levels(4)
            .build()
            .unwrap();
        let layout = surface.calc_size_and_alignment().unwrap();

        assert_eq!(layout.tile_mode(), Gx2TileMode::Addr(TileMode::Tiled2DThick));
        assert_eq!(layout.image_size(), 131072);
        assert_eq!(layout.alignment(), 8192);
        assert_eq!(layout.mipmap_size(), 43008);
        assert_eq!(
            layout.mip_level_offset(),
            &[131072, 32768, 40960, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]
        );
        assert_eq!(layout.swizzle().raw(), 0x20000);

        let level1 = layout.level_info(1).unwrap();
        assert_eq!(level1.tile_mode(), TileMode::Tiled2DThick);
        assert_eq!(level1.depth(), 8);
        assert_eq!(level1.total_bytes(), 32768);
        assert_eq!(layout.level_info(2).unwrap().tile_mode(), TileMode::Tiled1DThick);
        assert_eq!(layout.level_info(3).unwrap().depth(), 8);
    }

    #[test]
    fn volume_levels_store_fewer_slices() {
        let surface = rgba_surface(64, 64)
            .to_builder()
            .dim(Gx2SurfaceDim::Texture3D)
            .depth(8)
            .mip_levels(5)
            .build()
            .unwrap();
        let slices: Vec<u32> = (0..5).map(|level| surface.stored_slices(level)).collect();
        assert_eq!(slices, [8, 4, 2, 1, 1]);

        let cube = rgba_surface(64, 64)
            .to_builder()
            .dim(Gx2SurfaceDim::TextureCube)
            .mip_levels(3)
            .build()
            .unwrap();
        assert_eq!(cube.stored_slices(2), 6);
    }

    #[test]
    fn cube_mip_chain() {
        let surface = rgba_surface(64, 64)
            .to_builder()
            .dim(Gx2SurfaceDim::TextureCube)
            .depth(6)
            .mip_levels(4)
            .build()
            .unwrap();
        let layout = surface.calc_size_and_alignment().unwrap();

        assert_eq!(layout.tile_mode(), Gx2TileMode::Addr(TileMode::Tiled2DThin1));
        assert_eq!(layout.image_size(), 98304);
        assert_eq!(layout.alignment(), 2048);
        assert_eq!(layout.mipmap_size(), 43008);
        assert_eq!(
            layout.mip_level_offset(),
            &[98304, 32768, 40960, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]
        );
        assert_eq!(layout.swizzle().raw(), 0x20000);
        // Faces of levels above 0 are padded to a power of two.
        assert_eq!(layout.level_info(1).unwrap().padded_depth(), 8);
        assert_eq!(layout.level_info(1).unwrap().total_bytes(), 32768);
    }

    #[test]
    fn mip_count_is_clamped_to_chain() {
        let surface = rgba_surface(16, 4).to_builder().mip_levels(13).build().unwrap();
        let layout = surface.calc_size_and_alignment().unwrap();
        assert_eq!(layout.mip_levels(), 5);
        assert_eq!(
            layout.level_info(5),
            Err(Gx2Error::MipLevelOutOfRange { level: 5, levels: 5 })
        );
    }

    #[test]
    fn resolved_surface_reproduces_layout() {
        for (width, height, mips) in [(256, 256, 9), (16, 8, 1), (100, 37, 4)] {
            let surface = rgba_surface(width, height)
                .to_builder()
                .mip_levels(mips)
                .swizzle(0x300)
                .build()
                .unwrap();
            let layout = surface.calc_size_and_alignment().unwrap();
            assert_eq!(layout.surface().calc_size_and_alignment().unwrap(), layout);
        }
    }

    #[test]
    fn level_offsets() {
        let surface = rgba_surface(256, 256).to_builder().mip_levels(4).build().unwrap();
        let layout = surface.calc_size_and_alignment().unwrap();
        assert_eq!(layout.level_offset(0), Ok(0));
        assert_eq!(layout.level_offset(1), Ok(0));
        assert_eq!(layout.level_offset(2), Ok(65536));
        assert_eq!(layout.level_offset(3), Ok(81920));
        assert!(layout.level_offset(4).is_err());
    }
}
