//! Surface data paired with its layout.

use crate::error::Gx2Error;
use crate::layout::Gx2SurfaceLayout;
use crate::surface::{Gx2Surface, Gx2TileMode};
use alloc::vec;
use alloc::vec::Vec;
use core::ops::Range;
use gx2_tiling::{copy_slices, InvariantError, SurfaceInfo};
use log::debug;

/// A GX2 surface with its image and mipmap data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gx2Texture {
    layout: Gx2SurfaceLayout,
    image: Vec<u8>,
    mipmaps: Vec<u8>,
}

impl Gx2Texture {
    /// Pairs `surface` with its data.
    ///
    /// `image` holds level 0 and `mipmaps` the remaining levels, laid out as
    /// [`Gx2Surface::calc_size_and_alignment`] describes. Bytes past the
    /// computed sizes are kept but never read.
    ///
    /// # Errors
    ///
    /// - [`Gx2Error::ImageTooSmall`] / [`Gx2Error::MipmapsTooSmall`] if a
    ///   buffer is shorter than the layout requires.
    /// - Any error of [`Gx2Surface::calc_size_and_alignment`].
    pub fn new(surface: &Gx2Surface, image: Vec<u8>, mipmaps: Vec<u8>) -> Result<Self, Gx2Error> {
        let layout = surface.calc_size_and_alignment()?;
        if (image.len() as u64) < layout.image_size() {
            return Err(Gx2Error::ImageTooSmall {
                needed: layout.image_size(),
                actual: image.len() as u64,
            });
        }
        if (mipmaps.len() as u64) < layout.mipmap_size() {
            return Err(Gx2Error::MipmapsTooSmall {
                needed: layout.mipmap_size(),
                actual: mipmaps.len() as u64,
            });
        }

        Ok(Self {
            layout,
            image,
            mipmaps,
        })
    }

    /// A texture of the given layout with all bytes zeroed.
    fn zeroed(layout: Gx2SurfaceLayout) -> Result<Self, Gx2Error> {
        Ok(Self {
            image: vec![0; buffer_len(layout.image_size())?],
            mipmaps: vec![0; buffer_len(layout.mipmap_size())?],
            layout,
        })
    }

    /// The surface, with tile mode, mip count and swizzle resolved.
    #[inline(always)]
    pub const fn surface(&self) -> &Gx2Surface {
        self.layout.surface()
    }

    /// Size, alignment and mip placement of the surface.
    #[inline(always)]
    pub const fn layout(&self) -> &Gx2SurfaceLayout {
        &self.layout
    }

    /// Level 0 data.
    #[inline(always)]
    pub fn image(&self) -> &[u8] {
        &self.image
    }

    /// Data of levels 1 and above.
    #[inline(always)]
    pub fn mipmaps(&self) -> &[u8] {
        &self.mipmaps
    }

    /// Splits the texture into its layout, image and mipmap buffers.
    pub fn into_parts(self) -> (Gx2SurfaceLayout, Vec<u8>, Vec<u8>) {
        (self.layout, self.image, self.mipmaps)
    }

    /// Layout of one mip level, all slices included.
    ///
    /// # Errors
    ///
    /// [`Gx2Error::MipLevelOutOfRange`] if `level` is not part of the chain.
    pub fn level_info(&self, level: u32) -> Result<SurfaceInfo, Gx2Error> {
        self.layout.level_info(level)
    }

    /// The bytes of one mip level, all slices included.
    ///
    /// # Errors
    ///
    /// [`Gx2Error::MipLevelOutOfRange`] if `level` is not part of the chain.
    pub fn level_data(&self, level: u32) -> Result<&[u8], Gx2Error> {
        let range = self.level_range(level)?;
        let buffer = if level == 0 {
            &self.image
        } else {
            &self.mipmaps
        };
        Ok(&buffer[range])
    }

    fn level_data_mut(&mut self, level: u32) -> Result<&mut [u8], Gx2Error> {
        let range = self.level_range(level)?;
        let buffer = if level == 0 {
            &mut self.image
        } else {
            &mut self.mipmaps
        };
        Ok(&mut buffer[range])
    }

    fn level_range(&self, level: u32) -> Result<Range<usize>, Gx2Error> {
        let start = self.layout.level_offset(level)?;
        let len = self.layout.level_info(level)?.total_bytes();
        Ok(buffer_len(start)?..buffer_len(start + len)?)
    }

    /// Copies every level into a new texture with another tile mode and
    /// base swizzle.
    ///
    /// Mip count, dimensions and format are kept. Padding of the new texture
    /// is zeroed, as are the slices of volume levels past `depth >> level`.
    ///
    /// # Errors
    ///
    /// - [`Gx2Error::UnsupportedConversion`] for NV12 surfaces.
    /// - Any error of [`Gx2Surface::calc_size_and_alignment`] for the new
    ///   tile mode.
    pub fn convert_tile_mode(
        &self,
        tile_mode: Gx2TileMode,
        base256b: u8,
    ) -> Result<Gx2Texture, Gx2Error> {
        let source = self.surface();
        if source.format().is_nv12() {
            return Err(Gx2Error::UnsupportedConversion(source.format().into()));
        }

        let surface = source
            .to_builder()
            .tile_mode(tile_mode)
            .swizzle(source.swizzle().with_base256b(base256b).raw())
            .build()?;
        let mut converted = Gx2Texture::zeroed(surface.calc_size_and_alignment()?)?;
        debug!(
            "converting {:?} to {:?}, {} levels",
            self.layout.tile_mode(),
            converted.layout.tile_mode(),
            self.layout.mip_levels()
        );

        for level in 0..self.layout.mip_levels() {
            let src_info = self.level_info(level)?;
            let dst_info = converted.level_info(level)?;
            let src = self.level_data(level)?;
            let dst = converted.level_data_mut(level)?;
            copy_slices(&src_info, src, &dst_info, dst, source.stored_slices(level))?;
        }
        Ok(converted)
    }

    /// Converts to tightly packed rows ([`Gx2TileMode::LinearSpecial`]) with
    /// no swizzle.
    ///
    /// # Errors
    ///
    /// As [`Gx2Texture::convert_tile_mode`].
    pub fn deswizzle(&self) -> Result<Gx2Texture, Gx2Error> {
        self.convert_tile_mode(Gx2TileMode::LinearSpecial, 0)
    }
}

fn buffer_len(size: u64) -> Result<usize, InvariantError> {
    usize::try_from(size).map_err(|_| InvariantError::Overflow(size))
}
