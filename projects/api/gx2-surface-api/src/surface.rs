//! Description of a GX2 surface, as stored in texture headers.

use crate::error::Gx2Error;
use crate::format::Gx2SurfaceFormat;
use crate::swizzle::Gx2SwizzleRegister;
use bitfield::bitfield;
use derive_enum_all_values::AllValues;
use gx2_tiling::TileMode;

/// Shape of a surface (`GX2SurfaceDim`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, AllValues)]
#[repr(u32)]
pub enum Gx2SurfaceDim {
    /// One row of pixels.
    Texture1D = 0,
    /// A 2D image.
    #[default]
    Texture2D = 1,
    /// A volume; `depth` slices that shrink with each mip level.
    Texture3D = 2,
    /// Six or more faces.
    TextureCube = 3,
    /// An array of rows.
    Texture1DArray = 4,
    /// An array of 2D images.
    Texture2DArray = 5,
    /// A multisampled 2D image.
    Texture2DMsaa = 6,
    /// An array of multisampled 2D images.
    Texture2DMsaaArray = 7,
}

impl Gx2SurfaceDim {
    /// `true` for [`Gx2SurfaceDim::Texture1D`] and [`Gx2SurfaceDim::Texture1DArray`].
    #[inline]
    pub const fn is_1d(self) -> bool {
        matches!(self, Gx2SurfaceDim::Texture1D | Gx2SurfaceDim::Texture1DArray)
    }

    /// `true` for dims whose `depth` is an array size.
    #[inline]
    pub const fn is_array(self) -> bool {
        matches!(
            self,
            Gx2SurfaceDim::Texture1DArray
                | Gx2SurfaceDim::Texture2DArray
                | Gx2SurfaceDim::Texture2DMsaaArray
        )
    }
}

impl TryFrom<u32> for Gx2SurfaceDim {
    type Error = Gx2Error;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Gx2SurfaceDim::all_values()
            .get(value as usize)
            .copied()
            .ok_or(Gx2Error::InvalidDim(value))
    }
}

/// Multisampling mode (`GX2AAMode`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, AllValues)]
#[repr(u32)]
pub enum Gx2AaMode {
    /// One sample.
    #[default]
    X1 = 0,
    /// Two samples.
    X2 = 1,
    /// Four samples.
    X4 = 2,
    /// Eight samples.
    X8 = 3,
}

impl Gx2AaMode {
    /// Samples per pixel.
    #[inline]
    pub const fn samples(self) -> u32 {
        1 << self as u32
    }
}

impl TryFrom<u32> for Gx2AaMode {
    type Error = Gx2Error;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Gx2AaMode::all_values()
            .get(value as usize)
            .copied()
            .ok_or(Gx2Error::InvalidAaMode(value))
    }
}

bitfield! {
    /// How a surface is used (`GX2SurfaceUse`).
    ///
    /// Bit layout:
    /// - Bit 0: Texture
    /// - Bit 1: Color buffer
    /// - Bit 2: Depth buffer
    /// - Bit 3: Scan buffer (display)
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Gx2SurfaceUse(u32);
    impl Debug;
    u32;

    /// Sampled as a texture
    pub texture, set_texture: 0;
    /// Rendered to as a color buffer
    pub color_buffer, set_color_buffer: 1;
    /// Rendered to as a depth buffer
    pub depth_buffer, set_depth_buffer: 2;
    /// Scanned out to a display
    pub scan_buffer, set_scan_buffer: 3;
}

impl Gx2SurfaceUse {
    /// [`Gx2SurfaceUse::texture`] only, the use of most texture files.
    pub const TEXTURE: Self = Self(1);
    /// [`Gx2SurfaceUse::color_buffer`] only.
    pub const COLOR_BUFFER: Self = Self(2);
    /// [`Gx2SurfaceUse::depth_buffer`] only.
    pub const DEPTH_BUFFER: Self = Self(4);
    /// [`Gx2SurfaceUse::scan_buffer`] only.
    pub const SCAN_BUFFER: Self = Self(8);

    /// Combines two sets of uses.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

/// Tile mode of a GX2 surface (`GX2TileMode`).
///
/// Extends [`TileMode`] with a default selected from the surface's dim and
/// use, and with a tightly packed linear mode used by tools.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Gx2TileMode {
    /// Resolved by [`Gx2Surface::calc_size_and_alignment`].
    #[default]
    Default,
    /// A hardware tile mode.
    Addr(TileMode),
    /// Rows packed with no padding, not even between mip levels.
    LinearSpecial,
}

impl Gx2TileMode {
    /// Raw value of [`Gx2TileMode::LinearSpecial`].
    pub const LINEAR_SPECIAL_RAW: u32 = 0x10;

    /// `true` for 2D and 3D hardware modes.
    #[inline]
    pub const fn is_macro_tiled(self) -> bool {
        match self {
            Gx2TileMode::Addr(mode) => mode.is_macro_tiled(),
            _ => false,
        }
    }
}

impl From<TileMode> for Gx2TileMode {
    #[inline]
    fn from(mode: TileMode) -> Self {
        Gx2TileMode::Addr(mode)
    }
}

impl TryFrom<u32> for Gx2TileMode {
    type Error = Gx2Error;

    /// Raw 0 is [`Gx2TileMode::Default`], 1 to 15 are hardware modes and 16
    /// is [`Gx2TileMode::LinearSpecial`].
    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Gx2TileMode::Default),
            Self::LINEAR_SPECIAL_RAW => Ok(Gx2TileMode::LinearSpecial),
            _ => TileMode::try_from(value)
                .map(Gx2TileMode::Addr)
                .map_err(|_| Gx2Error::InvalidTileMode(value)),
        }
    }
}

impl From<Gx2TileMode> for u32 {
    /// [`TileMode::LinearGeneral`] shares raw value 0 with [`Gx2TileMode::Default`].
    #[inline]
    fn from(mode: Gx2TileMode) -> Self {
        match mode {
            Gx2TileMode::Default => 0,
            Gx2TileMode::Addr(mode) => mode.into(),
            Gx2TileMode::LinearSpecial => Gx2TileMode::LINEAR_SPECIAL_RAW,
        }
    }
}

/// A GX2 surface description, as stored in a `GX2Surface` header.
///
/// Dimensions are in pixels. Build one with [`Gx2Surface::builder`], then
/// call [`Gx2Surface::calc_size_and_alignment`] for its memory layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Gx2Surface {
    dim: Gx2SurfaceDim,
    width: u32,
    height: u32,
    depth: u32,
    mip_levels: u32,
    format: Gx2SurfaceFormat,
    aa: Gx2AaMode,
    surface_use: Gx2SurfaceUse,
    tile_mode: Gx2TileMode,
    swizzle: Gx2SwizzleRegister,
}

impl Gx2Surface {
    /// Creates a builder with default values.
    pub fn builder() -> Gx2SurfaceBuilder {
        Gx2SurfaceBuilder::new()
    }

    /// A builder pre-filled with this surface's values.
    pub fn to_builder(&self) -> Gx2SurfaceBuilder {
        Gx2SurfaceBuilder {
            dim: self.dim,
            width: self.width,
            height: self.height,
            depth: self.depth,
            mip_levels: self.mip_levels,
            format: self.format,
            aa: self.aa,
            surface_use: self.surface_use,
            tile_mode: self.tile_mode,
            swizzle: self.swizzle,
        }
    }

    /// Shape of the surface.
    #[inline(always)]
    pub const fn dim(&self) -> Gx2SurfaceDim {
        self.dim
    }

    /// Width of level 0 in pixels.
    #[inline(always)]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of level 0 in pixels.
    #[inline(always)]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Depth of level 0 for volumes, slice or face count otherwise.
    #[inline(always)]
    pub const fn depth(&self) -> u32 {
        self.depth
    }

    /// Number of mip levels, including level 0.
    #[inline(always)]
    pub const fn mip_levels(&self) -> u32 {
        self.mip_levels
    }

    /// Pixel format.
    #[inline(always)]
    pub const fn format(&self) -> Gx2SurfaceFormat {
        self.format
    }

    /// Multisampling mode.
    #[inline(always)]
    pub const fn aa(&self) -> Gx2AaMode {
        self.aa
    }

    /// How the surface is used.
    #[inline(always)]
    pub const fn surface_use(&self) -> Gx2SurfaceUse {
        self.surface_use
    }

    /// Tile mode; [`Gx2TileMode::Default`] until resolved.
    #[inline(always)]
    pub const fn tile_mode(&self) -> Gx2TileMode {
        self.tile_mode
    }

    /// Swizzle register.
    #[inline(always)]
    pub const fn swizzle(&self) -> Gx2SwizzleRegister {
        self.swizzle
    }

    /// The tile mode [`Gx2TileMode::Default`] stands for on this surface.
    pub fn default_tile_mode(&self) -> TileMode {
        let is_depth = self.surface_use.depth_buffer();
        let is_color = self.surface_use.color_buffer();

        if self.dim == Gx2SurfaceDim::Texture1D && self.aa == Gx2AaMode::X1 && !is_depth {
            return TileMode::LinearAligned;
        }
        if self.dim == Gx2SurfaceDim::Texture3D && !is_color {
            return TileMode::Tiled2DThick;
        }
        TileMode::Tiled2DThin1
    }

    /// Length of the full mip chain, or 1 if the surface has no mipmaps.
    ///
    /// The chain ends once every dimension has shrunk to 1; depth only
    /// counts for volumes.
    pub fn full_mip_chain(&self) -> u32 {
        if self.mip_levels <= 1 {
            return 1;
        }

        let levels = chain_length(self.width).max(chain_length(self.height));
        if self.dim == Gx2SurfaceDim::Texture3D {
            return levels.max(chain_length(self.depth));
        }
        levels
    }

    pub(crate) fn with_layout_fields(
        mut self,
        tile_mode: Gx2TileMode,
        mip_levels: u32,
        swizzle: Gx2SwizzleRegister,
    ) -> Self {
        self.tile_mode = tile_mode;
        self.mip_levels = mip_levels;
        self.swizzle = swizzle;
        self
    }
}

/// Levels from `size` down to 1, halving each time.
fn chain_length(size: u32) -> u32 {
    u32::BITS - size.leading_zeros()
}

/// Builder for [`Gx2Surface`].
///
/// Defaults: [`Gx2SurfaceDim::Texture2D`], height, depth and mip levels 1,
/// [`Gx2AaMode::X1`], [`Gx2SurfaceUse::TEXTURE`], [`Gx2TileMode::Default`]
/// and swizzle 0. Width and format must be set.
#[derive(Debug, Clone, Copy)]
pub struct Gx2SurfaceBuilder {
    dim: Gx2SurfaceDim,
    width: u32,
    height: u32,
    depth: u32,
    mip_levels: u32,
    format: Gx2SurfaceFormat,
    aa: Gx2AaMode,
    surface_use: Gx2SurfaceUse,
    tile_mode: Gx2TileMode,
    swizzle: Gx2SwizzleRegister,
}

impl Default for Gx2SurfaceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Gx2SurfaceBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self {
            dim: Gx2SurfaceDim::Texture2D,
            width: 0,
            height: 1,
            depth: 1,
            mip_levels: 1,
            format: Gx2SurfaceFormat::INVALID,
            aa: Gx2AaMode::X1,
            surface_use: Gx2SurfaceUse::TEXTURE,
            tile_mode: Gx2TileMode::Default,
            swizzle: Gx2SwizzleRegister::default(),
        }
    }

    /// Sets the shape of the surface.
    pub fn dim(mut self, dim: Gx2SurfaceDim) -> Self {
        self.dim = dim;
        self
    }

    /// Sets the width of level 0 in pixels.
    pub fn width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Sets the height of level 0 in pixels.
    pub fn height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    /// Sets the depth, array size or face count.
    pub fn depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    /// Sets the requested number of mip levels.
    pub fn mip_levels(mut self, mip_levels: u32) -> Self {
        self.mip_levels = mip_levels;
        self
    }

    /// Sets the pixel format.
    pub fn format(mut self, format: Gx2SurfaceFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the multisampling mode.
    pub fn aa(mut self, aa: Gx2AaMode) -> Self {
        self.aa = aa;
        self
    }

    /// Sets how the surface is used.
    pub fn surface_use(mut self, surface_use: Gx2SurfaceUse) -> Self {
        self.surface_use = surface_use;
        self
    }

    /// Sets the tile mode.
    pub fn tile_mode(mut self, tile_mode: impl Into<Gx2TileMode>) -> Self {
        self.tile_mode = tile_mode.into();
        self
    }

    /// Sets the raw swizzle register.
    pub fn swizzle(mut self, swizzle: u32) -> Self {
        self.swizzle = Gx2SwizzleRegister::from(swizzle);
        self
    }

    /// Validates and builds the surface.
    ///
    /// # Errors
    ///
    /// - [`Gx2Error::ZeroDimension`] if width, height or depth is zero.
    /// - [`Gx2Error::UnsupportedFormat`] if the format has no element size.
    pub fn build(self) -> Result<Gx2Surface, Gx2Error> {
        if self.width == 0 || self.height == 0 || self.depth == 0 {
            return Err(Gx2Error::ZeroDimension {
                width: self.width,
                height: self.height,
                depth: self.depth,
            });
        }
        if self.format.bits_per_element() == 0 {
            return Err(Gx2Error::UnsupportedFormat(self.format.0));
        }

        Ok(Gx2Surface {
            dim: self.dim,
            width: self.width,
            height: self.height,
            depth: self.depth,
            mip_levels: self.mip_levels,
            format: self.format,
            aa: self.aa,
            surface_use: self.surface_use,
            tile_mode: self.tile_mode,
            swizzle: self.swizzle,
        })
    }
}
