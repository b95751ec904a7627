//! Immutable description of one mip level of a surface.

use crate::config::AddrConfig;
use crate::error::ConfigError;
use crate::tile_mode::TileMode;
use gx2_tiling_common::math::is_pow2;

/// How the slices of a surface relate to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SurfaceKind {
    /// Independent array layers (also used for single 2D surfaces).
    #[default]
    Array,
    /// Depth slices of a volume texture.
    Volume,
    /// Cube map faces. Slice counts are padded to a power of two on mip levels.
    Cube,
}

/// Describes one mip level of a surface.
///
/// Dimensions are those of the described level, in elements (pixels, or
/// 4x4 blocks for block compressed formats). The descriptor is validated on
/// construction and never changes afterwards; build one with
/// [`SurfaceDescriptor::builder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceDescriptor {
    width: u32,
    height: u32,
    depth_or_array_size: u32,
    bits_per_element: u32,
    tile_mode: TileMode,
    sample_count: u32,
    mip_level: u32,
    pipe_swizzle: u32,
    bank_swizzle: u32,
    kind: SurfaceKind,
    is_depth: bool,
    is_display: bool,
    config: AddrConfig,
}

impl SurfaceDescriptor {
    /// Creates a builder with default values.
    pub fn builder() -> SurfaceDescriptorBuilder {
        SurfaceDescriptorBuilder::new()
    }

    /// A builder pre-filled with this descriptor's values.
    pub fn to_builder(&self) -> SurfaceDescriptorBuilder {
        SurfaceDescriptorBuilder {
            width: Some(self.width),
            height: Some(self.height),
            depth_or_array_size: Some(self.depth_or_array_size),
            bits_per_element: Some(self.bits_per_element),
            tile_mode: Some(self.tile_mode),
            sample_count: Some(self.sample_count),
            mip_level: Some(self.mip_level),
            pipe_swizzle: Some(self.pipe_swizzle),
            bank_swizzle: Some(self.bank_swizzle),
            kind: Some(self.kind),
            is_depth: Some(self.is_depth),
            is_display: Some(self.is_display),
            config: Some(self.config),
        }
    }

    /// Width in elements.
    #[inline(always)]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in elements.
    #[inline(always)]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Depth for volumes, slice count for arrays and cube maps.
    #[inline(always)]
    pub const fn depth_or_array_size(&self) -> u32 {
        self.depth_or_array_size
    }

    /// Element size in bits.
    #[inline(always)]
    pub const fn bits_per_element(&self) -> u32 {
        self.bits_per_element
    }

    /// Element size in bytes.
    #[inline(always)]
    pub const fn bytes_per_element(&self) -> u32 {
        self.bits_per_element / 8
    }

    /// The requested tile mode. The mode actually used may be demoted, see
    /// [`SurfaceInfo::tile_mode`](crate::SurfaceInfo::tile_mode).
    #[inline(always)]
    pub const fn tile_mode(&self) -> TileMode {
        self.tile_mode
    }

    /// MSAA samples per element.
    #[inline(always)]
    pub const fn sample_count(&self) -> u32 {
        self.sample_count
    }

    /// Index of the described level in its mip chain.
    #[inline(always)]
    pub const fn mip_level(&self) -> u32 {
        self.mip_level
    }

    /// Pipe swizzle seed.
    #[inline(always)]
    pub const fn pipe_swizzle(&self) -> u32 {
        self.pipe_swizzle
    }

    /// Bank swizzle seed.
    #[inline(always)]
    pub const fn bank_swizzle(&self) -> u32 {
        self.bank_swizzle
    }

    /// Relationship between slices.
    #[inline(always)]
    pub const fn kind(&self) -> SurfaceKind {
        self.kind
    }

    /// Depth buffers order elements and samples differently within a micro tile.
    #[inline(always)]
    pub const fn is_depth(&self) -> bool {
        self.is_depth
    }

    /// Display (scan-out) surfaces align their pitch to 32 elements.
    #[inline(always)]
    pub const fn is_display(&self) -> bool {
        self.is_display
    }

    /// Hardware configuration the surface is laid out for.
    #[inline(always)]
    pub const fn config(&self) -> &AddrConfig {
        &self.config
    }
}

/// Builder for [`SurfaceDescriptor`].
///
/// Unset values default to: height 1, depth 1, [`TileMode::LinearGeneral`],
/// 1 sample, mip level 0, no swizzle, [`SurfaceKind::Array`] and
/// [`AddrConfig::WIIU`]. Width and bits per element must be set.
#[derive(Debug, Clone, Copy, Default)]
pub struct SurfaceDescriptorBuilder {
    width: Option<u32>,
    height: Option<u32>,
    depth_or_array_size: Option<u32>,
    bits_per_element: Option<u32>,
    tile_mode: Option<TileMode>,
    sample_count: Option<u32>,
    mip_level: Option<u32>,
    pipe_swizzle: Option<u32>,
    bank_swizzle: Option<u32>,
    kind: Option<SurfaceKind>,
    is_depth: Option<bool>,
    is_display: Option<bool>,
    config: Option<AddrConfig>,
}

impl SurfaceDescriptorBuilder {
    /// Create a new descriptor builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the width in elements.
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the height in elements.
    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    /// Set the depth (volumes) or slice count (arrays, cube maps).
    pub fn depth_or_array_size(mut self, depth: u32) -> Self {
        self.depth_or_array_size = Some(depth);
        self
    }

    /// Set the element size in bits.
    pub fn bits_per_element(mut self, bits: u32) -> Self {
        self.bits_per_element = Some(bits);
        self
    }

    /// Set the requested tile mode.
    pub fn tile_mode(mut self, tile_mode: TileMode) -> Self {
        self.tile_mode = Some(tile_mode);
        self
    }

    /// Set the number of MSAA samples.
    pub fn sample_count(mut self, samples: u32) -> Self {
        self.sample_count = Some(samples);
        self
    }

    /// Set the mip level the dimensions describe.
    pub fn mip_level(mut self, level: u32) -> Self {
        self.mip_level = Some(level);
        self
    }

    /// Set the pipe swizzle. Must be below the number of pipes.
    pub fn pipe_swizzle(mut self, swizzle: u32) -> Self {
        self.pipe_swizzle = Some(swizzle);
        self
    }

    /// Set the bank swizzle. Must be below the number of banks.
    pub fn bank_swizzle(mut self, swizzle: u32) -> Self {
        self.bank_swizzle = Some(swizzle);
        self
    }

    /// Set how slices relate to each other.
    pub fn kind(mut self, kind: SurfaceKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Mark the surface as a depth buffer.
    pub fn depth_buffer(mut self, is_depth: bool) -> Self {
        self.is_depth = Some(is_depth);
        self
    }

    /// Mark the surface as a display (scan-out) buffer.
    pub fn display(mut self, is_display: bool) -> Self {
        self.is_display = Some(is_display);
        self
    }

    /// Set the hardware configuration.
    pub fn config(mut self, config: AddrConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Validate the configured values and build the descriptor.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::ZeroDimension`] if width, height or depth is zero.
    /// - [`ConfigError::InvalidBitsPerElement`] if the element size is not a
    ///   non-zero multiple of 8 up to 128.
    /// - [`ConfigError::UnsupportedTiledBitsPerElement`] for tiled modes with
    ///   an element size that is not a power of two.
    /// - [`ConfigError::InvalidSampleCount`] unless 1, 2, 4 or 8 samples.
    /// - [`ConfigError::PipeSwizzleOutOfRange`] / [`ConfigError::BankSwizzleOutOfRange`]
    ///   if a swizzle does not fit the hardware configuration.
    pub fn build(self) -> Result<SurfaceDescriptor, ConfigError> {
        let descriptor = SurfaceDescriptor {
            width: self.width.unwrap_or(0),
            height: self.height.unwrap_or(1),
            depth_or_array_size: self.depth_or_array_size.unwrap_or(1),
            bits_per_element: self.bits_per_element.unwrap_or(0),
            tile_mode: self.tile_mode.unwrap_or(TileMode::LinearGeneral),
            sample_count: self.sample_count.unwrap_or(1),
            mip_level: self.mip_level.unwrap_or(0),
            pipe_swizzle: self.pipe_swizzle.unwrap_or(0),
            bank_swizzle: self.bank_swizzle.unwrap_or(0),
            kind: self.kind.unwrap_or_default(),
            is_depth: self.is_depth.unwrap_or(false),
            is_display: self.is_display.unwrap_or(false),
            config: self.config.unwrap_or_default(),
        };

        validate(&descriptor)?;
        Ok(descriptor)
    }
}

fn validate(descriptor: &SurfaceDescriptor) -> Result<(), ConfigError> {
    let SurfaceDescriptor {
        width,
        height,
        depth_or_array_size: depth,
        bits_per_element: bpp,
        ..
    } = *descriptor;

    if width == 0 || height == 0 || depth == 0 {
        return Err(ConfigError::ZeroDimension {
            width,
            height,
            depth,
        });
    }

    if bpp == 0 || bpp % 8 != 0 || bpp > 128 {
        return Err(ConfigError::InvalidBitsPerElement(bpp));
    }

    if !descriptor.tile_mode.is_linear() && !is_pow2(bpp) {
        return Err(ConfigError::UnsupportedTiledBitsPerElement {
            bits_per_element: bpp,
        });
    }

    if !matches!(descriptor.sample_count, 1 | 2 | 4 | 8) {
        return Err(ConfigError::InvalidSampleCount(descriptor.sample_count));
    }

    let config = &descriptor.config;
    if descriptor.pipe_swizzle >= config.pipes() {
        return Err(ConfigError::PipeSwizzleOutOfRange {
            swizzle: descriptor.pipe_swizzle,
            pipes: config.pipes(),
        });
    }
    if descriptor.bank_swizzle >= config.banks() {
        return Err(ConfigError::BankSwizzleOutOfRange {
            swizzle: descriptor.bank_swizzle,
            banks: config.banks(),
        });
    }

    Ok(())
}
