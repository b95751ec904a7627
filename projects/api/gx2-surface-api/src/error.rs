//! Error types for the GX2 surface API.

use gx2_tiling::{ConfigError, InvariantError, TilingError};
use thiserror::Error;

/// Errors returned by the GX2 surface API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Gx2Error {
    /// Laying out or addressing a mip level failed.
    #[error(transparent)]
    Tiling(#[from] TilingError),

    /// The format has no known element size.
    #[error("Unsupported surface format: {0:#x}")]
    UnsupportedFormat(u32),

    /// The raw value is not a `GX2SurfaceDim`.
    #[error("Invalid surface dimension: {0}")]
    InvalidDim(u32),

    /// The raw value is not a `GX2AAMode`.
    #[error("Invalid AA mode: {0}")]
    InvalidAaMode(u32),

    /// The raw value is not a `GX2TileMode`.
    #[error("Invalid tile mode: {0}")]
    InvalidTileMode(u32),

    /// Width, height or depth was zero.
    #[error("Invalid surface dimensions: {width}x{height}x{depth} (all must be non-zero)")]
    ZeroDimension {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
        /// Depth or array size.
        depth: u32,
    },

    /// The requested mip level is not part of the surface's chain.
    #[error("Mip level {level} out of range, surface has {levels} levels")]
    MipLevelOutOfRange {
        /// The requested level.
        level: u32,
        /// Number of levels in the chain.
        levels: u32,
    },

    /// The image buffer is smaller than the surface's `image_size`.
    #[error("Image buffer too small: needed {needed}, got {actual}")]
    ImageTooSmall {
        /// The required buffer size.
        needed: u64,
        /// The actual buffer size provided.
        actual: u64,
    },

    /// The mipmap buffer is smaller than the surface's `mipmap_size`.
    #[error("Mipmap buffer too small: needed {needed}, got {actual}")]
    MipmapsTooSmall {
        /// The required buffer size.
        needed: u64,
        /// The actual buffer size provided.
        actual: u64,
    },

    /// Two plane formats cannot be converted between tile modes.
    #[error("Surfaces of format {0:#x} cannot change tile mode")]
    UnsupportedConversion(u32),
}

impl From<ConfigError> for Gx2Error {
    fn from(error: ConfigError) -> Self {
        Gx2Error::Tiling(error.into())
    }
}

impl From<InvariantError> for Gx2Error {
    fn from(error: InvariantError) -> Self {
        Gx2Error::Tiling(error.into())
    }
}
