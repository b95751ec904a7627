#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod error;
pub mod format;
pub mod layout;
pub mod surface;
pub mod swizzle;
pub mod texture;

pub use error::Gx2Error;
pub use format::Gx2SurfaceFormat;
pub use layout::{Gx2SurfaceLayout, MAX_MIP_LEVELS};
pub use surface::{
    Gx2AaMode, Gx2Surface, Gx2SurfaceBuilder, Gx2SurfaceDim, Gx2SurfaceUse, Gx2TileMode,
};
pub use swizzle::{Gx2SwizzleRegister, DEFAULT_MIP_SWIZZLE_LEVEL};
pub use texture::Gx2Texture;

// Re-export the layer below for callers working with single levels.
pub use gx2_tiling::{SurfaceInfo, TileMode};

/// Common test prelude for avoiding duplicate imports in test modules
#[cfg(test)]
pub(crate) mod test_prelude;
