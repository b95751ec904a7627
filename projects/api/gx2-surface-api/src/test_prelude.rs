//! Common test imports and utilities for GX2 surface tests
//!
//! This module provides a common prelude for test modules to avoid
//! duplicate imports across the codebase.

// External crates commonly used in tests
pub use rstest::rstest;

// Core types from this crate
pub use crate::{Gx2Error, Gx2Surface, Gx2SurfaceDim, Gx2SurfaceFormat, Gx2TileMode, TileMode};

pub use alloc::vec;
pub use alloc::vec::Vec;

// Re-export super for convenience in test modules
pub use super::*;

/// A single level RGBA8 2D texture with the default tile mode.
pub(crate) fn rgba_surface(width: u32, height: u32) -> Gx2Surface {
    Gx2Surface::builder()
        .width(width)
        .height(height)
        .format(Gx2SurfaceFormat::UNORM_R8_G8_B8_A8)
        .build()
        .unwrap()
}

/// Bytes that repeat only every 251 positions, so misplaced elements show up.
pub(crate) fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}
