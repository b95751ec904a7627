//! Common test imports and utilities for tiling tests
//!
//! This module provides a common prelude for test modules to avoid
//! duplicate imports across the codebase.

// External crates commonly used in tests
pub use rstest::rstest;

// Core types from this crate
pub use crate::{
    AddrConfig, AddressTranslator, SurfaceDescriptor, SurfaceInfo, SurfaceKind, TexelCoord,
    TileMode,
};

pub use alloc::vec;
pub use alloc::vec::Vec;

// Re-export super for convenience in test modules
pub use super::*;

/// Single slice, single sample surface with the given mode and element size.
pub(crate) fn descriptor_2d(mode: TileMode, width: u32, height: u32, bpp: u32) -> SurfaceDescriptor {
    SurfaceDescriptor::builder()
        .width(width)
        .height(height)
        .bits_per_element(bpp)
        .tile_mode(mode)
        .build()
        .unwrap()
}

/// Bytes that repeat only every 251 positions, so misplaced elements show up.
pub(crate) fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}
