#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod address;
pub mod config;
pub mod copy;
pub mod descriptor;
pub mod error;
pub mod geometry;
pub mod surface_info;
pub mod tile_mode;

pub use address::{compute_surface_address, AddressTranslator, TexelCoord};
pub use config::{AddrConfig, GbTilingConfig};
pub use copy::{copy_slices, copy_surface, tile, tile_into, untile, untile_into};
pub use descriptor::{SurfaceDescriptor, SurfaceDescriptorBuilder, SurfaceKind};
pub use error::{BufferError, ConfigError, CoordinateError, InvariantError, TilingError};
pub use geometry::MacroTileGeometry;
pub use surface_info::{effective_tile_mode, SurfaceInfo};
pub use tile_mode::TileMode;

/// Common test prelude for avoiding duplicate imports in test modules
#[cfg(test)]
pub(crate) mod test_prelude;
