//! Error types for surface layout and addressing.
//!
//! Errors are split by who caused them:
//!
//! - [`ConfigError`]: the surface description or hardware configuration is invalid.
//! - [`CoordinateError`]: a caller asked for an element outside the surface.
//! - [`BufferError`]: a caller supplied a buffer that is too small.
//! - [`InvariantError`]: an internal computation that must be exact was not.
//!
//! None of these are retryable; every computation is deterministic.

pub use gx2_tiling_common::InvariantError;
use thiserror::Error;

/// The surface description or hardware configuration is invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The raw value does not name a supported tile mode.
    #[error("Invalid tile mode: {0}")]
    InvalidTileMode(u32),

    /// A surface dimension was zero.
    #[error("Invalid surface dimensions: {width}x{height}x{depth} (all must be non-zero)")]
    ZeroDimension {
        /// Width in elements.
        width: u32,
        /// Height in elements.
        height: u32,
        /// Depth or array size.
        depth: u32,
    },

    /// Bits per element must be a non-zero multiple of 8, at most 128.
    #[error("Invalid bits per element: {0}")]
    InvalidBitsPerElement(u32),

    /// Tiled modes only address power of two element sizes.
    #[error("{bits_per_element} bits per element is not supported by tiled modes")]
    UnsupportedTiledBitsPerElement {
        /// The requested element size.
        bits_per_element: u32,
    },

    /// Sample count must be 1, 2, 4 or 8.
    #[error("Invalid sample count: {0}")]
    InvalidSampleCount(u32),

    /// The pipe swizzle must be below the number of pipes.
    #[error("Pipe swizzle {swizzle} out of range for {pipes} pipes")]
    PipeSwizzleOutOfRange {
        /// The requested swizzle.
        swizzle: u32,
        /// Number of pipes in the hardware configuration.
        pipes: u32,
    },

    /// The bank swizzle must be below the number of banks.
    #[error("Bank swizzle {swizzle} out of range for {banks} banks")]
    BankSwizzleOutOfRange {
        /// The requested swizzle.
        swizzle: u32,
        /// Number of banks in the hardware configuration.
        banks: u32,
    },

    /// The hardware configuration register holds an unsupported value.
    #[error("Unsupported hardware configuration: {0}")]
    InvalidHardwareConfig(&'static str),
}

/// A coordinate outside the logical surface was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CoordinateError {
    /// One of `x`, `y`, `slice` or `sample` is outside the surface.
    #[error(
        "Coordinate ({x}, {y}, slice {slice}, sample {sample}) outside surface of \
         {width}x{height}, {depth} slices, {samples} samples"
    )]
    OutOfRange {
        /// Requested x.
        x: u32,
        /// Requested y.
        y: u32,
        /// Requested slice.
        slice: u32,
        /// Requested sample.
        sample: u32,
        /// Surface width.
        width: u32,
        /// Surface height.
        height: u32,
        /// Surface depth or array size.
        depth: u32,
        /// Surface sample count.
        samples: u32,
    },

    /// More slices were requested than the surface holds.
    #[error("Cannot copy {slices} slices of a surface with {depth}")]
    SliceCountOutOfRange {
        /// Requested slice count.
        slices: u32,
        /// Surface depth or array size.
        depth: u32,
    },
}

/// A caller supplied buffer is too small.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BufferError {
    /// The source buffer is smaller than the surface it should contain.
    #[error("Source buffer too small: needed {needed}, got {actual}")]
    SourceTooSmall {
        /// The required buffer size.
        needed: u64,
        /// The actual buffer size provided.
        actual: u64,
    },

    /// The destination buffer is smaller than the surface it should receive.
    #[error("Output buffer too small: needed {needed}, got {actual}")]
    OutputBufferTooSmall {
        /// The required buffer size.
        needed: u64,
        /// The actual buffer size provided.
        actual: u64,
    },

    /// Source and destination surfaces describe different logical images.
    #[error("Surface mismatch: {0}")]
    SurfaceMismatch(&'static str),
}

/// Any error produced by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TilingError {
    /// See [`ConfigError`].
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// See [`CoordinateError`].
    #[error(transparent)]
    Coordinate(#[from] CoordinateError),

    /// See [`BufferError`].
    #[error(transparent)]
    Buffer(#[from] BufferError),

    /// See [`InvariantError`].
    #[error(transparent)]
    Invariant(#[from] InvariantError),
}
