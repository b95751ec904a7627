//! GX2 surface formats.
//!
//! A raw GX2 format value carries the hardware format in its low 6 bits;
//! the bits above select the number type (UNORM, SNORM, SRGB, FLOAT...)
//! and do not change the layout.

/// Bits per element of each hardware format, indexed by `format & 0x3F`.
///
/// Block compressed formats list the size of one 4x4 block. Formats with no
/// entry (0) cannot be laid out.
const FORMAT_BITS_PER_ELEMENT: [u32; 64] = [
    0, 8, 8, 0, 0, 16, 16, 16, //
    16, 16, 16, 16, 16, 32, 32, 32, //
    32, 32, 0, 32, 0, 0, 32, 0, //
    0, 32, 32, 32, 64, 64, 64, 64, //
    64, 0, 128, 128, 0, 0, 0, 16, //
    16, 32, 32, 32, 0, 0, 0, 96, //
    96, 64, 128, 128, 64, 128, 0, 0, //
    0, 0, 0, 0, 0, 0, 0, 0, //
];

/// A raw `GX2SurfaceFormat` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Gx2SurfaceFormat(pub u32);

impl Gx2SurfaceFormat {
    /// No format.
    pub const INVALID: Self = Self(0x000);
    /// 8-bit single channel.
    pub const UNORM_R8: Self = Self(0x001);
    /// 4-bit two channel.
    pub const UNORM_R4_G4: Self = Self(0x002);
    /// 16-bit two channel.
    pub const UNORM_R8_G8: Self = Self(0x007);
    /// 16-bit packed RGB.
    pub const UNORM_R5_G6_B5: Self = Self(0x008);
    /// 16-bit packed RGBA.
    pub const UNORM_R5_G5_B5_A1: Self = Self(0x00a);
    /// 16-bit packed RGBA.
    pub const UNORM_R4_G4_B4_A4: Self = Self(0x00b);
    /// 32-bit float single channel.
    pub const FLOAT_R32: Self = Self(0x80e);
    /// 32-bit packed RGBA.
    pub const UNORM_R10_G10_B10_A2: Self = Self(0x019);
    /// 32-bit RGBA.
    pub const UNORM_R8_G8_B8_A8: Self = Self(0x01a);
    /// 32-bit sRGB RGBA.
    pub const SRGB_R8_G8_B8_A8: Self = Self(0x41a);
    /// 64-bit RGBA.
    pub const UNORM_R16_G16_B16_A16: Self = Self(0x01f);
    /// 64-bit half float RGBA.
    pub const FLOAT_R16_G16_B16_A16: Self = Self(0x81f);
    /// 128-bit float RGBA.
    pub const FLOAT_R32_G32_B32_A32: Self = Self(0x823);
    /// 96-bit float RGB.
    pub const FLOAT_R32_G32_B32: Self = Self(0x830);
    /// BC1 (DXT1).
    pub const UNORM_BC1: Self = Self(0x031);
    /// BC1 (DXT1), sRGB.
    pub const SRGB_BC1: Self = Self(0x431);
    /// BC2 (DXT3).
    pub const UNORM_BC2: Self = Self(0x032);
    /// BC2 (DXT3), sRGB.
    pub const SRGB_BC2: Self = Self(0x432);
    /// BC3 (DXT5).
    pub const UNORM_BC3: Self = Self(0x033);
    /// BC3 (DXT5), sRGB.
    pub const SRGB_BC3: Self = Self(0x433);
    /// BC4 (ATI1).
    pub const UNORM_BC4: Self = Self(0x034);
    /// BC4 (ATI1), signed.
    pub const SNORM_BC4: Self = Self(0x234);
    /// BC5 (ATI2).
    pub const UNORM_BC5: Self = Self(0x035);
    /// BC5 (ATI2), signed.
    pub const SNORM_BC5: Self = Self(0x235);
    /// Two plane YUV 4:2:0: an 8-bit luma plane followed by a half size chroma plane.
    pub const UNORM_NV12: Self = Self(0x081);

    /// The hardware format, the low 6 bits.
    #[inline]
    pub const fn hw_format(self) -> u32 {
        self.0 & 0x3F
    }

    /// Bits per element (per 4x4 block for BCn); 0 for formats without a layout.
    #[inline]
    pub const fn bits_per_element(self) -> u32 {
        FORMAT_BITS_PER_ELEMENT[self.hw_format() as usize]
    }

    /// BC1 to BC5.
    #[inline]
    pub const fn is_bc(self) -> bool {
        matches!(self.hw_format(), 0x31..=0x35)
    }

    /// [`Gx2SurfaceFormat::UNORM_NV12`].
    #[inline]
    pub const fn is_nv12(self) -> bool {
        self.0 == Self::UNORM_NV12.0
    }

    /// Width and height in pixels of one element: 4 for BCn, 1 otherwise.
    #[inline]
    pub const fn block_size(self) -> u32 {
        if self.is_bc() {
            4
        } else {
            1
        }
    }

    /// Number of elements covering `pixels` pixels along one axis, at least 1.
    #[inline]
    pub const fn elements(self, pixels: u32) -> u32 {
        let block = self.block_size();
        let elements = pixels.div_ceil(block);
        if elements == 0 {
            1
        } else {
            elements
        }
    }
}

impl From<u32> for Gx2SurfaceFormat {
    #[inline]
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Gx2SurfaceFormat> for u32 {
    #[inline]
    fn from(format: Gx2SurfaceFormat) -> Self {
        format.0
    }
}
