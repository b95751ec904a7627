//! The closed set of R600 tile modes.

use crate::error::ConfigError;
use derive_enum_all_values::AllValues;

/// Describes how the elements of a surface are arranged in memory.
///
/// Raw values follow the hardware numbering used in `GX2Surface` headers.
///
/// - Linear modes store rows one after another.
/// - 1D modes store 8x8 micro tiles in row-major order.
/// - 2D and 3D modes additionally interleave micro tiles across pipes and banks
///   in macro tiles. `2B`/`3B` variants swap banks between macro tile columns.
///
/// `Thick` modes cover 4 depth slices per micro tile; `Thin2` and `Thin4`
/// macro tiles are 2 and 4 times taller (and narrower) than `Thin1`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, AllValues)]
#[repr(u32)]
pub enum TileMode {
    /// Rows packed with no alignment.
    LinearGeneral = 0,
    /// Rows aligned to the pipe interleave.
    LinearAligned = 1,
    /// Micro tiled, 1 slice per micro tile.
    Tiled1DThin1 = 2,
    /// Micro tiled, 4 slices per micro tile.
    Tiled1DThick = 3,
    /// Macro tiled.
    Tiled2DThin1 = 4,
    /// Macro tiled, aspect ratio 2.
    Tiled2DThin2 = 5,
    /// Macro tiled, aspect ratio 4.
    Tiled2DThin4 = 6,
    /// Macro tiled, 4 slices per micro tile.
    Tiled2DThick = 7,
    /// Bank swapped [`TileMode::Tiled2DThin1`].
    Tiled2BThin1 = 8,
    /// Bank swapped [`TileMode::Tiled2DThin2`].
    Tiled2BThin2 = 9,
    /// Bank swapped [`TileMode::Tiled2DThin4`].
    Tiled2BThin4 = 10,
    /// Bank swapped [`TileMode::Tiled2DThick`].
    Tiled2BThick = 11,
    /// Macro tiled with per-slice rotation suited to volumes.
    Tiled3DThin1 = 12,
    /// [`TileMode::Tiled3DThin1`] with 4 slices per micro tile.
    Tiled3DThick = 13,
    /// Bank swapped [`TileMode::Tiled3DThin1`].
    Tiled3BThin1 = 14,
    /// Bank swapped [`TileMode::Tiled3DThick`].
    Tiled3BThick = 15,
}

impl TileMode {
    /// Rows stored one after another, no tiling.
    #[inline]
    pub const fn is_linear(self) -> bool {
        matches!(self, TileMode::LinearGeneral | TileMode::LinearAligned)
    }

    /// 1D tiled: micro tiles only.
    #[inline]
    pub const fn is_micro_tiled(self) -> bool {
        matches!(self, TileMode::Tiled1DThin1 | TileMode::Tiled1DThick)
    }

    /// 2D or 3D tiled: micro tiles interleaved across pipes and banks.
    #[inline]
    pub const fn is_macro_tiled(self) -> bool {
        self as u32 >= TileMode::Tiled2DThin1 as u32
    }

    /// Number of depth slices covered by one micro tile.
    #[inline]
    pub const fn thickness(self) -> u32 {
        match self {
            TileMode::Tiled1DThick
            | TileMode::Tiled2DThick
            | TileMode::Tiled2BThick
            | TileMode::Tiled3DThick
            | TileMode::Tiled3BThick => 4,
            _ => 1,
        }
    }

    /// `true` for modes covering 4 slices per micro tile.
    #[inline]
    pub const fn is_thick(self) -> bool {
        self.thickness() > 1
    }

    /// `true` for the `2B`/`3B` modes.
    #[inline]
    pub const fn is_bank_swapped(self) -> bool {
        matches!(
            self,
            TileMode::Tiled2BThin1
                | TileMode::Tiled2BThin2
                | TileMode::Tiled2BThin4
                | TileMode::Tiled2BThick
                | TileMode::Tiled3BThin1
                | TileMode::Tiled3BThick
        )
    }

    /// `true` for the `3D`/`3B` modes, which rotate pipes rather than banks per slice.
    #[inline]
    pub const fn is_3d(self) -> bool {
        self as u32 >= TileMode::Tiled3DThin1 as u32
    }

    /// Height to width ratio of a macro tile relative to `Thin1`.
    #[inline]
    pub const fn macro_aspect_ratio(self) -> u32 {
        match self {
            TileMode::Tiled2DThin2 | TileMode::Tiled2BThin2 => 2,
            TileMode::Tiled2DThin4 | TileMode::Tiled2BThin4 => 4,
            _ => 1,
        }
    }

    /// The same layout without bank swapping.
    #[inline]
    pub const fn without_bank_swap(self) -> TileMode {
        match self {
            TileMode::Tiled2BThin1 => TileMode::Tiled2DThin1,
            TileMode::Tiled2BThin2 => TileMode::Tiled2DThin2,
            TileMode::Tiled2BThin4 => TileMode::Tiled2DThin4,
            TileMode::Tiled2BThick => TileMode::Tiled2DThick,
            TileMode::Tiled3BThin1 => TileMode::Tiled3DThin1,
            TileMode::Tiled3BThick => TileMode::Tiled3DThick,
            other => other,
        }
    }
}

impl TryFrom<u32> for TileMode {
    type Error = ConfigError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        TileMode::all_values()
            .get(value as usize)
            .copied()
            .ok_or(ConfigError::InvalidTileMode(value))
    }
}

impl From<TileMode> for u32 {
    #[inline]
    fn from(mode: TileMode) -> Self {
        mode as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn raw_values_round_trip() {
        for (index, mode) in TileMode::all_values().iter().enumerate() {
            assert_eq!(u32::from(*mode), index as u32);
            assert_eq!(TileMode::try_from(index as u32), Ok(*mode));
        }
    }

    #[rstest]
    #[case(16)]
    #[case(0x20)]
    #[case(u32::MAX)]
    fn rejects_unknown_raw_values(#[case] raw: u32) {
        assert_eq!(
            TileMode::try_from(raw),
            Err(ConfigError::InvalidTileMode(raw))
        );
    }

    #[test]
    fn classifies_every_mode_exactly_once() {
        for mode in TileMode::all_values().iter() {
            let classes = [mode.is_linear(), mode.is_micro_tiled(), mode.is_macro_tiled()];
            assert_eq!(
                classes.iter().filter(|x| **x).count(),
                1,
                "{mode:?} must be exactly one of linear, micro or macro tiled"
            );
        }
    }

    #[rstest]
    #[case(TileMode::Tiled1DThick, 4, 1)]
    #[case(TileMode::Tiled2DThin1, 1, 1)]
    #[case(TileMode::Tiled2DThin2, 1, 2)]
    #[case(TileMode::Tiled2BThin4, 1, 4)]
    #[case(TileMode::Tiled3BThick, 4, 1)]
    #[case(TileMode::LinearAligned, 1, 1)]
    fn reports_thickness_and_aspect(
        #[case] mode: TileMode,
        #[case] thickness: u32,
        #[case] aspect: u32,
    ) {
        assert_eq!(mode.thickness(), thickness);
        assert_eq!(mode.macro_aspect_ratio(), aspect);
    }

    #[test]
    fn removing_bank_swap_keeps_shape() {
        for mode in TileMode::all_values().iter() {
            let plain = mode.without_bank_swap();
            assert!(!plain.is_bank_swapped());
            assert_eq!(plain.thickness(), mode.thickness());
            assert_eq!(plain.macro_aspect_ratio(), mode.macro_aspect_ratio());
            assert_eq!(plain.is_3d(), mode.is_3d());
            assert_eq!(plain == *mode, !mode.is_bank_swapped());
        }
    }
}
