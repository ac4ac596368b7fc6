//! Cross-axis alignment of list items

use crate::LayoutDirection;

/// Offset of a `child`-sized box inside `available` space, where `fraction`
/// is 0 at the leading edge and 1 at the trailing edge.
///
/// Never negative: an oversized child starts at the leading edge.
#[inline]
fn aligned_offset(available: f32, child: f32, fraction: f32) -> f32 {
    ((available - child) * fraction).max(0.0)
}

/// Alignment along the horizontal axis. Used by vertical lists.
///
/// `Start` and `End` follow the reading direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HorizontalAlignment {
    #[default]
    Start,
    CenterHorizontally,
    End,
}

impl HorizontalAlignment {
    /// X offset of a `child`-wide item in an `available`-wide list.
    pub fn align(self, available: f32, child: f32, layout_direction: LayoutDirection) -> f32 {
        let fraction = match (self, layout_direction) {
            (Self::CenterHorizontally, _) => 0.5,
            (Self::Start, LayoutDirection::Ltr) | (Self::End, LayoutDirection::Rtl) => 0.0,
            (Self::End, LayoutDirection::Ltr) | (Self::Start, LayoutDirection::Rtl) => 1.0,
        };
        aligned_offset(available, child, fraction)
    }
}

/// Alignment along the vertical axis. Used by horizontal lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VerticalAlignment {
    #[default]
    Top,
    CenterVertically,
    Bottom,
}

impl VerticalAlignment {
    /// Y offset of a `child`-tall item in an `available`-tall list.
    pub fn align(self, available: f32, child: f32) -> f32 {
        let fraction = match self {
            Self::Top => 0.0,
            Self::CenterVertically => 0.5,
            Self::Bottom => 1.0,
        };
        aligned_offset(available, child, fraction)
    }
}
