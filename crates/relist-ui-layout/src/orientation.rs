use crate::constraints::Constraints;
use crate::core::Size;

/// Scroll direction of a list.
///
/// The main axis is the axis items are stacked along; the cross axis is
/// perpendicular to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Column-like list. Main axis: top to bottom.
    #[default]
    Vertical,

    /// Row-like list. Main axis: start to end.
    Horizontal,
}

impl Orientation {
    /// Returns the opposite orientation.
    #[inline]
    pub fn cross(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(self, Orientation::Vertical)
    }

    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Orientation::Horizontal)
    }

    /// Extent of `size` along the main axis.
    #[inline]
    pub fn main_axis_size_of(self, size: Size) -> f32 {
        match self {
            Orientation::Vertical => size.height,
            Orientation::Horizontal => size.width,
        }
    }

    /// Extent of `size` along the cross axis.
    #[inline]
    pub fn cross_axis_size_of(self, size: Size) -> f32 {
        match self {
            Orientation::Vertical => size.width,
            Orientation::Horizontal => size.height,
        }
    }

    /// Maximum main axis size allowed by `constraints`.
    #[inline]
    pub fn main_axis_max(self, constraints: &Constraints) -> f32 {
        match self {
            Orientation::Vertical => constraints.max_height,
            Orientation::Horizontal => constraints.max_width,
        }
    }

    /// Maximum cross axis size allowed by `constraints`.
    #[inline]
    pub fn cross_axis_max(self, constraints: &Constraints) -> f32 {
        match self {
            Orientation::Vertical => constraints.max_width,
            Orientation::Horizontal => constraints.max_height,
        }
    }

    /// Builds a [`Size`] from main and cross extents.
    #[inline]
    pub fn size(self, main: f32, cross: f32) -> Size {
        match self {
            Orientation::Vertical => Size::new(cross, main),
            Orientation::Horizontal => Size::new(main, cross),
        }
    }

    /// Constraints for one list child: the cross axis is capped by the
    /// list's own cross-axis bound, the main axis is left unbounded.
    pub fn child_constraints(self, constraints: &Constraints) -> Constraints {
        let cross_max = self.cross_axis_max(constraints);
        match self {
            Orientation::Vertical => Constraints::new(0.0, cross_max, 0.0, crate::UNBOUNDED),
            Orientation::Horizontal => Constraints::new(0.0, crate::UNBOUNDED, 0.0, cross_max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn main_and_cross_swap_with_orientation() {
        let size = Size::new(40.0, 90.0);
        assert_eq!(Orientation::Vertical.main_axis_size_of(size), 90.0);
        assert_eq!(Orientation::Vertical.cross_axis_size_of(size), 40.0);
        assert_eq!(Orientation::Horizontal.main_axis_size_of(size), 40.0);
        assert_eq!(Orientation::Horizontal.cross(), Orientation::Vertical);
    }

    #[test]
    fn child_constraints_leave_main_axis_unbounded() {
        let constraints = Constraints::new(0.0, 320.0, 100.0, 480.0);
        let child = Orientation::Vertical.child_constraints(&constraints);
        assert_eq!(child.max_width, 320.0);
        assert!(!child.has_bounded_height());

        let child = Orientation::Horizontal.child_constraints(&constraints);
        assert_eq!(child.max_height, 480.0);
        assert!(!child.has_bounded_width());
    }
}
