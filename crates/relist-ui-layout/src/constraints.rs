//! Layout constraints system

/// Sentinel for an unbounded maximum. Never valid as a minimum.
pub const UNBOUNDED: f32 = f32::INFINITY;

/// Largest finite dimension used when accumulating offsets.
///
/// Lists measured under unbounded constraints clamp running sums to this value
/// instead of letting them reach infinity.
pub const LARGE_DIMENSION: f32 = ((1 << 24) - 1) as f32;

/// Constraints used during layout measurement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Constraints {
    pub min_width: f32,
    pub max_width: f32,
    pub min_height: f32,
    pub max_height: f32,
}

impl Constraints {
    /// Creates constraints, panicking on `min > max`, negative or unbounded minimums.
    pub fn new(min_width: f32, max_width: f32, min_height: f32, max_height: f32) -> Self {
        let constraints = Self {
            min_width,
            max_width,
            min_height,
            max_height,
        };
        constraints.assert_valid();
        constraints
    }

    /// Creates constraints with exact width and height.
    pub fn tight(width: f32, height: f32) -> Self {
        Self::new(width, width, height, height)
    }

    /// Creates constraints with loose bounds (min = 0, max = given values).
    pub fn loose(max_width: f32, max_height: f32) -> Self {
        Self::new(0.0, max_width, 0.0, max_height)
    }

    /// Panics if the constraints break the min/max invariants.
    pub fn assert_valid(&self) {
        assert!(
            self.min_width >= 0.0 && self.min_height >= 0.0,
            "constraints minimums must be non-negative: {self:?}"
        );
        assert!(
            self.min_width.is_finite() && self.min_height.is_finite(),
            "constraints minimums must be bounded: {self:?}"
        );
        assert!(
            self.min_width <= self.max_width && self.min_height <= self.max_height,
            "constraints min must not exceed max: {self:?}"
        );
    }

    /// Returns true if these constraints have a single size that satisfies them.
    pub fn is_tight(&self) -> bool {
        self.min_width == self.max_width && self.min_height == self.max_height
    }

    /// Returns true if the width is bounded (max_width is finite).
    #[inline]
    pub fn has_bounded_width(&self) -> bool {
        self.max_width.is_finite()
    }

    /// Returns true if the height is bounded (max_height is finite).
    #[inline]
    pub fn has_bounded_height(&self) -> bool {
        self.max_height.is_finite()
    }

    #[inline]
    pub fn constrain_width(&self, width: f32) -> f32 {
        width.clamp(self.min_width, self.max_width)
    }

    #[inline]
    pub fn constrain_height(&self, height: f32) -> f32 {
        height.clamp(self.min_height, self.max_height)
    }

    /// Constrains the provided width and height to fit within these constraints.
    pub fn constrain(&self, width: f32, height: f32) -> (f32, f32) {
        (self.constrain_width(width), self.constrain_height(height))
    }

    /// Shrinks both bounds by the given insets, never below zero.
    ///
    /// Used to strip content padding before measuring children.
    pub fn deflate(self, horizontal: f32, vertical: f32) -> Self {
        Self {
            min_width: (self.min_width - horizontal).max(0.0),
            max_width: (self.max_width - horizontal).max(0.0),
            min_height: (self.min_height - vertical).max(0.0),
            max_height: (self.max_height - vertical).max(0.0),
        }
    }
}
