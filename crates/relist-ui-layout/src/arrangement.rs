//! Arrangement strategies for distributing children along an axis

/// Reading direction of horizontal content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutDirection {
    #[default]
    Ltr,
    Rtl,
}

/// Trait implemented by arrangement strategies that distribute children on an axis.
///
/// `direction` only matters for horizontal arrangements; vertical callers pass
/// [`LayoutDirection::Ltr`].
pub trait Arrangement {
    /// Computes the position for each child given the available space and their sizes.
    fn arrange(
        &self,
        total_size: f32,
        sizes: &[f32],
        direction: LayoutDirection,
        out_positions: &mut [f32],
    );

    /// Fixed gap this arrangement inserts between neighbours.
    fn spacing(&self) -> f32 {
        0.0
    }
}

/// Linear arrangements in the Compose vocabulary.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum LinearArrangement {
    /// Place children consecutively starting from the leading edge.
    #[default]
    Start,
    /// Place children so the last child touches the trailing edge.
    End,
    /// Place children so they are centered as a block.
    Center,
    /// Distribute the remaining space evenly between children.
    SpaceBetween,
    /// Distribute the remaining space before, after, and between children.
    SpaceAround,
    /// Distribute the remaining space before the first child, between children, and after the last child.
    SpaceEvenly,
    /// Insert a fixed amount of space between children.
    SpacedBy(f32),
}

impl LinearArrangement {
    /// Creates an arrangement that inserts a fixed spacing between children.
    pub fn spaced_by(spacing: f32) -> Self {
        Self::SpacedBy(spacing)
    }

    fn fill_positions(start: f32, gap: f32, sizes: &[f32], out_positions: &mut [f32]) {
        let mut cursor = start;
        for (index, (size, position)) in sizes.iter().zip(out_positions.iter_mut()).enumerate() {
            *position = cursor;
            cursor += size;
            if index + 1 < sizes.len() {
                cursor += gap;
            }
        }
    }
}

impl Arrangement for LinearArrangement {
    fn arrange(
        &self,
        total_size: f32,
        sizes: &[f32],
        direction: LayoutDirection,
        out_positions: &mut [f32],
    ) {
        assert_eq!(
            sizes.len(),
            out_positions.len(),
            "arrangement needs one output slot per child"
        );
        if sizes.is_empty() {
            return;
        }

        let children_total: f32 = sizes.iter().copied().sum();
        let remaining = total_size - children_total;

        match *self {
            LinearArrangement::Start => Self::fill_positions(0.0, 0.0, sizes, out_positions),
            LinearArrangement::End => Self::fill_positions(remaining, 0.0, sizes, out_positions),
            LinearArrangement::Center => {
                Self::fill_positions(remaining / 2.0, 0.0, sizes, out_positions)
            }
            LinearArrangement::SpaceBetween => {
                let gap = if sizes.len() <= 1 {
                    0.0
                } else {
                    remaining / (sizes.len() as f32 - 1.0)
                };
                Self::fill_positions(0.0, gap, sizes, out_positions);
            }
            LinearArrangement::SpaceAround => {
                let gap = remaining / sizes.len() as f32;
                Self::fill_positions(gap / 2.0, gap, sizes, out_positions);
            }
            LinearArrangement::SpaceEvenly => {
                let gap = remaining / (sizes.len() as f32 + 1.0);
                Self::fill_positions(gap, gap, sizes, out_positions);
            }
            LinearArrangement::SpacedBy(spacing) => {
                Self::fill_positions(0.0, spacing, sizes, out_positions);
            }
        }

        // Rtl mirrors the whole block: the first child hugs the right edge.
        if direction == LayoutDirection::Rtl {
            for (position, size) in out_positions.iter_mut().zip(sizes) {
                *position = total_size - *position - size;
            }
        }
    }

    fn spacing(&self) -> f32 {
        match *self {
            LinearArrangement::SpacedBy(spacing) => spacing,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
#[path = "tests/arrangement_tests.rs"]
mod tests;
