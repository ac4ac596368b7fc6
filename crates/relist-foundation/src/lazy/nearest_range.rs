//! Sliding index range for key lookups.
//!
//! After a data set mutation the anchor item is looked up by key. Searching
//! near the old position first keeps that lookup bounded for long lists.

use std::ops::Range;

/// Width of one sliding window step.
pub const NEAREST_ITEMS_SLIDING_WINDOW_SIZE: usize = 30;

/// Items searched on each side of the current window step.
pub const NEAREST_ITEMS_EXTRA_COUNT: usize = 100;

/// Range of indices around the first visible item.
///
/// The range only moves when the first visible item crosses a window step,
/// so small scrolls keep the same range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NearestRangeState {
    value: Range<usize>,
    last_first_visible_item: usize,
    sliding_window_size: usize,
    extra_item_count: usize,
}

impl Default for NearestRangeState {
    fn default() -> Self {
        Self::new(0)
    }
}

impl NearestRangeState {
    pub fn new(first_visible_item: usize) -> Self {
        Self::with_sizes(
            first_visible_item,
            NEAREST_ITEMS_SLIDING_WINDOW_SIZE,
            NEAREST_ITEMS_EXTRA_COUNT,
        )
    }

    /// # Panics
    /// If `sliding_window_size` is zero.
    pub fn with_sizes(
        first_visible_item: usize,
        sliding_window_size: usize,
        extra_item_count: usize,
    ) -> Self {
        assert!(sliding_window_size > 0, "sliding window size must be positive");
        Self {
            value: calculate_range(first_visible_item, sliding_window_size, extra_item_count),
            last_first_visible_item: first_visible_item,
            sliding_window_size,
            extra_item_count,
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.value.clone()
    }

    /// Moves the range with the first visible item.
    pub fn update(&mut self, first_visible_item: usize) {
        if first_visible_item == self.last_first_visible_item {
            return;
        }
        self.last_first_visible_item = first_visible_item;
        self.value = calculate_range(
            first_visible_item,
            self.sliding_window_size,
            self.extra_item_count,
        );
    }
}

fn calculate_range(
    first_visible_item: usize,
    sliding_window_size: usize,
    extra_item_count: usize,
) -> Range<usize> {
    let window_start = sliding_window_size.saturating_mul(first_visible_item / sliding_window_size);
    let start = window_start.saturating_sub(extra_item_count);
    let end = window_start
        .saturating_add(sliding_window_size)
        .saturating_add(extra_item_count);
    start..end
}
