//! Result of one lazy list measurement pass.
//!
//! [`LazyListMeasureResult`] is what the host places and what the next frame
//! starts from. [`LazyListLayoutInfo`] is the read-only view handed to scroll
//! state holders and scroll-to-index logic.

use std::ops::RangeInclusive;

use relist_ui_layout::{
    Constraints, HorizontalAlignment, LayoutDirection, Orientation, Placement, Size,
    VerticalAlignment,
};

use super::lazy_list_measure::LazyListMeasureConfig;
use super::lazy_list_measured_item::{ItemPlacementScope, LazyListMeasuredItem};
use super::sticky_items::StickyHeader;

/// Information about a single visible item in a lazy list.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LazyListItemInfo {
    /// Index of the item in the data source.
    pub index: usize,

    /// Key of the item.
    pub key: u64,

    /// Content type of the item, if any.
    pub content_type: Option<u64>,

    /// Offset of the item from the start of the list content.
    pub offset: f32,

    /// Size of the item in the main axis.
    pub size: f32,
}

/// Layout information exposed after a measurement pass.
pub trait LazyListLayoutInfo {
    /// Visible items in main axis order. A pinned sticky item comes last.
    fn visible_items_info(&self) -> Vec<LazyListItemInfo>;

    /// Start of the viewport in item offset space: minus the before padding.
    fn viewport_start_offset(&self) -> f32;

    /// End of the viewport in item offset space, after padding included.
    fn viewport_end_offset(&self) -> f32;

    /// Size of the list layout, paddings included.
    fn viewport_size(&self) -> Size;

    fn total_items_count(&self) -> usize;

    fn orientation(&self) -> Orientation;

    fn reverse_layout(&self) -> bool;

    fn before_content_padding(&self) -> f32;

    fn after_content_padding(&self) -> f32;

    fn main_axis_item_spacing(&self) -> f32;

    /// Returns the visible item with `index`, if it is visible.
    fn find_visible_item(&self, index: usize) -> Option<LazyListItemInfo> {
        self.visible_items_info()
            .into_iter()
            .find(|item| item.index == index)
    }

    /// Smallest and largest visible index.
    fn visible_index_range(&self) -> Option<RangeInclusive<usize>> {
        let items = self.visible_items_info();
        let first = items.iter().map(|item| item.index).min()?;
        let last = items.iter().map(|item| item.index).max()?;
        Some(first..=last)
    }
}

/// Result of measuring a lazy list.
///
/// Produced once per pass. The owning state may still shift it through
/// [`try_apply_scroll_without_remeasure`](Self::try_apply_scroll_without_remeasure)
/// before anyone else reads it.
#[derive(Clone, Debug)]
pub struct LazyListMeasureResult {
    /// Window items, extras and the sticky item, in placement order.
    pub(crate) positioned_items: Vec<LazyListMeasuredItem>,
    /// Inclusive index bounds of the visible window.
    pub(crate) visible_bounds: Option<(usize, usize)>,
    pub(crate) first_visible_item_index: usize,
    pub(crate) first_visible_item_scroll_offset: f32,
    pub(crate) first_visible_item_key: Option<u64>,
    /// Spacing-inclusive size of the first visible item.
    pub(crate) first_visible_item_extent: f32,
    pub(crate) can_scroll_forward: bool,
    pub(crate) consumed_scroll: f32,
    pub(crate) requested_scroll: f32,
    pub(crate) viewport_start_offset: f32,
    pub(crate) viewport_end_offset: f32,
    pub(crate) total_items_count: usize,
    pub(crate) orientation: Orientation,
    pub(crate) reverse_layout: bool,
    pub(crate) before_content_padding: f32,
    pub(crate) after_content_padding: f32,
    pub(crate) spacing: f32,
    pub(crate) remeasure_needed: bool,
    pub(crate) sticky_header: Option<StickyHeader>,
    /// Incoming constraints of the pass.
    pub(crate) constraints: Constraints,
    /// Constraints every item was measured with.
    pub(crate) child_constraints: Constraints,
    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) measured_items_count: usize,
    pub(crate) layout_direction: LayoutDirection,
    pub(crate) horizontal_alignment: HorizontalAlignment,
    pub(crate) vertical_alignment: VerticalAlignment,
}

impl LazyListMeasureResult {
    /// Result for an empty data set, sized to the minimum constraints.
    pub(crate) fn empty(
        constraints: Constraints,
        child_constraints: Constraints,
        config: &LazyListMeasureConfig,
        main_axis_available_size: f32,
        requested_scroll: f32,
    ) -> Self {
        Self {
            positioned_items: Vec::new(),
            visible_bounds: None,
            first_visible_item_index: 0,
            first_visible_item_scroll_offset: 0.0,
            first_visible_item_key: None,
            first_visible_item_extent: 0.0,
            can_scroll_forward: false,
            consumed_scroll: 0.0,
            requested_scroll,
            viewport_start_offset: -config.before_content_padding,
            viewport_end_offset: main_axis_available_size + config.after_content_padding,
            total_items_count: 0,
            orientation: config.orientation,
            reverse_layout: config.reverse_layout,
            before_content_padding: config.before_content_padding,
            after_content_padding: config.after_content_padding,
            spacing: config.spacing,
            remeasure_needed: false,
            sticky_header: None,
            constraints,
            child_constraints,
            width: constraints.min_width,
            height: constraints.min_height,
            measured_items_count: 0,
            layout_direction: config.layout_direction,
            horizontal_alignment: config.horizontal_alignment,
            vertical_alignment: config.vertical_alignment,
        }
    }

    fn is_visible(&self, item: &LazyListMeasuredItem) -> bool {
        item.non_scrollable
            || self
                .visible_bounds
                .is_some_and(|(first, last)| (first..=last).contains(&item.index))
    }

    /// Window items plus the sticky item, if any.
    pub fn visible_items(&self) -> impl Iterator<Item = &LazyListMeasuredItem> {
        self.positioned_items
            .iter()
            .filter(move |item| self.is_visible(item))
    }

    /// Every item to place: the window, extras and the sticky item.
    pub fn positioned_items(&self) -> &[LazyListMeasuredItem] {
        &self.positioned_items
    }

    pub fn first_visible_item_index(&self) -> usize {
        self.first_visible_item_index
    }

    pub fn first_visible_item_scroll_offset(&self) -> f32 {
        self.first_visible_item_scroll_offset
    }

    pub fn first_visible_item_key(&self) -> Option<u64> {
        self.first_visible_item_key
    }

    pub fn can_scroll_forward(&self) -> bool {
        self.can_scroll_forward
    }

    pub fn can_scroll_backward(&self) -> bool {
        self.first_visible_item_index > 0 || self.first_visible_item_scroll_offset > 0.0
    }

    /// Scroll actually applied by this result.
    pub fn consumed_scroll(&self) -> f32 {
        self.consumed_scroll
    }

    /// Scroll requested for this result.
    pub fn requested_scroll(&self) -> f32 {
        self.requested_scroll
    }

    /// Part of the request that could not be applied.
    pub fn unconsumed_scroll(&self) -> f32 {
        self.requested_scroll - self.consumed_scroll
    }

    /// Set when items were measured only to be dropped; a follow-up pass is due.
    pub fn remeasure_needed(&self) -> bool {
        self.remeasure_needed
    }

    pub fn constraints(&self) -> Constraints {
        self.constraints
    }

    pub fn child_constraints(&self) -> Constraints {
        self.child_constraints
    }

    /// Final layout width, paddings included.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Final layout height, paddings included.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Number of distinct items the pass measured.
    pub fn measured_items_count(&self) -> usize {
        self.measured_items_count
    }

    /// True when the result was measured for the same inputs.
    pub fn is_compatible_with(&self, constraints: &Constraints, items_count: usize) -> bool {
        self.constraints == *constraints && self.total_items_count == items_count
    }

    /// Main axis position of window item `index` before pinning, with its
    /// spacing-inclusive size.
    fn scroll_edge(&self, index: usize) -> Option<(f32, f32)> {
        let item = self.positioned_items.iter().find(|item| item.index == index)?;
        let offset = match self.sticky_header {
            Some(sticky) if item.non_scrollable => sticky.natural_offset,
            _ => item.offset,
        };
        Some((offset, item.main_axis_size_with_spacing))
    }

    /// Shifts the result by `delta` when that cannot change which items are
    /// composed. Returns false when a full pass is needed.
    ///
    /// A positive delta scrolls forward. A pinned sticky header keeps its
    /// pin and is only pushed by the next header.
    pub fn try_apply_scroll_without_remeasure(&mut self, delta: f32) -> bool {
        let Some((first_index, last_index)) = self.visible_bounds else {
            return false;
        };
        if self.remeasure_needed {
            return false;
        }
        if delta == 0.0 {
            self.consumed_scroll = 0.0;
            self.requested_scroll = 0.0;
            return true;
        }
        let new_offset = self.first_visible_item_scroll_offset + delta;
        if !(0.0..self.first_visible_item_extent).contains(&new_offset) {
            return false;
        }

        let (Some((first_offset, first_size)), Some((last_offset, last_size))) =
            (self.scroll_edge(first_index), self.scroll_edge(last_index))
        else {
            return false;
        };
        let can_apply = if delta > 0.0 {
            let to_first_item_change = first_offset + first_size - self.viewport_start_offset;
            let to_last_item_change = last_offset + last_size - self.viewport_end_offset;
            to_first_item_change.min(to_last_item_change) > delta
        } else {
            let to_first_item_change = self.viewport_start_offset - first_offset;
            let to_last_item_change = self.viewport_end_offset - last_offset;
            to_first_item_change.min(to_last_item_change) > -delta
        };
        if !can_apply {
            log::trace!("lazy list: fast path rejected for delta {}", delta);
            return false;
        }

        self.first_visible_item_scroll_offset = new_offset;
        for item in self.positioned_items.iter_mut().filter(|item| !item.non_scrollable) {
            item.apply_scroll_delta(delta);
        }
        if let Some(sticky) = self.sticky_header.as_mut() {
            sticky.natural_offset -= delta;
            let sticky = *sticky;
            if let Some(position) = self.positioned_items.iter().position(|item| item.non_scrollable) {
                let size = self.positioned_items[position].main_axis_size_with_spacing;
                let offset = sticky.pinned_offset(&self.positioned_items, size);
                self.positioned_items[position].position(offset);
            }
        }
        self.consumed_scroll = delta;
        self.requested_scroll = delta;
        if !self.can_scroll_forward && delta < 0.0 {
            self.can_scroll_forward = true;
        }
        true
    }

    /// Placements for every positioned item in layout coordinates.
    ///
    /// The sticky item comes last so the host paints it above its siblings.
    pub fn placements(&self) -> Vec<Placement> {
        let (main_axis_layout_size, cross_axis_layout_size) = match self.orientation {
            Orientation::Vertical => (self.height, self.width),
            Orientation::Horizontal => (self.width, self.height),
        };
        // A right to left horizontal list runs from the right edge.
        let mirrored = self.orientation == Orientation::Horizontal
            && self.layout_direction == LayoutDirection::Rtl;
        let scope = ItemPlacementScope {
            orientation: self.orientation,
            reverse_layout: self.reverse_layout != mirrored,
            main_axis_layout_size,
            cross_axis_layout_size,
            before_content_padding: self.before_content_padding,
            layout_direction: self.layout_direction,
            horizontal_alignment: self.horizontal_alignment,
            vertical_alignment: self.vertical_alignment,
        };
        let mut placements = Vec::with_capacity(self.positioned_items.len());
        for item in &self.positioned_items {
            item.place(&scope, &mut placements);
        }
        placements
    }
}

impl LazyListLayoutInfo for LazyListMeasureResult {
    fn visible_items_info(&self) -> Vec<LazyListItemInfo> {
        self.visible_items()
            .map(LazyListMeasuredItem::to_item_info)
            .collect()
    }

    fn viewport_start_offset(&self) -> f32 {
        self.viewport_start_offset
    }

    fn viewport_end_offset(&self) -> f32 {
        self.viewport_end_offset
    }

    fn viewport_size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    fn total_items_count(&self) -> usize {
        self.total_items_count
    }

    fn orientation(&self) -> Orientation {
        self.orientation
    }

    fn reverse_layout(&self) -> bool {
        self.reverse_layout
    }

    fn before_content_padding(&self) -> f32 {
        self.before_content_padding
    }

    fn after_content_padding(&self) -> f32 {
        self.after_content_padding
    }

    fn main_axis_item_spacing(&self) -> f32 {
        self.spacing
    }
}
