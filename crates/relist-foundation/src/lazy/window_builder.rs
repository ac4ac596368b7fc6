//! Visible window construction.
//!
//! Starting from the scroll anchor and the requested scroll delta, grows the
//! window of measured items backward and forward until the viewport and its
//! content padding are covered, keeping track of how much of the delta could
//! actually be applied.

use std::collections::VecDeque;

use relist_ui_layout::LARGE_DIMENSION;

use super::item_provider::{LazyLayoutItemProvider, LazyListMeasuredItemProvider};
use super::lazy_list_measured_item::LazyListMeasuredItem;
use super::lazy_list_state::ScrollAnchor;

/// Inputs of one window build.
#[derive(Clone, Copy, Debug)]
pub(crate) struct WindowParams {
    pub items_count: usize,
    /// Main axis space between the content paddings. May be negative.
    pub main_axis_available_size: f32,
    pub before_content_padding: f32,
    pub after_content_padding: f32,
    pub spacing: f32,
    pub anchor: ScrollAnchor,
    /// Requested scroll; positive scrolls forward.
    pub scroll_delta: f32,
}

/// The measured window plus the bookkeeping the rest of the pass needs.
#[derive(Clone, Debug)]
pub(crate) struct MeasuredWindow {
    /// Contiguous run of measured items, unpositioned.
    pub items: VecDeque<LazyListMeasuredItem>,
    /// Position of the first window item relative to the content start.
    pub items_scroll_offset: f32,
    /// Anchor after skipping items that only cover the before-padding band.
    pub first_visible: ScrollAnchor,
    /// Position of `first_visible.index` inside `items`.
    pub first_visible_position: usize,
    pub consumed_scroll: f32,
    /// Main axis cursor after the last window item.
    pub final_main_axis_offset: f32,
    /// Index right after the last item the forward walk measured.
    pub next_index: usize,
    pub remeasure_needed: bool,
}

impl MeasuredWindow {
    pub fn first_index(&self) -> usize {
        self.items.front().map_or(0, |item| item.index)
    }

    pub fn last_index(&self) -> usize {
        self.items.back().map_or(0, |item| item.index)
    }
}

/// Builds the visible window. `params.items_count` must be positive.
pub(crate) fn build_window<P>(
    params: &WindowParams,
    provider: &mut LazyListMeasuredItemProvider<'_, P>,
) -> MeasuredWindow
where
    P: LazyLayoutItemProvider + ?Sized,
{
    let items_count = params.items_count;
    let before = params.before_content_padding;
    let after = params.after_content_padding;
    assert!(
        before >= 0.0,
        "negative before content padding ({before})"
    );
    assert!(after >= 0.0, "negative after content padding ({after})");
    assert!(items_count > 0, "window requires at least one item");

    let mut first_index = params.anchor.index;
    let mut first_offset = params.anchor.scroll_offset;
    if first_index >= items_count {
        // The data set shrank below the anchor.
        first_index = items_count - 1;
        first_offset = 0.0;
    }

    let requested = params.scroll_delta;
    let mut scroll_delta = requested;
    first_offset += requested;

    // Nothing before the first item.
    if first_index == 0 && first_offset < 0.0 {
        scroll_delta -= first_offset;
        first_offset = 0.0;
    }

    let mut items: VecDeque<LazyListMeasuredItem> = VecDeque::new();

    // Negative spacing lets the previous item overlap the first one, so it
    // has to be composed too.
    let min_offset = -before + params.spacing.min(0.0);
    let max_offset = params.main_axis_available_size;

    first_offset += min_offset;

    while first_offset < 0.0 && first_index > 0 {
        let previous = first_index - 1;
        let item = provider.get_and_measure(previous);
        first_offset += item.main_axis_size_with_spacing;
        items.push_front(item);
        first_index = previous;
    }

    if first_offset < min_offset {
        let not_consumed = min_offset - first_offset;
        first_offset = min_offset;
        scroll_delta += not_consumed;
    }

    first_offset -= min_offset;

    let mut index = first_index;
    let max_main_axis = (max_offset + after).max(0.0);
    let mut current_main_axis_offset = -first_offset;
    let mut remeasure_needed = false;

    // Items composed while walking backward may already lie past the end.
    let mut position = 0;
    while position < items.len() {
        if current_main_axis_offset >= max_main_axis {
            items.remove(position);
            remeasure_needed = true;
        } else {
            current_main_axis_offset = (current_main_axis_offset
                + items[position].main_axis_size_with_spacing)
                .min(LARGE_DIMENSION);
            index += 1;
            position += 1;
        }
    }

    // Keep at least one item even when the paddings eat the whole viewport.
    while index < items_count
        && (current_main_axis_offset < max_main_axis
            || current_main_axis_offset <= 0.0
            || items.is_empty())
    {
        let item = provider.get_and_measure(index);
        current_main_axis_offset =
            (current_main_axis_offset + item.main_axis_size_with_spacing).min(LARGE_DIMENSION);

        if current_main_axis_offset <= min_offset && index != items_count - 1 {
            // Entirely before the viewport: the anchor moves past it.
            first_index = index + 1;
            first_offset -= item.main_axis_size_with_spacing;
            remeasure_needed = true;
        } else {
            items.push_back(item);
        }

        index += 1;
    }

    // Ran out of items before the viewport was filled: scroll back.
    if current_main_axis_offset < max_offset {
        let to_scroll_back = max_offset - current_main_axis_offset;
        first_offset -= to_scroll_back;
        current_main_axis_offset += to_scroll_back;
        while first_offset < before && first_index > 0 {
            let previous = first_index - 1;
            let item = provider.get_and_measure(previous);
            first_offset += item.main_axis_size_with_spacing;
            items.push_front(item);
            first_index = previous;
        }
        scroll_delta -= to_scroll_back;
        if first_offset < 0.0 {
            scroll_delta -= first_offset;
            current_main_axis_offset += first_offset;
            first_offset = 0.0;
        }
    }

    let consumed_scroll = resolve_consumed_scroll(requested, scroll_delta);

    assert!(
        first_offset >= 0.0,
        "negative first item scroll offset ({first_offset})"
    );
    let items_scroll_offset = -first_offset;

    // Items fully inside the before-padding band don't count as first visible.
    let mut first_visible_offset = first_offset;
    let mut first_visible_position = 0;
    if before > 0.0 || params.spacing < 0.0 {
        for (position, item) in items.iter().enumerate() {
            let size = item.main_axis_size_with_spacing;
            if first_visible_offset != 0.0
                && size <= first_visible_offset
                && position + 1 != items.len()
            {
                first_visible_offset -= size;
                first_visible_position = position + 1;
            } else {
                break;
            }
        }
    }

    let first_visible_index = items
        .get(first_visible_position)
        .map_or(first_index, |item| item.index);

    MeasuredWindow {
        items,
        items_scroll_offset,
        first_visible: ScrollAnchor::new(first_visible_index, first_visible_offset),
        first_visible_position,
        consumed_scroll,
        final_main_axis_offset: current_main_axis_offset,
        next_index: index,
        remeasure_needed,
    }
}

/// Picks the scroll to report as consumed.
///
/// The bookkeeping value wins when it goes the same way as the request and is
/// not larger. Otherwise items changed size under the anchor and the request
/// is reported as fully consumed.
fn resolve_consumed_scroll(requested: f32, bookkeeping: f32) -> f32 {
    if bookkeeping == 0.0 {
        return 0.0;
    }
    let same_direction = (requested > 0.0) == (bookkeeping > 0.0) && requested != 0.0;
    if same_direction && requested.abs() >= bookkeeping.abs() {
        bookkeeping
    } else {
        requested
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_helpers::TestItems;
    use super::*;
    use relist_ui_layout::{Constraints, Orientation};

    fn build(
        items: &mut TestItems,
        viewport: f32,
        anchor: ScrollAnchor,
        delta: f32,
    ) -> MeasuredWindow {
        build_with(items, viewport, 0.0, 0.0, 0.0, anchor, delta)
    }

    fn build_with(
        items: &mut TestItems,
        viewport: f32,
        before: f32,
        after: f32,
        spacing: f32,
        anchor: ScrollAnchor,
        delta: f32,
    ) -> MeasuredWindow {
        let params = WindowParams {
            items_count: items.sizes.len(),
            main_axis_available_size: viewport - before - after,
            before_content_padding: before,
            after_content_padding: after,
            spacing,
            anchor,
            scroll_delta: delta,
        };
        let constraints = Orientation::Vertical.child_constraints(&Constraints::loose(100.0, viewport));
        let mut provider =
            LazyListMeasuredItemProvider::new(items, constraints, Orientation::Vertical, spacing);
        build_window(&params, &mut provider)
    }

    fn indices(window: &MeasuredWindow) -> Vec<usize> {
        window.items.iter().map(|item| item.index).collect()
    }

    #[test]
    fn fills_viewport_from_start() {
        let mut items = TestItems::uniform(5, 100.0);
        let window = build(&mut items, 250.0, ScrollAnchor::default(), 0.0);

        assert_eq!(indices(&window), vec![0, 1, 2]);
        assert_eq!(window.first_visible, ScrollAnchor::new(0, 0.0));
        assert_eq!(window.consumed_scroll, 0.0);
        assert_eq!(window.next_index, 3);
        assert!(!window.remeasure_needed);
    }

    #[test]
    fn forward_scroll_drops_passed_items() {
        let mut items = TestItems::uniform(5, 100.0);
        let window = build(&mut items, 250.0, ScrollAnchor::default(), 120.0);

        assert_eq!(indices(&window), vec![1, 2, 3]);
        assert_eq!(window.first_visible, ScrollAnchor::new(1, 20.0));
        assert_eq!(window.items_scroll_offset, -20.0);
        assert_eq!(window.consumed_scroll, 120.0);
        assert!(window.remeasure_needed);
    }

    #[test]
    fn backward_scroll_composes_previous_items() {
        let mut items = TestItems::uniform(10, 100.0);
        let window = build(&mut items, 250.0, ScrollAnchor::new(4, 10.0), -150.0);

        assert_eq!(window.first_visible, ScrollAnchor::new(2, 60.0));
        // Item 5 starts at 240, inside the 250px viewport.
        assert_eq!(indices(&window), vec![2, 3, 4, 5]);
        assert_eq!(window.consumed_scroll, -150.0);
    }

    #[test]
    fn backward_scroll_stops_at_start() {
        let mut items = TestItems::uniform(10, 100.0);
        let window = build(&mut items, 250.0, ScrollAnchor::new(1, 30.0), -500.0);

        assert_eq!(window.first_visible, ScrollAnchor::new(0, 0.0));
        assert_eq!(window.consumed_scroll, -130.0);
    }

    #[test]
    fn forward_scroll_stops_at_end() {
        let mut items = TestItems::uniform(5, 100.0);
        let window = build(&mut items, 250.0, ScrollAnchor::default(), 1000.0);

        assert_eq!(window.consumed_scroll, 250.0);
        assert_eq!(window.first_visible, ScrollAnchor::new(2, 50.0));
        assert_eq!(indices(&window), vec![2, 3, 4]);
        assert_eq!(window.final_main_axis_offset, 250.0);
        assert_eq!(window.next_index, 5);
    }

    #[test]
    fn shrunk_data_set_resets_anchor_offset() {
        let mut items = TestItems::uniform(3, 100.0);
        let window = build(&mut items, 100.0, ScrollAnchor::new(8, 40.0), 0.0);

        assert_eq!(window.first_visible, ScrollAnchor::new(2, 0.0));
        assert_eq!(indices(&window), vec![2]);
    }

    #[test]
    fn single_oversized_item_absorbs_scroll_within_bounds() {
        let mut items = TestItems::uniform(1, 1000.0);
        let window = build(&mut items, 250.0, ScrollAnchor::default(), 5000.0);

        assert_eq!(indices(&window), vec![0]);
        assert_eq!(window.first_visible, ScrollAnchor::new(0, 750.0));
        assert_eq!(window.consumed_scroll, 750.0);
    }

    #[test]
    fn before_padding_band_is_composed_but_not_first_visible() {
        let mut items = TestItems::uniform(10, 50.0);
        let window = build_with(&mut items, 300.0, 60.0, 0.0, 0.0, ScrollAnchor::new(3, 0.0), 0.0);

        // Items 1 and 2 sit in the 60px padding band.
        assert_eq!(window.items.front().map(|item| item.index), Some(1));
        assert_eq!(window.first_visible, ScrollAnchor::new(3, 0.0));
        assert_eq!(window.items_scroll_offset, -100.0);
    }

    #[test]
    fn negative_spacing_terminates_and_composes_overlap() {
        let mut items = TestItems::uniform(20, 40.0);
        let window = build_with(&mut items, 100.0, 0.0, 0.0, -10.0, ScrollAnchor::new(5, 0.0), 0.0);

        // The previous item overlaps the first visible one by 10px.
        assert_eq!(window.items.front().map(|item| item.index), Some(4));
        assert_eq!(window.first_visible, ScrollAnchor::new(5, 0.0));
        assert!(!window.items.is_empty());
    }

    #[test]
    fn consumed_scroll_keeps_direction_of_request() {
        assert_eq!(resolve_consumed_scroll(120.0, 120.0), 120.0);
        assert_eq!(resolve_consumed_scroll(-50.0, -20.0), -20.0);
        assert_eq!(resolve_consumed_scroll(30.0, 0.0), 0.0);
        assert_eq!(resolve_consumed_scroll(30.0, 45.0), 30.0);
        assert_eq!(resolve_consumed_scroll(30.0, -5.0), 30.0);
        assert_eq!(resolve_consumed_scroll(0.0, 12.0), 0.0);
    }
}
