//! Item positioning.
//!
//! While the list scrolls, items are stacked from the anchor. When everything
//! fits with room to spare, the configured [`Arrangement`] decides where the
//! items go instead.

use relist_ui_layout::{Arrangement, LayoutDirection};

use super::lazy_list_measured_item::LazyListMeasuredItem;

/// True when the content ends before both the layout and the viewport do.
#[inline]
pub(crate) fn has_spare_space(
    final_main_axis_offset: f32,
    main_axis_layout_size: f32,
    main_axis_available_size: f32,
) -> bool {
    final_main_axis_offset < main_axis_layout_size.min(main_axis_available_size)
}

/// Positions the window with `arrangement`. Extras are not allowed here.
///
/// Offsets are distances from the leading edge in every direction. Right to
/// left horizontal lists are mirrored when placed, so the arrangement always
/// runs left to right.
pub(crate) fn arrange_with_spare_space(
    items: Vec<LazyListMeasuredItem>,
    arrangement: &dyn Arrangement,
    reverse_layout: bool,
    main_axis_layout_size: f32,
) -> Vec<LazyListMeasuredItem> {
    let items_count = items.len();
    let reverse_aware = |index: usize| {
        if reverse_layout {
            items_count - index - 1
        } else {
            index
        }
    };

    let sizes: Vec<f32> = (0..items_count)
        .map(|index| items[reverse_aware(index)].main_axis_size)
        .collect();
    let mut offsets = vec![0.0; items_count];
    arrangement.arrange(main_axis_layout_size, &sizes, LayoutDirection::Ltr, &mut offsets);

    let mut slots: Vec<Option<LazyListMeasuredItem>> = items.into_iter().map(Some).collect();
    let mut positioned = Vec::with_capacity(items_count);
    let order: Box<dyn Iterator<Item = usize>> = if reverse_layout {
        Box::new((0..items_count).rev())
    } else {
        Box::new(0..items_count)
    };
    for index in order {
        let absolute_offset = offsets[index];
        // With reverse layout the offsets are stored in reverse item order.
        let Some(mut item) = slots[reverse_aware(index)].take() else {
            continue;
        };
        let relative_offset = if reverse_layout {
            main_axis_layout_size - absolute_offset - item.main_axis_size
        } else {
            absolute_offset
        };
        item.position(relative_offset);
        positioned.push(item);
    }
    positioned
}

/// Stacks extras and window items from the window's scroll offset.
pub(crate) fn stack_items(
    window: impl IntoIterator<Item = LazyListMeasuredItem>,
    extra_items_before: Vec<LazyListMeasuredItem>,
    extra_items_after: Vec<LazyListMeasuredItem>,
    items_scroll_offset: f32,
) -> Vec<LazyListMeasuredItem> {
    let window = window.into_iter();
    let mut positioned = Vec::with_capacity(
        window.size_hint().0 + extra_items_before.len() + extra_items_after.len(),
    );

    // Before-extras arrive nearest first.
    let mut current = items_scroll_offset;
    for mut item in extra_items_before {
        current -= item.main_axis_size_with_spacing;
        item.position(current);
        positioned.push(item);
    }

    current = items_scroll_offset;
    for mut item in window.chain(extra_items_after) {
        item.position(current);
        current += item.main_axis_size_with_spacing;
        positioned.push(item);
    }
    positioned
}
