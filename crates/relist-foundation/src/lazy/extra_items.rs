//! Items composed outside the visible window.
//!
//! Beyond-bounds items keep a margin composed on each side of the window,
//! pinned items stay composed wherever they are, and a lookahead pass also
//! composes what the previous post-lookahead pass showed past the window.

use rustc_hash::FxHashSet;

use super::item_provider::{LazyLayoutItemProvider, LazyListMeasuredItemProvider};
use super::lazy_list_measure_result::LazyListLayoutInfo;
use super::lazy_list_measured_item::LazyListMeasuredItem;
use super::window_builder::MeasuredWindow;

/// Sorted, deduplicated pinned indices that exist in the data set.
pub(crate) fn normalize_pinned(pinned: &[usize], items_count: usize) -> Vec<usize> {
    let mut pinned: Vec<usize> = pinned
        .iter()
        .copied()
        .filter(|&index| index < items_count)
        .collect();
    pinned.sort_unstable();
    pinned.dedup();
    pinned
}

/// Items before the window, nearest first.
///
/// `pinned` must be sorted.
pub(crate) fn create_items_before_list<P>(
    first_window_index: usize,
    provider: &mut LazyListMeasuredItemProvider<'_, P>,
    beyond_bounds_item_count: usize,
    pinned: &[usize],
) -> Vec<LazyListMeasuredItem>
where
    P: LazyLayoutItemProvider + ?Sized,
{
    let start = first_window_index.saturating_sub(beyond_bounds_item_count);
    let mut list: Vec<LazyListMeasuredItem> = (start..first_window_index)
        .rev()
        .map(|index| provider.get_and_measure(index))
        .collect();

    for &index in pinned.iter().rev() {
        if index < start {
            list.push(provider.get_and_measure(index));
        }
    }
    list
}

/// Lookahead context for [`create_items_after_list`].
pub(crate) struct LookaheadContext<'a> {
    pub post_lookahead_layout_info: &'a dyn LazyListLayoutInfo,
    pub consumed_scroll: f32,
}

/// Items after the window, nearest first.
///
/// `pinned` must be sorted.
pub(crate) fn create_items_after_list<P>(
    window: &MeasuredWindow,
    provider: &mut LazyListMeasuredItemProvider<'_, P>,
    items_count: usize,
    beyond_bounds_item_count: usize,
    pinned: &[usize],
    lookahead: Option<LookaheadContext<'_>>,
) -> Vec<LazyListMeasuredItem>
where
    P: LazyLayoutItemProvider + ?Sized,
{
    let last_window_index = window.last_index();
    let end = last_window_index
        .saturating_add(beyond_bounds_item_count)
        .min(items_count - 1);

    let mut list: Vec<LazyListMeasuredItem> = (last_window_index + 1..=end)
        .map(|index| provider.get_and_measure(index))
        .collect();
    let mut included: FxHashSet<usize> = list.iter().map(|item| item.index).collect();

    for &index in pinned {
        if index > end && included.insert(index) {
            list.push(provider.get_and_measure(index));
        }
    }

    if let Some(lookahead) = lookahead {
        reconcile_with_post_lookahead(
            window,
            provider,
            items_count,
            end,
            &lookahead,
            &mut list,
            &mut included,
        );
    }

    list.sort_by_key(|item| item.index);
    list
}

/// Composes the items the previous post-lookahead pass showed past `end`,
/// then keeps going while the scroll consumed since would reveal more.
fn reconcile_with_post_lookahead<P>(
    window: &MeasuredWindow,
    provider: &mut LazyListMeasuredItemProvider<'_, P>,
    items_count: usize,
    end: usize,
    lookahead: &LookaheadContext<'_>,
    list: &mut Vec<LazyListMeasuredItem>,
    included: &mut FxHashSet<usize>,
) where
    P: LazyLayoutItemProvider + ?Sized,
{
    let info = lookahead.post_lookahead_layout_info;
    let visible = info.visible_items_info();
    let Some(last_post_lookahead) = visible.last() else {
        return;
    };

    // The tail may be unsorted; find the first item (from the back) that
    // crosses `end`.
    let mut last_visible = *last_post_lookahead;
    for position in (0..visible.len()).rev() {
        if visible[position].index > end
            && (position == 0 || visible[position - 1].index <= end)
        {
            last_visible = visible[position];
            break;
        }
    }

    let last_post_lookahead_index = last_post_lookahead.index.min(items_count - 1);
    for index in end + 1..=last_post_lookahead_index {
        if included.insert(index) {
            list.push(provider.get_and_measure(index));
        }
    }

    let additional_offset = info.viewport_end_offset()
        - last_visible.offset
        - last_visible.size
        + lookahead.consumed_scroll;
    if additional_offset <= 0.0 {
        return;
    }

    let mut index = last_visible.index + 1;
    let mut total_offset = 0.0;
    while index < items_count && total_offset < additional_offset {
        let existing = if index <= end {
            window.items.iter().find(|item| item.index == index)
        } else {
            list.iter().find(|item| item.index == index)
        };
        let size = match existing {
            Some(item) => item.main_axis_size_with_spacing,
            None => {
                let item = provider.get_and_measure(index);
                let size = item.main_axis_size_with_spacing;
                if index > end && included.insert(index) {
                    list.push(item);
                }
                size
            }
        };
        total_offset += size;
        index += 1;
    }
    log::trace!(
        "lazy list: lookahead reconciliation covered {}px past item {}",
        total_offset,
        last_visible.index
    );
}
