//! Sticky header overlay.
//!
//! At most one header is pinned to the leading edge: the last header at or
//! before the first visible item. The next header pushes it out as it
//! arrives.

use super::item_provider::{LazyLayoutItemProvider, LazyListMeasuredItemProvider};
use super::lazy_list_measured_item::LazyListMeasuredItem;

/// Sorted, deduplicated header indices that exist in the data set.
pub(crate) fn normalize_headers(headers: &[usize], items_count: usize) -> Vec<usize> {
    let mut headers: Vec<usize> = headers
        .iter()
        .copied()
        .filter(|&index| index < items_count)
        .collect();
    headers.sort_unstable();
    headers.dedup();
    headers
}

/// The pinned header of a pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct StickyHeader {
    pub index: usize,
    /// Where the header would sit unpinned. Negative infinity once it has
    /// scrolled past and was measured only to be pinned.
    pub natural_offset: f32,
    /// The header after this one, which pushes it out.
    pub next_header: Option<usize>,
}

impl StickyHeader {
    /// Offset of the pinned header among `positioned`.
    ///
    /// Zero is the content start, so the header sits right after the before
    /// padding and never slides under it. A positioned next header caps the
    /// offset at its own leading edge.
    pub fn pinned_offset(
        &self,
        positioned: &[LazyListMeasuredItem],
        main_axis_size_with_spacing: f32,
    ) -> f32 {
        let offset = self.natural_offset.max(0.0);
        let next_offset = self.next_header.and_then(|next| {
            positioned
                .iter()
                .find(|item| item.index == next && !item.non_scrollable)
                .map(|item| item.offset)
        });
        match next_offset {
            Some(next_offset) => offset.min(next_offset - main_axis_size_with_spacing),
            None => offset,
        }
    }
}

/// Pins the active header and moves it to the end of `positioned`.
///
/// The header is pinned at offset 0, the content start, below the before
/// padding rather than under it. `headers` must be sorted.
pub(crate) fn apply_sticky_items<P>(
    positioned: &mut Vec<LazyListMeasuredItem>,
    headers: &[usize],
    first_visible_index: usize,
    provider: &mut LazyListMeasuredItemProvider<'_, P>,
) -> Option<StickyHeader>
where
    P: LazyLayoutItemProvider + ?Sized,
{
    let after_active = headers.partition_point(|&index| index <= first_visible_index);
    let header_index = headers[..after_active].last().copied()?;

    let mut header = match positioned.iter().position(|item| item.index == header_index) {
        Some(position) => positioned.remove(position),
        None => {
            // Scrolled past: the natural position is above the leading edge.
            let mut item = provider.get_and_measure(header_index);
            item.position(f32::NEG_INFINITY);
            item
        }
    };

    let sticky = StickyHeader {
        index: header_index,
        natural_offset: header.offset,
        next_header: headers.get(after_active).copied(),
    };
    let offset = sticky.pinned_offset(positioned, header.main_axis_size_with_spacing);
    header.position(offset);
    header.non_scrollable = true;
    log::trace!(
        "lazy list: sticky header {} pinned at {}",
        header_index,
        offset
    );
    positioned.push(header);
    Some(sticky)
}
