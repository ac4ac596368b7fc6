//! Start position of a full measurement pass.
//!
//! A pending scroll-to-item request wins. Otherwise the anchor is kept on the
//! item it pointed at, which may have moved if the data set changed.

use std::ops::Range;

use super::item_provider::LazyLayoutItemProvider;
use super::lazy_list_state::{LazyListScrollPosition, ScrollAnchor};

/// Resolves the anchor a full pass starts from.
pub(crate) struct ScrollPositionResolver<'a, P: LazyLayoutItemProvider + ?Sized> {
    provider: &'a P,
}

impl<'a, P: LazyLayoutItemProvider + ?Sized> ScrollPositionResolver<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// Returns the anchor for the next pass, relocating `position` by key
    /// when no scroll-to request is pending.
    ///
    /// The index is not clamped here; the window builder resets the anchor
    /// when the data set shrank below it.
    pub fn start_anchor(
        &self,
        position: &mut LazyListScrollPosition,
        pending_scroll_to: Option<ScrollAnchor>,
    ) -> ScrollAnchor {
        if let Some(target) = pending_scroll_to {
            return target;
        }
        let index = position.update_if_first_item_moved(|key, last_known_index, nearest| {
            self.find_index_by_key(key, last_known_index, nearest)
        });
        ScrollAnchor::new(index, position.scroll_offset())
    }

    /// Looks `key` up at its last known index, then inside `nearest`, then
    /// across the whole data set.
    pub fn find_index_by_key(
        &self,
        key: u64,
        last_known_index: usize,
        nearest: Range<usize>,
    ) -> Option<usize> {
        if last_known_index < self.provider.item_count()
            && self.provider.get_key(last_known_index) == key
        {
            return Some(last_known_index);
        }
        self.provider
            .get_index_in_range(key, nearest)
            .or_else(|| self.provider.get_index(key))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_helpers::TestItems;
    use super::*;

    fn position_with_key(index: usize, offset: f32, key: u64) -> LazyListScrollPosition {
        let mut position = LazyListScrollPosition::new(index, offset);
        position.update_from_measure_result(index, offset, Some(key));
        position
    }

    #[test]
    fn pending_scroll_to_wins() {
        let items = TestItems::uniform(100, 10.0);
        let mut position = position_with_key(3, 5.0, 3);
        let anchor = ScrollPositionResolver::new(&items)
            .start_anchor(&mut position, Some(ScrollAnchor::new(50, 2.0)));
        assert_eq!(anchor, ScrollAnchor::new(50, 2.0));
    }

    #[test]
    fn unchanged_data_keeps_anchor() {
        let items = TestItems::uniform(100, 10.0);
        let mut position = position_with_key(3, 5.0, 3);
        let anchor = ScrollPositionResolver::new(&items).start_anchor(&mut position, None);
        assert_eq!(anchor, ScrollAnchor::new(3, 5.0));
    }

    #[test]
    fn removal_before_anchor_moves_it_back() {
        // Keys 0..200 with 10 and 11 removed.
        let keys: Vec<u64> = (0..200).filter(|key| *key != 10 && *key != 11).collect();
        let items = TestItems::uniform(keys.len(), 10.0).with_keys(keys);
        let mut position = position_with_key(40, 7.0, 40);

        let anchor = ScrollPositionResolver::new(&items).start_anchor(&mut position, None);
        assert_eq!(anchor, ScrollAnchor::new(38, 7.0));
        assert_eq!(position.index(), 38);
    }

    #[test]
    fn key_outside_nearest_range_is_found_globally() {
        let items = TestItems::uniform(500, 10.0);
        let resolver = ScrollPositionResolver::new(&items);
        assert_eq!(resolver.find_index_by_key(420, 5, 0..130), Some(420));
    }

    #[test]
    fn missing_key_keeps_index_unclamped() {
        let items = TestItems::uniform(10, 10.0).with_keys((100..110).collect());
        let mut position = position_with_key(25, 4.0, 999);
        let anchor = ScrollPositionResolver::new(&items).start_anchor(&mut position, None);
        assert_eq!(anchor, ScrollAnchor::new(25, 4.0));
    }
}
