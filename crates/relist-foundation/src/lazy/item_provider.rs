//! Item provider trait for lazy layouts.
//!
//! This module defines the [`LazyLayoutItemProvider`] trait which provides
//! all needed information about items for lazy measurement, and the
//! [`LazyListMeasuredItemProvider`] that turns it into measured items.

use std::ops::Range;

use relist_ui_layout::{Constraints, MeasuredChild, Orientation};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::lazy_list_measured_item::LazyListMeasuredItem;

/// Children returned by the host for one item.
pub type SmallChildVec = SmallVec<[MeasuredChild; 4]>;

/// Provides all the needed info about items which could be measured by lazy
/// layouts.
///
/// Implementations must be deterministic within one measurement pass:
/// measuring the same index twice must produce the same sizes.
pub trait LazyLayoutItemProvider {
    /// The total number of items in the lazy layout (visible or not).
    fn item_count(&self) -> usize;

    /// Returns the key for the item at the given index.
    ///
    /// Keys are used to:
    /// - Maintain scroll position when items are added/removed
    /// - Keep selection and animation identity across list mutation
    ///
    /// If not overridden, defaults to the index itself.
    fn get_key(&self, index: usize) -> u64 {
        index as u64
    }

    /// Returns the content type for the item at the given index.
    ///
    /// Returns `None` for items with no specific type (compatible with any).
    fn get_content_type(&self, index: usize) -> Option<u64> {
        let _ = index;
        None
    }

    /// Get the index for a given key.
    ///
    /// Returns `None` if the key is not found.
    fn get_index(&self, key: u64) -> Option<usize> {
        (0..self.item_count()).find(|&i| self.get_key(i) == key)
    }

    /// Looks up `key` only inside `range` (clamped to the item count).
    fn get_index_in_range(&self, key: u64, range: Range<usize>) -> Option<usize> {
        let end = range.end.min(self.item_count());
        (range.start.min(end)..end).find(|&i| self.get_key(i) == key)
    }

    /// Measures the content of the item at `index` under `constraints`.
    ///
    /// Returns the item's root children; they are stacked along the main axis.
    fn measure(&mut self, index: usize, constraints: Constraints) -> SmallChildVec;
}

/// Measures items under fixed child constraints, at most once per index.
///
/// One provider lives for exactly one measurement pass, so the memo cache
/// never outlives the sizes it holds.
pub struct LazyListMeasuredItemProvider<'a, P: LazyLayoutItemProvider + ?Sized> {
    provider: &'a mut P,
    child_constraints: Constraints,
    orientation: Orientation,
    spacing: f32,
    items_count: usize,
    cache: FxHashMap<usize, LazyListMeasuredItem>,
}

impl<'a, P: LazyLayoutItemProvider + ?Sized> LazyListMeasuredItemProvider<'a, P> {
    pub fn new(
        provider: &'a mut P,
        child_constraints: Constraints,
        orientation: Orientation,
        spacing: f32,
    ) -> Self {
        let items_count = provider.item_count();
        Self {
            provider,
            child_constraints,
            orientation,
            spacing,
            items_count,
            cache: FxHashMap::default(),
        }
    }

    /// Returns the measured item at `index`, measuring it on first request.
    pub fn get_and_measure(&mut self, index: usize) -> LazyListMeasuredItem {
        if let Some(item) = self.cache.get(&index) {
            return item.clone();
        }

        let children = self.provider.measure(index, self.child_constraints);
        // The last item carries no trailing gap.
        let spacing = if index + 1 == self.items_count {
            0.0
        } else {
            self.spacing
        };
        let item = LazyListMeasuredItem::new(
            index,
            self.provider.get_key(index),
            self.provider.get_content_type(index),
            self.orientation,
            &children,
            spacing,
        );
        log::trace!(
            "lazy list: measured item {} ({}px)",
            index,
            item.main_axis_size
        );
        self.cache.insert(index, item.clone());
        item
    }

    #[inline]
    pub fn child_constraints(&self) -> Constraints {
        self.child_constraints
    }

    #[inline]
    pub fn items_count(&self) -> usize {
        self.items_count
    }

    /// Number of distinct items measured so far in this pass.
    #[inline]
    pub fn measured_count(&self) -> usize {
        self.cache.len()
    }
}
