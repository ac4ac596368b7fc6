//! Lazy list state management.
//!
//! Provides [`LazyListState`], the per-list owner of the scroll position and
//! of the previous measurement result.
//!
//! Each frame the host dispatches scroll deltas and calls
//! [`LazyListState::measure`]. The state first tries to shift the previous
//! result in place and only runs a full pass when that is unsafe.

use std::ops::Range;

use relist_ui_layout::Constraints;
use web_time::{Duration, Instant};

use super::item_provider::LazyLayoutItemProvider;
use super::lazy_list_measure::{
    measure_lazy_list, LazyListMeasureConfig, MeasureRequest, DEFAULT_ITEM_SIZE_ESTIMATE,
};
use super::lazy_list_measure_result::LazyListMeasureResult;
use super::nearest_range::NearestRangeState;
use super::prefetch::{PrefetchScheduler, PrefetchStrategy};
use super::scroll_position_resolver::ScrollPositionResolver;

/// Scroll position: the first visible item and how far it is scrolled past
/// the leading edge.
///
/// After a pass, `0 <= scroll_offset < size of the item including spacing`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollAnchor {
    pub index: usize,
    pub scroll_offset: f32,
}

impl ScrollAnchor {
    pub const fn new(index: usize, scroll_offset: f32) -> Self {
        Self {
            index,
            scroll_offset,
        }
    }
}

/// Counters describing how the state resolved its passes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LazyLayoutStats {
    /// Passes that ran the window builder.
    pub full_passes: u64,

    /// Frames served by shifting the previous result.
    pub fast_path_hits: u64,

    /// Extra zero-delta passes run because a pass dropped measured items.
    pub follow_up_passes: u64,

    /// Items measured over all passes.
    pub items_measured: u64,

    /// Wall time of the last `measure` call.
    pub last_pass_duration: Duration,
}

/// The scroll anchor plus what is needed to keep it on the same item when
/// the data set changes.
#[derive(Clone, Debug, PartialEq)]
pub struct LazyListScrollPosition {
    anchor: ScrollAnchor,
    /// Key of the first visible item in the last pass.
    last_known_first_item_key: Option<u64>,
    nearest_range_state: NearestRangeState,
}

impl LazyListScrollPosition {
    pub(crate) fn new(index: usize, scroll_offset: f32) -> Self {
        Self {
            anchor: ScrollAnchor::new(index, scroll_offset),
            last_known_first_item_key: None,
            nearest_range_state: NearestRangeState::new(index),
        }
    }

    pub fn index(&self) -> usize {
        self.anchor.index
    }

    pub fn scroll_offset(&self) -> f32 {
        self.anchor.scroll_offset
    }

    pub fn anchor(&self) -> ScrollAnchor {
        self.anchor
    }

    pub fn last_known_first_item_key(&self) -> Option<u64> {
        self.last_known_first_item_key
    }

    /// Indices searched first when relocating the anchor by key.
    pub fn nearest_range(&self) -> Range<usize> {
        self.nearest_range_state.range()
    }

    pub(crate) fn update_from_measure_result(
        &mut self,
        first_visible_index: usize,
        first_visible_scroll_offset: f32,
        first_visible_item_key: Option<u64>,
    ) {
        self.anchor = ScrollAnchor::new(first_visible_index, first_visible_scroll_offset);
        self.last_known_first_item_key = first_visible_item_key;
        self.nearest_range_state.update(first_visible_index);
    }

    /// Jumps to a new position. The old key no longer describes it.
    pub(crate) fn request_position_and_forget_last_known_key(
        &mut self,
        index: usize,
        scroll_offset: f32,
    ) {
        self.anchor = ScrollAnchor::new(index, scroll_offset);
        self.last_known_first_item_key = None;
        self.nearest_range_state.update(index);
    }

    /// Moves the anchor to wherever its item went. Returns the anchor index.
    ///
    /// `find_by_key` gets the key, the last known index and the nearest range.
    pub(crate) fn update_if_first_item_moved<F>(&mut self, find_by_key: F) -> usize
    where
        F: FnOnce(u64, usize, Range<usize>) -> Option<usize>,
    {
        let current_index = self.anchor.index;
        let Some(key) = self.last_known_first_item_key else {
            return current_index;
        };
        let new_index = find_by_key(key, current_index, self.nearest_range_state.range())
            .unwrap_or(current_index);
        if new_index != current_index {
            log::debug!(
                "lazy list: first item (key {}) moved from {} to {}",
                key,
                current_index,
                new_index
            );
            self.anchor.index = new_index;
            self.nearest_range_state.update(new_index);
        }
        new_index
    }
}

/// State object for lazy list scroll position tracking.
///
/// Holds the current scroll position, pending scroll requests and the result
/// of the previous pass.
///
/// # Example
///
/// ```rust,ignore
/// let mut state = LazyListState::new();
/// state.dispatch_scroll_delta(120.0);
/// let result = state.measure(&mut items, constraints, &config);
/// host.place(result.placements());
/// ```
#[derive(Debug)]
pub struct LazyListState {
    scroll_position: LazyListScrollPosition,

    /// Scroll delta to be consumed in the next pass.
    scroll_to_be_consumed: f32,

    /// Pending scroll-to-item request.
    pending_scroll_to: Option<ScrollAnchor>,

    /// Forces the next pass to skip the fast path.
    remeasure_requested: bool,

    last_result: Option<LazyListMeasureResult>,
    last_config: Option<LazyListMeasureConfig>,

    /// Running average of measured item sizes for estimation.
    average_item_size: f32,
    total_measured_items: usize,

    prefetch_scheduler: PrefetchScheduler,
    prefetch_strategy: PrefetchStrategy,

    /// Sign of the last non-zero scroll delta.
    last_scroll_direction: f32,

    stats: LazyLayoutStats,
}

impl Default for LazyListState {
    fn default() -> Self {
        Self::new()
    }
}

impl LazyListState {
    pub fn new() -> Self {
        Self::with_position(0, 0.0)
    }

    pub fn with_position(
        initial_first_visible_item_index: usize,
        initial_first_visible_item_scroll_offset: f32,
    ) -> Self {
        Self {
            scroll_position: LazyListScrollPosition::new(
                initial_first_visible_item_index,
                initial_first_visible_item_scroll_offset,
            ),
            scroll_to_be_consumed: 0.0,
            pending_scroll_to: None,
            remeasure_requested: false,
            last_result: None,
            last_config: None,
            average_item_size: DEFAULT_ITEM_SIZE_ESTIMATE,
            total_measured_items: 0,
            prefetch_scheduler: PrefetchScheduler::new(),
            prefetch_strategy: PrefetchStrategy::default(),
            last_scroll_direction: 0.0,
            stats: LazyLayoutStats::default(),
        }
    }

    pub fn first_visible_item_index(&self) -> usize {
        self.scroll_position.index()
    }

    /// How far the first visible item is scrolled past the leading edge.
    pub fn first_visible_item_scroll_offset(&self) -> f32 {
        self.scroll_position.scroll_offset()
    }

    pub fn scroll_position(&self) -> &LazyListScrollPosition {
        &self.scroll_position
    }

    /// Result of the last pass, if any.
    pub fn layout_info(&self) -> Option<&LazyListMeasureResult> {
        self.last_result.as_ref()
    }

    pub fn stats(&self) -> &LazyLayoutStats {
        &self.stats
    }

    pub fn average_item_size(&self) -> f32 {
        self.average_item_size
    }

    pub fn set_prefetch_strategy(&mut self, strategy: PrefetchStrategy) {
        self.prefetch_strategy = strategy;
    }

    /// Queues a scroll for the next pass. Positive scrolls forward.
    ///
    /// Returns the delta; the consumed part is reported by the next result.
    pub fn dispatch_scroll_delta(&mut self, delta: f32) -> f32 {
        self.scroll_to_be_consumed += delta;
        if delta.abs() > 0.001 {
            self.last_scroll_direction = delta.signum();
        }
        delta
    }

    /// Scroll delta waiting for the next pass.
    pub fn peek_scroll_delta(&self) -> f32 {
        self.scroll_to_be_consumed
    }

    /// Scrolls to the specified item index on the next pass.
    ///
    /// # Arguments
    /// * `index` - The index of the item to scroll to
    /// * `scroll_offset` - Additional offset within the item
    pub fn scroll_to_item(&mut self, index: usize, scroll_offset: f32) {
        self.pending_scroll_to = Some(ScrollAnchor::new(index, scroll_offset));
        self.scroll_position
            .request_position_and_forget_last_known_key(index, scroll_offset);
    }

    /// Makes the next pass a full one, e.g. after the data set changed
    /// without changing its size.
    pub fn request_remeasure(&mut self) {
        self.remeasure_requested = true;
    }

    pub fn can_scroll_forward(&self) -> bool {
        self.last_result
            .as_ref()
            .is_some_and(LazyListMeasureResult::can_scroll_forward)
    }

    pub fn can_scroll_backward(&self) -> bool {
        self.scroll_position.index() > 0 || self.scroll_position.scroll_offset() > 0.0
    }

    /// Drains the indices queued for prefetch by the last pass.
    pub fn take_prefetch_indices(&mut self) -> Vec<usize> {
        self.prefetch_scheduler.take_all()
    }

    /// Measures the list for this frame, consuming pending scroll requests.
    pub fn measure<P>(
        &mut self,
        provider: &mut P,
        constraints: Constraints,
        config: &LazyListMeasureConfig,
    ) -> &LazyListMeasureResult
    where
        P: LazyLayoutItemProvider + ?Sized,
    {
        let started = Instant::now();
        let delta = std::mem::take(&mut self.scroll_to_be_consumed);
        let items_count = provider.item_count();

        let mut shifted = None;
        if let Some(mut previous) = self.last_result.take() {
            if self.can_reuse(&previous, &*provider, &constraints, config, items_count)
                && previous.try_apply_scroll_without_remeasure(delta)
            {
                shifted = Some(previous);
            }
        }

        let result = match shifted {
            Some(result) => {
                self.stats.fast_path_hits += 1;
                log::trace!("lazy list: applied {} without remeasure", delta);
                result
            }
            None => self.measure_full(provider, constraints, config, delta),
        };

        self.scroll_position.update_from_measure_result(
            result.first_visible_item_index(),
            result.first_visible_item_scroll_offset(),
            result.first_visible_item_key(),
        );
        self.update_prefetch_queue(&result);
        self.remeasure_requested = false;
        if self.last_config.as_ref() != Some(config) {
            self.last_config = Some(config.clone());
        }
        self.stats.last_pass_duration = started.elapsed();
        self.last_result.insert(result)
    }

    fn can_reuse<P>(
        &self,
        previous: &LazyListMeasureResult,
        provider: &P,
        constraints: &Constraints,
        config: &LazyListMeasureConfig,
        items_count: usize,
    ) -> bool
    where
        P: LazyLayoutItemProvider + ?Sized,
    {
        if self.pending_scroll_to.is_some()
            || self.remeasure_requested
            || self.last_config.as_ref() != Some(config)
            || !previous.is_compatible_with(constraints, items_count)
        {
            return false;
        }
        // Same count, but the anchor item may have been replaced.
        let first_index = previous.first_visible_item_index();
        first_index < items_count
            && previous.first_visible_item_key() == Some(provider.get_key(first_index))
    }

    fn measure_full<P>(
        &mut self,
        provider: &mut P,
        constraints: Constraints,
        config: &LazyListMeasureConfig,
        delta: f32,
    ) -> LazyListMeasureResult
    where
        P: LazyLayoutItemProvider + ?Sized,
    {
        let anchor = ScrollPositionResolver::new(&*provider)
            .start_anchor(&mut self.scroll_position, self.pending_scroll_to.take());
        let request =
            MeasureRequest::new(anchor, delta).with_average_item_size(self.average_item_size);
        let mut result = measure_lazy_list(provider, constraints, config, &request);
        self.stats.full_passes += 1;
        self.stats.items_measured += result.measured_items_count() as u64;

        if result.remeasure_needed() {
            // Resolve before anyone places the result.
            let anchor = ScrollAnchor::new(
                result.first_visible_item_index(),
                result.first_visible_item_scroll_offset(),
            );
            let request =
                MeasureRequest::new(anchor, 0.0).with_average_item_size(self.average_item_size);
            let mut follow_up = measure_lazy_list(provider, constraints, config, &request);
            follow_up.consumed_scroll = result.consumed_scroll;
            follow_up.requested_scroll = result.requested_scroll;
            self.stats.follow_up_passes += 1;
            self.stats.items_measured += follow_up.measured_items_count() as u64;
            log::debug!(
                "lazy list: follow-up pass from {:?} after dropping measured items",
                anchor
            );
            result = follow_up;
        }

        self.record_item_sizes(&result);
        result
    }

    fn record_item_sizes(&mut self, result: &LazyListMeasureResult) {
        for item in result.visible_items() {
            self.total_measured_items += 1;
            let n = self.total_measured_items as f32;
            self.average_item_size =
                self.average_item_size * ((n - 1.0) / n) + item.main_axis_size / n;
        }
    }

    fn update_prefetch_queue(&mut self, result: &LazyListMeasureResult) {
        match result.visible_bounds {
            Some((first, last)) => self.prefetch_scheduler.update(
                first,
                last,
                result.total_items_count,
                self.last_scroll_direction,
                &self.prefetch_strategy,
            ),
            None => {
                self.prefetch_scheduler.take_all();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_helpers::TestItems;
    use super::*;

    fn viewport() -> Constraints {
        Constraints::loose(100.0, 250.0)
    }

    #[test]
    fn measure_consumes_dispatched_delta() {
        let mut items = TestItems::uniform(20, 100.0);
        let mut state = LazyListState::new();
        let config = LazyListMeasureConfig::default();
        state.measure(&mut items, viewport(), &config);

        state.dispatch_scroll_delta(120.0);
        assert_eq!(state.peek_scroll_delta(), 120.0);
        let consumed = state.measure(&mut items, viewport(), &config).consumed_scroll();

        assert_eq!(consumed, 120.0);
        assert_eq!(state.peek_scroll_delta(), 0.0);
        assert_eq!(state.first_visible_item_index(), 1);
        assert_eq!(state.first_visible_item_scroll_offset(), 20.0);
        assert!(state.can_scroll_backward());
    }

    #[test]
    fn small_delta_takes_the_fast_path() {
        let mut items = TestItems::uniform(20, 100.0);
        let mut state = LazyListState::new();
        let config = LazyListMeasureConfig::default();
        state.measure(&mut items, viewport(), &config);
        items.take_measured();

        state.dispatch_scroll_delta(30.0);
        let result = state.measure(&mut items, viewport(), &config);
        assert_eq!(result.consumed_scroll(), 30.0);

        assert!(items.measured.is_empty());
        assert_eq!(state.stats().fast_path_hits, 1);
        assert_eq!(state.stats().full_passes, 1);
        assert_eq!(state.first_visible_item_scroll_offset(), 30.0);
    }

    #[test]
    fn idle_frame_reuses_the_last_result() {
        let mut items = TestItems::uniform(20, 100.0);
        let mut state = LazyListState::new();
        let config = LazyListMeasureConfig::default();
        state.measure(&mut items, viewport(), &config);
        state.dispatch_scroll_delta(30.0);
        state.measure(&mut items, viewport(), &config);
        items.take_measured();

        let result = state.measure(&mut items, viewport(), &config);
        assert_eq!(result.consumed_scroll(), 0.0);
        assert_eq!(result.requested_scroll(), 0.0);

        assert!(items.measured.is_empty());
        assert_eq!(state.stats().full_passes, 1);
        assert_eq!(state.stats().fast_path_hits, 2);
        assert_eq!(state.first_visible_item_scroll_offset(), 30.0);
    }

    #[test]
    fn lone_sticky_item_keeps_scrolling() {
        let mut items = TestItems::uniform(1, 1000.0);
        let mut state = LazyListState::new();
        let config = LazyListMeasureConfig::default().with_sticky_headers(vec![0]);
        state.measure(&mut items, viewport(), &config);

        for step in 1..=3 {
            state.dispatch_scroll_delta(10.0);
            let result = state.measure(&mut items, viewport(), &config);
            assert_eq!(result.consumed_scroll(), 10.0);
            assert_eq!(result.requested_scroll(), 10.0);
            assert_eq!(result.unconsumed_scroll(), 0.0);
            let sticky = result.positioned_items().last().map(|item| item.offset);
            assert_eq!(sticky, Some(0.0));
            assert_eq!(state.first_visible_item_scroll_offset(), 10.0 * step as f32);
        }
        assert!(state.can_scroll_forward());
    }

    #[test]
    fn changed_constraints_force_a_full_pass() {
        let mut items = TestItems::uniform(20, 100.0);
        let mut state = LazyListState::new();
        let config = LazyListMeasureConfig::default();
        state.measure(&mut items, viewport(), &config);

        state.measure(&mut items, Constraints::loose(100.0, 400.0), &config);
        assert_eq!(state.stats().full_passes, 2);

        let config = config.with_spacing(2.0);
        state.measure(&mut items, Constraints::loose(100.0, 400.0), &config);
        assert_eq!(state.stats().full_passes, 3);
    }

    #[test]
    fn forward_drop_triggers_one_follow_up_pass() {
        let mut items = TestItems::uniform(20, 100.0);
        let mut state = LazyListState::new();
        let config = LazyListMeasureConfig::default();
        state.dispatch_scroll_delta(120.0);
        let result = state.measure(&mut items, viewport(), &config);

        assert!(!result.remeasure_needed());
        assert_eq!(result.consumed_scroll(), 120.0);
        assert_eq!(result.requested_scroll(), 120.0);
        assert_eq!(state.stats().follow_up_passes, 1);
    }

    #[test]
    fn scroll_to_item_jumps_and_skips_fast_path() {
        let mut items = TestItems::uniform(100, 50.0);
        let mut state = LazyListState::new();
        let config = LazyListMeasureConfig::default();
        state.measure(&mut items, viewport(), &config);

        state.scroll_to_item(40, 10.0);
        assert_eq!(state.first_visible_item_index(), 40);
        state.measure(&mut items, viewport(), &config);

        assert_eq!(state.first_visible_item_index(), 40);
        assert_eq!(state.first_visible_item_scroll_offset(), 10.0);
        assert_eq!(state.stats().full_passes, 2);
    }

    #[test]
    fn anchor_follows_its_key_after_insertion() {
        let mut items = TestItems::uniform(10, 100.0).with_keys((100..110).collect());
        let mut state = LazyListState::with_position(4, 30.0);
        let config = LazyListMeasureConfig::default();
        state.measure(&mut items, viewport(), &config);
        assert_eq!(state.scroll_position().last_known_first_item_key(), Some(104));

        // Two items inserted at the front.
        let mut keys: Vec<u64> = vec![1, 2];
        keys.extend(100..110);
        let mut items = TestItems::uniform(12, 100.0).with_keys(keys);
        state.measure(&mut items, viewport(), &config);

        assert_eq!(state.first_visible_item_index(), 6);
        assert_eq!(state.first_visible_item_scroll_offset(), 30.0);
    }

    #[test]
    fn replaced_anchor_item_disables_fast_path() {
        let mut items = TestItems::uniform(10, 100.0);
        let mut state = LazyListState::new();
        let config = LazyListMeasureConfig::default();
        state.measure(&mut items, viewport(), &config);

        let mut items = TestItems::uniform(10, 100.0).with_keys((50..60).collect());
        state.measure(&mut items, viewport(), &config);
        assert_eq!(state.stats().full_passes, 2);

        state.request_remeasure();
        state.measure(&mut items, viewport(), &config);
        assert_eq!(state.stats().full_passes, 3);
    }

    #[test]
    fn prefetch_follows_scroll_direction() {
        let mut items = TestItems::uniform(20, 100.0);
        let mut state = LazyListState::with_position(5, 0.0);
        let config = LazyListMeasureConfig::default();

        state.dispatch_scroll_delta(10.0);
        state.measure(&mut items, viewport(), &config);
        assert_eq!(state.take_prefetch_indices(), vec![8, 9]);

        state.dispatch_scroll_delta(-20.0);
        state.measure(&mut items, viewport(), &config);
        assert_eq!(state.take_prefetch_indices(), vec![3, 2]);
    }

    #[test]
    fn empty_list_cannot_scroll() {
        let mut items = TestItems::uniform(0, 100.0);
        let mut state = LazyListState::new();
        state.dispatch_scroll_delta(40.0);
        let result = state.measure(&mut items, viewport(), &LazyListMeasureConfig::default());

        assert_eq!(result.consumed_scroll(), 0.0);
        assert!(!state.can_scroll_forward());
        assert!(!state.can_scroll_backward());
    }

    #[test]
    fn average_item_size_tracks_visible_items() {
        let mut items = TestItems::uniform(20, 30.0);
        let mut state = LazyListState::new();
        state.measure(&mut items, viewport(), &LazyListMeasureConfig::default());
        assert!((state.average_item_size() - 30.0).abs() < 1e-3);
    }
}
