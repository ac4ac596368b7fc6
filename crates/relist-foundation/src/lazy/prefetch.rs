//! Prefetch scheduling for lazy lists.
//!
//! After every pass, queues the indices just past the visible window in the
//! scroll direction so the host can prepare them before they scroll in.

use std::collections::VecDeque;

/// How many items to prefetch.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrefetchStrategy {
    /// Number of items queued past the visible window.
    pub prefetch_count: usize,

    pub enabled: bool,
}

impl Default for PrefetchStrategy {
    fn default() -> Self {
        Self {
            prefetch_count: 2,
            enabled: true,
        }
    }
}

impl PrefetchStrategy {
    pub fn new(prefetch_count: usize) -> Self {
        Self {
            prefetch_count,
            enabled: true,
        }
    }

    pub fn disabled() -> Self {
        Self {
            prefetch_count: 0,
            enabled: false,
        }
    }
}

/// Queue of indices to prefetch, nearest first.
#[derive(Clone, Debug, Default)]
pub struct PrefetchScheduler {
    queue: VecDeque<usize>,
}

impl PrefetchScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the queue for a visible range and scroll direction.
    ///
    /// A non-negative `scroll_direction` prefetches after `last_visible_index`,
    /// a negative one before `first_visible_index`.
    pub fn update(
        &mut self,
        first_visible_index: usize,
        last_visible_index: usize,
        total_items: usize,
        scroll_direction: f32,
        strategy: &PrefetchStrategy,
    ) {
        self.queue.clear();
        if !strategy.enabled {
            return;
        }

        let count = strategy.prefetch_count;
        if scroll_direction >= 0.0 {
            let start = last_visible_index.saturating_add(1);
            let end = start.saturating_add(count).min(total_items);
            self.queue.extend(start..end);
        } else {
            let start = first_visible_index.saturating_sub(count);
            self.queue.extend((start..first_visible_index).rev());
        }
    }

    pub fn next_prefetch(&mut self) -> Option<usize> {
        self.queue.pop_front()
    }

    pub fn pending_prefetches(&self) -> &VecDeque<usize> {
        &self.queue
    }

    /// Drains the queue.
    pub fn take_all(&mut self) -> Vec<usize> {
        self.queue.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_scroll_prefetches_after_window() {
        let mut scheduler = PrefetchScheduler::new();
        scheduler.update(5, 10, 100, 1.0, &PrefetchStrategy::new(2));

        assert_eq!(scheduler.next_prefetch(), Some(11));
        assert_eq!(scheduler.next_prefetch(), Some(12));
        assert_eq!(scheduler.next_prefetch(), None);
    }

    #[test]
    fn backward_scroll_prefetches_before_window() {
        let mut scheduler = PrefetchScheduler::new();
        scheduler.update(5, 10, 100, -1.0, &PrefetchStrategy::new(2));

        assert_eq!(scheduler.take_all(), vec![4, 3]);
    }

    #[test]
    fn queue_is_clamped_to_data_set() {
        let mut scheduler = PrefetchScheduler::new();
        let strategy = PrefetchStrategy::new(3);

        scheduler.update(95, 98, 100, 1.0, &strategy);
        assert_eq!(scheduler.pending_prefetches().len(), 1);

        scheduler.update(1, 4, 100, -1.0, &strategy);
        assert_eq!(scheduler.take_all(), vec![0]);
    }

    #[test]
    fn disabled_strategy_clears_queue() {
        let mut scheduler = PrefetchScheduler::new();
        scheduler.update(5, 10, 100, 1.0, &PrefetchStrategy::new(2));
        scheduler.update(5, 10, 100, 1.0, &PrefetchStrategy::disabled());

        assert_eq!(scheduler.next_prefetch(), None);
    }
}
