//! Lazy layout system for relist.
//!
//! Measures only the items a scrollable list can currently show, keeping the
//! scroll position anchored to an item while items resize or the data set
//! changes.
//!
//! # Architecture
//!
//! - [`LazyLayoutItemProvider`] - item count, keys and per-item measurement,
//!   implemented by the host
//! - [`measure_lazy_list`] - one measurement pass: visible window, extra
//!   items, spare-space arrangement and the sticky header
//! - [`LazyListMeasureResult`] - the immutable outcome of a pass, including
//!   the fast path that shifts it without remeasuring
//! - [`LazyListState`] - per-list scroll state driving passes frame by frame
//!
//! # Example
//!
//! ```rust,ignore
//! use relist_foundation::lazy::{LazyListMeasureConfig, LazyListState};
//!
//! let mut state = LazyListState::new();
//! let config = LazyListMeasureConfig::vertical().with_spacing(8.0);
//!
//! state.dispatch_scroll_delta(delta);
//! let result = state.measure(&mut items, constraints, &config);
//! for placement in result.placements() {
//!     host.place(placement);
//! }
//! ```

mod extra_items;
mod item_provider;
mod lazy_list_measure;
mod lazy_list_measure_result;
mod lazy_list_measured_item;
mod lazy_list_state;
mod nearest_range;
mod prefetch;
mod scroll_position_resolver;
mod spare_space;
mod sticky_items;
mod viewport;
mod window_builder;

#[cfg(test)]
mod test_helpers;

pub use item_provider::*;
pub use lazy_list_measure::*;
pub use lazy_list_measure_result::*;
pub use lazy_list_measured_item::*;
pub use lazy_list_state::*;
pub use nearest_range::*;
pub use prefetch::*;
pub use viewport::ViewportHandler;

#[cfg(test)]
#[path = "tests/scenario_tests.rs"]
mod scenario_tests;

#[cfg(test)]
#[path = "tests/property_tests.rs"]
mod property_tests;
