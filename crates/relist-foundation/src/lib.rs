//! Foundation elements for relist
//!
//! Hosts the [`lazy`] module: the measurement engine behind virtualized,
//! scrollable lists.

pub mod lazy;

pub use relist_ui_layout as layout;
