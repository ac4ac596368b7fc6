//! Layout contracts & policies for relist
//!
//! Value types shared between the lazy list measurement engine and the host
//! layout tree: constraints, orientation, arrangements and placements.

mod alignment;
mod arrangement;
mod constraints;
mod core;
mod orientation;

pub use alignment::*;
pub use arrangement::*;
pub use constraints::*;
pub use core::*;
pub use orientation::*;

pub mod prelude {
    pub use crate::alignment::{HorizontalAlignment, VerticalAlignment};
    pub use crate::arrangement::{Arrangement, LayoutDirection, LinearArrangement};
    pub use crate::constraints::Constraints;
    pub use crate::core::{MeasuredChild, Placement, Size};
    pub use crate::orientation::Orientation;
}
