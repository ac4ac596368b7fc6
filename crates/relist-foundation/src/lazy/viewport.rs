//! Main axis viewport validation.
//!
//! A list placed in a parent that does not bound its main axis would try to
//! compose every item. The handler swaps such a viewport for an estimate.

use super::lazy_list_measure::DEFAULT_ITEM_SIZE_ESTIMATE;

/// Maximum main axis size taken at face value.
const MAX_REASONABLE_VIEWPORT: f32 = 100_000.0;

/// Number of average items an unbounded viewport is sized for.
const INFINITE_VIEWPORT_ITEM_COUNT: f32 = 20.0;

/// Effective main axis size of the list, paddings included.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportHandler {
    effective_size: f32,
    is_infinite: bool,
}

impl ViewportHandler {
    /// `main_axis_max` is the incoming maximum; `average_item_size` is the
    /// running average of measured items.
    pub fn new(main_axis_max: f32, average_item_size: f32, spacing: f32) -> Self {
        let is_infinite = !main_axis_max.is_finite() || main_axis_max > MAX_REASONABLE_VIEWPORT;
        if !is_infinite {
            return Self {
                effective_size: main_axis_max,
                is_infinite,
            };
        }

        let average = average_item_size.max(DEFAULT_ITEM_SIZE_ESTIMATE);
        let estimated = ((average + spacing) * INFINITE_VIEWPORT_ITEM_COUNT).max(0.0);
        log::warn!(
            "lazy list: unbounded main axis ({}), sizing the viewport for {} items ({}px). \
             Place the list in a parent that bounds its main axis.",
            main_axis_max,
            INFINITE_VIEWPORT_ITEM_COUNT,
            estimated
        );
        Self {
            effective_size: estimated,
            is_infinite,
        }
    }

    #[inline]
    pub fn effective_size(&self) -> f32 {
        self.effective_size
    }

    /// Whether the incoming viewport was replaced by an estimate.
    #[inline]
    pub fn is_infinite(&self) -> bool {
        self.is_infinite
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_viewport_is_kept() {
        let handler = ViewportHandler::new(500.0, 50.0, 0.0);
        assert_eq!(handler.effective_size(), 500.0);
        assert!(!handler.is_infinite());
    }

    #[test]
    fn infinite_viewport_is_estimated_from_average_and_spacing() {
        let handler = ViewportHandler::new(f32::INFINITY, 50.0, 8.0);
        assert!(handler.is_infinite());
        assert_eq!(handler.effective_size(), 1160.0);
    }

    #[test]
    fn huge_viewport_counts_as_infinite() {
        let handler = ViewportHandler::new(200_000.0, 50.0, 0.0);
        assert!(handler.is_infinite());
        assert_eq!(handler.effective_size(), 1000.0);
    }

    #[test]
    fn small_average_falls_back_to_default_estimate() {
        let handler = ViewportHandler::new(f32::INFINITY, 0.0, 0.0);
        assert_eq!(handler.effective_size(), DEFAULT_ITEM_SIZE_ESTIMATE * 20.0);
    }
}
