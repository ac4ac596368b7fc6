//! Core measurement algorithm for lazy lists.
//!
//! This module implements the virtualized measurement logic that determines
//! which items should be composed and measured based on the current scroll
//! position and viewport size.

use relist_ui_layout::{
    Arrangement, Constraints, HorizontalAlignment, LayoutDirection, LinearArrangement,
    Orientation, VerticalAlignment,
};
use web_time::Instant;

use super::extra_items::{
    create_items_after_list, create_items_before_list, normalize_pinned, LookaheadContext,
};
use super::item_provider::{LazyLayoutItemProvider, LazyListMeasuredItemProvider};
use super::lazy_list_measure_result::{LazyListLayoutInfo, LazyListMeasureResult};
use super::lazy_list_state::ScrollAnchor;
use super::spare_space::{arrange_with_spare_space, has_spare_space, stack_items};
use super::sticky_items::{apply_sticky_items, normalize_headers};
use super::viewport::ViewportHandler;
use super::window_builder::{build_window, WindowParams};

/// Default estimated item size for scroll calculations.
/// Used when no measured sizes are cached.
/// 48.0 is a common list item height (Material Design list tile).
pub const DEFAULT_ITEM_SIZE_ESTIMATE: f32 = 48.0;

/// Configuration for lazy list measurement.
#[derive(Clone, Debug, PartialEq)]
pub struct LazyListMeasureConfig {
    /// Scroll axis of the list.
    pub orientation: Orientation,

    /// Whether items are laid out from the bottom/right edge.
    ///
    /// Only placement is mirrored; item offsets keep growing away from the
    /// leading edge.
    pub reverse_layout: bool,

    /// Content padding before the first item.
    pub before_content_padding: f32,

    /// Content padding after the last item.
    pub after_content_padding: f32,

    /// Spacing between items. May be negative for overlapping items.
    pub spacing: f32,

    /// Number of items to keep composed on each side of the visible window.
    pub beyond_bounds_item_count: usize,

    /// Arrangement used when the content is smaller than the viewport.
    pub arrangement: LinearArrangement,

    /// Reading direction. Right to left mirrors horizontal lists along the
    /// main axis and flips horizontal cross-axis alignment.
    pub layout_direction: LayoutDirection,

    /// Cross-axis alignment of items in a vertical list.
    pub horizontal_alignment: HorizontalAlignment,

    /// Cross-axis alignment of items in a horizontal list.
    pub vertical_alignment: VerticalAlignment,

    /// Items that stick to the leading edge once scrolled past.
    pub sticky_header_indices: Vec<usize>,

    /// Items that stay composed wherever they are.
    pub pinned_items: Vec<usize>,
}

impl Default for LazyListMeasureConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Vertical,
            reverse_layout: false,
            before_content_padding: 0.0,
            after_content_padding: 0.0,
            spacing: 0.0,
            beyond_bounds_item_count: 0,
            arrangement: LinearArrangement::Start,
            layout_direction: LayoutDirection::Ltr,
            horizontal_alignment: HorizontalAlignment::Start,
            vertical_alignment: VerticalAlignment::Top,
            sticky_header_indices: Vec::new(),
            pinned_items: Vec::new(),
        }
    }
}

impl LazyListMeasureConfig {
    pub fn vertical() -> Self {
        Self::default()
    }

    pub fn horizontal() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            ..Self::default()
        }
    }

    pub fn with_reverse_layout(mut self, reverse_layout: bool) -> Self {
        self.reverse_layout = reverse_layout;
        self
    }

    pub fn with_content_padding(mut self, before: f32, after: f32) -> Self {
        self.before_content_padding = before;
        self.after_content_padding = after;
        self
    }

    /// Sets a fixed gap between items; the spare-space arrangement follows it.
    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self.arrangement = LinearArrangement::spaced_by(spacing);
        self
    }

    /// Sets the arrangement; its spacing becomes the item spacing.
    pub fn with_arrangement(mut self, arrangement: LinearArrangement) -> Self {
        self.spacing = arrangement.spacing();
        self.arrangement = arrangement;
        self
    }

    pub fn with_beyond_bounds_item_count(mut self, count: usize) -> Self {
        self.beyond_bounds_item_count = count;
        self
    }

    pub fn with_layout_direction(mut self, layout_direction: LayoutDirection) -> Self {
        self.layout_direction = layout_direction;
        self
    }

    pub fn with_horizontal_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.horizontal_alignment = alignment;
        self
    }

    pub fn with_vertical_alignment(mut self, alignment: VerticalAlignment) -> Self {
        self.vertical_alignment = alignment;
        self
    }

    pub fn with_sticky_headers(mut self, indices: Vec<usize>) -> Self {
        self.sticky_header_indices = indices;
        self
    }

    pub fn with_pinned_items(mut self, indices: Vec<usize>) -> Self {
        self.pinned_items = indices;
        self
    }

    /// Panics on negative or non-finite content padding.
    pub fn assert_valid(&self) {
        assert!(
            self.before_content_padding >= 0.0 && self.before_content_padding.is_finite(),
            "invalid before content padding ({})",
            self.before_content_padding
        );
        assert!(
            self.after_content_padding >= 0.0 && self.after_content_padding.is_finite(),
            "invalid after content padding ({})",
            self.after_content_padding
        );
        assert!(self.spacing.is_finite(), "invalid item spacing ({})", self.spacing);
    }

    fn content_padding(&self) -> f32 {
        self.before_content_padding + self.after_content_padding
    }
}

/// Per-pass inputs that are not part of the list's configuration.
#[derive(Clone, Copy)]
pub struct MeasureRequest<'a> {
    /// Scroll position to start from.
    pub anchor: ScrollAnchor,

    /// Requested scroll; positive scrolls forward.
    pub scroll_delta: f32,

    /// Whether this is a lookahead pass.
    pub is_looking_ahead: bool,

    /// Layout info of the last post-lookahead pass, if any.
    pub post_lookahead_layout_info: Option<&'a dyn LazyListLayoutInfo>,

    /// Running average item size, used to size an unbounded viewport.
    pub average_item_size: f32,
}

impl<'a> MeasureRequest<'a> {
    pub fn new(anchor: ScrollAnchor, scroll_delta: f32) -> Self {
        Self {
            anchor,
            scroll_delta,
            is_looking_ahead: false,
            post_lookahead_layout_info: None,
            average_item_size: DEFAULT_ITEM_SIZE_ESTIMATE,
        }
    }

    /// Marks the request as a lookahead pass reconciling with `info`.
    pub fn looking_ahead(mut self, info: Option<&'a dyn LazyListLayoutInfo>) -> Self {
        self.is_looking_ahead = true;
        self.post_lookahead_layout_info = info;
        self
    }

    pub fn with_average_item_size(mut self, average_item_size: f32) -> Self {
        self.average_item_size = average_item_size;
        self
    }
}

/// Measures a lazy list and returns the items to place.
///
/// This is the core algorithm that determines virtualization behavior:
/// 1. Build the visible window from the anchor and the requested delta
/// 2. Compose beyond-bounds, pinned and lookahead items
/// 3. Position items from the anchor, or with the arrangement when the
///    content does not fill the viewport
/// 4. Pin the active sticky header
///
/// Every index is measured at most once per call.
pub fn measure_lazy_list<P>(
    provider: &mut P,
    constraints: Constraints,
    config: &LazyListMeasureConfig,
    request: &MeasureRequest<'_>,
) -> LazyListMeasureResult
where
    P: LazyLayoutItemProvider + ?Sized,
{
    let started = Instant::now();
    constraints.assert_valid();
    config.assert_valid();

    let orientation = config.orientation;
    let content_padding = config.content_padding();
    let content_constraints = match orientation {
        Orientation::Vertical => constraints.deflate(0.0, content_padding),
        Orientation::Horizontal => constraints.deflate(content_padding, 0.0),
    };
    let child_constraints = orientation.child_constraints(&content_constraints);

    // 1. Viewport handling - detect and handle infinite viewports
    let viewport = ViewportHandler::new(
        orientation.main_axis_max(&constraints),
        request.average_item_size,
        config.spacing,
    );
    let main_axis_available_size = viewport.effective_size() - content_padding;

    let items_count = provider.item_count();
    if items_count == 0 {
        return LazyListMeasureResult::empty(
            constraints,
            child_constraints,
            config,
            main_axis_available_size,
            request.scroll_delta,
        );
    }
    if main_axis_available_size <= 0.0 {
        log::warn!(
            "lazy list: no main axis space left after content padding ({})",
            main_axis_available_size
        );
    }

    let mut measured_provider =
        LazyListMeasuredItemProvider::new(provider, child_constraints, orientation, config.spacing);

    // 2. Visible window
    let params = WindowParams {
        items_count,
        main_axis_available_size,
        before_content_padding: config.before_content_padding,
        after_content_padding: config.after_content_padding,
        spacing: config.spacing,
        anchor: request.anchor,
        scroll_delta: request.scroll_delta,
    };
    let window = build_window(&params, &mut measured_provider);

    // 3. Extras
    let pinned = normalize_pinned(&config.pinned_items, items_count);
    let extra_items_before = create_items_before_list(
        window.first_index(),
        &mut measured_provider,
        config.beyond_bounds_item_count,
        &pinned,
    );
    let lookahead = match (request.is_looking_ahead, request.post_lookahead_layout_info) {
        (true, Some(info)) => Some(LookaheadContext {
            post_lookahead_layout_info: info,
            consumed_scroll: window.consumed_scroll,
        }),
        _ => None,
    };
    let extra_items_after = create_items_after_list(
        &window,
        &mut measured_provider,
        items_count,
        config.beyond_bounds_item_count,
        &pinned,
        lookahead,
    );

    // 4. Layout size
    let max_cross_axis = window
        .items
        .iter()
        .chain(&extra_items_before)
        .chain(&extra_items_after)
        .map(|item| item.cross_axis_size)
        .fold(0.0_f32, f32::max);
    let final_main_axis_offset = window.final_main_axis_offset;
    let (content_width, content_height) = match orientation {
        Orientation::Vertical => content_constraints.constrain(max_cross_axis, final_main_axis_offset),
        Orientation::Horizontal => {
            content_constraints.constrain(final_main_axis_offset, max_cross_axis)
        }
    };
    let main_axis_layout_size = match orientation {
        Orientation::Vertical => content_height,
        Orientation::Horizontal => content_width,
    };

    // 5. Positions
    let first_visible_item = window.items.get(window.first_visible_position);
    let first_visible_item_key = first_visible_item.map(|item| item.key);
    let first_visible_item_extent =
        first_visible_item.map_or(0.0, |item| item.main_axis_size_with_spacing);
    let visible_bounds = Some((window.first_index(), window.last_index()));

    let spare_space = has_spare_space(
        final_main_axis_offset,
        main_axis_layout_size,
        main_axis_available_size,
    );
    let mut positioned_items = if spare_space {
        assert!(
            extra_items_before.is_empty() && extra_items_after.is_empty(),
            "no extra items are expected when the content has spare space"
        );
        let arrangement: &dyn Arrangement = &config.arrangement;
        arrange_with_spare_space(
            window.items.into_iter().collect(),
            arrangement,
            config.reverse_layout,
            main_axis_layout_size,
        )
    } else {
        stack_items(
            window.items,
            extra_items_before,
            extra_items_after,
            window.items_scroll_offset,
        )
    };

    // 6. Sticky header
    let headers = normalize_headers(&config.sticky_header_indices, items_count);
    let sticky_header = if headers.is_empty() {
        None
    } else {
        apply_sticky_items(
            &mut positioned_items,
            &headers,
            window.first_visible.index,
            &mut measured_provider,
        )
    };

    let can_scroll_forward =
        window.next_index < items_count || final_main_axis_offset > main_axis_available_size;
    let measured_items_count = measured_provider.measured_count();

    let (width, height) = match orientation {
        Orientation::Vertical => {
            constraints.constrain(content_width, content_height + content_padding)
        }
        Orientation::Horizontal => {
            constraints.constrain(content_width + content_padding, content_height)
        }
    };

    log::debug!(
        "lazy list: measured {} of {} items in {:?}, first visible {:?}, consumed {} of {}{}",
        measured_items_count,
        items_count,
        started.elapsed(),
        window.first_visible,
        window.consumed_scroll,
        request.scroll_delta,
        if spare_space { " (spare space)" } else { "" }
    );

    LazyListMeasureResult {
        positioned_items,
        visible_bounds,
        first_visible_item_index: window.first_visible.index,
        first_visible_item_scroll_offset: window.first_visible.scroll_offset,
        first_visible_item_key,
        first_visible_item_extent,
        can_scroll_forward,
        consumed_scroll: window.consumed_scroll,
        requested_scroll: request.scroll_delta,
        viewport_start_offset: -config.before_content_padding,
        viewport_end_offset: main_axis_available_size + config.after_content_padding,
        total_items_count: items_count,
        orientation,
        reverse_layout: config.reverse_layout,
        before_content_padding: config.before_content_padding,
        after_content_padding: config.after_content_padding,
        spacing: config.spacing,
        remeasure_needed: window.remeasure_needed,
        sticky_header,
        constraints,
        child_constraints,
        width,
        height,
        measured_items_count,
        layout_direction: config.layout_direction,
        horizontal_alignment: config.horizontal_alignment,
        vertical_alignment: config.vertical_alignment,
    }
}
