//! Measured item representation for lazy lists.
//!
//! Contains the result of measuring a single item during lazy layout.

use relist_ui_layout::{
    HorizontalAlignment, LayoutDirection, MeasuredChild, NodeId, Orientation, Placement,
    VerticalAlignment,
};
use smallvec::SmallVec;

use super::lazy_list_measure_result::LazyListItemInfo;

/// Inline capacity for an item's placeables.
/// Most lazy list items have 1-2 root nodes, so 4 avoids heap allocation
/// in the common case while keeping stack size reasonable.
pub type SmallPlaceableVec = SmallVec<[ItemPlaceable; 4]>;

/// One measured child of an item, stacked along the main axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemPlaceable {
    pub node_id: NodeId,
    pub main_axis_size: f32,
    pub cross_axis_size: f32,
    /// Offset of this child from the item's leading edge.
    pub main_axis_offset: f32,
}

/// A measured item in a lazy list.
///
/// Contains all the information needed to place the item after measurement.
/// Only `offset` changes after creation.
#[derive(Clone, Debug)]
pub struct LazyListMeasuredItem {
    /// Index in the data source.
    pub index: usize,

    /// Stable key for the item.
    pub key: u64,

    /// Content type for slot reuse.
    pub content_type: Option<u64>,

    /// Size in the main axis (height for vertical, width for horizontal).
    pub main_axis_size: f32,

    /// Size in the cross axis.
    pub cross_axis_size: f32,

    /// Gap after this item. Zero for the last item of the list.
    pub spacing: f32,

    /// `main_axis_size + spacing`, never negative.
    pub main_axis_size_with_spacing: f32,

    /// Main axis position relative to the content start (after before-padding).
    pub offset: f32,

    /// Children of the item in main axis order.
    pub placeables: SmallPlaceableVec,

    /// Set on items pinned in place by the sticky overlay.
    pub non_scrollable: bool,
}

impl LazyListMeasuredItem {
    /// Creates an item by stacking `children` along the main axis.
    pub fn new(
        index: usize,
        key: u64,
        content_type: Option<u64>,
        orientation: Orientation,
        children: &[MeasuredChild],
        spacing: f32,
    ) -> Self {
        let mut placeables = SmallPlaceableVec::new();
        let mut main_axis_size: f32 = 0.0;
        let mut cross_axis_size: f32 = 0.0;
        for child in children {
            let size = child.size();
            let main = orientation.main_axis_size_of(size);
            let cross = orientation.cross_axis_size_of(size);
            placeables.push(ItemPlaceable {
                node_id: child.node_id,
                main_axis_size: main,
                cross_axis_size: cross,
                main_axis_offset: main_axis_size,
            });
            main_axis_size += main;
            cross_axis_size = cross_axis_size.max(cross);
        }
        Self {
            index,
            key,
            content_type,
            main_axis_size,
            cross_axis_size,
            spacing,
            main_axis_size_with_spacing: (main_axis_size + spacing).max(0.0),
            offset: 0.0,
            placeables,
            non_scrollable: false,
        }
    }

    /// Main axis position of the trailing edge (spacing excluded).
    #[inline]
    pub fn end_offset(&self) -> f32 {
        self.offset + self.main_axis_size
    }

    /// Places the item at `offset` along the main axis.
    #[inline]
    pub fn position(&mut self, offset: f32) {
        self.offset = offset;
    }

    /// Moves the item for a forward scroll of `delta` pixels without remeasuring.
    ///
    /// A positive delta moves the item toward the leading edge.
    #[inline]
    pub fn apply_scroll_delta(&mut self, delta: f32) {
        self.offset -= delta;
    }

    /// Converts to layout info for external consumption.
    pub fn to_item_info(&self) -> LazyListItemInfo {
        LazyListItemInfo {
            index: self.index,
            key: self.key,
            content_type: self.content_type,
            offset: self.offset,
            size: self.main_axis_size,
        }
    }

    /// Appends one [`Placement`] per child in layout coordinates.
    pub(crate) fn place(&self, scope: &ItemPlacementScope, out: &mut Vec<Placement>) {
        // Reverse layout mirrors the item as a block; children keep their order.
        let item_start = if scope.reverse_layout {
            scope.main_axis_layout_size
                - scope.before_content_padding
                - self.offset
                - self.main_axis_size
        } else {
            scope.before_content_padding + self.offset
        };
        let z_index = if self.non_scrollable { 1 } else { 0 };

        for placeable in &self.placeables {
            let main = item_start + placeable.main_axis_offset;
            let placement = match scope.orientation {
                Orientation::Vertical => {
                    let x = scope.horizontal_alignment.align(
                        scope.cross_axis_layout_size,
                        placeable.cross_axis_size,
                        scope.layout_direction,
                    );
                    Placement::new(placeable.node_id, x, main, z_index)
                }
                Orientation::Horizontal => {
                    let y = scope
                        .vertical_alignment
                        .align(scope.cross_axis_layout_size, placeable.cross_axis_size);
                    Placement::new(placeable.node_id, main, y, z_index)
                }
            };
            out.push(placement);
        }
    }
}

/// Layout-wide values needed to turn item offsets into placements.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ItemPlacementScope {
    pub orientation: Orientation,
    pub reverse_layout: bool,
    pub main_axis_layout_size: f32,
    pub cross_axis_layout_size: f32,
    pub before_content_padding: f32,
    pub layout_direction: LayoutDirection,
    pub horizontal_alignment: HorizontalAlignment,
    pub vertical_alignment: VerticalAlignment,
}
