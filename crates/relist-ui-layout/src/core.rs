//! Value types exchanged with the host layout tree.

/// Identifier of a layout node owned by the host.
pub type NodeId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };
}

/// A child that the host has already measured under the list's child constraints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeasuredChild {
    pub node_id: NodeId,
    pub width: f32,
    pub height: f32,
}

impl MeasuredChild {
    pub fn new(node_id: NodeId, width: f32, height: f32) -> Self {
        Self {
            node_id,
            width,
            height,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Placement information for a measured child.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub node_id: NodeId,
    pub x: f32,
    pub y: f32,
    pub z_index: i32,
}

impl Placement {
    pub fn new(node_id: NodeId, x: f32, y: f32, z_index: i32) -> Self {
        Self {
            node_id,
            x,
            y,
            z_index,
        }
    }
}
