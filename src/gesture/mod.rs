//! Pointer gestures that drive list reordering.
//!
//! A [`DragController`] belongs to one list view and carries its own drag
//! state, so two lists never share a half-finished gesture. The rendering
//! layer supplies hit-testing through [`HitTree`].

pub mod drag;
pub mod layout;

pub use drag::*;
pub use layout::*;

/// A pointer position in view coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// Minimum pointer travel (per axis) before a press becomes a drag.
/// Keeps plain clicks from starting a reorder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragThreshold {
    pub min_horizontal: f64,
    pub min_vertical: f64,
}

impl Default for DragThreshold {
    fn default() -> Self {
        DragThreshold {
            min_horizontal: 4.0,
            min_vertical: 4.0,
        }
    }
}

impl DragThreshold {
    /// True once the pointer has travelled at least the minimum on either axis
    pub fn exceeded(&self, origin: Point, current: Point) -> bool {
        let dx = (origin.x - current.x).abs();
        let dy = (origin.y - current.y).abs();
        !(dx < self.min_horizontal && dy < self.min_vertical)
    }
}

/// Hit-testing view of a rendered list.
///
/// A hit lands on some node (a label, a checkbox, the row itself). Walking
/// up through `parent` eventually reaches the node that represents a whole
/// list item, for which `item` returns the data item.
pub trait HitTree {
    type Node;
    type Item;

    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// The data item this node represents, if it is an item container
    fn item(&self, node: &Self::Node) -> Option<Self::Item>;
}

/// Walk up from `hit` to the first node representing a list item.
/// `None` if nothing was hit or no ancestor is an item container.
pub fn resolve_item<H: HitTree>(tree: &H, hit: Option<H::Node>) -> Option<H::Item> {
    let mut node = hit;
    while let Some(current) = node {
        if let Some(item) = tree.item(&current) {
            return Some(item);
        }
        node = tree.parent(&current);
    }
    None
}
