use crate::gesture::{HitTree, Point};

/// Node of a [`StackLayout`]: each row is an item container with a single
/// content child (the row's text).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowNode {
    Row(usize),
    Content(usize),
}

/// A vertical list of equal-height rows starting at y = 0.
///
/// This is the minimal hit-testing surface a host needs; a real renderer
/// implements [`HitTree`] over its own element tree instead.
#[derive(Debug, Clone)]
pub struct StackLayout<T> {
    items: Vec<T>,
    row_height: f64,
}

impl<T: Clone> StackLayout<T> {
    pub fn new(items: Vec<T>, row_height: f64) -> Self {
        StackLayout { items, row_height }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn row_height(&self) -> f64 {
        self.row_height
    }

    /// Vertical middle of row `index`, left edge at x = 0
    pub fn row_center(&self, index: usize) -> Point {
        Point::new(0.0, (index as f64 + 0.5) * self.row_height)
    }

    /// The innermost node under `at`, `None` outside every row
    pub fn hit_test(&self, at: Point) -> Option<RowNode> {
        if at.x < 0.0 || at.y < 0.0 || self.row_height <= 0.0 {
            return None;
        }
        let row = (at.y / self.row_height) as usize;
        (row < self.items.len()).then_some(RowNode::Content(row))
    }
}

impl<T: Clone> HitTree for StackLayout<T> {
    type Node = RowNode;
    type Item = T;

    fn parent(&self, node: &RowNode) -> Option<RowNode> {
        match *node {
            RowNode::Content(i) => Some(RowNode::Row(i)),
            RowNode::Row(_) => None,
        }
    }

    fn item(&self, node: &RowNode) -> Option<T> {
        match *node {
            RowNode::Row(i) => self.items.get(i).cloned(),
            RowNode::Content(_) => None,
        }
    }
}
