use std::mem;

use crate::gesture::{DragThreshold, HitTree, Point, resolve_item};
use crate::ops::reorder::{self, Pinned};

/// Feedback for the pointer while a drag hovers over the list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropEffect {
    None,
    Move,
}

/// Returned when a press turns into a drag: the host should start a
/// move-type drag carrying `item`.
#[derive(Debug, Clone, PartialEq)]
pub struct DragStart<T> {
    pub item: T,
    pub effect: DropEffect,
}

/// A finished gesture, resolved against the list but not yet applied
#[derive(Debug, Clone, PartialEq)]
pub struct DropRequest<T> {
    pub item: T,
    /// Index of the element under the pointer, `None` for empty space
    pub target: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
enum Phase<T> {
    Idle,
    Pressed { origin: Point },
    Dragging { origin: Point, item: T },
}

/// Press → move → drop state machine for one list view.
///
/// Only `drop` mutates the list, and at most once per gesture. Every miss
/// (nothing under the pointer, item gone from the list) ends the gesture
/// without touching the list.
#[derive(Debug, Clone)]
pub struct DragController<T> {
    threshold: DragThreshold,
    pinned: Pinned,
    phase: Phase<T>,
}

impl<T: Clone + PartialEq> DragController<T> {
    pub fn new(threshold: DragThreshold, pinned: Pinned) -> Self {
        DragController {
            threshold,
            pinned,
            phase: Phase::Idle,
        }
    }

    pub fn threshold(&self) -> DragThreshold {
        self.threshold
    }

    pub fn pinned(&self) -> Pinned {
        self.pinned
    }

    /// The item being dragged, once the press has become a drag
    pub fn dragged(&self) -> Option<&T> {
        match &self.phase {
            Phase::Dragging { item, .. } => Some(item),
            _ => None,
        }
    }

    pub fn is_pressed(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging { .. })
    }

    /// Pointer pressed: remember where. Discards any unfinished gesture.
    pub fn begin_drag(&mut self, at: Point) {
        self.phase = Phase::Pressed { origin: at };
    }

    /// Pointer moved with the button held.
    ///
    /// Below the threshold, or with no item under the pointer, nothing
    /// happens. Otherwise the item under the pointer becomes the dragged
    /// item and the host is told to start a move.
    pub fn update_drag<H>(&mut self, at: Point, tree: &H, hit: Option<H::Node>) -> Option<DragStart<T>>
    where
        H: HitTree<Item = T>,
    {
        let origin = match self.phase {
            Phase::Pressed { origin } => origin,
            _ => return None,
        };
        if !self.threshold.exceeded(origin, at) {
            return None;
        }
        let item = resolve_item(tree, hit)?;
        log::debug!("drag started at ({}, {})", at.x, at.y);
        self.phase = Phase::Dragging {
            origin,
            item: item.clone(),
        };
        Some(DragStart {
            item,
            effect: DropEffect::Move,
        })
    }

    /// Hovering during a drag. Never mutates anything.
    pub fn drag_over(&self) -> DropEffect {
        if self.is_dragging() {
            DropEffect::Move
        } else {
            DropEffect::None
        }
    }

    /// End the gesture and resolve the drop target against `seq` without
    /// applying it. Use this when the list lives behind another owner.
    pub fn take_drop<H>(&mut self, at: Point, tree: &H, hit: Option<H::Node>, seq: &[T]) -> Option<DropRequest<T>>
    where
        H: HitTree<Item = T>,
    {
        let item = match mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Dragging { item, .. } => item,
            _ => return None,
        };
        let target = resolve_item(tree, hit).and_then(|t| seq.iter().position(|x| *x == t));
        log::debug!("drop at ({}, {}) on index {:?}", at.x, at.y, target);
        Some(DropRequest { item, target })
    }

    /// End the gesture and apply it to `seq`. Returns `(from, to)` if the
    /// list changed.
    pub fn drop<H>(&mut self, at: Point, tree: &H, hit: Option<H::Node>, seq: &mut Vec<T>) -> Option<(usize, usize)>
    where
        H: HitTree<Item = T>,
    {
        let request = self.take_drop(at, tree, hit, &seq[..])?;
        reorder::apply_drop(seq, &request.item, request.target, self.pinned)
    }

    /// Abandon the gesture
    pub fn cancel(&mut self) {
        self.phase = Phase::Idle;
    }
}

impl<T: Clone + PartialEq> Default for DragController<T> {
    fn default() -> Self {
        DragController::new(DragThreshold::default(), Pinned::NONE)
    }
}
