//! Index arithmetic for drag-to-reorder.
//!
//! A drop names a target index: the slot of the element the pointer was
//! over, or nothing (empty space below the list). The dragged item is
//! removed from its slot and inserted before the element that was at the
//! target, so a target after the source shifts left by one after removal.

/// Reserved spans at either end of a list that no item may be moved into
/// (or dragged out of).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pinned {
    pub head: usize,
    pub tail: usize,
}

impl Pinned {
    /// Nothing reserved (a group's task list)
    pub const NONE: Pinned = Pinned { head: 0, tail: 0 };
    /// The top-level list: the placeholder owns index 0
    pub const GROUPS: Pinned = Pinned { head: 1, tail: 0 };

    pub const fn head(n: usize) -> Pinned {
        Pinned { head: n, tail: 0 }
    }

    pub const fn tail(n: usize) -> Pinned {
        Pinned { head: 0, tail: n }
    }

    /// Whether `index` falls inside a reserved span of a list of `len`
    pub fn covers(&self, index: usize, len: usize) -> bool {
        index < self.head || (self.tail > 0 && index + self.tail >= len)
    }
}

/// Move the element at `from` so that it ends up at `to`.
/// Out-of-range indices leave the list untouched.
pub fn move_item<T>(seq: &mut Vec<T>, from: usize, to: usize) {
    if from == to || from >= seq.len() || to >= seq.len() {
        return;
    }
    let item = seq.remove(from);
    seq.insert(to, item);
}

/// Compute where an item dragged from `source` lands when dropped on
/// `target` (`None` = no element under the pointer).
///
/// Returns the final index of the item, equal to `source` when the drop
/// changes nothing. `None` if `source` is out of range.
pub fn resolve_drop_index(
    len: usize,
    source: usize,
    target: Option<usize>,
    pinned: Pinned,
) -> Option<usize> {
    if source >= len {
        return None;
    }
    let last = len - 1;

    let mut index = target.unwrap_or(last);
    if pinned.tail > 0 {
        index = index.min(last.saturating_sub(pinned.tail));
    }
    index = index.min(last).max(pinned.head.min(last));

    if index > source {
        // removal shifts everything after the source one slot left
        index -= 1;
    }
    Some(index)
}

/// Apply a completed drop of `dragged` onto `target`.
///
/// The item is found by equality. Nothing happens if it is absent, sits in
/// a pinned span, or would land where it already is. Returns the
/// `(from, to)` indices when the list was changed.
pub fn apply_drop<T: PartialEq>(
    seq: &mut Vec<T>,
    dragged: &T,
    target: Option<usize>,
    pinned: Pinned,
) -> Option<(usize, usize)> {
    let source = seq.iter().position(|item| item == dragged)?;
    if pinned.covers(source, seq.len()) {
        return None;
    }
    let to = resolve_drop_index(seq.len(), source, target, pinned)?;
    if to == source {
        return None;
    }
    move_item(seq, source, to);
    Some((source, to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const P: &str = "+";

    #[test]
    fn move_item_forward_and_back() {
        let mut v = vec!["a", "b", "c", "d"];
        move_item(&mut v, 0, 2);
        assert_eq!(v, vec!["b", "c", "a", "d"]);
        move_item(&mut v, 2, 0);
        assert_eq!(v, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn move_item_is_invertible() {
        let original: Vec<u32> = (0..6).collect();
        for i in 0..original.len() {
            for j in 0..original.len() {
                if i == j {
                    continue;
                }
                let mut v = original.clone();
                let item = v[i];
                move_item(&mut v, i, j);
                let now = v.iter().position(|&x| x == item).unwrap();
                assert_eq!(now, j);
                move_item(&mut v, now, i);
                assert_eq!(v, original, "move {} -> {} not undone", i, j);
            }
        }
    }

    #[test]
    fn move_item_out_of_range_is_noop() {
        let mut v = vec![1, 2, 3];
        move_item(&mut v, 5, 0);
        move_item(&mut v, 0, 3);
        assert_eq!(v, vec![1, 2, 3]);
    }

    #[test]
    fn drop_onto_earlier_element_inserts_before_it() {
        let mut v = vec![P, "a", "b", "c"];
        assert_eq!(apply_drop(&mut v, &"c", Some(1), Pinned::GROUPS), Some((3, 1)));
        assert_eq!(v, vec![P, "c", "a", "b"]);
    }

    #[test]
    fn drop_onto_later_element_lands_one_short() {
        // a is dropped on c: removed first, then inserted at c's old index - 1
        let mut v = vec![P, "a", "b", "c"];
        assert_eq!(apply_drop(&mut v, &"a", Some(3), Pinned::GROUPS), Some((1, 2)));
        assert_eq!(v, vec![P, "b", "a", "c"]);
    }

    #[test]
    fn drop_onto_next_neighbour_changes_nothing() {
        let mut v = vec![P, "a", "b"];
        assert_eq!(apply_drop(&mut v, &"a", Some(2), Pinned::GROUPS), None);
        assert_eq!(v, vec![P, "a", "b"]);
    }

    #[test]
    fn drop_on_empty_space_targets_last_index() {
        let mut v = vec![P, "a", "b", "c"];
        assert_eq!(apply_drop(&mut v, &"a", None, Pinned::GROUPS), Some((1, 2)));
        assert_eq!(v, vec![P, "b", "a", "c"]);
    }

    #[test]
    fn drop_onto_placeholder_is_clamped_after_it() {
        let mut v = vec![P, "a", "b"];
        assert_eq!(apply_drop(&mut v, &"b", Some(0), Pinned::GROUPS), Some((2, 1)));
        assert_eq!(v, vec![P, "b", "a"]);
    }

    #[test]
    fn placeholder_cannot_be_dragged() {
        let mut v = vec![P, "a", "b"];
        assert_eq!(apply_drop(&mut v, &P, Some(2), Pinned::GROUPS), None);
        assert_eq!(v, vec![P, "a", "b"]);
    }

    #[test]
    fn single_group_cannot_move() {
        let mut v = vec![P, "a"];
        assert_eq!(apply_drop(&mut v, &"a", Some(0), Pinned::GROUPS), None);
        assert_eq!(apply_drop(&mut v, &"a", None, Pinned::GROUPS), None);
        assert_eq!(v, vec![P, "a"]);
    }

    #[test]
    fn missing_item_is_noop() {
        let mut v = vec![P, "a", "b"];
        assert_eq!(apply_drop(&mut v, &"z", Some(1), Pinned::GROUPS), None);
        assert_eq!(v, vec![P, "a", "b"]);
    }

    #[test]
    fn pinned_tail_keeps_trailing_slot() {
        // "+" is an add-tile at the end of the list
        let mut v = vec!["a", "b", "c", P];
        assert_eq!(apply_drop(&mut v, &"a", None, Pinned::tail(1)), Some((0, 1)));
        assert_eq!(v, vec!["b", "a", "c", P]);
        assert_eq!(apply_drop(&mut v, &"c", Some(3), Pinned::tail(1)), None);
        assert_eq!(apply_drop(&mut v, &P, Some(0), Pinned::tail(1)), None);
        assert_eq!(v.last(), Some(&P));
    }

    #[test]
    fn target_past_end_is_clamped() {
        let mut v = vec!["a", "b", "c"];
        assert_eq!(apply_drop(&mut v, &"a", Some(10), Pinned::NONE), Some((0, 1)));
        assert_eq!(v, vec!["b", "a", "c"]);
    }

    #[test]
    fn resolve_drop_index_out_of_range_source() {
        assert_eq!(resolve_drop_index(0, 0, None, Pinned::NONE), None);
        assert_eq!(resolve_drop_index(3, 3, Some(0), Pinned::NONE), None);
    }

    #[test]
    fn reorder_never_touches_index_zero() {
        let base = vec![P, "a", "b", "c", "d"];
        for dragged in &base {
            for target in (0..base.len()).map(Some).chain([None]) {
                let mut v = base.clone();
                apply_drop(&mut v, dragged, target, Pinned::GROUPS);
                assert_eq!(v[0], P, "drag {} onto {:?}", dragged, target);
            }
        }
    }
}
