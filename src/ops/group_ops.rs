use crate::model::change::Change;
use crate::model::collection::{Collection, Entry};
use crate::model::group::GroupId;
use crate::ops::StoreError;
use crate::ops::reorder::{self, Pinned};

/// Append a new group with the default name after the last group.
pub fn add_group(coll: &mut Collection) -> GroupId {
    let name = coll.defaults.group_name.clone();
    add_named_group(coll, name)
}

/// Append a new group with the given name after the last group.
pub fn add_named_group(coll: &mut Collection, name: impl Into<String>) -> GroupId {
    let end = coll.entries.len();
    let (id, index) = coll.insert_group_quiet(end, name.into());
    coll.emit(Change::GroupAdded { group: id, index });
    id
}

/// Remove a group and every task it owns. Returns false if the group is
/// not in the collection.
pub fn remove_group(coll: &mut Collection, id: GroupId) -> bool {
    let Some(index) = coll.entry_index(id) else {
        return false;
    };
    coll.entries.remove(index);
    if let Some(group) = coll.groups.shift_remove(&id) {
        for task in group.tasks {
            coll.tasks.shift_remove(&task);
        }
    }
    coll.emit(Change::GroupRemoved { group: id, index });
    true
}

pub fn rename_group(
    coll: &mut Collection,
    id: GroupId,
    name: impl Into<String>,
) -> Result<(), StoreError> {
    let group = coll
        .groups
        .get_mut(&id)
        .ok_or(StoreError::GroupNotFound(id))?;
    let name = name.into();
    if group.name == name {
        return Ok(());
    }
    group.name = name;
    coll.emit(Change::GroupRenamed { group: id });
    Ok(())
}

/// Drop `dragged` onto the top-level entry at `target` (`None` = below the
/// last entry). The placeholder's slot is reserved. Returns `(from, to)`
/// top-level indices if anything moved.
pub fn reorder_groups(
    coll: &mut Collection,
    dragged: GroupId,
    target: Option<usize>,
) -> Option<(usize, usize)> {
    let moved = reorder::apply_drop(&mut coll.entries, &Entry::Group(dragged), target, Pinned::GROUPS);
    if let Some((from, to)) = moved {
        coll.emit(Change::GroupsReordered {
            group: dragged,
            from,
            to,
        });
    }
    moved
}
