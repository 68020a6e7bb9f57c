use crate::model::change::Change;
use crate::model::collection::Collection;
use crate::model::group::GroupId;
use crate::model::task::{Task, TaskId};
use crate::ops::StoreError;
use crate::ops::reorder::{self, Pinned};

// ---------------------------------------------------------------------------
// Add / remove
// ---------------------------------------------------------------------------

/// Append a new task with the default text to `group`. `None` if the group
/// is not in the collection.
pub fn add_task(coll: &mut Collection, group: GroupId) -> Option<TaskId> {
    let text = coll.defaults.task_text.clone();
    add_task_with_text(coll, group, text)
}

pub fn add_task_with_text(
    coll: &mut Collection,
    group: GroupId,
    text: impl Into<String>,
) -> Option<TaskId> {
    let (id, index) = coll.push_task_quiet(group, text.into(), false)?;
    coll.emit(Change::TaskAdded {
        task: id,
        group,
        index,
    });
    Some(id)
}

/// Remove a task from the group its back-reference names. Unknown or
/// detached tasks are left alone and false is returned.
pub fn remove_task(coll: &mut Collection, id: TaskId) -> bool {
    match coll.take_task_quiet(id) {
        Some((_, group)) => {
            coll.emit(Change::TaskRemoved { task: id, group });
            true
        }
        None => false,
    }
}

// ---------------------------------------------------------------------------
// Field setters
// ---------------------------------------------------------------------------

pub fn set_task_text(
    coll: &mut Collection,
    id: TaskId,
    text: impl Into<String>,
) -> Result<(), StoreError> {
    let task = coll.tasks.get_mut(&id).ok_or(StoreError::TaskNotFound(id))?;
    let text = text.into();
    if task.text == text {
        return Ok(());
    }
    task.text = text;
    coll.emit(Change::TaskTextChanged { task: id });
    Ok(())
}

pub fn set_task_done(coll: &mut Collection, id: TaskId, is_done: bool) -> Result<(), StoreError> {
    let task = coll.tasks.get_mut(&id).ok_or(StoreError::TaskNotFound(id))?;
    if task.is_done == is_done {
        return Ok(());
    }
    task.is_done = is_done;
    coll.emit(Change::TaskDoneChanged { task: id, is_done });
    Ok(())
}

/// Flip the completion flag; returns the new value
pub fn toggle_task(coll: &mut Collection, id: TaskId) -> Result<bool, StoreError> {
    let is_done = !coll
        .task(id)
        .ok_or(StoreError::TaskNotFound(id))?
        .is_done();
    set_task_done(coll, id, is_done)?;
    Ok(is_done)
}

// ---------------------------------------------------------------------------
// Reparenting
// ---------------------------------------------------------------------------

/// Take a task out of its group. The returned task has no owner and must
/// be attached again (or dropped) by the caller.
pub fn detach_task(coll: &mut Collection, id: TaskId) -> Option<Task> {
    let (task, group) = coll.take_task_quiet(id)?;
    coll.emit(Change::TaskRemoved { task: id, group });
    Some(task)
}

/// Give a detached task to `group`, at `index` within its list (clamped),
/// or at the end.
pub fn attach_task(
    coll: &mut Collection,
    task: Task,
    group: GroupId,
    index: Option<usize>,
) -> Result<TaskId, StoreError> {
    let (id, index) = attach_quiet(coll, task, group, index)?;
    coll.emit(Change::TaskAdded {
        task: id,
        group,
        index,
    });
    Ok(id)
}

/// Move a task to the end of another group's list. Moving a task to the
/// group it is already in leaves it where it is.
pub fn move_task_to_group(coll: &mut Collection, id: TaskId, to: GroupId) -> Result<(), StoreError> {
    let from = coll
        .task(id)
        .ok_or(StoreError::TaskNotFound(id))?
        .group()
        .ok_or(StoreError::TaskNotFound(id))?;
    if !coll.groups.contains_key(&to) {
        return Err(StoreError::GroupNotFound(to));
    }
    if from == to {
        return Ok(());
    }
    let (task, _) = coll
        .take_task_quiet(id)
        .ok_or(StoreError::TaskNotFound(id))?;
    attach_quiet(coll, task, to, None)?;
    coll.emit(Change::TaskReparented { task: id, from, to });
    Ok(())
}

fn attach_quiet(
    coll: &mut Collection,
    mut task: Task,
    group: GroupId,
    index: Option<usize>,
) -> Result<(TaskId, usize), StoreError> {
    let id = task.id();
    if coll.tasks.contains_key(&id) {
        return Err(StoreError::TaskAlreadyAttached(id));
    }
    let owner = coll
        .groups
        .get_mut(&group)
        .ok_or(StoreError::GroupNotFound(group))?;
    let index = index
        .unwrap_or(owner.tasks.len())
        .min(owner.tasks.len());
    owner.tasks.insert(index, id);
    task.group = Some(group);
    coll.tasks.insert(id, task);
    Ok((id, index))
}

// ---------------------------------------------------------------------------
// Reorder within a group
// ---------------------------------------------------------------------------

/// Drop `dragged` onto the task at `target` in `group`'s list (`None` =
/// below the last task). Returns `(from, to)` if anything moved.
pub fn reorder_tasks(
    coll: &mut Collection,
    group: GroupId,
    dragged: TaskId,
    target: Option<usize>,
) -> Option<(usize, usize)> {
    let owner = coll.groups.get_mut(&group)?;
    let moved = reorder::apply_drop(&mut owner.tasks, &dragged, target, Pinned::NONE);
    if let Some((from, to)) = moved {
        coll.emit(Change::TasksReordered {
            group,
            task: dragged,
            from,
            to,
        });
    }
    moved
}
