use std::fmt;

use uuid::Uuid;

use crate::model::group::GroupId;

/// Text given to a task created by "add task"
pub const DEFAULT_TASK_TEXT: &str = "New Task";

/// Runtime identity of a task. Never written to the save file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn new() -> Self {
        TaskId(Uuid::new_v4())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        TaskId::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single to-do entry inside a group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    pub(crate) text: String,
    pub(crate) is_done: bool,
    /// Owning group. Not owned: only used to find the group's task list,
    /// never followed by the save codec. `None` while detached.
    pub(crate) group: Option<GroupId>,
}

impl Task {
    /// Create a detached, not-done task with a fresh identity
    pub fn new(text: impl Into<String>) -> Self {
        Task {
            id: TaskId::new(),
            text: text.into(),
            is_done: false,
            group: None,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_done(&self) -> bool {
        self.is_done
    }

    /// The group whose task list currently holds this task
    pub fn group(&self) -> Option<GroupId> {
        self.group
    }

    pub fn is_detached(&self) -> bool {
        self.group.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_is_detached_and_open() {
        let task = Task::new("Ship");
        assert_eq!(task.text(), "Ship");
        assert!(!task.is_done());
        assert!(task.is_detached());
    }

    #[test]
    fn task_ids_are_unique() {
        let a = Task::new("a");
        let b = Task::new("a");
        assert_ne!(a.id(), b.id());
        assert_ne!(a, b);
    }
}
