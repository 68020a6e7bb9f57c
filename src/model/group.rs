use std::fmt;

use uuid::Uuid;

use crate::model::task::TaskId;

/// Name given to a group created by "add group"
pub const DEFAULT_GROUP_NAME: &str = "New Group";

/// Runtime identity of a group. Never written to the save file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(Uuid);

impl GroupId {
    pub fn new() -> Self {
        GroupId(Uuid::new_v4())
    }
}

impl Default for GroupId {
    fn default() -> Self {
        GroupId::new()
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named, ordered list of tasks. The group owns its tasks; the tasks
/// themselves live in the collection's task table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    id: GroupId,
    pub(crate) name: String,
    pub(crate) tasks: Vec<TaskId>,
}

impl Group {
    /// Create an empty group with a fresh identity
    pub fn new(name: impl Into<String>) -> Self {
        Group {
            id: GroupId::new(),
            name: name.into(),
            tasks: Vec::new(),
        }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Task ids in display order
    pub fn tasks(&self) -> &[TaskId] {
        &self.tasks
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Position of `task` in this group's list
    pub fn position_of(&self, task: TaskId) -> Option<usize> {
        self.tasks.iter().position(|&t| t == task)
    }
}
