use std::fmt;

use indexmap::IndexMap;

use crate::model::change::{Change, ListenerId, Listeners};
use crate::model::config::EntityDefaults;
use crate::model::group::{Group, GroupId};
use crate::model::task::{Task, TaskId};

/// One element of the top-level list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entry {
    /// The "add new group" tile. Always at index 0, never saved, never moved.
    Placeholder,
    Group(GroupId),
}

impl Entry {
    pub fn group_id(self) -> Option<GroupId> {
        match self {
            Entry::Group(id) => Some(id),
            Entry::Placeholder => None,
        }
    }
}

/// The top-level list plus the group and task tables it refers to.
///
/// Groups and tasks are stored flat, keyed by id. Display order lives in
/// `entries` (groups) and in each `Group::tasks` (tasks). A task records
/// its owner's id rather than a reference, so there is no ownership cycle.
pub struct Collection {
    pub(crate) entries: Vec<Entry>,
    pub(crate) groups: IndexMap<GroupId, Group>,
    pub(crate) tasks: IndexMap<TaskId, Task>,
    pub(crate) defaults: EntityDefaults,
    listeners: Listeners,
}

/// A broken structural rule, reported by [`Collection::check_invariants`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    PlaceholderNotFirst,
    DuplicatePlaceholder { index: usize },
    UnknownGroup { group: GroupId },
    GroupListedTwice { group: GroupId },
    GroupNotListed { group: GroupId },
    UnknownTask { task: TaskId, group: GroupId },
    WrongBackReference { task: TaskId, expected: GroupId, actual: Option<GroupId> },
    TaskNotOwned { task: TaskId },
    TaskOwnedTwice { task: TaskId },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::PlaceholderNotFirst => write!(f, "placeholder is not at index 0"),
            Violation::DuplicatePlaceholder { index } => {
                write!(f, "second placeholder at index {}", index)
            }
            Violation::UnknownGroup { group } => write!(f, "entry refers to unknown group {}", group),
            Violation::GroupListedTwice { group } => write!(f, "group {} is listed twice", group),
            Violation::GroupNotListed { group } => {
                write!(f, "group {} is not in the top-level list", group)
            }
            Violation::UnknownTask { task, group } => {
                write!(f, "group {} refers to unknown task {}", group, task)
            }
            Violation::WrongBackReference {
                task,
                expected,
                actual,
            } => match actual {
                Some(actual) => write!(
                    f,
                    "task {} points at group {} but lives in {}",
                    task, actual, expected
                ),
                None => write!(f, "task {} has no owner but lives in {}", task, expected),
            },
            Violation::TaskNotOwned { task } => write!(f, "task {} is in no group", task),
            Violation::TaskOwnedTwice { task } => write!(f, "task {} is in two groups", task),
        }
    }
}

impl Collection {
    /// A collection holding only the placeholder
    pub fn new() -> Self {
        Collection::with_defaults(EntityDefaults::default())
    }

    pub fn with_defaults(defaults: EntityDefaults) -> Self {
        Collection {
            entries: vec![Entry::Placeholder],
            groups: IndexMap::new(),
            tasks: IndexMap::new(),
            defaults,
            listeners: Listeners::default(),
        }
    }

    pub fn defaults(&self) -> &EntityDefaults {
        &self.defaults
    }

    // -----------------------------------------------------------------------
    // Change notification
    // -----------------------------------------------------------------------

    pub fn subscribe(&mut self, callback: impl FnMut(&Change) + 'static) -> ListenerId {
        self.listeners.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    pub(crate) fn emit(&mut self, change: Change) {
        self.listeners.emit(&change);
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    /// The full top-level list, placeholder included
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(&id)
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(&id)
    }

    /// Groups in display order
    pub fn groups(&self) -> impl Iterator<Item = &Group> + '_ {
        self.entries
            .iter()
            .filter_map(|e| e.group_id())
            .filter_map(move |id| self.groups.get(&id))
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Tasks of `group` in display order
    pub fn tasks_of(&self, group: GroupId) -> impl Iterator<Item = &Task> + '_ {
        self.groups
            .get(&group)
            .map(|g| g.tasks.as_slice())
            .unwrap_or(&[])
            .iter()
            .filter_map(move |id| self.tasks.get(id))
    }

    /// The `n`th group in display order (0-based, placeholder not counted)
    pub fn group_at(&self, n: usize) -> Option<GroupId> {
        self.entries.iter().filter_map(|e| e.group_id()).nth(n)
    }

    /// Index of `group` in the top-level list (placeholder is index 0)
    pub fn entry_index(&self, group: GroupId) -> Option<usize> {
        self.entries.iter().position(|e| *e == Entry::Group(group))
    }

    /// First group with exactly this name, in display order
    pub fn find_group_by_name(&self, name: &str) -> Option<GroupId> {
        self.groups().find(|g| g.name == name).map(|g| g.id())
    }

    // -----------------------------------------------------------------------
    // Structural helpers shared by ops and the codec (no notification)
    // -----------------------------------------------------------------------

    /// Insert a new group at top-level `index`, clamped to stay after the
    /// placeholder and within bounds.
    pub(crate) fn insert_group_quiet(&mut self, index: usize, name: String) -> (GroupId, usize) {
        let group = Group::new(name);
        let id = group.id();
        let index = index.clamp(1, self.entries.len());
        self.entries.insert(index, Entry::Group(id));
        self.groups.insert(id, group);
        (id, index)
    }

    /// Append a new task to `group`, setting its back-reference
    pub(crate) fn push_task_quiet(
        &mut self,
        group: GroupId,
        text: String,
        is_done: bool,
    ) -> Option<(TaskId, usize)> {
        let owner = self.groups.get_mut(&group)?;
        let mut task = Task::new(text);
        task.is_done = is_done;
        task.group = Some(group);
        let id = task.id();
        owner.tasks.push(id);
        let index = owner.tasks.len() - 1;
        self.tasks.insert(id, task);
        Some((id, index))
    }

    /// Take a task out of its group and out of the task table, clearing the
    /// back-reference. Returns the detached task and its former owner.
    pub(crate) fn take_task_quiet(&mut self, id: TaskId) -> Option<(Task, GroupId)> {
        let owner = self.tasks.get(&id)?.group?;
        if let Some(group) = self.groups.get_mut(&owner) {
            group.tasks.retain(|&t| t != id);
        }
        let mut task = self.tasks.shift_remove(&id)?;
        task.group = None;
        Some((task, owner))
    }

    // -----------------------------------------------------------------------
    // Invariants
    // -----------------------------------------------------------------------

    /// Check the structural rules of the collection. An empty result means
    /// the collection is consistent.
    pub fn check_invariants(&self) -> Vec<Violation> {
        let mut violations = Vec::new();

        if self.entries.first() != Some(&Entry::Placeholder) {
            violations.push(Violation::PlaceholderNotFirst);
        }
        for (i, entry) in self.entries.iter().enumerate().skip(1) {
            if *entry == Entry::Placeholder {
                violations.push(Violation::DuplicatePlaceholder { index: i });
            }
        }

        let mut listed: IndexMap<GroupId, usize> = IndexMap::new();
        for id in self.entries.iter().filter_map(|e| e.group_id()) {
            if !self.groups.contains_key(&id) {
                violations.push(Violation::UnknownGroup { group: id });
            }
            *listed.entry(id).or_default() += 1;
        }
        for (id, count) in &listed {
            if *count > 1 {
                violations.push(Violation::GroupListedTwice { group: *id });
            }
        }
        for id in self.groups.keys() {
            if !listed.contains_key(id) {
                violations.push(Violation::GroupNotListed { group: *id });
            }
        }

        let mut owners: IndexMap<TaskId, usize> = IndexMap::new();
        for group in self.groups.values() {
            for &task_id in &group.tasks {
                *owners.entry(task_id).or_default() += 1;
                match self.tasks.get(&task_id) {
                    None => violations.push(Violation::UnknownTask {
                        task: task_id,
                        group: group.id(),
                    }),
                    Some(task) if task.group != Some(group.id()) => {
                        violations.push(Violation::WrongBackReference {
                            task: task_id,
                            expected: group.id(),
                            actual: task.group,
                        })
                    }
                    Some(_) => {}
                }
            }
        }
        for id in self.tasks.keys() {
            match owners.get(id) {
                None => violations.push(Violation::TaskNotOwned { task: *id }),
                Some(&n) if n > 1 => violations.push(Violation::TaskOwnedTwice { task: *id }),
                Some(_) => {}
            }
        }

        violations
    }
}

impl Default for Collection {
    fn default() -> Self {
        Collection::new()
    }
}

impl fmt::Debug for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("entries", &self.entries)
            .field("groups", &self.groups)
            .field("tasks", &self.tasks)
            .field("listeners", &self.listeners)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_collection_has_only_placeholder() {
        let coll = Collection::new();
        assert_eq!(coll.entries(), &[Entry::Placeholder]);
        assert!(coll.is_empty());
        assert!(coll.check_invariants().is_empty());
    }

    #[test]
    fn insert_group_never_lands_before_placeholder() {
        let mut coll = Collection::new();
        let (a, index) = coll.insert_group_quiet(0, "A".into());
        assert_eq!(index, 1);
        let (b, index) = coll.insert_group_quiet(99, "B".into());
        assert_eq!(index, 2);
        assert_eq!(
            coll.entries(),
            &[Entry::Placeholder, Entry::Group(a), Entry::Group(b)]
        );
        assert_eq!(coll.group_at(1), Some(b));
        assert_eq!(coll.entry_index(b), Some(2));
    }

    #[test]
    fn push_task_sets_back_reference() {
        let mut coll = Collection::new();
        let (g, _) = coll.insert_group_quiet(1, "G".into());
        let (t, index) = coll.push_task_quiet(g, "T".into(), true).unwrap();
        assert_eq!(index, 0);
        let task = coll.task(t).unwrap();
        assert_eq!(task.group(), Some(g));
        assert!(task.is_done());
        assert!(coll.check_invariants().is_empty());
    }

    #[test]
    fn push_task_to_unknown_group_is_none() {
        let mut coll = Collection::new();
        assert!(coll.push_task_quiet(GroupId::new(), "T".into(), false).is_none());
        assert_eq!(coll.task_count(), 0);
    }

    #[test]
    fn check_invariants_flags_broken_back_reference() {
        let mut coll = Collection::new();
        let (g, _) = coll.insert_group_quiet(1, "G".into());
        let (t, _) = coll.push_task_quiet(g, "T".into(), false).unwrap();
        coll.tasks.get_mut(&t).unwrap().group = None;
        assert_eq!(
            coll.check_invariants(),
            vec![Violation::WrongBackReference {
                task: t,
                expected: g,
                actual: None
            }]
        );
    }

    #[test]
    fn check_invariants_flags_misplaced_placeholder() {
        let mut coll = Collection::new();
        let (g, _) = coll.insert_group_quiet(1, "G".into());
        coll.entries.swap(0, 1);
        let violations = coll.check_invariants();
        assert!(violations.contains(&Violation::PlaceholderNotFirst));
        assert!(coll.entry_index(g) == Some(0));
    }
}
