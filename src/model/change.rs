use std::fmt;

use crate::model::group::GroupId;
use crate::model::task::TaskId;

/// A mutation that has already been applied to a collection.
///
/// Listeners (the rendering layer, loggers, tests) receive these after the
/// fact. Setters that leave a value unchanged do not publish anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    GroupAdded { group: GroupId, index: usize },
    GroupRemoved { group: GroupId, index: usize },
    GroupRenamed { group: GroupId },
    GroupsReordered { group: GroupId, from: usize, to: usize },
    TaskAdded { task: TaskId, group: GroupId, index: usize },
    TaskRemoved { task: TaskId, group: GroupId },
    TaskTextChanged { task: TaskId },
    TaskDoneChanged { task: TaskId, is_done: bool },
    TasksReordered { group: GroupId, task: TaskId, from: usize, to: usize },
    TaskReparented { task: TaskId, from: GroupId, to: GroupId },
    /// Groups were reconstructed from the save file
    Loaded { groups: usize },
}

/// Handle returned by `subscribe`, used to unsubscribe later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback = Box<dyn FnMut(&Change)>;

/// Registered change callbacks, called in subscription order
#[derive(Default)]
pub struct Listeners {
    next_id: u64,
    callbacks: Vec<(ListenerId, Callback)>,
}

impl Listeners {
    pub fn subscribe(&mut self, callback: impl FnMut(&Change) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Returns false if `id` was not registered
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(lid, _)| *lid != id);
        self.callbacks.len() != before
    }

    pub fn emit(&mut self, change: &Change) {
        log::debug!("change: {:?}", change);
        for (_, callback) in self.callbacks.iter_mut() {
            callback(change);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.callbacks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn emit_reaches_every_listener_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::default();
        let a = Rc::clone(&seen);
        listeners.subscribe(move |_| a.borrow_mut().push("a"));
        let b = Rc::clone(&seen);
        listeners.subscribe(move |_| b.borrow_mut().push("b"));

        listeners.emit(&Change::Loaded { groups: 0 });
        assert_eq!(*seen.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let count = Rc::new(RefCell::new(0));
        let mut listeners = Listeners::default();
        let c = Rc::clone(&count);
        let id = listeners.subscribe(move |_| *c.borrow_mut() += 1);

        listeners.emit(&Change::Loaded { groups: 1 });
        assert!(listeners.unsubscribe(id));
        assert!(!listeners.unsubscribe(id));
        listeners.emit(&Change::Loaded { groups: 1 });

        assert_eq!(*count.borrow(), 1);
        assert!(listeners.is_empty());
    }
}
