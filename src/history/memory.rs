//! In-process history stack.

use super::{History, HistoryAction, HistoryChange, Listener, ListenerSet, Subscription};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// History kept in memory, for environments without a browser.
///
/// Behaves like session history: pushing discards any forward entries,
/// replacing rewrites the current entry, and stepping past either end does
/// nothing.
///
/// # Example
///
/// ```rust
/// use lockstep::history::{History, MemoryHistory};
///
/// let history = MemoryHistory::new("/first");
/// history.push("/second");
/// assert_eq!(history.length(), 2);
///
/// history.go_back();
/// assert_eq!(history.current_path(), "/first");
///
/// history.go_back(); // already at the start
/// assert_eq!(history.current_path(), "/first");
/// ```
pub struct MemoryHistory {
    entries: RefCell<Vec<String>>,
    index: Cell<usize>,
    listeners: Rc<RefCell<ListenerSet>>,
    notifying: Cell<bool>,
}

impl MemoryHistory {
    /// Create a stack holding a single entry.
    pub fn new(initial: impl Into<String>) -> Self {
        Self::with_entries(vec![initial.into()], 0)
    }

    /// Create a stack from existing entries, positioned at `index`.
    ///
    /// An empty entry list starts at `/`; an out-of-range index is clamped
    /// to the last entry.
    pub fn with_entries(entries: Vec<String>, index: usize) -> Self {
        let entries = if entries.is_empty() {
            vec!["/".to_string()]
        } else {
            entries
        };
        let index = index.min(entries.len() - 1);
        Self {
            entries: RefCell::new(entries),
            index: Cell::new(index),
            listeners: ListenerSet::new(),
            notifying: Cell::new(false),
        }
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }

    pub fn can_go(&self, delta: isize) -> bool {
        let target = self.index.get() as isize + delta;
        target >= 0 && (target as usize) < self.entries.borrow().len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn go(&self, delta: isize, action: HistoryAction) {
        if !self.can_go(delta) {
            tracing::trace!(delta, "history boundary reached, ignoring");
            return;
        }
        let index = (self.index.get() as isize + delta) as usize;
        self.index.set(index);
        self.notify(action);
    }

    fn notify(&self, action: HistoryAction) {
        if self.notifying.get() {
            tracing::trace!(?action, "mutation inside listener, not re-notifying");
            return;
        }
        let change = HistoryChange {
            path: self.current_path(),
            action,
        };
        let listeners = self.listeners.borrow().snapshot();

        self.notifying.set(true);
        let _reset = ResetOnDrop(&self.notifying);
        for listener in listeners {
            listener(&change);
        }
    }
}

struct ResetOnDrop<'a>(&'a Cell<bool>);

impl Drop for ResetOnDrop<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl History for MemoryHistory {
    fn push(&self, path: &str) {
        {
            let mut entries = self.entries.borrow_mut();
            let index = self.index.get();
            entries.truncate(index + 1);
            entries.push(path.to_string());
            self.index.set(index + 1);
        }
        self.notify(HistoryAction::Push);
    }

    fn replace(&self, path: &str) {
        {
            let mut entries = self.entries.borrow_mut();
            entries[self.index.get()] = path.to_string();
        }
        self.notify(HistoryAction::Replace);
    }

    fn go_back(&self) {
        self.go(-1, HistoryAction::Back);
    }

    fn go_forward(&self) {
        self.go(1, HistoryAction::Forward);
    }

    fn length(&self) -> usize {
        self.entries.borrow().len()
    }

    fn index(&self) -> usize {
        self.index.get()
    }

    fn current_path(&self) -> String {
        self.entries.borrow()[self.index.get()].clone()
    }

    fn listen(&self, listener: Listener) -> Subscription {
        ListenerSet::add(&self.listeners, listener)
    }
}
