//! The history stack capability.
//!
//! The engine consumes history through the [`History`] trait only. Any
//! backing store (a browser's session history, an in-process stack) plugs
//! in by implementing it. [`MemoryHistory`] is the in-process realization
//! used outside browsers and in tests.
//!
//! Contract shared by all implementations:
//! - every mutation notifies listeners with the resulting path,
//! - mutations made while listeners are being notified do not notify again,
//! - moving back or forward past either end of the stack is a silent no-op.

mod memory;

pub use memory::MemoryHistory;

use crate::core::NavKind;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Which stack operation produced a change.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HistoryAction {
    Push,
    Replace,
    Back,
    Forward,
}

impl From<HistoryAction> for NavKind {
    fn from(action: HistoryAction) -> Self {
        match action {
            HistoryAction::Push => NavKind::Push,
            HistoryAction::Replace => NavKind::Replace,
            HistoryAction::Back => NavKind::Back,
            HistoryAction::Forward => NavKind::Forward,
        }
    }
}

/// Notification delivered to history listeners.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryChange {
    /// Path now at the top of the visible stack, including any query string
    pub path: String,
    pub action: HistoryAction,
}

/// Callback invoked after every history mutation.
pub type Listener = Rc<dyn Fn(&HistoryChange)>;

/// A history stack the engine can read and mutate.
pub trait History {
    fn push(&self, path: &str);

    fn replace(&self, path: &str);

    fn go_back(&self);

    fn go_forward(&self);

    /// Number of entries in the stack.
    fn length(&self) -> usize;

    /// Position of the current entry, counted from the oldest.
    fn index(&self) -> usize;

    /// Path of the current entry.
    fn current_path(&self) -> String;

    /// Register a change listener.
    fn listen(&self, listener: Listener) -> Subscription;
}

/// Registered listeners in subscription order.
///
/// Shared between a history implementation and the [`Subscription`]s it hands
/// out, so a subscription can remove itself without owning the history.
#[derive(Default)]
pub struct ListenerSet {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

impl ListenerSet {
    pub fn new() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::default()))
    }

    /// Add a listener, returning the subscription that removes it.
    pub fn add(set: &Rc<RefCell<Self>>, listener: Listener) -> Subscription {
        let id = {
            let mut inner = set.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.push((id, listener));
            id
        };
        Subscription {
            id,
            set: Rc::downgrade(set),
        }
    }

    /// Listeners as of now. Cloned so callbacks may subscribe or unsubscribe.
    pub fn snapshot(&self) -> Vec<Listener> {
        self.listeners
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

/// Handle to a registered history listener.
///
/// Dropping the handle keeps the listener registered; call
/// [`Subscription::unsubscribe`] to remove it.
pub struct Subscription {
    id: u64,
    set: Weak<RefCell<ListenerSet>>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        if let Some(set) = self.set.upgrade() {
            set.borrow_mut()
                .listeners
                .retain(|(id, _)| *id != self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("live", &(self.set.strong_count() > 0))
            .finish()
    }
}
