//! Echo guard: tracks when a store is handling a history notification.
//!
//! Writes are suppressed per action (see `Action::from_history`); the guard
//! exposes the surrounding window to the imperative API and to observers.

use std::cell::Cell;

/// State of a synchronized store with respect to history writes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EchoState {
    /// No history notification is being handled
    Ready,
    /// An adapter-originated dispatch is in flight
    SuspendedEcho,
}

/// Per-store guard toggled around adapter-originated dispatches.
///
/// The guard always returns to the state it was in before [`suspend`] was
/// entered, including when the dispatch unwinds.
///
/// [`suspend`]: EchoGuard::suspend
///
/// # Example
///
/// ```rust
/// use lockstep::sync::{EchoGuard, EchoState};
///
/// let guard = EchoGuard::new();
/// let inside = guard.suspend(|| guard.state());
///
/// assert_eq!(inside, EchoState::SuspendedEcho);
/// assert_eq!(guard.state(), EchoState::Ready);
/// ```
#[derive(Debug)]
pub struct EchoGuard {
    state: Cell<EchoState>,
}

impl Default for EchoGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl EchoGuard {
    pub fn new() -> Self {
        Self {
            state: Cell::new(EchoState::Ready),
        }
    }

    pub fn state(&self) -> EchoState {
        self.state.get()
    }

    /// True while an adapter-originated dispatch is running.
    pub fn is_suspended(&self) -> bool {
        self.state.get() == EchoState::SuspendedEcho
    }

    /// Run `f` as the handling of a history notification.
    pub fn suspend<R>(&self, f: impl FnOnce() -> R) -> R {
        let _restore = Restore {
            cell: &self.state,
            previous: self.state.replace(EchoState::SuspendedEcho),
        };
        f()
    }
}

struct Restore<'a> {
    cell: &'a Cell<EchoState>,
    previous: EchoState,
}

impl Drop for Restore<'_> {
    fn drop(&mut self) {
        self.cell.set(self.previous);
    }
}
