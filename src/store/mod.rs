//! A minimal single-threaded state container.
//!
//! The store folds dispatched actions through a reducer and notifies
//! subscribers. Its creation path is open to enhancers: an [`Enhancer`]
//! receives the next [`StoreCreator`] and returns a wrapped one, which is how
//! middleware and history synchronization are installed.
//!
//! # Example
//!
//! ```rust
//! use lockstep::core::Action;
//! use lockstep::store::create_store;
//!
//! let store = create_store(
//!     |count: &u32, action: &Action| match action.action_type.as_str() {
//!         "INCREMENT" => count + 1,
//!         _ => *count,
//!     },
//!     0,
//!     None,
//! );
//!
//! store.dispatch(Action::new("INCREMENT"));
//! store.dispatch(Action::new("UNKNOWN"));
//! assert_eq!(store.get_state(), 1);
//! ```

mod middleware;

pub use middleware::{apply_middleware, Middleware, MiddlewareApi};

use crate::core::Action;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// Sends an action through the store, returning the action as finally
/// dispatched (after any enrichment by middleware).
pub type Dispatch = Rc<dyn Fn(Action) -> Action>;

/// Pure fold from the current state and an action to the next state.
pub type Reducer<S> = Rc<dyn Fn(&S, &Action) -> S>;

/// Builds a store from a reducer and an initial state.
pub type StoreCreator<S> = Box<dyn FnOnce(Reducer<S>, S) -> Store<S>>;

/// Wraps store creation.
pub type Enhancer<S> = Box<dyn FnOnce(StoreCreator<S>) -> StoreCreator<S>>;

type StoreListener = Rc<dyn Fn()>;

struct Shared<S> {
    state: RefCell<S>,
    reducer: Reducer<S>,
    listeners: RefCell<Vec<(u64, StoreListener)>>,
    next_listener: Cell<u64>,
}

/// Handle to a store. Clones share the same state.
pub struct Store<S> {
    shared: Rc<Shared<S>>,
    dispatch: Dispatch,
}

impl<S> Clone for Store<S> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
            dispatch: Rc::clone(&self.dispatch),
        }
    }
}

impl<S: Clone + 'static> Store<S> {
    fn new(reducer: Reducer<S>, initial: S) -> Self {
        let shared = Rc::new(Shared {
            state: RefCell::new(initial),
            reducer,
            listeners: RefCell::new(Vec::new()),
            next_listener: Cell::new(0),
        });
        let dispatch = base_dispatch(Rc::clone(&shared));
        Self { shared, dispatch }
    }

    /// Copy of the current state.
    pub fn get_state(&self) -> S {
        self.shared.state.borrow().clone()
    }

    /// Read the current state without cloning it.
    pub fn with_state<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.shared.state.borrow())
    }

    pub fn dispatch(&self, action: Action) -> Action {
        (self.dispatch)(action)
    }

    /// The dispatch function of this handle, for capture by other code.
    pub fn dispatcher(&self) -> Dispatch {
        Rc::clone(&self.dispatch)
    }

    /// Register a listener called after every dispatch, in subscription order.
    pub fn subscribe(&self, listener: impl Fn() + 'static) -> Unsubscribe {
        let id = self.shared.next_listener.get();
        self.shared.next_listener.set(id + 1);
        let listener: StoreListener = Rc::new(listener);
        self.shared.listeners.borrow_mut().push((id, listener));

        let shared = Rc::downgrade(&self.shared);
        let registry: Weak<dyn ListenerRegistry> = shared;
        Unsubscribe {
            id,
            listeners: registry,
        }
    }

    /// Same store, dispatching through `dispatch` instead.
    pub fn with_dispatch(self, dispatch: Dispatch) -> Self {
        Self {
            shared: self.shared,
            dispatch,
        }
    }

    pub fn listener_count(&self) -> usize {
        self.shared.listeners.borrow().len()
    }
}

impl<S: fmt::Debug> fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.shared.state)
            .field("listeners", &self.shared.listeners.borrow().len())
            .finish_non_exhaustive()
    }
}

fn base_dispatch<S: 'static>(shared: Rc<Shared<S>>) -> Dispatch {
    Rc::new(move |action: Action| {
        let next = {
            let state = shared.state.borrow();
            (shared.reducer)(&state, &action)
        };
        *shared.state.borrow_mut() = next;

        let listeners: Vec<StoreListener> = shared
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener();
        }
        action
    })
}

trait ListenerRegistry {
    fn remove(&self, id: u64);
}

impl<S> ListenerRegistry for Shared<S> {
    fn remove(&self, id: u64) {
        self.listeners
            .borrow_mut()
            .retain(|(listener, _)| *listener != id);
    }
}

/// Handle returned by [`Store::subscribe`].
///
/// The listener stays registered until [`Unsubscribe::unsubscribe`] is called.
pub struct Unsubscribe {
    id: u64,
    listeners: Weak<dyn ListenerRegistry>,
}

impl Unsubscribe {
    pub fn unsubscribe(self) {
        if let Some(registry) = self.listeners.upgrade() {
            registry.remove(self.id);
        }
    }
}

/// Create a store, letting `enhancer` wrap the creation path.
pub fn create_store<S, R>(reducer: R, initial: S, enhancer: Option<Enhancer<S>>) -> Store<S>
where
    S: Clone + 'static,
    R: Fn(&S, &Action) -> S + 'static,
{
    let reducer: Reducer<S> = Rc::new(reducer);
    let create: StoreCreator<S> = Box::new(Store::new);
    match enhancer {
        Some(enhancer) => enhancer(create)(reducer, initial),
        None => create(reducer, initial),
    }
}

/// Compose two enhancers; `outer` sees the creation path after `inner`
/// wrapped it.
pub fn compose<S: 'static>(outer: Enhancer<S>, inner: Enhancer<S>) -> Enhancer<S> {
    Box::new(move |create: StoreCreator<S>| outer(inner(create)))
}
