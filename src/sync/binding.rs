//! The process-wide binding used by the imperative navigation API.
//!
//! The engine is single-threaded, so "process-wide" means the thread that
//! created the store. Creating a store with the history enhancer installs a
//! new binding, replacing (and detaching) the previous one. Only one store is
//! active at a time.

use super::echo::EchoGuard;
use crate::core::Action;
use crate::history::{History, Subscription};
use crate::routes::RouteMatcher;
use crate::store::Dispatch;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

thread_local! {
    static BINDING: RefCell<Option<Rc<EnhancerBinding>>> = const { RefCell::new(None) };
}

/// References captured from the most recently created synchronized store.
pub struct EnhancerBinding {
    dispatch: Dispatch,
    history: Rc<dyn History>,
    routes: Rc<dyn RouteMatcher>,
    echo: Rc<EchoGuard>,
    subscription: Option<Subscription>,
}

impl EnhancerBinding {
    pub(crate) fn new(
        dispatch: Dispatch,
        history: Rc<dyn History>,
        routes: Rc<dyn RouteMatcher>,
        echo: Rc<EchoGuard>,
        subscription: Subscription,
    ) -> Self {
        Self {
            dispatch,
            history,
            routes,
            echo,
            subscription: Some(subscription),
        }
    }

    pub fn dispatch(&self, action: Action) -> Action {
        (self.dispatch)(action)
    }

    pub fn history(&self) -> &Rc<dyn History> {
        &self.history
    }

    pub fn routes(&self) -> &Rc<dyn RouteMatcher> {
        &self.routes
    }

    /// True while the bound store is handling a history notification.
    pub fn last_action_was_from_adapter(&self) -> bool {
        self.echo.is_suspended()
    }
}

impl Drop for EnhancerBinding {
    fn drop(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl fmt::Debug for EnhancerBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnhancerBinding")
            .field("history_length", &self.history.length())
            .field("echo", &self.echo.state())
            .finish_non_exhaustive()
    }
}

/// Replace the current binding. The previous store stops listening to its
/// history.
pub(crate) fn install(binding: EnhancerBinding) {
    let previous = BINDING.with(|slot| slot.borrow_mut().replace(Rc::new(binding)));
    if previous.is_some() {
        tracing::debug!("superseding previously bound store");
    }
}

/// The binding of the most recently created synchronized store, if any.
pub fn current_binding() -> Option<Rc<EnhancerBinding>> {
    BINDING.with(|slot| slot.borrow().clone())
}

/// Drop the current binding, detaching its store from history.
pub fn reset_binding() {
    let previous = BINDING.with(|slot| slot.borrow_mut().take());
    drop(previous);
}
