//! Middleware: wrappers around the store's dispatch.

use super::{Dispatch, Enhancer, Reducer, Store, StoreCreator};
use crate::core::Action;
use std::cell::RefCell;
use std::rc::Rc;

/// What a middleware may do with the store: read state and dispatch from the
/// top of the chain.
pub struct MiddlewareApi<S> {
    store: Store<S>,
    dispatch: Rc<RefCell<Option<Dispatch>>>,
}

impl<S> Clone for MiddlewareApi<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            dispatch: Rc::clone(&self.dispatch),
        }
    }
}

impl<S: Clone + 'static> MiddlewareApi<S> {
    pub fn get_state(&self) -> S {
        self.store.get_state()
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        self.store.with_state(f)
    }

    /// Dispatch through the complete middleware chain.
    ///
    /// Calling this while the chain is still being assembled dispatches
    /// straight to the store underneath.
    pub fn dispatch(&self, action: Action) -> Action {
        let dispatch = self.dispatch.borrow().clone();
        match dispatch {
            Some(dispatch) => dispatch(action),
            None => {
                tracing::warn!(
                    action_type = %action.action_type,
                    "dispatch during middleware construction bypasses the chain"
                );
                self.store.dispatch(action)
            }
        }
    }
}

/// `(api) -> (next) -> (action) -> action`
pub type Middleware<S> = Rc<dyn Fn(&MiddlewareApi<S>, Dispatch) -> Dispatch>;

/// Enhancer installing `middlewares`. The first middleware sees each action
/// first.
pub fn apply_middleware<S: Clone + 'static>(middlewares: Vec<Middleware<S>>) -> Enhancer<S> {
    Box::new(move |create: StoreCreator<S>| -> StoreCreator<S> {
        Box::new(move |reducer: Reducer<S>, initial: S| {
            let store = create(reducer, initial);
            let api = MiddlewareApi {
                store: store.clone(),
                dispatch: Rc::new(RefCell::new(None)),
            };

            let mut dispatch = store.dispatcher();
            for middleware in middlewares.iter().rev() {
                dispatch = middleware(&api, dispatch);
            }
            *api.dispatch.borrow_mut() = Some(Rc::clone(&dispatch));

            store.with_dispatch(dispatch)
        })
    })
}
