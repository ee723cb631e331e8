//! The history store enhancer.
//!
//! Wraps store creation so that the store and a history stack stay in
//! lockstep:
//! - route actions are enriched by the navigation middleware,
//! - after a `PUSH`/`REPLACE` navigation is reduced, the history stack is
//!   updated to match,
//! - history notifications are turned into dispatched route actions marked
//!   as coming from the history, so they never echo back into the stack,
//! - a navigation is written only if the store still shows it once the
//!   dispatch returns, so a redirect issued by a subscriber wins,
//! - a title side effect is queued after every state change and flushed on a
//!   later tick.

use super::binding::{self, EnhancerBinding};
use super::deferred::{DeferredEffects, PendingEffect};
use super::echo::EchoGuard;
use super::middleware::{navigation_middleware, resolve_snapshot, LocationSelector};
use crate::core::{Action, Location, LocationSnapshot, NavKind, NOT_FOUND};
use crate::history::{History, HistoryChange, Listener};
use crate::routes::RouteMatcher;
use crate::store::{apply_middleware, Dispatch, Enhancer, Reducer, Store, StoreCreator};
use std::rc::Rc;

/// Derives the title to show from the application state.
pub type TitleSelector<S> = fn(&S) -> Option<String>;

/// Everything the enhancer needs, already resolved.
pub struct SyncConfig<S> {
    pub routes: Rc<dyn RouteMatcher>,
    pub history: Rc<dyn History>,
    pub select_location: LocationSelector<S>,
    pub select_title: Option<TitleSelector<S>>,
    pub effects: Rc<DeferredEffects>,
}

impl<S> Clone for SyncConfig<S> {
    fn clone(&self) -> Self {
        Self {
            routes: Rc::clone(&self.routes),
            history: Rc::clone(&self.history),
            select_location: self.select_location,
            select_title: self.select_title,
            effects: Rc::clone(&self.effects),
        }
    }
}

impl<S> SyncConfig<S> {
    /// Location for the history's current entry, as a store starts out.
    pub fn initial_location(&self) -> Location {
        let path = self.history.current_path();
        let action = self
            .routes
            .path_to_action(&path)
            .with_intent(NavKind::Load);
        let snapshot = resolve_snapshot(self.routes.as_ref(), &action).unwrap_or_else(|error| {
            tracing::warn!(%error, %path, "initial path cannot be resolved");
            LocationSnapshot {
                route_type: NOT_FOUND.to_string(),
                pathname: path.clone(),
                payload: Default::default(),
                query: Default::default(),
                kind: NavKind::Load,
            }
        });
        Location::new(snapshot)
    }
}

/// Store enhancer keeping the store and `config.history` in lockstep.
///
/// Installs the navigation middleware, captures the resulting dispatch and
/// history for the imperative API (replacing any earlier binding), and
/// dispatches the route for the history's current entry with kind `LOAD`.
pub fn history_enhancer<S: Clone + 'static>(config: SyncConfig<S>) -> Enhancer<S> {
    Box::new(move |create: StoreCreator<S>| -> StoreCreator<S> {
        Box::new(move |reducer: Reducer<S>, initial: S| {
            let SyncConfig {
                routes,
                history,
                select_location,
                select_title,
                effects,
            } = config;

            let middleware = navigation_middleware(
                Rc::clone(&routes),
                Rc::clone(&history),
                select_location,
            );
            let store = apply_middleware(vec![middleware])(create)(reducer, initial);

            let echo = Rc::new(EchoGuard::new());
            let dispatch = reflecting_dispatch(
                store.dispatcher(),
                Rc::clone(&history),
                store.clone(),
                select_location,
            );
            let store = store.with_dispatch(dispatch);

            if let Some(select_title) = select_title {
                let reader = store.clone();
                let _title_runner = store.subscribe(move || {
                    if let Some(title) = reader.with_state(select_title) {
                        effects.enqueue(PendingEffect::title(title));
                    }
                });
            }

            let subscription = history.listen(adapter_listener(
                store.clone(),
                Rc::clone(&routes),
                Rc::clone(&echo),
                select_location,
            ));
            binding::install(EnhancerBinding::new(
                store.dispatcher(),
                Rc::clone(&history),
                Rc::clone(&routes),
                echo,
                subscription,
            ));

            let path = history.current_path();
            tracing::debug!(%path, "store synchronized with history");
            store.dispatch(routes.path_to_action(&path).with_intent(NavKind::Load));

            store
        })
    })
}

/// Dispatch that writes `PUSH`/`REPLACE` navigations to history once the
/// inner dispatch (middleware, reducer, subscribers) has finished.
///
/// Subscribers may dispatch again while the outer action is still in flight.
/// Nested navigations are written first, and the outer one is written only
/// if the store still shows its target afterwards.
fn reflecting_dispatch<S: Clone + 'static>(
    next: Dispatch,
    history: Rc<dyn History>,
    store: Store<S>,
    select_location: LocationSelector<S>,
) -> Dispatch {
    Rc::new(move |action: Action| {
        let action = next(action);
        if let Some(navigation) = action.navigation() {
            let target = &navigation.current;
            if action.is_from_history() {
                tracing::trace!(pathname = %target.pathname, "adapter-originated dispatch, not writing history");
            } else if store.with_state(|state| select_location(state).current != *target) {
                tracing::debug!(pathname = %target.pathname, "superseded during dispatch, not writing history");
            } else {
                reflect(history.as_ref(), target);
            }
        }
        action
    })
}

fn reflect(history: &dyn History, target: &LocationSnapshot) {
    if !target.kind.mutates_history() {
        return;
    }
    let url = target.url();
    if history.current_path() == url {
        tracing::trace!(%url, "history already at target");
        return;
    }

    tracing::debug!(%url, kind = target.kind.name(), "writing history");
    match target.kind {
        NavKind::Push => history.push(&url),
        NavKind::Replace => history.replace(&url),
        NavKind::Load | NavKind::Back | NavKind::Forward => {}
    }
}

/// History listener dispatching a route action for each external change.
///
/// A push or replace onto the path the store already shows is the echo of a
/// write made by this store and is ignored. Back and forward always dispatch,
/// so the location records how it was reached.
fn adapter_listener<S: Clone + 'static>(
    store: Store<S>,
    routes: Rc<dyn RouteMatcher>,
    echo: Rc<EchoGuard>,
    select_location: LocationSelector<S>,
) -> Listener {
    Rc::new(move |change: &HistoryChange| {
        let kind = NavKind::from(change.action);
        if kind.mutates_history() {
            let current = store.with_state(|state| select_location(state).current.url());
            if current == change.path {
                tracing::trace!(path = %change.path, "history change matches store, ignoring");
                return;
            }
        }

        let action = routes
            .path_to_action(&change.path)
            .with_intent(kind)
            .from_history();
        tracing::debug!(path = %change.path, action = ?change.action, "history changed externally");
        echo.suspend(|| store.dispatch(action));
    })
}
