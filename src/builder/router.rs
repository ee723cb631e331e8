//! Builder for connecting routes, history and a store.

use crate::builder::error::BuildError;
use crate::core::Location;
use crate::history::History;
use crate::routes::{RouteMatcher, RoutesMap};
use crate::store::{Enhancer, Middleware};
use crate::sync::{
    history_enhancer, navigation_middleware, DeferredEffects, Environment, LocationSelector,
    Scheduler, SyncConfig, TickQueue, TitleSelector, TitleTarget,
};
use std::rc::Rc;
use stillwater::validation::Validation;

/// Builder for [`ConnectedRoutes`] with a fluent API.
pub struct RouterBuilder<S> {
    routes: Option<RoutesMap>,
    history: Option<Rc<dyn History>>,
    select_location: Option<LocationSelector<S>>,
    select_title: Option<TitleSelector<S>>,
    title_target: Option<Rc<dyn TitleTarget>>,
    scheduler: Option<Rc<dyn Scheduler>>,
}

impl<S: Clone + 'static> RouterBuilder<S> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            routes: None,
            history: None,
            select_location: None,
            select_title: None,
            title_target: None,
            scheduler: None,
        }
    }

    /// Set the route table (required).
    pub fn routes(mut self, routes: RoutesMap) -> Self {
        self.routes = Some(routes);
        self
    }

    /// Set the history stack to keep in sync (required).
    pub fn history(mut self, history: Rc<dyn History>) -> Self {
        self.history = Some(history);
        self
    }

    /// Set where the location lives in the application state (required).
    pub fn location(mut self, selector: LocationSelector<S>) -> Self {
        self.select_location = Some(selector);
        self
    }

    /// Derive a title from the application state (optional).
    pub fn title(mut self, selector: TitleSelector<S>) -> Self {
        self.select_title = Some(selector);
        self
    }

    /// Where titles are written (optional). Without one, titles are computed
    /// but never applied.
    pub fn title_target(mut self, target: Rc<dyn TitleTarget>) -> Self {
        self.title_target = Some(target);
        self
    }

    /// Event loop for deferred effects (optional). Defaults to a
    /// [`TickQueue`] available through [`ConnectedRoutes::ticks`].
    pub fn scheduler(mut self, scheduler: Rc<dyn Scheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Build the connected routes.
    /// Returns an error if required fields are missing or the route table is
    /// invalid.
    pub fn build(self) -> Result<ConnectedRoutes<S>, BuildError> {
        let routes = self.routes.ok_or(BuildError::NoRoutes)?;
        let history = self.history.ok_or(BuildError::MissingHistory)?;
        let select_location = self
            .select_location
            .ok_or(BuildError::MissingLocationSelector)?;

        if routes.is_empty() {
            return Err(BuildError::NoRoutes);
        }
        if let Validation::Failure(errors) = routes.validate() {
            return Err(BuildError::InvalidRoutes(errors.iter().cloned().collect()));
        }

        let (scheduler, ticks): (Rc<dyn Scheduler>, _) = match self.scheduler {
            Some(scheduler) => (scheduler, None),
            None => {
                let ticks = Rc::new(TickQueue::new());
                (Rc::clone(&ticks) as Rc<dyn Scheduler>, Some(ticks))
            }
        };
        let environment = match self.title_target {
            Some(target) => Environment::with_title(target),
            None => Environment::headless(),
        };

        Ok(ConnectedRoutes {
            config: SyncConfig {
                routes: Rc::new(routes),
                history,
                select_location,
                select_title: self.select_title,
                effects: DeferredEffects::new(environment, scheduler),
            },
            ticks,
        })
    }
}

impl<S: Clone + 'static> Default for RouterBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Routes connected to a history stack, ready to be installed in a store.
pub struct ConnectedRoutes<S> {
    config: SyncConfig<S>,
    ticks: Option<Rc<TickQueue>>,
}

impl<S: Clone + 'static> ConnectedRoutes<S> {
    /// Store enhancer synchronizing the store with the history.
    pub fn enhancer(&self) -> Enhancer<S> {
        history_enhancer(self.config.clone())
    }

    /// The navigation middleware on its own, for hosts assembling their own
    /// chain. The enhancer already installs it; applying it again is harmless.
    pub fn middleware(&self) -> Middleware<S> {
        navigation_middleware(
            Rc::clone(&self.config.routes),
            Rc::clone(&self.config.history),
            self.config.select_location,
        )
    }

    /// Location for the history's current entry, to seed the initial state.
    pub fn initial_location(&self) -> Location {
        self.config.initial_location()
    }

    pub fn history(&self) -> Rc<dyn History> {
        Rc::clone(&self.config.history)
    }

    pub fn routes(&self) -> Rc<dyn RouteMatcher> {
        Rc::clone(&self.config.routes)
    }

    /// The built-in tick queue, unless a custom scheduler was supplied.
    pub fn ticks(&self) -> Option<Rc<TickQueue>> {
        self.ticks.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::MemoryHistory;
    use crate::routes::RouteError;

    #[derive(Clone, Debug)]
    struct AppState {
        location: Location,
    }

    fn select_location(state: &AppState) -> &Location {
        &state.location
    }

    fn history() -> Rc<dyn History> {
        Rc::new(MemoryHistory::new("/first"))
    }

    #[test]
    fn builder_validates_required_fields() {
        let result = RouterBuilder::<AppState>::new()
            .routes(RoutesMap::new().route("FIRST", "/first"))
            .location(select_location)
            .build();
        assert!(matches!(result, Err(BuildError::MissingHistory)));

        let result = RouterBuilder::<AppState>::new()
            .routes(RoutesMap::new().route("FIRST", "/first"))
            .history(history())
            .build();
        assert!(matches!(result, Err(BuildError::MissingLocationSelector)));
    }

    #[test]
    fn builder_requires_routes() {
        let result = RouterBuilder::<AppState>::new()
            .history(history())
            .location(select_location)
            .routes(RoutesMap::new())
            .build();

        assert!(matches!(result, Err(BuildError::NoRoutes)));
    }

    #[test]
    fn builder_reports_every_route_problem() {
        let result = RouterBuilder::<AppState>::new()
            .history(history())
            .location(select_location)
            .routes(
                RoutesMap::new()
                    .route("FIRST", "first")
                    .route("FIRST", "/first/:"),
            )
            .build();

        match result {
            Err(BuildError::InvalidRoutes(errors)) => {
                assert_eq!(errors.len(), 3);
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, RouteError::DuplicateRoute { .. })));
            }
            _ => panic!("Expected InvalidRoutes"),
        }
    }

    #[test]
    fn fluent_api_builds_routes() {
        let connected = RouterBuilder::<AppState>::new()
            .routes(RoutesMap::new().route("FIRST", "/first"))
            .history(history())
            .location(select_location)
            .build()
            .unwrap();

        assert_eq!(connected.initial_location().route_type(), "FIRST");
        assert!(connected.ticks().is_some());
    }

    #[test]
    fn custom_scheduler_replaces_tick_queue() {
        let connected = RouterBuilder::<AppState>::new()
            .routes(RoutesMap::new().route("FIRST", "/first"))
            .history(history())
            .location(select_location)
            .scheduler(Rc::new(TickQueue::new()))
            .build()
            .unwrap();

        assert!(connected.ticks().is_none());
    }
}
