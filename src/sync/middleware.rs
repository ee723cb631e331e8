//! Navigation middleware: recognizes route actions and attaches their
//! computed location.

use super::error::NavigationError;
use crate::core::{Action, Location, LocationSnapshot, NavKind, NavigationMeta};
use crate::history::History;
use crate::routes::RouteMatcher;
use crate::store::{Dispatch, Middleware, MiddlewareApi};
use std::rc::Rc;

/// Reads the location out of the application state.
pub type LocationSelector<S> = fn(&S) -> &Location;

/// Compute the location a route action leads to.
///
/// `kind` comes from the action's intent, defaulting to [`NavKind::Push`].
pub fn resolve_snapshot(
    routes: &dyn RouteMatcher,
    action: &Action,
) -> Result<LocationSnapshot, NavigationError> {
    let pathname =
        routes
            .action_to_path(action)
            .map_err(|source| NavigationError::UnroutableAction {
                action_type: action.action_type.clone(),
                source,
            })?;

    Ok(LocationSnapshot {
        route_type: action.action_type.clone(),
        pathname,
        payload: action.payload.clone(),
        query: action.query.clone().unwrap_or_default(),
        kind: action.intent().unwrap_or(NavKind::Push),
    })
}

/// Attach `meta.location` to a route action.
///
/// Plain actions, actions that already carry a location, and route actions
/// that cannot be resolved all pass through unchanged.
///
/// # Example
///
/// ```rust
/// use lockstep::core::{Action, Location, LocationSnapshot, NavKind};
/// use lockstep::routes::RoutesMap;
/// use lockstep::sync::enrich;
///
/// let routes = RoutesMap::new().route("SECOND", "/second/:param");
/// let here = Location::new(LocationSnapshot {
///     route_type: "FIRST".to_string(),
///     pathname: "/first".to_string(),
///     payload: Default::default(),
///     query: Default::default(),
///     kind: NavKind::Load,
/// });
///
/// let action = enrich(&routes, &here, 1, Action::new("SECOND").with_param("param", "bar"));
/// let navigation = action.navigation().unwrap();
///
/// assert_eq!(navigation.current.pathname, "/second/bar");
/// assert_eq!(navigation.previous.as_ref(), Some(&here));
///
/// let plain = enrich(&routes, &here, 1, Action::new("INCREMENT"));
/// assert!(!plain.is_navigation());
/// ```
pub fn enrich(routes: &dyn RouteMatcher, current: &Location, depth: usize, action: Action) -> Action {
    if action.is_navigation() || !routes.has_route(&action.action_type) {
        return action;
    }

    match resolve_snapshot(routes, &action) {
        Ok(snapshot) => {
            tracing::debug!(
                action_type = %snapshot.route_type,
                pathname = %snapshot.pathname,
                kind = snapshot.kind.name(),
                "navigation action"
            );
            action.with_navigation(NavigationMeta {
                current: snapshot,
                previous: current.truncated(depth),
                depth,
            })
        }
        Err(error) => {
            tracing::warn!(%error, "passing unroutable action through");
            action
        }
    }
}

/// Middleware enriching route actions with their location.
///
/// The chain of the resulting location holds at most as many links as there
/// are entries up to the history's current position. A push discards the
/// entries after that position, so the chain never outgrows the stack. This
/// middleware never mutates history.
pub fn navigation_middleware<S: Clone + 'static>(
    routes: Rc<dyn RouteMatcher>,
    history: Rc<dyn History>,
    select_location: LocationSelector<S>,
) -> Middleware<S> {
    Rc::new(
        move |api: &MiddlewareApi<S>, next: Dispatch| -> Dispatch {
            let api = api.clone();
            let routes = Rc::clone(&routes);
            let history = Rc::clone(&history);
            Rc::new(move |action: Action| {
                let depth = history.index() + 1;
                let action = api.with_state(|state| {
                    enrich(routes.as_ref(), select_location(state), depth, action)
                });
                next(action)
            })
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Payload, Query};
    use crate::routes::{RouteError, RoutesMap};

    fn routes() -> RoutesMap {
        RoutesMap::new()
            .route("FIRST", "/first")
            .route("SECOND", "/second/:param")
    }

    fn here() -> Location {
        Location::new(LocationSnapshot {
            route_type: "FIRST".to_string(),
            pathname: "/first".to_string(),
            payload: Payload::new(),
            query: Query::new(),
            kind: NavKind::Load,
        })
    }

    #[test]
    fn route_action_defaults_to_push() {
        let action = enrich(
            &routes(),
            &here(),
            1,
            Action::new("SECOND").with_param("param", "bar"),
        );
        let navigation = action.navigation().unwrap();

        assert_eq!(navigation.current.route_type, "SECOND");
        assert_eq!(navigation.current.kind, NavKind::Push);
        assert_eq!(navigation.current.payload["param"], "bar");
        assert_eq!(navigation.depth, 1);
    }

    #[test]
    fn intent_sets_kind() {
        for kind in [NavKind::Replace, NavKind::Back, NavKind::Forward] {
            let action = enrich(&routes(), &here(), 1, Action::new("FIRST").with_intent(kind));
            assert_eq!(action.navigation().unwrap().current.kind, kind);
        }
    }

    #[test]
    fn query_is_carried_into_location() {
        let mut query = Query::new();
        query.insert("page".to_string(), "2".to_string());

        let action = enrich(&routes(), &here(), 1, Action::new("FIRST").with_query(query.clone()));

        assert_eq!(action.navigation().unwrap().current.query, query);
        assert_eq!(action.navigation().unwrap().current.url(), "/first?page=2");
    }

    #[test]
    fn unknown_type_passes_through() {
        let action = Action::new("INCREMENT").with_param("by", "1");
        assert_eq!(enrich(&routes(), &here(), 1, action.clone()), action);
    }

    #[test]
    fn unroutable_action_passes_through() {
        let action = Action::new("SECOND");

        assert_eq!(enrich(&routes(), &here(), 1, action.clone()), action);
        assert_eq!(
            resolve_snapshot(&routes(), &action),
            Err(NavigationError::UnroutableAction {
                action_type: "SECOND".to_string(),
                source: RouteError::MissingParam {
                    action_type: "SECOND".to_string(),
                    param: "param".to_string(),
                },
            })
        );
    }

    #[test]
    fn enrichment_is_idempotent() {
        let once = enrich(&routes(), &here(), 1, Action::new("FIRST"));
        let twice = enrich(&routes(), &here(), 5, once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn previous_is_bounded_by_depth() {
        let mut location = here();
        for _ in 0..4 {
            location = Location {
                current: location.current.clone(),
                previous: Some(Box::new(location)),
            };
        }

        let action = enrich(&routes(), &location, 2, Action::new("FIRST"));
        let previous = action.navigation().unwrap().previous.as_ref().unwrap();

        assert_eq!(previous.chain_len(), 1);
    }
}
