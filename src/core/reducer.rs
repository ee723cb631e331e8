//! The location reducer.

use super::action::Action;
use super::location::Location;

/// Fold an action into the location state.
///
/// Enriched navigation actions produce their computed location with the
/// previous state linked behind it, trimmed to the history depth recorded
/// by the middleware. Every other action leaves the state as it was.
///
/// The reducer never consults the history stack: everything it needs is in
/// `action.meta.location`.
///
/// # Example
///
/// ```rust
/// use lockstep::core::{location_reducer, Action, Location, LocationSnapshot, NavKind};
///
/// let start = Location::new(LocationSnapshot {
///     route_type: "FIRST".to_string(),
///     pathname: "/first".to_string(),
///     payload: Default::default(),
///     query: Default::default(),
///     kind: NavKind::Load,
/// });
///
/// let next = location_reducer(&start, &Action::new("INCREMENT"));
/// assert_eq!(next, start);
/// ```
pub fn location_reducer(state: &Location, action: &Action) -> Location {
    match action.navigation() {
        Some(navigation) => Location {
            current: navigation.current.clone(),
            previous: state.truncated(navigation.depth).map(Box::new),
        },
        None => state.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LocationSnapshot, NavKind, NavigationMeta, Payload, Query};

    fn snapshot(route_type: &str, path: &str, kind: NavKind) -> LocationSnapshot {
        LocationSnapshot {
            route_type: route_type.to_string(),
            pathname: path.to_string(),
            payload: Payload::new(),
            query: Query::new(),
            kind,
        }
    }

    fn navigate(state: &Location, route_type: &str, path: &str, depth: usize) -> Location {
        let action = Action::new(route_type).with_navigation(NavigationMeta {
            current: snapshot(route_type, path, NavKind::Push),
            previous: Some(state.clone()),
            depth,
        });
        location_reducer(state, &action)
    }

    #[test]
    fn non_navigation_action_is_identity() {
        let state = Location::new(snapshot("FIRST", "/first", NavKind::Load));

        let next = location_reducer(&state, &Action::new("SECOND"));

        assert_eq!(next, state);
    }

    #[test]
    fn navigation_links_previous_state() {
        let state = Location::new(snapshot("FIRST", "/first", NavKind::Load));

        let next = navigate(&state, "SECOND", "/second/bar", 2);

        assert_eq!(next.route_type(), "SECOND");
        assert_eq!(next.pathname(), "/second/bar");
        assert_eq!(next.kind(), NavKind::Push);
        assert_eq!(next.previous(), Some(&state));
    }

    #[test]
    fn previous_chain_is_bounded_by_depth() {
        let mut state = Location::new(snapshot("FIRST", "/first", NavKind::Load));
        for i in 0..10 {
            state = navigate(&state, "PAGE", &format!("/page/{i}"), 3);
        }

        assert_eq!(state.pathname(), "/page/9");
        assert_eq!(state.chain_len(), 3);
    }

    #[test]
    fn reducer_is_deterministic() {
        let state = Location::new(snapshot("FIRST", "/first", NavKind::Load));

        let result1 = navigate(&state, "SECOND", "/second/bar", 2);
        let result2 = navigate(&state, "SECOND", "/second/bar", 2);

        assert_eq!(result1, result2);
    }
}
