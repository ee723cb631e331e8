//! Route matching: converting between paths and route actions.
//!
//! The engine only needs the [`RouteMatcher`] capability. [`RoutesMap`] is
//! the default realization: an ordered table of action types and path
//! patterns with `:param` segments, checked up front with
//! `stillwater::Validation` so every problem in a table is reported at once.
//!
//! # Example
//!
//! ```rust
//! use lockstep::routes::{RouteMatcher, RoutesMap};
//!
//! let routes = RoutesMap::new()
//!     .route("FIRST", "/first")
//!     .route("SECOND", "/second/:param");
//!
//! let action = routes.path_to_action("/second/bar");
//! assert_eq!(action.action_type, "SECOND");
//! assert_eq!(action.payload["param"], "bar");
//!
//! assert_eq!(routes.action_to_path(&action).unwrap(), "/second/bar");
//! assert!(routes.validate().is_success());
//! ```

pub mod error;

pub use error::RouteError;

use crate::core::{Action, Payload, Query, NOT_FOUND, NOT_FOUND_PATH_KEY};
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Converts between URL paths and route actions.
///
/// Implementations decide what a path means; the engine never parses paths
/// itself.
pub trait RouteMatcher {
    /// Whether actions of this type describe a location.
    fn has_route(&self, action_type: &str) -> bool;

    /// Pathname (no query string) for a route action.
    fn action_to_path(&self, action: &Action) -> Result<String, RouteError>;

    /// Route action for a path, or a [`NOT_FOUND`] action when nothing matches.
    fn path_to_action(&self, path: &str) -> Action;
}

#[derive(Clone, Debug, PartialEq)]
enum Segment {
    Static(String),
    Param(String),
}

#[derive(Clone, Debug)]
struct Route {
    action_type: String,
    pattern: String,
    segments: Vec<Segment>,
}

impl Route {
    fn new(action_type: String, pattern: String) -> Self {
        let segments = split_path(&pattern)
            .map(|segment| match segment.strip_prefix(':') {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Static(segment.to_string()),
            })
            .collect();
        Self {
            action_type,
            pattern,
            segments,
        }
    }

    fn capture(&self, pathname: &str) -> Option<Payload> {
        let parts: Vec<&str> = split_path(pathname).collect();
        if parts.len() != self.segments.len() {
            return None;
        }
        let mut payload = Payload::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Static(expected) if expected == part => {}
                Segment::Static(_) => return None,
                Segment::Param(name) => {
                    payload.insert(name.clone(), part.to_string());
                }
            }
        }
        Some(payload)
    }

    fn render(&self, payload: &Payload) -> Result<String, RouteError> {
        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Static(text) => path.push_str(text),
                Segment::Param(name) => {
                    let value = payload.get(name).ok_or_else(|| RouteError::MissingParam {
                        action_type: self.action_type.clone(),
                        param: name.clone(),
                    })?;
                    path.push_str(value);
                }
            }
        }
        if path.is_empty() {
            path.push('/');
        }
        Ok(path)
    }

    fn check(&self) -> Validation<(), NonEmptyVec<RouteError>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<RouteError>>> = Vec::new();

        if self.action_type.is_empty() {
            checks.push(Validation::fail(RouteError::EmptyType {
                pattern: self.pattern.clone(),
            }));
        }

        if !self.pattern.starts_with('/') {
            checks.push(Validation::fail(self.invalid("must start with '/'")));
        }

        let mut names = HashSet::new();
        for segment in &self.segments {
            if let Segment::Param(name) = segment {
                if name.is_empty() {
                    checks.push(Validation::fail(self.invalid("empty parameter name")));
                } else if !names.insert(name.as_str()) {
                    checks.push(Validation::fail(
                        self.invalid(&format!("parameter ':{name}' appears twice")),
                    ));
                }
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }

    fn invalid(&self, reason: &str) -> RouteError {
        RouteError::InvalidPattern {
            pattern: self.pattern.clone(),
            reason: reason.to_string(),
        }
    }
}

/// Ordered route table. The first pattern that matches a path wins.
#[derive(Clone, Debug, Default)]
pub struct RoutesMap {
    routes: Vec<Route>,
}

impl RoutesMap {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Register a route.
    pub fn route(mut self, action_type: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.routes
            .push(Route::new(action_type.into(), pattern.into()));
        self
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Check the whole table, accumulating ALL problems.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<RouteError>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<RouteError>>> = Vec::new();
        let mut seen = HashSet::new();

        for route in &self.routes {
            checks.push(route.check());
            if !route.action_type.is_empty() && !seen.insert(route.action_type.as_str()) {
                checks.push(Validation::fail(RouteError::DuplicateRoute {
                    action_type: route.action_type.clone(),
                }));
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }

    fn find(&self, action_type: &str) -> Option<&Route> {
        self.routes
            .iter()
            .find(|route| route.action_type == action_type)
    }
}

impl RouteMatcher for RoutesMap {
    fn has_route(&self, action_type: &str) -> bool {
        action_type == NOT_FOUND || self.find(action_type).is_some()
    }

    fn action_to_path(&self, action: &Action) -> Result<String, RouteError> {
        if action.is_not_found() {
            return action
                .payload
                .get(NOT_FOUND_PATH_KEY)
                .cloned()
                .ok_or_else(|| RouteError::MissingParam {
                    action_type: NOT_FOUND.to_string(),
                    param: NOT_FOUND_PATH_KEY.to_string(),
                });
        }
        let route = self
            .find(&action.action_type)
            .ok_or_else(|| RouteError::UnknownRoute {
                action_type: action.action_type.clone(),
            })?;
        route.render(&action.payload)
    }

    fn path_to_action(&self, path: &str) -> Action {
        let (pathname, query) = match path.split_once('?') {
            Some((pathname, query)) => (pathname, parse_query(query)),
            None => (path, Query::new()),
        };

        let action = self
            .routes
            .iter()
            .find_map(|route| {
                route
                    .capture(pathname)
                    .map(|payload| Action::new(route.action_type.clone()).with_payload(payload))
            })
            .unwrap_or_else(|| Action::not_found(pathname));

        if query.is_empty() {
            action
        } else {
            action.with_query(query)
        }
    }
}

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// Minimal `a=1&b=2` split. Values are taken verbatim, without decoding.
fn parse_query(query: &str) -> Query {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => (pair.to_string(), String::new()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn routes() -> RoutesMap {
        RoutesMap::new()
            .route("HOME", "/")
            .route("FIRST", "/first")
            .route("SECOND", "/second/:param")
            .route("THIRD", "/third/:a/x/:b")
    }

    #[test]
    fn path_to_action_matches_static_route() {
        let action = routes().path_to_action("/first");

        assert_eq!(action.action_type, "FIRST");
        assert!(action.payload.is_empty());
        assert!(action.query.is_none());
    }

    #[test]
    fn path_to_action_captures_params() {
        let action = routes().path_to_action("/third/1/x/2");

        assert_eq!(action.action_type, "THIRD");
        assert_eq!(action.payload["a"], "1");
        assert_eq!(action.payload["b"], "2");
    }

    #[test]
    fn path_to_action_ignores_trailing_slash() {
        assert_eq!(routes().path_to_action("/second/bar/").action_type, "SECOND");
        assert_eq!(routes().path_to_action("/").action_type, "HOME");
    }

    #[test]
    fn path_to_action_splits_query() {
        let action = routes().path_to_action("/first?page=2&flag");
        let query = action.query.unwrap();

        assert_eq!(action.action_type, "FIRST");
        assert_eq!(query["page"], "2");
        assert_eq!(query["flag"], "");
    }

    #[test]
    fn unmatched_path_is_not_found() {
        let action = routes().path_to_action("/missing/page?x=1");

        assert!(action.is_not_found());
        assert_eq!(action.payload[NOT_FOUND_PATH_KEY], "/missing/page");
    }

    #[test]
    fn action_to_path_renders_params() {
        let action = Action::new("THIRD").with_param("a", "1").with_param("b", "2");

        assert_eq!(routes().action_to_path(&action).unwrap(), "/third/1/x/2");
        assert_eq!(routes().action_to_path(&Action::new("HOME")).unwrap(), "/");
    }

    #[test]
    fn action_to_path_reports_missing_param() {
        let result = routes().action_to_path(&Action::new("SECOND"));

        assert_eq!(
            result,
            Err(RouteError::MissingParam {
                action_type: "SECOND".to_string(),
                param: "param".to_string(),
            })
        );
    }

    #[test]
    fn action_to_path_rejects_unknown_type() {
        let result = routes().action_to_path(&Action::new("INCREMENT"));
        assert!(matches!(result, Err(RouteError::UnknownRoute { .. })));
    }

    #[test]
    fn not_found_is_always_routable() {
        let routes = routes();
        let action = Action::not_found("/nowhere");

        assert!(routes.has_route(NOT_FOUND));
        assert_eq!(routes.action_to_path(&action).unwrap(), "/nowhere");
        assert!(!routes.has_route("INCREMENT"));
    }

    #[test]
    fn validation_accumulates_all_problems() {
        let table = RoutesMap::new()
            .route("", "/empty-type")
            .route("RELATIVE", "relative")
            .route("BLANK", "/blank/:")
            .route("TWICE", "/twice/:id/:id")
            .route("FIRST", "/first")
            .route("FIRST", "/first-again");

        match table.validate() {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 5);
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, RouteError::EmptyType { .. })));
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, RouteError::DuplicateRoute { .. })));
                assert_eq!(
                    errors
                        .iter()
                        .filter(|e| matches!(e, RouteError::InvalidPattern { .. }))
                        .count(),
                    3
                );
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn valid_table_passes() {
        assert!(routes().validate().is_success());
        assert!(RoutesMap::new().validate().is_success());
    }
}
