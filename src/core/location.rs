//! Location records.
//!
//! A [`Location`] is the synchronized answer to "where is the application
//! right now". It is an immutable value: every navigation produces a new
//! location whose `previous` link points at the one it replaced.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Query-string parameters, keyed by name.
pub type Query = BTreeMap<String, String>;

/// Route parameters captured from `:param` path segments.
pub type Payload = BTreeMap<String, String>;

/// How a location was reached.
///
/// `Push` and `Replace` are call-site intents that must be written back to
/// the history stack. `Back` and `Forward` originate from the history stack
/// itself. `Load` marks the location the store started at.
///
/// # Example
///
/// ```rust
/// use lockstep::core::NavKind;
///
/// assert!(NavKind::Push.mutates_history());
/// assert!(!NavKind::Back.mutates_history());
/// assert_eq!(NavKind::Replace.name(), "REPLACE");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NavKind {
    Load,
    Push,
    Replace,
    Back,
    Forward,
}

impl NavKind {
    /// Get the kind's name for display/logging.
    pub fn name(&self) -> &str {
        match self {
            Self::Load => "LOAD",
            Self::Push => "PUSH",
            Self::Replace => "REPLACE",
            Self::Back => "BACK",
            Self::Forward => "FORWARD",
        }
    }

    /// Whether a navigation of this kind is reflected into the history stack.
    pub fn mutates_history(&self) -> bool {
        matches!(self, Self::Push | Self::Replace)
    }
}

/// Flat description of a single location, without its predecessors.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct LocationSnapshot {
    /// Action type of the route that matched
    #[serde(rename = "type")]
    pub route_type: String,
    /// Path portion of the URL, without the query string
    pub pathname: String,
    /// Route parameters
    #[serde(default)]
    pub payload: Payload,
    /// Parsed query string
    #[serde(default)]
    pub query: Query,
    /// How this location was reached
    pub kind: NavKind,
}

impl LocationSnapshot {
    /// Full URL as written to the history stack: pathname plus query string.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lockstep::core::{LocationSnapshot, NavKind, Query};
    ///
    /// let mut query = Query::new();
    /// query.insert("page".to_string(), "2".to_string());
    ///
    /// let snapshot = LocationSnapshot {
    ///     route_type: "LIST".to_string(),
    ///     pathname: "/list".to_string(),
    ///     payload: Default::default(),
    ///     query,
    ///     kind: NavKind::Push,
    /// };
    ///
    /// assert_eq!(snapshot.url(), "/list?page=2");
    /// ```
    pub fn url(&self) -> String {
        if self.query.is_empty() {
            return self.pathname.clone();
        }
        let query = self
            .query
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.pathname, query)
    }
}

/// A location together with the chain of locations that preceded it.
///
/// The chain is acyclic by construction (each link is owned) and is kept no
/// longer than the history stack it mirrors.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Location {
    /// The location itself
    pub current: LocationSnapshot,
    /// The location that was current before this one
    pub previous: Option<Box<Location>>,
}

impl Location {
    /// Create a location with no predecessor.
    pub fn new(current: LocationSnapshot) -> Self {
        Self {
            current,
            previous: None,
        }
    }

    pub fn route_type(&self) -> &str {
        &self.current.route_type
    }

    pub fn pathname(&self) -> &str {
        &self.current.pathname
    }

    pub fn query(&self) -> &Query {
        &self.current.query
    }

    pub fn payload(&self) -> &Payload {
        &self.current.payload
    }

    pub fn kind(&self) -> NavKind {
        self.current.kind
    }

    pub fn previous(&self) -> Option<&Location> {
        self.previous.as_deref()
    }

    /// Number of predecessors linked behind this location.
    pub fn chain_len(&self) -> usize {
        let mut len = 0;
        let mut cursor = self.previous();
        while let Some(location) = cursor {
            len += 1;
            cursor = location.previous();
        }
        len
    }

    /// Copy of this location whose chain holds at most `links` locations,
    /// itself included.
    ///
    /// Returns `None` when `links` is zero.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lockstep::core::{Location, LocationSnapshot, NavKind};
    ///
    /// let at = |path: &str| LocationSnapshot {
    ///     route_type: "PAGE".to_string(),
    ///     pathname: path.to_string(),
    ///     payload: Default::default(),
    ///     query: Default::default(),
    ///     kind: NavKind::Push,
    /// };
    ///
    /// let a = Location::new(at("/a"));
    /// let b = Location { current: at("/b"), previous: Some(Box::new(a)) };
    /// let c = Location { current: at("/c"), previous: Some(Box::new(b)) };
    ///
    /// let kept = c.truncated(2).unwrap();
    /// assert_eq!(kept.chain_len(), 1);
    /// assert!(c.truncated(0).is_none());
    /// ```
    pub fn truncated(&self, links: usize) -> Option<Location> {
        if links == 0 {
            return None;
        }
        Some(Location {
            current: self.current.clone(),
            previous: self
                .previous()
                .and_then(|previous| previous.truncated(links - 1))
                .map(Box::new),
        })
    }
}
