//! Dispatched actions and the navigation metadata attached to them.

use super::location::{Location, LocationSnapshot, NavKind, Payload, Query};
use serde::{Deserialize, Serialize};

/// Action type used for paths that match no route.
///
/// The unmatched path travels in the payload under [`NOT_FOUND_PATH_KEY`].
pub const NOT_FOUND: &str = "@@lockstep/NOT_FOUND";

/// Payload key carrying the unmatched path of a [`NOT_FOUND`] action.
pub const NOT_FOUND_PATH_KEY: &str = "pathname";

/// An action dispatched through the store.
///
/// Navigation actions are ordinary actions whose type names a route. They
/// become navigation only once the navigation middleware has attached a
/// [`NavigationMeta`] under `meta.location`.
///
/// # Example
///
/// ```rust
/// use lockstep::core::{Action, NavKind};
///
/// let action = Action::new("SECOND")
///     .with_param("param", "bar")
///     .with_intent(NavKind::Replace);
///
/// assert_eq!(action.action_type, "SECOND");
/// assert_eq!(action.intent(), Some(NavKind::Replace));
/// assert!(!action.is_navigation());
/// ```
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub action_type: String,
    #[serde(default)]
    pub payload: Payload,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<Query>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ActionMeta>,
}

/// Metadata carried alongside an action.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct ActionMeta {
    /// Call-site intent: how the navigation should be applied to history
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<NavKind>,
    /// Computed by the navigation middleware; absent on plain actions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<NavigationMeta>,
    /// Set on actions synthesized from a history notification. Such actions
    /// describe a change the history already made and are never written back.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub from_history: bool,
}

/// Location data computed for a navigation action before it is reduced.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct NavigationMeta {
    /// Where the navigation leads
    pub current: LocationSnapshot,
    /// The store's location when the action was enriched
    pub previous: Option<Location>,
    /// Maximum chain length for the resulting location (history depth)
    pub depth: usize,
}

impl Action {
    pub fn new(action_type: impl Into<String>) -> Self {
        Self {
            action_type: action_type.into(),
            ..Self::default()
        }
    }

    /// Action for a path that matched no route.
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::new(NOT_FOUND).with_param(NOT_FOUND_PATH_KEY, path)
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = payload;
        self
    }

    pub fn with_query(mut self, query: Query) -> Self {
        self.query = Some(query);
        self
    }

    /// Record how this action should be applied to the history stack.
    pub fn with_intent(mut self, intent: NavKind) -> Self {
        self.meta.get_or_insert_with(ActionMeta::default).intent = Some(intent);
        self
    }

    /// Attach computed location data, marking the action as navigation.
    pub fn with_navigation(mut self, navigation: NavigationMeta) -> Self {
        self.meta.get_or_insert_with(ActionMeta::default).location = Some(navigation);
        self
    }

    /// Mark this action as reporting a change already made to the history.
    pub fn from_history(mut self) -> Self {
        self.meta.get_or_insert_with(ActionMeta::default).from_history = true;
        self
    }

    pub fn is_from_history(&self) -> bool {
        self.meta.as_ref().is_some_and(|meta| meta.from_history)
    }

    pub fn intent(&self) -> Option<NavKind> {
        self.meta.as_ref().and_then(|meta| meta.intent)
    }

    pub fn navigation(&self) -> Option<&NavigationMeta> {
        self.meta.as_ref().and_then(|meta| meta.location.as_ref())
    }

    pub fn is_navigation(&self) -> bool {
        self.navigation().is_some()
    }

    pub fn is_not_found(&self) -> bool {
        self.action_type == NOT_FOUND
    }
}
