//! Imperative navigation.
//!
//! Free functions usable from anywhere on the thread that created the
//! synchronized store. Each call looks up the current
//! [`EnhancerBinding`](crate::sync::EnhancerBinding) and fails with
//! [`NavigationError::NotInitialized`] when no store exists yet.
//!
//! `push`, `replace` and `redirect` dispatch; the enhancer then writes the
//! history. `back` and `next` move the history; its change notification then
//! dispatches.

use crate::core::{Action, NavKind};
use crate::history::History;
use crate::routes::RouteMatcher;
use crate::sync::{current_binding, EnhancerBinding, NavigationError};
use std::rc::Rc;

fn binding() -> Result<Rc<EnhancerBinding>, NavigationError> {
    current_binding().ok_or_else(|| {
        tracing::warn!("navigation requested before a store was created");
        NavigationError::NotInitialized
    })
}

fn navigate(path: &str, intent: NavKind) -> Result<(), NavigationError> {
    let binding = binding()?;
    let action = binding.routes().path_to_action(path).with_intent(intent);
    binding.dispatch(action);
    Ok(())
}

/// Navigate to `path`, adding a history entry.
pub fn push(path: &str) -> Result<(), NavigationError> {
    navigate(path, NavKind::Push)
}

/// Navigate to `path`, rewriting the current history entry.
pub fn replace(path: &str) -> Result<(), NavigationError> {
    navigate(path, NavKind::Replace)
}

/// Step back one history entry. A no-op at the start of history.
pub fn back() -> Result<(), NavigationError> {
    binding()?.history().go_back();
    Ok(())
}

/// Step forward one history entry. A no-op at the end of history.
pub fn next() -> Result<(), NavigationError> {
    binding()?.history().go_forward();
    Ok(())
}

/// Mark `action` as replacing the current history entry.
pub fn redirect_action(action: Action) -> Action {
    action.with_intent(NavKind::Replace)
}

/// Dispatch a route action that replaces the current history entry.
///
/// The action must not be navigation-enriched yet, otherwise its computed
/// location (and kind) is kept as is.
pub fn redirect(action: Action) -> Result<(), NavigationError> {
    let binding = binding()?;
    binding.dispatch(redirect_action(action));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::reset_binding;

    #[test]
    fn api_fails_without_store() {
        reset_binding();

        assert_eq!(push("/first"), Err(NavigationError::NotInitialized));
        assert_eq!(replace("/first"), Err(NavigationError::NotInitialized));
        assert_eq!(back(), Err(NavigationError::NotInitialized));
        assert_eq!(next(), Err(NavigationError::NotInitialized));
        assert_eq!(
            redirect(Action::new("FIRST")),
            Err(NavigationError::NotInitialized)
        );
    }

    #[test]
    fn redirect_action_sets_replace_intent() {
        let action = redirect_action(Action::new("FIRST").with_intent(NavKind::Push));
        assert_eq!(action.intent(), Some(NavKind::Replace));
    }
}
