//! Route table errors.

use thiserror::Error;

/// Errors raised while building or resolving routes
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RouteError {
    #[error("No route registered for action type '{action_type}'")]
    UnknownRoute { action_type: String },

    #[error("Route '{action_type}' needs parameter '{param}' which the action does not carry")]
    MissingParam { action_type: String, param: String },

    #[error("Invalid route pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Route pattern '{pattern}' has an empty action type")]
    EmptyType { pattern: String },

    #[error("Action type '{action_type}' is registered more than once")]
    DuplicateRoute { action_type: String },
}
