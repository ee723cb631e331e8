//! Navigation error types.

use crate::routes::RouteError;
use thiserror::Error;

/// Errors raised by the synchronization engine and the imperative API
#[derive(Debug, Clone, Error, PartialEq)]
pub enum NavigationError {
    /// No store has been created with the history enhancer yet
    #[error("Navigation used before any store was created with the history enhancer")]
    NotInitialized,

    /// A route action could not be turned into a location
    #[error("Action '{action_type}' cannot be resolved to a location: {source}")]
    UnroutableAction {
        action_type: String,
        #[source]
        source: RouteError,
    },
}
