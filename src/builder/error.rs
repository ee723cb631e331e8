//! Build errors for the router builder.

use crate::routes::RouteError;
use thiserror::Error;

/// Errors that can occur when building connected routes.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("History not specified. Call .history(history) before .build()")]
    MissingHistory,

    #[error("Location selector not specified. Call .location(selector) before .build()")]
    MissingLocationSelector,

    #[error("No routes defined. Add at least one route")]
    NoRoutes,

    #[error("Route table is invalid: {}", format_errors(.0))]
    InvalidRoutes(Vec<RouteError>),
}

fn format_errors(errors: &[RouteError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
