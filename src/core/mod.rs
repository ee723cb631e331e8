//! Core navigation types and logic.
//!
//! This module contains the pure part of the engine:
//! - Location records and navigation kinds
//! - Actions and the navigation metadata attached to them
//! - The location reducer
//!
//! Nothing here touches a history stack or a store.

mod action;
mod location;
mod reducer;

pub use action::{Action, ActionMeta, NavigationMeta, NOT_FOUND, NOT_FOUND_PATH_KEY};
pub use location::{Location, LocationSnapshot, NavKind, Payload, Query};
pub use reducer::location_reducer;
