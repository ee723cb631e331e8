//! Lockstep: keep an application store and a navigation history in sync
//!
//! Lockstep connects a route table, a history stack and a Redux-style store.
//! Dispatching a route action updates the stored location and writes the
//! history; moving through the history (back, forward, an address typed in by
//! the user) dispatches the matching route action. Neither side ever echoes a
//! change back to the other.
//!
//! # Core Concepts
//!
//! - **Location**: the current route plus a bounded chain of previous ones,
//!   reduced by [`location_reducer`]
//! - **Routes**: a table mapping action types to path patterns
//! - **History**: the stack of visited paths, abstracted by [`History`]
//! - **Store**: a single-threaded state container open to enhancers
//!
//! # Example
//!
//! ```rust
//! use lockstep::{create_store, location_reducer, routes, Action, Location};
//! use lockstep::{History, MemoryHistory, NavKind, RouterBuilder};
//! use std::rc::Rc;
//!
//! #[derive(Clone)]
//! struct AppState {
//!     location: Location,
//! }
//!
//! fn select_location(state: &AppState) -> &Location {
//!     &state.location
//! }
//!
//! let history = Rc::new(MemoryHistory::new("/first"));
//! let connected = RouterBuilder::new()
//!     .routes(routes! {
//!         "FIRST" => "/first",
//!         "SECOND" => "/second/:param",
//!     })
//!     .history(history.clone())
//!     .location(select_location)
//!     .build()
//!     .unwrap();
//!
//! let store = create_store(
//!     |state: &AppState, action: &Action| AppState {
//!         location: location_reducer(&state.location, action),
//!     },
//!     AppState { location: connected.initial_location() },
//!     Some(connected.enhancer()),
//! );
//!
//! store.dispatch(Action::new("SECOND").with_param("param", "bar"));
//! assert_eq!(history.current_path(), "/second/bar");
//!
//! lockstep::back().unwrap();
//! let location = store.get_state().location;
//! assert_eq!(location.route_type(), "FIRST");
//! assert_eq!(location.kind(), NavKind::Back);
//! ```

pub mod api;
pub mod builder;
pub mod core;
pub mod history;
pub mod routes;
pub mod store;
pub mod sync;

// Re-export commonly used types
pub use api::{back, next, push, redirect, redirect_action, replace};
pub use builder::{BuildError, ConnectedRoutes, RouterBuilder};
pub use core::{location_reducer, Action, Location, LocationSnapshot, NavKind, NOT_FOUND};
pub use history::{History, MemoryHistory};
pub use routes::{RouteError, RouteMatcher, RoutesMap};
pub use store::{apply_middleware, create_store, Store};
pub use sync::{DocumentTitle, NavigationError, TickQueue};
