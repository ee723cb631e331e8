//! Builder API for connecting routes to a history stack and a store.
//!
//! This module provides a fluent builder and a route table macro so that an
//! application can be wired up with minimal boilerplate:
//!
//! ```
//! use lockstep::builder::RouterBuilder;
//! use lockstep::core::{location_reducer, Action, Location};
//! use lockstep::history::{History, MemoryHistory};
//! use lockstep::routes;
//! use lockstep::store::create_store;
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
//! lockstep::push("/second/bar").unwrap();
//! assert_eq!(store.get_state().location.route_type(), "SECOND");
//! assert_eq!(history.length(), 2);
//! ```

pub mod error;
pub mod macros;
pub mod router;

pub use error::BuildError;
pub use router::{ConnectedRoutes, RouterBuilder};
