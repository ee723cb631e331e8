//! Headless Server Rendering
//!
//! This example resolves a request path on the server. There is no document,
//! so the title runner has no target and does nothing, while the store still
//! ends up with the requested location. The resulting state is serialized for
//! the client to hydrate.
//!
//! Key concepts:
//! - One store per request; the newest store owns the imperative API
//! - No title target means no side effects
//! - `Location` serializes with serde
//!
//! Run with: cargo run --example headless_server

use lockstep::{create_store, location_reducer, routes, Action, Location};
use lockstep::{MemoryHistory, RouterBuilder, RoutesMap, NOT_FOUND};
use serde::Serialize;
use std::rc::Rc;

#[derive(Clone, Debug, Serialize)]
struct PageState {
    location: Location,
}

fn select_location(state: &PageState) -> &Location {
    &state.location
}

fn select_title(state: &PageState) -> Option<String> {
    Some(state.location.route_type().to_lowercase())
}

fn reducer(state: &PageState, action: &Action) -> PageState {
    PageState {
        location: location_reducer(&state.location, action),
    }
}

fn table() -> RoutesMap {
    routes! {
        "HOME" => "/",
        "ARTICLE" => "/articles/:slug",
    }
}

fn render(path: &str) -> Result<String, serde_json::Error> {
    let connected = RouterBuilder::new()
        .routes(table())
        .history(Rc::new(MemoryHistory::new(path)))
        .location(select_location)
        .title(select_title)
        .build()
        .unwrap();

    let initial = PageState {
        location: connected.initial_location(),
    };
    let store = create_store(reducer, initial, Some(connected.enhancer()));
    if let Some(ticks) = connected.ticks() {
        ticks.run_until_idle();
    }

    let state = store.get_state();
    let status = if state.location.route_type() == NOT_FOUND {
        404
    } else {
        200
    };
    Ok(format!("{status} {}", serde_json::to_string(&state)?))
}

fn main() {
    println!("=== Headless Server Example ===\n");

    for path in ["/", "/articles/hello-world?ref=feed", "/missing"] {
        match render(path) {
            Ok(response) => println!("GET {path}\n  {response}\n"),
            Err(error) => println!("GET {path}\n  failed: {error}\n"),
        }
    }

    println!("=== Example Complete ===");
}
