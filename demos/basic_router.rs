//! Basic Router
//!
//! This example connects a route table, an in-memory history and a store,
//! then navigates with the imperative API.
//!
//! Key concepts:
//! - Route actions become locations through the navigation middleware
//! - `push`/`replace` write the history; `back`/`next` read it
//! - The title is applied on a later tick
//!
//! Run with: cargo run --example basic_router

use lockstep::{create_store, location_reducer, routes, Action, Location};
use lockstep::{DocumentTitle, History, MemoryHistory, RouterBuilder};
use std::rc::Rc;

#[derive(Clone, Debug)]
struct AppState {
    location: Location,
    visits: u32,
}

fn select_location(state: &AppState) -> &Location {
    &state.location
}

fn select_title(state: &AppState) -> Option<String> {
    Some(format!("Shop | {}", state.location.route_type()))
}

fn reducer(state: &AppState, action: &Action) -> AppState {
    let location = location_reducer(&state.location, action);
    let visits = if action.is_navigation() {
        state.visits + 1
    } else {
        state.visits
    };
    AppState { location, visits }
}

fn print_state(label: &str, state: &AppState, history: &MemoryHistory) {
    println!(
        "{label:<14} {:<10} {:<18} kind={:<8} history={:?}",
        state.location.route_type(),
        state.location.current.url(),
        state.location.kind().name(),
        history.entries(),
    );
}

fn main() {
    println!("=== Basic Router Example ===\n");

    let history = Rc::new(MemoryHistory::new("/"));
    let title = Rc::new(DocumentTitle::new("Shop"));

    let connected = RouterBuilder::new()
        .routes(routes! {
            "HOME" => "/",
            "CATEGORY" => "/category/:name",
            "PRODUCT" => "/product/:id",
        })
        .history(history.clone())
        .location(select_location)
        .title(select_title)
        .title_target(title.clone())
        .build()
        .unwrap();

    let initial = AppState {
        location: connected.initial_location(),
        visits: 0,
    };
    let store = create_store(reducer, initial, Some(connected.enhancer()));
    print_state("start", &store.get_state(), &history);

    lockstep::push("/category/books").unwrap();
    print_state("push", &store.get_state(), &history);

    store.dispatch(Action::new("PRODUCT").with_param("id", "42"));
    print_state("dispatch", &store.get_state(), &history);

    lockstep::replace("/product/43?color=red").unwrap();
    print_state("replace", &store.get_state(), &history);

    lockstep::back().unwrap();
    print_state("back", &store.get_state(), &history);

    lockstep::next().unwrap();
    print_state("next", &store.get_state(), &history);

    lockstep::push("/no/such/page").unwrap();
    print_state("not found", &store.get_state(), &history);

    println!("\nTitle before tick: {}", title.title());
    if let Some(ticks) = connected.ticks() {
        ticks.run_until_idle();
    }
    println!("Title after tick:  {}", title.title());
    println!("Navigations reduced: {}", store.get_state().visits);
    println!("History length: {}", history.length());

    println!("\n=== Example Complete ===");
}
