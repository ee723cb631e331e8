//! Property-based tests for store and history synchronization.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated navigation sequences.

use lockstep::{create_store, location_reducer, routes, Action, Location, Store};
use lockstep::{History, MemoryHistory, NavKind, RouteMatcher, RouterBuilder, RoutesMap};
use proptest::prelude::*;
use std::rc::Rc;

#[derive(Clone, Debug)]
struct AppState {
    location: Location,
    counter: u32,
}

fn select_location(state: &AppState) -> &Location {
    &state.location
}

fn reducer(state: &AppState, action: &Action) -> AppState {
    AppState {
        location: location_reducer(&state.location, action),
        counter: match action.action_type.as_str() {
            "INCREMENT" => state.counter + 1,
            _ => state.counter,
        },
    }
}

fn table() -> RoutesMap {
    routes! {
        "FIRST" => "/first",
        "SECOND" => "/second/:param",
        "THIRD" => "/third/:a/:b",
    }
}

fn connect(start: &str) -> (Rc<MemoryHistory>, Store<AppState>) {
    let history = Rc::new(MemoryHistory::new(start));
    let connected = RouterBuilder::new()
        .routes(table())
        .history(history.clone())
        .location(select_location)
        .build()
        .unwrap();
    let initial = AppState {
        location: connected.initial_location(),
        counter: 0,
    };
    let store = create_store(reducer, initial, Some(connected.enhancer()));
    (history, store)
}

prop_compose! {
    fn arbitrary_param()(value in "[a-z0-9]{1,8}") -> String {
        value
    }
}

prop_compose! {
    fn arbitrary_route_action()(variant in 0..3u8, a in arbitrary_param(), b in arbitrary_param()) -> Action {
        match variant {
            0 => Action::new("FIRST"),
            1 => Action::new("SECOND").with_param("param", a),
            _ => Action::new("THIRD").with_param("a", a).with_param("b", b),
        }
    }
}

#[derive(Clone, Debug)]
enum Step {
    Dispatch(Action),
    Back,
    Forward,
}

fn arbitrary_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        2 => arbitrary_route_action().prop_map(Step::Dispatch),
        1 => Just(Step::Back),
        1 => Just(Step::Forward),
    ]
}

proptest! {
    #[test]
    fn pushing_distinct_paths_grows_history(params in prop::collection::vec(arbitrary_param(), 1..8)) {
        let (history, store) = connect("/first");

        let mut previous = String::from("/first");
        let mut pushes = 0;
        for param in params {
            let path = format!("/second/{param}");
            if path == previous {
                continue;
            }
            store.dispatch(Action::new("SECOND").with_param("param", param));
            previous = path;
            pushes += 1;
        }

        prop_assert_eq!(history.length(), 1 + pushes);
        prop_assert_eq!(history.current_path(), previous);
    }

    #[test]
    fn replace_never_changes_length(actions in prop::collection::vec(arbitrary_route_action(), 1..8)) {
        let (history, store) = connect("/first");

        for action in actions {
            store.dispatch(action.with_intent(NavKind::Replace));
        }

        prop_assert_eq!(history.length(), 1);
        let url = store.with_state(|state| state.location.current.url());
        prop_assert_eq!(history.current_path(), url);
    }

    #[test]
    fn non_route_actions_keep_location(count in 1..10usize) {
        let (history, store) = connect("/first");
        let before = store.get_state().location;

        for _ in 0..count {
            store.dispatch(Action::new("INCREMENT"));
        }

        let state = store.get_state();
        prop_assert_eq!(state.counter as usize, count);
        prop_assert_eq!(state.location, before);
        prop_assert_eq!(history.length(), 1);
    }

    #[test]
    fn store_always_matches_history(actions in prop::collection::vec(arbitrary_route_action(), 1..8)) {
        let (history, store) = connect("/first");

        for action in actions {
            store.dispatch(action);
            let url = store.with_state(|state| state.location.current.url());
            prop_assert_eq!(history.current_path(), url);
        }
    }

    #[test]
    fn back_then_next_restores_location(params in prop::collection::vec(arbitrary_param(), 1..6)) {
        let (history, store) = connect("/first");
        for param in params {
            store.dispatch(Action::new("SECOND").with_param("param", param));
        }
        let length = history.length();
        let before = store.with_state(|state| state.location.current.url());

        lockstep::back().unwrap();
        lockstep::next().unwrap();

        let location = store.get_state().location;
        prop_assert_eq!(location.current.url(), before);
        prop_assert_eq!(history.length(), length);
    }

    #[test]
    fn previous_chain_never_exceeds_history(steps in prop::collection::vec(arbitrary_step(), 1..16)) {
        let (history, store) = connect("/first");

        for step in steps {
            match step {
                Step::Dispatch(action) => {
                    store.dispatch(action);
                }
                Step::Back => lockstep::back().unwrap(),
                Step::Forward => lockstep::next().unwrap(),
            }
            let chain = store.with_state(|state| state.location.chain_len());
            prop_assert!(chain <= history.length());
            let url = store.with_state(|state| state.location.current.url());
            prop_assert_eq!(history.current_path(), url);
        }
    }

    #[test]
    fn path_to_action_inverts_action_to_path(action in arbitrary_route_action()) {
        let routes = table();

        let path = routes.action_to_path(&action).unwrap();
        let parsed = routes.path_to_action(&path);

        prop_assert_eq!(parsed.action_type, action.action_type);
        prop_assert_eq!(parsed.payload, action.payload);
    }
}
