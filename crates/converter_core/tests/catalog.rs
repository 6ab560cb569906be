use std::time::Instant;

use converter_core::{update_at, AppState, Effect, Msg};

fn init_logging() {
    converter_logging::initialize_for_tests();
}

#[test]
fn startup_requests_catalog_once() {
    init_logging();
    let now = Instant::now();
    let (state, effects) = update_at(AppState::new(), Msg::Started, now);
    assert_eq!(
        effects,
        vec![Effect::LoadCatalog {
            url: "http://localhost:8089/api/v1/files".parse().unwrap(),
        }]
    );

    let (_state, effects) = update_at(state, Msg::Started, now);
    assert!(effects.is_empty());
}

#[test]
fn loaded_catalog_replaces_listing_in_order() {
    init_logging();
    let now = Instant::now();
    let (state, _) = update_at(AppState::new(), Msg::Started, now);
    let (mut state, _) = update_at(
        state,
        Msg::CatalogLoaded(Ok(vec!["b.xlsx".to_string(), "a.xlsx".to_string()])),
        now,
    );

    assert_eq!(state.view_at(now).catalog, vec!["b.xlsx", "a.xlsx"]);
    assert!(state.consume_dirty());
}

#[test]
fn catalog_failure_is_silent() {
    init_logging();
    let now = Instant::now();
    let (mut state, _) = update_at(AppState::new(), Msg::Started, now);
    state.consume_dirty();

    let (mut state, effects) = update_at(
        state,
        Msg::CatalogLoaded(Err("connection refused".to_string())),
        now,
    );

    assert!(effects.is_empty());
    let view = state.view_at(now);
    assert!(view.catalog.is_empty());
    assert!(view.notifications.is_empty());
    assert_eq!(view.error, None);
    assert!(!state.consume_dirty());
}
