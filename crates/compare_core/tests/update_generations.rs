use compare_core::{
    update, AppState, Effect, FailureCause, Msg, ParsedPrice, Phase, Platform, SearchFailure,
    TaskStatus,
};
use serde_json::json;

fn submit(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    update(state, Msg::SearchSubmitted)
}

fn respond(state: AppState, generation: u64, amazon: &str) -> AppState {
    let (state, _) = update(
        state,
        Msg::ResponseReceived {
            generation,
            payload: json!({"prices": {"amazon": amazon}}),
        },
    );
    state
}

#[test]
fn superseded_response_is_discarded() {
    compare_logging::initialize_for_tests();
    let (state, _) = submit(AppState::new(), "first");
    let (state, effects) = submit(state, "second");
    assert_eq!(
        effects,
        vec![Effect::IssueSearch {
            generation: 2,
            query: "second".to_string(),
        }]
    );

    let before = state.clone();
    let state = respond(state, 1, "100");
    assert_eq!(state, before);
    assert_eq!(state.phase(), Phase::Searching);

    let state = respond(state, 2, "200");
    assert_eq!(
        state.result().price(Platform::Amazon),
        Some(ParsedPrice::Amount(200.0))
    );
}

#[test]
fn late_response_does_not_overwrite_newer_result() {
    compare_logging::initialize_for_tests();
    let (state, _) = submit(AppState::new(), "first");
    let (state, _) = submit(state, "second");
    let state = respond(state, 2, "200");
    let shown = state.view();

    let state = respond(state, 1, "100");
    assert_eq!(state.view(), shown);
}

#[test]
fn stale_failure_and_dispatch_are_ignored() {
    compare_logging::initialize_for_tests();
    let (state, _) = submit(AppState::new(), "first");
    let (state, _) = submit(state, "second");

    let (state, _) = update(state, Msg::RequestDispatched { generation: 1 });
    assert!(state
        .view()
        .platforms
        .iter()
        .all(|row| row.status == Some(TaskStatus::Pending)));

    let (state, _) = update(
        state,
        Msg::SearchFailed {
            generation: 1,
            failure: SearchFailure {
                cause: FailureCause::Timeout,
                reason: "timed out".to_string(),
                endpoint: "http://localhost:5000".to_string(),
            },
        },
    );
    assert_eq!(state.phase(), Phase::Searching);
    assert_eq!(state.view().last_error, None);
}

#[test]
fn duplicate_completion_after_success_is_ignored() {
    compare_logging::initialize_for_tests();
    let (state, _) = submit(AppState::new(), "only");
    let state = respond(state, 1, "300");
    let shown = state.view();

    let state = respond(state, 1, "1");
    assert_eq!(state.view(), shown);
}
