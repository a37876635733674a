use compare_logging::{compare_debug, compare_info, compare_warn};

use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::SearchSubmitted => match state.begin_search() {
            Ok((generation, query)) => {
                compare_info!("Search {} issued for {:?}", generation, query);
                vec![Effect::IssueSearch { generation, query }]
            }
            Err(err) => {
                compare_info!("Search rejected: {}", err);
                state.reject(err);
                Vec::new()
            }
        },
        Msg::RequestDispatched { generation } => {
            if state.is_current(generation) {
                state.mark_running();
            } else {
                compare_debug!("Ignoring dispatch notice for stale search {}", generation);
            }
            Vec::new()
        }
        Msg::ResponseReceived {
            generation,
            payload,
        } => {
            if state.is_current(generation) {
                state.apply_response(&payload);
                compare_info!(
                    "Search {} succeeded, best deal {:?}",
                    generation,
                    state.best_deal()
                );
            } else {
                compare_debug!(
                    "Discarding response for stale search {} (current {})",
                    generation,
                    state.generation()
                );
            }
            Vec::new()
        }
        Msg::SearchFailed {
            generation,
            failure,
        } => {
            if state.is_current(generation) {
                compare_warn!(
                    "Search {} failed ({:?}): {}",
                    generation,
                    failure.cause,
                    failure.reason
                );
                state.apply_failure(&failure);
            } else {
                compare_debug!("Discarding failure for stale search {}", generation);
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
