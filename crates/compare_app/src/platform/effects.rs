use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use compare_core::{Effect, FailureCause, Msg, SearchFailure};
use compare_engine::{EngineEvent, EngineHandle, FailureKind, SearchError};
use compare_logging::{compare_debug, compare_info};

/// Executes core effects on the engine and feeds engine events back as
/// messages. The engine lives on the runner's own thread.
pub struct EffectRunner {
    effect_tx: mpsc::Sender<Effect>,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, msg_tx: mpsc::Sender<Msg>) -> Self {
        let (effect_tx, effect_rx) = mpsc::channel();
        spawn_event_loop(engine, effect_rx, msg_tx);
        Self { effect_tx }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            if self.effect_tx.send(effect).is_err() {
                compare_debug!("Effect runner stopped; dropping effect");
            }
        }
    }
}

fn spawn_event_loop(
    engine: EngineHandle,
    effect_rx: mpsc::Receiver<Effect>,
    msg_tx: mpsc::Sender<Msg>,
) {
    thread::spawn(move || loop {
        let mut idle = true;

        match effect_rx.try_recv() {
            Ok(Effect::IssueSearch { generation, query }) => {
                compare_info!(
                    "IssueSearch generation={} query_len={} query={}",
                    generation,
                    query.len(),
                    query
                );
                engine.search(generation, query);
                idle = false;
            }
            Err(mpsc::TryRecvError::Empty) => {}
            Err(mpsc::TryRecvError::Disconnected) => break,
        }

        if let Some(event) = engine.try_recv() {
            if msg_tx.send(map_event(event, engine.endpoint())).is_err() {
                break;
            }
            idle = false;
        }

        if idle {
            thread::sleep(Duration::from_millis(20));
        }
    });
}

fn map_event(event: EngineEvent, endpoint: &str) -> Msg {
    match event {
        EngineEvent::Dispatched { request_id } => Msg::RequestDispatched {
            generation: request_id,
        },
        EngineEvent::SearchCompleted {
            request_id,
            result: Ok(payload),
        } => Msg::ResponseReceived {
            generation: request_id,
            payload,
        },
        EngineEvent::SearchCompleted {
            request_id,
            result: Err(err),
        } => Msg::SearchFailed {
            generation: request_id,
            failure: map_failure(err, endpoint),
        },
    }
}

/// Backend-supplied reasons are shown verbatim; anything else keeps the
/// failure kind as context.
fn map_failure(err: SearchError, endpoint: &str) -> SearchFailure {
    let cause = if err.kind.is_timeout() {
        FailureCause::Timeout
    } else {
        FailureCause::Transport
    };
    let reason = match err.kind {
        FailureKind::HttpStatus(_) => err.message,
        _ => err.to_string(),
    };
    SearchFailure {
        cause,
        reason,
        endpoint: endpoint.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const ENDPOINT: &str = "http://localhost:5000";

    #[test]
    fn dispatch_and_response_keep_generation() {
        assert_eq!(
            map_event(EngineEvent::Dispatched { request_id: 4 }, ENDPOINT),
            Msg::RequestDispatched { generation: 4 }
        );
        assert_eq!(
            map_event(
                EngineEvent::SearchCompleted {
                    request_id: 4,
                    result: Ok(json!({"prices": {}})),
                },
                ENDPOINT
            ),
            Msg::ResponseReceived {
                generation: 4,
                payload: json!({"prices": {}}),
            }
        );
    }

    #[test]
    fn timeout_maps_to_timeout_cause() {
        let failure = map_failure(
            SearchError {
                kind: FailureKind::Timeout,
                message: "operation timed out".to_string(),
            },
            ENDPOINT,
        );
        assert_eq!(failure.cause, FailureCause::Timeout);
        assert_eq!(failure.reason, "timeout: operation timed out");
        assert_eq!(failure.endpoint, ENDPOINT);
    }

    #[test]
    fn http_status_uses_backend_reason() {
        let failure = map_failure(
            SearchError {
                kind: FailureKind::HttpStatus(400),
                message: "Product name required".to_string(),
            },
            ENDPOINT,
        );
        assert_eq!(failure.cause, FailureCause::Transport);
        assert_eq!(
            failure.user_message(),
            "Error: Product name required - Backend at http://localhost:5000 may not be running"
        );
    }
}
