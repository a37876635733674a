use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use compare_logging::{compare_debug, compare_warn};
use tokio::task::JoinHandle;

use crate::backend::{ReqwestSearchBackend, SearchBackend, SearchSettings};
use crate::{EngineEvent, FailureKind, RequestId, SearchError};

enum EngineCommand {
    Search { request_id: RequestId, query: String },
    Health { reply: mpsc::Sender<Result<(), SearchError>> },
}

/// Runs backend requests on a private tokio runtime.
///
/// At most one search is in flight: issuing a new one aborts the previous
/// task, so no event for it is emitted afterwards. A search that outlives
/// the request timeout completes with [`FailureKind::Timeout`] whatever the
/// backend does.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
    endpoint: String,
}

impl EngineHandle {
    pub fn new(settings: SearchSettings) -> io::Result<Self> {
        let request_timeout = settings.request_timeout;
        Self::with_backend(Arc::new(ReqwestSearchBackend::new(settings)), request_timeout)
    }

    pub fn with_backend(
        backend: Arc<dyn SearchBackend>,
        request_timeout: Duration,
    ) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;
        let endpoint = backend.endpoint().to_string();

        thread::spawn(move || {
            let mut in_flight: Option<JoinHandle<()>> = None;
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Search { request_id, query } => {
                        if let Some(previous) = in_flight.take() {
                            if !previous.is_finished() {
                                compare_debug!("Aborting superseded search before {}", request_id);
                            }
                            previous.abort();
                        }
                        let backend = backend.clone();
                        let event_tx = event_tx.clone();
                        in_flight = Some(runtime.spawn(async move {
                            run_search(backend.as_ref(), request_id, &query, request_timeout, &event_tx)
                                .await;
                        }));
                    }
                    EngineCommand::Health { reply } => {
                        let backend = backend.clone();
                        runtime.spawn(async move {
                            let _ = reply.send(backend.health().await);
                        });
                    }
                }
            }
        });

        Ok(Self {
            cmd_tx,
            event_rx,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn search(&self, request_id: RequestId, query: impl Into<String>) {
        let command = EngineCommand::Search {
            request_id,
            query: query.into(),
        };
        if self.cmd_tx.send(command).is_err() {
            compare_warn!("Engine stopped; search {} dropped", request_id);
        }
    }

    /// Blocks until the backend health probe answers.
    pub fn health(&self) -> Result<(), SearchError> {
        let (reply, answer) = mpsc::channel();
        let stopped = || SearchError::new(FailureKind::EngineStopped, "engine thread is gone");
        self.cmd_tx
            .send(EngineCommand::Health { reply })
            .map_err(|_| stopped())?;
        answer.recv().map_err(|_| stopped())?
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn run_search(
    backend: &dyn SearchBackend,
    request_id: RequestId,
    query: &str,
    request_timeout: Duration,
    event_tx: &mpsc::Sender<EngineEvent>,
) {
    let _ = event_tx.send(EngineEvent::Dispatched { request_id });
    let result = tokio::time::timeout(request_timeout, backend.search(query))
        .await
        .unwrap_or_else(|_| {
            Err(SearchError::new(
                FailureKind::Timeout,
                format!("no response within {:?}", request_timeout),
            ))
        });
    if let Err(err) = &result {
        compare_warn!("Search {} failed: {}", request_id, err);
    }
    let _ = event_tx.send(EngineEvent::SearchCompleted { request_id, result });
}
