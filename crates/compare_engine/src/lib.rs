//! Price-compare engine: talks to the search backend and executes effects.
mod backend;
mod engine;
mod types;

pub use backend::{ReqwestSearchBackend, SearchBackend, SearchSettings, DEFAULT_REQUEST_TIMEOUT};
pub use engine::EngineHandle;
pub use types::{EngineEvent, FailureKind, RequestId, SearchError};
