//! Chat engine: backend wire contracts and effect execution.
mod backend;
mod engine;
mod types;
mod wire;

pub use backend::{Backend, BackendSettings, ReqwestBackend, DEFAULT_BASE_URL};
pub use engine::{EngineError, EngineHandle};
pub use types::{BackendError, EngineEvent, FailureKind, RequestId, SearchHit, Turn};
