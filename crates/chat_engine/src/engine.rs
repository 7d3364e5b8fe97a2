use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use chat_logging::{chat_debug, chat_warn};
use thiserror::Error;

use crate::{Backend, BackendError, BackendSettings, EngineEvent, RequestId, ReqwestBackend, Turn};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build backend client: {0}")]
    Backend(#[from] BackendError),
}

enum EngineCommand {
    Ask {
        request_id: RequestId,
        turns: Vec<Turn>,
    },
    Search {
        request_id: RequestId,
        query: String,
    },
    Upload {
        request_id: RequestId,
        file_name: String,
        bytes: Vec<u8>,
    },
}

/// Runs backend calls on a background runtime. Every command is spawned as
/// its own task, so completions are reported in resolution order.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(backend: Arc<dyn Backend>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let backend = backend.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(backend.as_ref(), command, event_tx).await;
                });
            }
            chat_debug!("engine command channel closed");
        });

        Ok(Self { cmd_tx, event_rx })
    }

    /// Engine over the HTTP backend.
    pub fn with_settings(settings: BackendSettings) -> Result<Self, EngineError> {
        let backend = ReqwestBackend::new(settings)?;
        Self::new(Arc::new(backend))
    }

    pub fn ask(&self, request_id: RequestId, turns: Vec<Turn>) {
        self.send(EngineCommand::Ask { request_id, turns });
    }

    pub fn search(&self, request_id: RequestId, query: impl Into<String>) {
        self.send(EngineCommand::Search {
            request_id,
            query: query.into(),
        });
    }

    pub fn upload(&self, request_id: RequestId, file_name: impl Into<String>, bytes: Vec<u8>) {
        self.send(EngineCommand::Upload {
            request_id,
            file_name: file_name.into(),
            bytes,
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            chat_warn!("engine worker is gone; command dropped");
        }
    }
}

async fn handle_command(
    backend: &dyn Backend,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::Ask { request_id, turns } => {
            let result = backend.ask(&turns).await;
            log_failure("ask", request_id, &result);
            EngineEvent::AskCompleted { request_id, result }
        }
        EngineCommand::Search { request_id, query } => {
            let result = backend.search(&query).await;
            log_failure("search", request_id, &result);
            EngineEvent::SearchCompleted { request_id, result }
        }
        EngineCommand::Upload {
            request_id,
            file_name,
            bytes,
        } => {
            let result = backend.upload(&file_name, bytes).await;
            log_failure("upload", request_id, &result);
            EngineEvent::UploadCompleted { request_id, result }
        }
    };
    let _ = event_tx.send(event);
}

fn log_failure<T>(kind: &str, request_id: RequestId, result: &Result<T, BackendError>) {
    if let Err(err) = result {
        chat_warn!("{} request_id={} failed: {}", kind, request_id, err);
    }
}
