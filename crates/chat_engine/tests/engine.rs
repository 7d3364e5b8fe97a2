use std::sync::{Arc, Mutex};
use std::time::Duration;

use chat_engine::{
    Backend, BackendError, BackendSettings, EngineEvent, EngineHandle, FailureKind, SearchHit,
    Turn,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WAIT: Duration = Duration::from_secs(5);

/// Answers after a per-query delay so completion order can be controlled.
#[derive(Default)]
struct ScriptedBackend {
    seen_turns: Mutex<Vec<Vec<Turn>>>,
}

#[async_trait::async_trait]
impl Backend for ScriptedBackend {
    async fn ask(&self, turns: &[Turn]) -> Result<String, BackendError> {
        self.seen_turns.lock().unwrap().push(turns.to_vec());
        match turns.last().map(|t| t.content.as_str()) {
            Some("fail") => Err(BackendError {
                kind: FailureKind::Network,
                message: "scripted".to_string(),
            }),
            Some(text) => Ok(format!("echo: {text}")),
            None => Ok(String::new()),
        }
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, BackendError> {
        let delay = if query == "slow" { 300 } else { 10 };
        tokio::time::sleep(Duration::from_millis(delay)).await;
        Ok(vec![SearchHit {
            title: query.to_string(),
            url: format!("http://example.com/{query}"),
            snippet: None,
        }])
    }

    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, BackendError> {
        Ok(format!("{file_name}: {} bytes", bytes.len()))
    }
}

fn next_event(engine: &EngineHandle) -> EngineEvent {
    engine.recv_timeout(WAIT).expect("engine event")
}

#[test]
fn ask_round_trip_reports_answer() {
    let backend = Arc::new(ScriptedBackend::default());
    let engine = EngineHandle::new(backend.clone()).expect("engine");

    engine.ask(1, vec![Turn::new("system", "s"), Turn::new("user", "hello")]);

    assert_eq!(
        next_event(&engine),
        EngineEvent::AskCompleted {
            request_id: 1,
            result: Ok("echo: hello".to_string()),
        }
    );
    assert_eq!(backend.seen_turns.lock().unwrap().len(), 1);
}

#[test]
fn ask_failure_is_reported_as_event() {
    let engine = EngineHandle::new(Arc::new(ScriptedBackend::default())).expect("engine");

    engine.ask(4, vec![Turn::new("user", "fail")]);

    match next_event(&engine) {
        EngineEvent::AskCompleted { request_id, result } => {
            assert_eq!(request_id, 4);
            assert_eq!(result.unwrap_err().kind, FailureKind::Network);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn overlapping_searches_complete_in_resolution_order() {
    let engine = EngineHandle::new(Arc::new(ScriptedBackend::default())).expect("engine");

    engine.search(1, "slow");
    engine.search(2, "fast");

    let order: Vec<_> = (0..2)
        .map(|_| match next_event(&engine) {
            EngineEvent::SearchCompleted { request_id, .. } => request_id,
            other => panic!("unexpected event {other:?}"),
        })
        .collect();
    assert_eq!(order, vec![2, 1]);
}

#[test]
fn upload_round_trip_reports_summary() {
    let engine = EngineHandle::new(Arc::new(ScriptedBackend::default())).expect("engine");

    engine.upload(9, "a.txt", vec![1, 2, 3]);

    assert_eq!(
        next_event(&engine),
        EngineEvent::UploadCompleted {
            request_id: 9,
            result: Ok("a.txt: 3 bytes".to_string()),
        }
    );
}

#[test]
fn try_recv_is_empty_before_any_command() {
    let engine = EngineHandle::new(Arc::new(ScriptedBackend::default())).expect("engine");

    assert!(engine.try_recv().is_none());
}

#[test]
fn http_engine_reports_search_failure() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = runtime.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;
        server
    });

    let engine = EngineHandle::with_settings(BackendSettings {
        base_url: server.uri(),
        ..BackendSettings::default()
    })
    .expect("engine");
    engine.search(1, "weather");

    match next_event(&engine) {
        EngineEvent::SearchCompleted { request_id, result } => {
            assert_eq!(request_id, 1);
            assert_eq!(result.unwrap_err().kind, FailureKind::HttpStatus(502));
        }
        other => panic!("unexpected event {other:?}"),
    }
}
