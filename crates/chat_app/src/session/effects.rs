use chat_core::{ChatTurn, Effect, ExchangeFailure, Msg, SearchResult};
use chat_engine::{BackendError, EngineEvent, EngineHandle, SearchHit, Turn};

use super::app::display_time;

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Ask { request_id, turns } => {
                    self.engine
                        .ask(request_id, turns.into_iter().map(wire_turn).collect());
                }
                Effect::Search { request_id, query } => self.engine.search(request_id, query),
                Effect::Upload { request_id, file } => {
                    self.engine.upload(request_id, file.name, file.bytes);
                }
            }
        }
    }

    /// Next finished round trip, if any, as a state message.
    pub fn poll(&self) -> Option<Msg> {
        self.engine
            .try_recv()
            .map(|event| completion_msg(event, display_time()))
    }
}

fn wire_turn(turn: ChatTurn) -> Turn {
    Turn::new(turn.role.as_str(), turn.content)
}

/// `completed_at` stamps bot replies; other completions ignore it.
fn completion_msg(event: EngineEvent, completed_at: String) -> Msg {
    match event {
        EngineEvent::AskCompleted { request_id, result } => Msg::AnswerReceived {
            request_id,
            outcome: result.map_err(exchange_failure),
            timestamp: completed_at,
        },
        EngineEvent::SearchCompleted { request_id, result } => Msg::SearchCompleted {
            request_id,
            outcome: result
                .map(|hits| hits.into_iter().map(search_result).collect())
                .map_err(exchange_failure),
        },
        EngineEvent::UploadCompleted { request_id, result } => Msg::UploadCompleted {
            request_id,
            outcome: result.map_err(exchange_failure),
        },
    }
}

fn search_result(hit: SearchHit) -> SearchResult {
    SearchResult {
        title: hit.title,
        url: hit.url,
        snippet: hit.snippet,
    }
}

fn exchange_failure(err: BackendError) -> ExchangeFailure {
    ExchangeFailure::new(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_core::Role;
    use chat_engine::FailureKind;

    #[test]
    fn chat_turns_map_to_wire_roles() {
        let turn = wire_turn(ChatTurn::new(Role::Assistant, "hello"));
        assert_eq!(turn, Turn::new("assistant", "hello"));
    }

    #[test]
    fn ask_failure_maps_to_exchange_failure() {
        let msg = completion_msg(
            EngineEvent::AskCompleted {
                request_id: 3,
                result: Err(BackendError {
                    kind: FailureKind::HttpStatus(500),
                    message: "500 Internal Server Error".to_string(),
                }),
            },
            "12:00:00".to_string(),
        );

        match msg {
            Msg::AnswerReceived {
                request_id,
                outcome,
                timestamp,
            } => {
                assert_eq!(request_id, 3);
                assert_eq!(timestamp, "12:00:00");
                let failure = outcome.unwrap_err();
                assert!(failure.reason.contains("http status 500"));
            }
            other => panic!("unexpected msg {other:?}"),
        }
    }

    #[test]
    fn search_hits_keep_order_and_snippets() {
        let msg = completion_msg(
            EngineEvent::SearchCompleted {
                request_id: 1,
                result: Ok(vec![
                    SearchHit {
                        title: "W1".to_string(),
                        url: "http://x".to_string(),
                        snippet: None,
                    },
                    SearchHit {
                        title: "W2".to_string(),
                        url: "http://y".to_string(),
                        snippet: Some("sunny".to_string()),
                    },
                ]),
            },
            "12:00:00".to_string(),
        );

        let Msg::SearchCompleted { outcome, .. } = msg else {
            panic!("expected search completion");
        };
        let results = outcome.unwrap();
        assert_eq!(results[0].title, "W1");
        assert_eq!(results[0].snippet, None);
        assert_eq!(results[1].snippet.as_deref(), Some("sunny"));
    }
}
