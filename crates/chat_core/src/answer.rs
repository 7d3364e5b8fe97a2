//! Ask round trip: optimistic echo, history snapshot, bot reply or failure entry.

use chat_logging::{chat_debug, chat_warn};

use crate::in_flight::{InFlight, Settlement};
use crate::{build_chat_request, Effect, ExchangeFailure, Message, RequestId, Transcript};

/// Bot text appended when an ask fails for any reason.
pub const ANSWER_FAILURE_TEXT: &str = "❌ Failed to fetch answer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnswerStatus {
    #[default]
    Idle,
    Sending {
        pending: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct AnswerExchange {
    requests: InFlight,
}

impl AnswerExchange {
    /// Echoes `pending_input` into the transcript and returns the ask effect.
    /// Whitespace-only input is ignored.
    pub(crate) fn send(
        &mut self,
        transcript: &mut Transcript,
        pending_input: &str,
        timestamp: &str,
    ) -> Option<Effect> {
        if pending_input.trim().is_empty() {
            return None;
        }

        let turns = build_chat_request(transcript, pending_input);
        transcript.append(Message::user(pending_input, timestamp));
        let request_id = self.requests.issue();
        chat_debug!(
            "ask issued request_id={} turns={} pending={}",
            request_id,
            turns.len(),
            self.requests.pending()
        );
        Some(Effect::Ask { request_id, turns })
    }

    /// Appends the bot entry for a finished ask. Answers are appended in
    /// arrival order, whichever question they belong to.
    pub(crate) fn resolve(
        &mut self,
        transcript: &mut Transcript,
        request_id: RequestId,
        outcome: Result<String, ExchangeFailure>,
        timestamp: &str,
    ) -> bool {
        if self.requests.settle(request_id) == Settlement::Unknown {
            chat_warn!("ignoring answer for unknown request_id={}", request_id);
            return false;
        }

        let text = match outcome {
            Ok(answer) => answer,
            Err(failure) => {
                chat_warn!("ask request_id={} failed: {}", request_id, failure);
                ANSWER_FAILURE_TEXT.to_string()
            }
        };
        transcript.append(Message::bot(text, timestamp));
        true
    }

    pub(crate) fn status(&self) -> AnswerStatus {
        match self.requests.pending() {
            0 => AnswerStatus::Idle,
            pending => AnswerStatus::Sending { pending },
        }
    }
}
