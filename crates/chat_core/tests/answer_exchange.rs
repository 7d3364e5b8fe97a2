use std::sync::Once;

use chat_core::{
    update, AnswerStatus, AppState, ChatTurn, Effect, ExchangeFailure, Msg, RequestId, Role,
    Sender, ANSWER_FAILURE_TEXT, GREETING, SYSTEM_PROMPT,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(chat_logging::initialize_for_tests);
}

fn send(state: AppState, input: &str, timestamp: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::ChatInputChanged(input.to_string()));
    update(
        state,
        Msg::SendSubmitted {
            timestamp: timestamp.to_string(),
        },
    )
}

fn ask_id(effects: &[Effect]) -> RequestId {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::Ask { request_id, .. } => Some(*request_id),
            _ => None,
        })
        .expect("ask effect")
}

fn answer(state: AppState, request_id: RequestId, outcome: Result<&str, &str>) -> AppState {
    let (state, effects) = update(
        state,
        Msg::AnswerReceived {
            request_id,
            outcome: outcome
                .map(str::to_string)
                .map_err(ExchangeFailure::new),
            timestamp: "10:00:09".to_string(),
        },
    );
    assert!(effects.is_empty());
    state
}

#[test]
fn hello_is_echoed_then_answered() {
    init_logging();
    let state = AppState::new("10:00:00");
    assert_eq!(state.transcript().len(), 1);

    let (state, effects) = send(state, "hello", "10:00:01");
    let view = state.view();
    assert_eq!(view.messages.len(), 2);
    assert_eq!(view.messages[1].sender(), Sender::User);
    assert_eq!(view.messages[1].text(), "hello");
    assert_eq!(view.messages[1].timestamp(), "10:00:01");
    assert_eq!(view.answer_status, AnswerStatus::Sending { pending: 1 });
    assert_eq!(view.chat_input, "");

    assert_eq!(
        effects,
        vec![Effect::Ask {
            request_id: 1,
            turns: vec![
                ChatTurn::new(Role::System, SYSTEM_PROMPT),
                ChatTurn::new(Role::Assistant, GREETING),
                ChatTurn::new(Role::User, "hello"),
            ],
        }]
    );

    let state = answer(state, 1, Ok("hi there"));
    let view = state.view();
    assert_eq!(view.messages.len(), 3);
    assert_eq!(view.messages[2].sender(), Sender::Bot);
    assert_eq!(view.messages[2].text(), "hi there");
    assert_eq!(view.messages[2].timestamp(), "10:00:09");
    assert_eq!(view.answer_status, AnswerStatus::Idle);
}

#[test]
fn blank_input_is_a_noop() {
    init_logging();
    for input in ["", "   ", "\n\t "] {
        let (mut state, _) = update(
            AppState::new("10:00:00"),
            Msg::ChatInputChanged(input.into()),
        );
        state.consume_dirty();

        let (mut next, effects) = update(
            state,
            Msg::SendSubmitted {
                timestamp: "10:00:01".into(),
            },
        );

        assert!(effects.is_empty());
        assert_eq!(next.transcript().len(), 1);
        assert_eq!(next.view().answer_status, AnswerStatus::Idle);
        assert_eq!(next.view().chat_input, input);
        assert!(!next.consume_dirty());
    }
}

#[test]
fn failure_appends_fixed_text_and_keeps_echo() {
    init_logging();
    let (state, effects) = send(AppState::new("10:00:00"), "will fail", "10:00:01");
    let id = ask_id(&effects);

    let state = answer(state, id, Err("connection refused"));
    let view = state.view();

    assert_eq!(view.messages.len(), 3);
    assert_eq!(view.messages[1].text(), "will fail");
    assert_eq!(view.messages[2].sender(), Sender::Bot);
    assert_eq!(view.messages[2].text(), ANSWER_FAILURE_TEXT);
    assert_eq!(view.answer_status, AnswerStatus::Idle);
}

#[test]
fn history_excludes_the_pending_echo() {
    init_logging();
    let (state, effects) = send(AppState::new("10:00:00"), "one", "10:00:01");
    let state = answer(state, ask_id(&effects), Ok("uno"));

    let (_state, effects) = send(state, "two", "10:00:02");
    let Some(Effect::Ask { turns, .. }) = effects.into_iter().next() else {
        panic!("expected ask effect");
    };

    let contents: Vec<_> = turns.iter().map(|t| t.content.as_str()).collect();
    assert_eq!(contents, vec![SYSTEM_PROMPT, GREETING, "one", "uno", "two"]);
    assert_eq!(contents.iter().filter(|c| **c == "two").count(), 1);
}

#[test]
fn transcript_grows_by_one_per_send_and_one_per_answer() {
    init_logging();
    let mut state = AppState::new("10:00:00");
    let mut ids = Vec::new();

    for (n, text) in ["a", "b", "c"].iter().enumerate() {
        let (next, effects) = send(state, text, "10:00:01");
        assert_eq!(next.transcript().len(), 2 + n);
        ids.push(ask_id(&effects));
        state = next;
    }
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(state.view().answer_status, AnswerStatus::Sending { pending: 3 });

    let mut len = state.transcript().len();
    for id in ids {
        state = answer(state, id, Ok("ok"));
        assert_eq!(state.transcript().len(), len + 1);
        len += 1;
    }
    assert_eq!(state.transcript().len(), 7);
    assert_eq!(state.view().answer_status, AnswerStatus::Idle);
}

#[test]
fn answers_append_in_arrival_order() {
    init_logging();
    let (state, first) = send(AppState::new("10:00:00"), "slow question", "10:00:01");
    let (state, second) = send(state, "fast question", "10:00:02");

    let state = answer(state, ask_id(&second), Ok("fast answer"));
    let state = answer(state, ask_id(&first), Ok("slow answer"));

    let texts: Vec<_> = state
        .transcript()
        .messages()
        .iter()
        .map(|m| m.text())
        .collect();
    assert_eq!(
        texts[1..].to_vec(),
        vec!["slow question", "fast question", "fast answer", "slow answer"]
    );
}

#[test]
fn unknown_or_repeated_answer_ids_are_ignored() {
    init_logging();
    let (state, effects) = send(AppState::new("10:00:00"), "hello", "10:00:01");
    let id = ask_id(&effects);
    let state = answer(state, id, Ok("hi"));
    let len = state.transcript().len();

    let mut state = answer(state, id, Ok("duplicate"));
    state.consume_dirty();
    let mut state = answer(state, 42, Ok("stray"));

    assert_eq!(state.transcript().len(), len);
    assert!(!state.consume_dirty());
}

#[test]
fn input_is_echoed_untrimmed() {
    init_logging();
    let (state, _) = send(AppState::new("10:00:00"), "  padded  ", "10:00:01");

    assert_eq!(state.view().messages[1].text(), "  padded  ");
}
