use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ChatInputChanged(text) => {
            state.set_chat_input(text);
            Vec::new()
        }
        Msg::SendSubmitted { timestamp } => state.submit_chat(&timestamp).into_iter().collect(),
        Msg::SearchInputChanged(query) => {
            state.set_search_query(query);
            Vec::new()
        }
        Msg::SearchSubmitted => state.submit_search().into_iter().collect(),
        Msg::FilePicked(file) => state.pick_file(file).into_iter().collect(),
        Msg::AnswerReceived {
            request_id,
            outcome,
            timestamp,
        } => {
            state.apply_answer(request_id, outcome, &timestamp);
            Vec::new()
        }
        Msg::SearchCompleted {
            request_id,
            outcome,
        } => {
            state.apply_search(request_id, outcome);
            Vec::new()
        }
        Msg::UploadCompleted {
            request_id,
            outcome,
        } => {
            state.apply_upload(request_id, outcome);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
