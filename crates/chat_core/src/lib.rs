//! Chat client core: pure session state machine and view-model helpers.
mod answer;
mod effect;
mod in_flight;
mod msg;
mod request;
mod search;
mod state;
mod transcript;
mod update;
mod upload;
mod view_model;

pub use answer::{AnswerStatus, ANSWER_FAILURE_TEXT};
pub use effect::Effect;
pub use msg::Msg;
pub use request::{build_chat_request, ChatTurn, Role, SYSTEM_PROMPT};
pub use search::SearchResult;
pub use state::{AppState, ExchangeFailure, OrderingPolicy, RequestId};
pub use transcript::{Message, Sender, Transcript, GREETING};
pub use update::update;
pub use upload::{PickedFile, UploadState, UPLOAD_FAILURE_TEXT, UPLOAD_PLACEHOLDER_TEXT};
pub use view_model::AppViewModel;
