use crate::{ExchangeFailure, PickedFile, RequestId, SearchResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the chat input box.
    ChatInputChanged(String),
    /// User submitted the chat input. `timestamp` is the display time of the echo.
    SendSubmitted { timestamp: String },
    /// User edited the search box.
    SearchInputChanged(String),
    /// User submitted the search box.
    SearchSubmitted,
    /// User picked a file, or dismissed the picker.
    FilePicked(Option<PickedFile>),
    /// Ask round trip finished.
    AnswerReceived {
        request_id: RequestId,
        outcome: Result<String, ExchangeFailure>,
        timestamp: String,
    },
    /// Search round trip finished.
    SearchCompleted {
        request_id: RequestId,
        outcome: Result<Vec<SearchResult>, ExchangeFailure>,
    },
    /// Upload round trip finished.
    UploadCompleted {
        request_id: RequestId,
        outcome: Result<String, ExchangeFailure>,
    },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
