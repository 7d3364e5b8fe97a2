use crate::{AnswerStatus, Message, SearchResult, UploadState};

/// Everything the view needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub messages: Vec<Message>,
    pub answer_status: AnswerStatus,
    pub chat_input: String,
    pub search_query: String,
    pub search_loading: bool,
    /// True once any search went out; blank submits never set it.
    pub search_started: bool,
    pub searches_pending: usize,
    pub search_results: Vec<SearchResult>,
    pub upload: UploadState,
    pub uploading: bool,
    pub dirty: bool,
}
