use std::fmt;

use crate::answer::AnswerExchange;
use crate::search::SearchExchange;
use crate::upload::UploadExchange;
use crate::view_model::AppViewModel;
use crate::{Effect, PickedFile, SearchResult, Transcript};

/// Identifies one issued request within its exchange. Starts at 1.
pub type RequestId = u64;

/// Why a round trip produced no usable payload. Transport details stay in the
/// engine; this only carries a short reason for logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeFailure {
    pub reason: String,
}

impl ExchangeFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ExchangeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

/// Treatment of overlapping search and upload responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderingPolicy {
    /// Apply every response as it arrives; the last one to resolve wins.
    #[default]
    LastResolvedWins,
    /// Drop responses to anything but the most recently issued request.
    LatestIssuedOnly,
}

/// Session state. Mutated only through [`crate::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    transcript: Transcript,
    chat_input: String,
    answer: AnswerExchange,
    search: SearchExchange,
    upload: UploadExchange,
    ordering: OrderingPolicy,
    dirty: bool,
}

impl AppState {
    /// Fresh session; `started_at` stamps the greeting.
    pub fn new(started_at: impl Into<String>) -> Self {
        Self {
            transcript: Transcript::seeded(started_at),
            chat_input: String::new(),
            answer: AnswerExchange::default(),
            search: SearchExchange::default(),
            upload: UploadExchange::default(),
            ordering: OrderingPolicy::default(),
            dirty: false,
        }
    }

    pub fn with_ordering(mut self, ordering: OrderingPolicy) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            messages: self.transcript.messages().to_vec(),
            answer_status: self.answer.status(),
            chat_input: self.chat_input.clone(),
            search_query: self.search.query().to_string(),
            search_loading: self.search.loading(),
            search_started: self.search.started(),
            searches_pending: self.search.pending(),
            search_results: self.search.results().to_vec(),
            upload: self.upload.slot().clone(),
            uploading: self.upload.uploading(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything visible changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_chat_input(&mut self, text: String) {
        if self.chat_input != text {
            self.chat_input = text;
            self.dirty = true;
        }
    }

    /// Sends the chat draft. The draft is cleared only when a request goes out.
    pub(crate) fn submit_chat(&mut self, timestamp: &str) -> Option<Effect> {
        let effect = self
            .answer
            .send(&mut self.transcript, &self.chat_input, timestamp)?;
        self.chat_input.clear();
        self.dirty = true;
        Some(effect)
    }

    pub(crate) fn apply_answer(
        &mut self,
        request_id: RequestId,
        outcome: Result<String, ExchangeFailure>,
        timestamp: &str,
    ) {
        if self
            .answer
            .resolve(&mut self.transcript, request_id, outcome, timestamp)
        {
            self.dirty = true;
        }
    }

    pub(crate) fn set_search_query(&mut self, query: String) {
        if self.search.set_query(query) {
            self.dirty = true;
        }
    }

    pub(crate) fn submit_search(&mut self) -> Option<Effect> {
        let effect = self.search.submit()?;
        self.dirty = true;
        Some(effect)
    }

    pub(crate) fn apply_search(
        &mut self,
        request_id: RequestId,
        outcome: Result<Vec<SearchResult>, ExchangeFailure>,
    ) {
        if self.search.resolve(request_id, outcome, self.ordering) {
            self.dirty = true;
        }
    }

    pub(crate) fn pick_file(&mut self, file: Option<PickedFile>) -> Option<Effect> {
        let effect = self.upload.pick(file)?;
        self.dirty = true;
        Some(effect)
    }

    pub(crate) fn apply_upload(
        &mut self,
        request_id: RequestId,
        outcome: Result<String, ExchangeFailure>,
    ) {
        let was_uploading = self.upload.uploading();
        let applied = self.upload.resolve(request_id, outcome, self.ordering);
        if applied || was_uploading != self.upload.uploading() {
            self.dirty = true;
        }
    }
}
