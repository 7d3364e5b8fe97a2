//! JSON bodies exchanged with the backend.

use serde::{Deserialize, Serialize};

use crate::{SearchHit, Turn};

#[derive(Debug, Serialize)]
pub(crate) struct AskRequest<'a> {
    pub messages: &'a [Turn],
}

#[derive(Debug, Deserialize)]
pub(crate) struct AskResponse {
    pub answer: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub results: Vec<SearchHit>,
    /// Set by the backend when its search provider failed; `results` is then empty.
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UploadResponse {
    pub summary: String,
}
