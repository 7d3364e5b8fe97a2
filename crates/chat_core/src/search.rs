use chat_logging::{chat_debug, chat_info};

use crate::in_flight::{InFlight, Settlement};
use crate::{Effect, ExchangeFailure, OrderingPolicy, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct SearchExchange {
    query: String,
    loading: bool,
    results: Vec<SearchResult>,
    requests: InFlight,
}

impl SearchExchange {
    pub(crate) fn set_query(&mut self, query: String) -> bool {
        if self.query == query {
            return false;
        }
        self.query = query;
        true
    }

    /// Starts a search for the current query draft. The draft is kept.
    pub(crate) fn submit(&mut self) -> Option<Effect> {
        if self.query.trim().is_empty() {
            return None;
        }

        self.loading = true;
        self.results.clear();
        let request_id = self.requests.issue();
        chat_debug!("search issued request_id={}", request_id);
        Some(Effect::Search {
            request_id,
            query: self.query.clone(),
        })
    }

    /// Failures land as an empty result set; nothing user-visible beyond that.
    pub(crate) fn resolve(
        &mut self,
        request_id: RequestId,
        outcome: Result<Vec<SearchResult>, ExchangeFailure>,
        ordering: OrderingPolicy,
    ) -> bool {
        match (self.requests.settle(request_id), ordering) {
            (Settlement::Unknown, _) => {
                chat_debug!("ignoring search result for unknown request_id={}", request_id);
                return false;
            }
            (Settlement::Superseded, OrderingPolicy::LatestIssuedOnly) => {
                chat_debug!("discarding superseded search request_id={}", request_id);
                return false;
            }
            (Settlement::Latest, _) | (Settlement::Superseded, OrderingPolicy::LastResolvedWins) => {}
        }

        self.results = match outcome {
            Ok(results) => results,
            Err(failure) => {
                chat_info!("search request_id={} failed: {}", request_id, failure);
                Vec::new()
            }
        };
        self.loading = false;
        true
    }

    pub(crate) fn query(&self) -> &str {
        &self.query
    }

    pub(crate) fn loading(&self) -> bool {
        self.loading
    }

    pub(crate) fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub(crate) fn started(&self) -> bool {
        self.requests.has_issued()
    }

    /// Unanswered searches. May be non-zero while `loading` is false.
    pub(crate) fn pending(&self) -> usize {
        self.requests.pending()
    }
}
