use std::fmt;

use chat_logging::{chat_debug, chat_warn};

use crate::in_flight::{InFlight, Settlement};
use crate::{Effect, ExchangeFailure, OrderingPolicy, RequestId};

/// Summary text shown while an upload is outstanding.
pub const UPLOAD_PLACEHOLDER_TEXT: &str = "⏳ Uploading and processing...";
/// Summary text shown when an upload fails for any reason.
pub const UPLOAD_FAILURE_TEXT: &str = "❌ Failed to upload or process the file.";

/// A file chosen by the user, already read into memory.
#[derive(Clone, PartialEq, Eq)]
pub struct PickedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for PickedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PickedFile")
            .field("name", &self.name)
            .field("bytes_len", &self.bytes.len())
            .finish()
    }
}

/// Single-slot upload status as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadState {
    pub file_name: Option<String>,
    pub summary_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct UploadExchange {
    slot: UploadState,
    requests: InFlight,
}

impl UploadExchange {
    pub(crate) fn pick(&mut self, file: Option<PickedFile>) -> Option<Effect> {
        let file = file?;

        self.slot = UploadState {
            file_name: Some(file.name.clone()),
            summary_text: UPLOAD_PLACEHOLDER_TEXT.to_string(),
        };
        let request_id = self.requests.issue();
        chat_debug!(
            "upload issued request_id={} bytes={}",
            request_id,
            file.bytes.len()
        );
        Some(Effect::Upload { request_id, file })
    }

    /// Only the summary text changes; the file name stays whatever was picked last.
    pub(crate) fn resolve(
        &mut self,
        request_id: RequestId,
        outcome: Result<String, ExchangeFailure>,
        ordering: OrderingPolicy,
    ) -> bool {
        match (self.requests.settle(request_id), ordering) {
            (Settlement::Unknown, _) => {
                chat_debug!("ignoring summary for unknown request_id={}", request_id);
                return false;
            }
            (Settlement::Superseded, OrderingPolicy::LatestIssuedOnly) => {
                chat_debug!("discarding superseded upload request_id={}", request_id);
                return false;
            }
            (Settlement::Latest, _) | (Settlement::Superseded, OrderingPolicy::LastResolvedWins) => {}
        }

        self.slot.summary_text = match outcome {
            Ok(summary) => summary,
            Err(failure) => {
                chat_warn!("upload request_id={} failed: {}", request_id, failure);
                UPLOAD_FAILURE_TEXT.to_string()
            }
        };
        true
    }

    pub(crate) fn slot(&self) -> &UploadState {
        &self.slot
    }

    pub(crate) fn uploading(&self) -> bool {
        self.requests.pending() > 0
    }
}
