use crate::{ChatTurn, PickedFile, RequestId};

/// Remote calls requested by `update`; the caller executes them and reports
/// back with the matching completion `Msg`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Ask {
        request_id: RequestId,
        turns: Vec<ChatTurn>,
    },
    Search {
        request_id: RequestId,
        query: String,
    },
    Upload {
        request_id: RequestId,
        file: PickedFile,
    },
}
