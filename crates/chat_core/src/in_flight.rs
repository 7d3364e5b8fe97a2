use std::collections::BTreeSet;

use crate::RequestId;

/// How a response relates to the requests an exchange has issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Settlement {
    /// The most recently issued request.
    Latest,
    /// An earlier request that was still outstanding.
    Superseded,
    /// Never issued, or already settled.
    Unknown,
}

/// Per-exchange request counter plus the set of unanswered ids.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct InFlight {
    last_issued: RequestId,
    pending: BTreeSet<RequestId>,
}

impl InFlight {
    pub(crate) fn issue(&mut self) -> RequestId {
        self.last_issued += 1;
        self.pending.insert(self.last_issued);
        self.last_issued
    }

    pub(crate) fn settle(&mut self, request_id: RequestId) -> Settlement {
        if !self.pending.remove(&request_id) {
            Settlement::Unknown
        } else if request_id == self.last_issued {
            Settlement::Latest
        } else {
            Settlement::Superseded
        }
    }

    pub(crate) fn pending(&self) -> usize {
        self.pending.len()
    }

    pub(crate) fn has_issued(&self) -> bool {
        self.last_issued > 0
    }
}
