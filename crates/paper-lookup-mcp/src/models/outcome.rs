//! Terminal result of one search invocation.

use crate::error::DomainError;
use crate::models::PaperRecord;

/// What a single search round trip ended in.
///
/// Exactly one variant per request; the formatter dispatches on the tag.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    /// At least one matching paper.
    Papers(Vec<PaperRecord>),
    /// The request was valid but nothing matched.
    Empty,
    /// The pipeline failed; the error is already normalized.
    Failed(DomainError),
}

impl SearchOutcome {
    /// Wrap a provider result list, collapsing zero matches to `Empty`.
    #[must_use]
    pub fn from_records(records: Vec<PaperRecord>) -> Self {
        if records.is_empty() { Self::Empty } else { Self::Papers(records) }
    }
}
