//! Error types for list management

use echo_core::ListId;
use thiserror::Error;

/// List management errors
///
/// Not-found and duplicate conditions are deliberately not errors: those
/// operations are silent no-ops whose outcome is read from the returned
/// changed-id sets. Errors only arise at the sort-provider boundary.
#[derive(Debug, Error)]
pub enum ListError {
    /// The sort provider failed to produce a reordered sequence
    #[error("Sort provider error: {0}")]
    SortProvider(String),

    /// The sort provider returned a sequence that is not a permutation of its input
    #[error("Sort provider returned a non-permutation for list {list_id}")]
    SequenceMismatch {
        /// Collection whose reorder was rejected
        list_id: ListId,
    },

    /// The collection was mutated while a reorder was in flight
    #[error("List {list_id} changed while reordering; stale result discarded")]
    ConcurrentModification {
        /// Collection whose reorder was rejected
        list_id: ListId,
    },
}

/// Result type for list operations
pub type Result<T> = std::result::Result<T, ListError>;
