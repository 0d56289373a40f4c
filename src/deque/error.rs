//! Error type for persistent deque operations.

use crate::store::StoreError;

/// Failure of a [`super::PersistentDeque`] operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DequeError {
    /// Pop attempted on a collection with `head == tail`.
    #[error("collection {collection} is empty")]
    EmptyCollection {
        /// Collection key.
        collection: String,
    },

    /// The backing store failed; propagated unmodified.
    #[error(transparent)]
    Storage(#[from] StoreError),

    /// Stored metadata could not be decoded or violates `head <= tail`.
    #[error("corrupt metadata for collection {collection}: {reason}")]
    CorruptMetadata {
        /// Collection key.
        collection: String,
        /// Decoder or invariant failure.
        reason: String,
    },

    /// An index inside `[head, tail)` has no stored element.
    #[error("collection {collection} has no element at index {index}")]
    MissingElement {
        /// Collection key.
        collection: String,
        /// Index that was expected to be occupied.
        index: i64,
    },

    /// Collection keys must be non-empty.
    #[error("invalid collection key: {0:?}")]
    InvalidCollectionKey(String),

    /// Moving `head` or `tail` would overflow `i64`.
    #[error("index overflow in collection {collection}")]
    IndexOverflow {
        /// Collection key.
        collection: String,
    },
}
