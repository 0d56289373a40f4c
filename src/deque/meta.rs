//! Head/tail metadata stored alongside each collection.

use serde::{Deserialize, Serialize};

/// Occupied index range `[head, tail)` of a collection.
///
/// Absent metadata is equivalent to [`DequeMeta::default`], i.e. an empty
/// collection at `head = tail = 0`. A drained collection keeps whatever
/// indices it reached; they are never realigned to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DequeMeta {
    /// Index of the first occupied slot.
    pub head: i64,
    /// Index one past the last occupied slot.
    pub tail: i64,
}

impl DequeMeta {
    /// Returns `true` if no slot is occupied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    /// Number of occupied slots.
    #[must_use]
    pub const fn len(&self) -> u64 {
        self.tail.abs_diff(self.head)
    }

    /// Returns `true` if the invariant `head <= tail` holds.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.head <= self.tail
    }

    /// Index of the `offset`-th element from the front, if occupied.
    #[must_use]
    pub fn index_of(&self, offset: u64) -> Option<i64> {
        if offset >= self.len() {
            return None;
        }
        i64::try_from(offset)
            .ok()
            .and_then(|off| self.head.checked_add(off))
    }
}
