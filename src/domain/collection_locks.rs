//! Per-collection mutual exclusion.
//!
//! [`PersistentDeque`](crate::deque::PersistentDeque) assumes at most one
//! active mutator per collection key. [`CollectionLocks`] provides that
//! guarantee for the gateway: each collection key maps to its own
//! [`tokio::sync::Mutex`], so calls on different collections proceed
//! concurrently while calls on the same collection are serialized.
//!
//! Entries live only while some caller holds or awaits them; the last
//! [`CollectionGuard`] to drop removes its entry from the map.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, MutexGuard, PoisonError};

use tokio::sync::{Mutex, OwnedMutexGuard};

type LockMap = HashMap<String, Arc<Mutex<()>>>;

/// Registry of per-collection async mutexes.
///
/// The outer map sits behind a `std::sync::Mutex` that is never held
/// across an `.await`, so [`CollectionGuard`] can prune it from `Drop`.
#[derive(Debug, Default)]
pub struct CollectionLocks {
    locks: Arc<StdMutex<LockMap>>,
}

/// Exclusive hold on one collection, released on drop.
#[derive(Debug)]
pub struct CollectionGuard {
    guard: Option<OwnedMutexGuard<()>>,
    collection: String,
    locks: Arc<StdMutex<LockMap>>,
}

impl CollectionLocks {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the lock for `collection`, creating it on first use.
    ///
    /// The returned guard releases the lock when dropped.
    pub async fn acquire(&self, collection: &str) -> CollectionGuard {
        let lock = Arc::clone(
            lock_map(&self.locks)
                .entry(collection.to_string())
                .or_default(),
        );
        CollectionGuard {
            guard: Some(lock.lock_owned().await),
            collection: collection.to_string(),
            locks: Arc::clone(&self.locks),
        }
    }

    /// Number of collections currently locked or awaited.
    #[must_use]
    pub fn len(&self) -> usize {
        lock_map(&self.locks).len()
    }

    /// Returns `true` if no collection is locked or awaited.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        lock_map(&self.locks).is_empty()
    }
}

impl Drop for CollectionGuard {
    fn drop(&mut self) {
        drop(self.guard.take());
        let mut map = lock_map(&self.locks);
        // Waiters clone the Arc under the map lock, so a count of one means
        // nobody else can reach this mutex.
        if map
            .get(&self.collection)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            map.remove(&self.collection);
        }
    }
}

fn lock_map(locks: &StdMutex<LockMap>) -> MutexGuard<'_, LockMap> {
    locks.lock().unwrap_or_else(PoisonError::into_inner)
}
