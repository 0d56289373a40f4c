//! Durable deque operations.

use super::{DequeError, DequeKeys, DequeMeta};
use crate::store::{KeyValueStore, StoreError};

/// Double-ended queue whose elements live in a [`KeyValueStore`].
///
/// Constructed per collection key and stateless between calls: cloning a
/// deque, or constructing a second one for the same key over the same
/// store, yields a handle onto the same persisted collection.
///
/// # Write ordering
///
/// Pushes write the element before advancing the metadata, so an
/// interrupted push never exposes an index without an element. Pops
/// advance the metadata before deleting the element, so an interrupted pop
/// never loses an element that is still indexed. Either interruption can
/// leave an orphaned slot outside `[head, tail)`, which is never read
/// again.
///
/// # Concurrency
///
/// Each operation is a sequential read-modify-write. The deque does no
/// locking; callers must ensure at most one mutator per collection key.
#[derive(Debug, Clone)]
pub struct PersistentDeque<S> {
    store: S,
    keys: DequeKeys,
}

impl<S: KeyValueStore> PersistentDeque<S> {
    /// Creates a handle onto `collection` within `store`.
    ///
    /// No store access happens here; metadata is created on first write.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::InvalidCollectionKey`] if `collection` is empty.
    pub fn new(store: S, collection: impl Into<String>) -> Result<Self, DequeError> {
        Ok(Self {
            store,
            keys: DequeKeys::new(collection)?,
        })
    }

    /// The collection key this deque addresses.
    #[must_use]
    pub fn collection(&self) -> &str {
        self.keys.collection()
    }

    /// Reads the current `(head, tail)` metadata.
    ///
    /// Absent metadata yields [`DequeMeta::default`].
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::Storage`] on read failure and
    /// [`DequeError::CorruptMetadata`] if the stored record cannot be
    /// decoded or has `head > tail`.
    pub async fn metadata(&self) -> Result<DequeMeta, DequeError> {
        let Some(bytes) = self.store.get(&self.keys.meta()).await? else {
            return Ok(DequeMeta::default());
        };

        let meta: DequeMeta =
            serde_json::from_slice(&bytes).map_err(|e| DequeError::CorruptMetadata {
                collection: self.collection().to_string(),
                reason: e.to_string(),
            })?;

        if !meta.is_valid() {
            return Err(DequeError::CorruptMetadata {
                collection: self.collection().to_string(),
                reason: format!("head {} exceeds tail {}", meta.head, meta.tail),
            });
        }
        Ok(meta)
    }

    /// Returns `true` if the collection holds no elements.
    ///
    /// A collection that was never written is empty.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::Storage`] if the metadata cannot be read.
    pub async fn is_empty(&self) -> Result<bool, DequeError> {
        Ok(self.metadata().await?.is_empty())
    }

    /// Number of elements in the collection (`tail - head`).
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::Storage`] if the metadata cannot be read.
    pub async fn len(&self) -> Result<u64, DequeError> {
        Ok(self.metadata().await?.len())
    }

    /// Inserts `value` before the current first element.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::Storage`] if the store fails and
    /// [`DequeError::IndexOverflow`] if `head` is already `i64::MIN`.
    pub async fn push_front(&self, value: &[u8]) -> Result<(), DequeError> {
        let mut meta = self.metadata().await?;
        let index = meta.head.checked_sub(1).ok_or_else(|| self.overflow())?;

        self.store.set(&self.keys.element(index), value).await?;
        meta.head = index;
        self.write_meta(&meta).await?;

        tracing::debug!(collection = %self.keys, index, len = meta.len(), "push_front");
        Ok(())
    }

    /// Appends `value` after the current last element.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::Storage`] if the store fails and
    /// [`DequeError::IndexOverflow`] if `tail` is already `i64::MAX`.
    pub async fn push_back(&self, value: &[u8]) -> Result<(), DequeError> {
        let mut meta = self.metadata().await?;
        let index = meta.tail;
        let next_tail = index.checked_add(1).ok_or_else(|| self.overflow())?;

        self.store.set(&self.keys.element(index), value).await?;
        meta.tail = next_tail;
        self.write_meta(&meta).await?;

        tracing::debug!(collection = %self.keys, index, len = meta.len(), "push_back");
        Ok(())
    }

    /// Removes and returns the first element.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::EmptyCollection`] if there is nothing to pop,
    /// [`DequeError::MissingElement`] if the indexed slot is absent, and
    /// [`DequeError::Storage`] if the store fails before the pop commits.
    pub async fn pop_front(&self) -> Result<Vec<u8>, DequeError> {
        let mut meta = self.metadata().await?;
        if meta.is_empty() {
            return Err(self.empty());
        }

        let index = meta.head;
        let value = self.read_slot(index).await?;
        meta.head = index.checked_add(1).ok_or_else(|| self.overflow())?;
        self.write_meta(&meta).await?;
        self.release_slot(index).await;

        tracing::debug!(collection = %self.keys, index, len = meta.len(), "pop_front");
        Ok(value)
    }

    /// Removes and returns the last element.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::EmptyCollection`] if there is nothing to pop,
    /// [`DequeError::MissingElement`] if the indexed slot is absent, and
    /// [`DequeError::Storage`] if the store fails before the pop commits.
    pub async fn pop_back(&self) -> Result<Vec<u8>, DequeError> {
        let mut meta = self.metadata().await?;
        if meta.is_empty() {
            return Err(self.empty());
        }

        let index = meta.tail.checked_sub(1).ok_or_else(|| self.overflow())?;
        let value = self.read_slot(index).await?;
        meta.tail = index;
        self.write_meta(&meta).await?;
        self.release_slot(index).await;

        tracing::debug!(collection = %self.keys, index, len = meta.len(), "pop_back");
        Ok(value)
    }

    /// Returns the first element without removing it.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::Storage`] or [`DequeError::MissingElement`].
    pub async fn front(&self) -> Result<Option<Vec<u8>>, DequeError> {
        self.get(0).await
    }

    /// Returns the last element without removing it.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::Storage`] or [`DequeError::MissingElement`].
    pub async fn back(&self) -> Result<Option<Vec<u8>>, DequeError> {
        let meta = self.metadata().await?;
        if meta.is_empty() {
            return Ok(None);
        }
        let index = meta.tail.checked_sub(1).ok_or_else(|| self.overflow())?;
        self.read_slot(index).await.map(Some)
    }

    /// Returns the element `offset` positions from the front, if any.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::Storage`] or [`DequeError::MissingElement`].
    pub async fn get(&self, offset: u64) -> Result<Option<Vec<u8>>, DequeError> {
        let meta = self.metadata().await?;
        match meta.index_of(offset) {
            Some(index) => self.read_slot(index).await.map(Some),
            None => Ok(None),
        }
    }

    /// Removes every element, returning them in `pop_back` order.
    ///
    /// All slots are read before anything is mutated, then the metadata is
    /// collapsed to `tail = head` in a single write. A failure at any point
    /// before that write leaves the collection untouched. Reading the
    /// collection this way consumes it.
    ///
    /// # Errors
    ///
    /// Returns [`DequeError::Storage`] or [`DequeError::MissingElement`] if
    /// a slot or the metadata cannot be read, or if the metadata write
    /// fails. In every error case no element has been removed.
    pub async fn drain_back(&self) -> Result<Vec<Vec<u8>>, DequeError> {
        let mut meta = self.metadata().await?;
        if meta.is_empty() {
            return Ok(Vec::new());
        }
        let mut drained = Vec::new();
        let mut index = meta.tail;
        while index > meta.head {
            index = index.checked_sub(1).ok_or_else(|| self.overflow())?;
            drained.push(self.read_slot(index).await?);
        }

        let tail = meta.tail;
        meta.tail = meta.head;
        self.write_meta(&meta).await?;
        let mut slot = meta.head;
        while slot < tail {
            self.release_slot(slot).await;
            slot = slot.checked_add(1).ok_or_else(|| self.overflow())?;
        }

        tracing::debug!(collection = %self.keys, count = drained.len(), "drained");
        Ok(drained)
    }

    async fn read_slot(&self, index: i64) -> Result<Vec<u8>, DequeError> {
        self.store
            .get(&self.keys.element(index))
            .await?
            .ok_or_else(|| DequeError::MissingElement {
                collection: self.collection().to_string(),
                index,
            })
    }

    async fn write_meta(&self, meta: &DequeMeta) -> Result<(), DequeError> {
        let key = self.keys.meta();
        let bytes = serde_json::to_vec(meta).map_err(|e| StoreError::Write {
            key: key.clone(),
            reason: e.to_string(),
        })?;
        self.store.set(&key, &bytes).await?;
        Ok(())
    }

    /// Deletes a slot that is already outside `[head, tail)`.
    async fn release_slot(&self, index: i64) {
        let key = self.keys.element(index);
        if let Err(err) = self.store.delete(&key).await {
            tracing::warn!(collection = %self.keys, %key, error = %err, "orphaned slot left behind");
        }
    }

    fn empty(&self) -> DequeError {
        DequeError::EmptyCollection {
            collection: self.collection().to_string(),
        }
    }

    fn overflow(&self) -> DequeError {
        DequeError::IndexOverflow {
            collection: self.collection().to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::store::MemoryStore;

    /// Memory store that fails operations on keys ending with a suffix.
    #[derive(Debug, Clone, Default)]
    struct FlakyStore {
        inner: MemoryStore,
        fail_reads: Arc<Mutex<Option<String>>>,
        fail_writes: Arc<Mutex<Option<String>>>,
        fail_deletes: Arc<Mutex<Option<String>>>,
    }

    fn rule_hits(rule: &Mutex<Option<String>>, key: &str) -> bool {
        rule.lock()
            .ok()
            .and_then(|guard| guard.clone())
            .is_some_and(|suffix| key.ends_with(&suffix))
    }

    fn set_rule(rule: &Mutex<Option<String>>, suffix: Option<&str>) {
        if let Ok(mut guard) = rule.lock() {
            *guard = suffix.map(str::to_string);
        }
    }

    impl KeyValueStore for FlakyStore {
        async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
            if rule_hits(&self.fail_reads, key) {
                return Err(StoreError::Read {
                    key: key.to_string(),
                    reason: "injected".to_string(),
                });
            }
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
            if rule_hits(&self.fail_writes, key) {
                return Err(StoreError::Write {
                    key: key.to_string(),
                    reason: "injected".to_string(),
                });
            }
            self.inner.set(key, value).await
        }

        async fn delete(&self, key: &str) -> Result<(), StoreError> {
            if rule_hits(&self.fail_deletes, key) {
                return Err(StoreError::Write {
                    key: key.to_string(),
                    reason: "injected".to_string(),
                });
            }
            self.inner.delete(key).await
        }
    }

    fn deque<S: KeyValueStore>(store: S) -> PersistentDeque<S> {
        let Ok(deque) = PersistentDeque::new(store, "c") else {
            panic!("valid collection key");
        };
        deque
    }

    #[tokio::test]
    async fn metadata_absent_until_first_write() {
        let store = MemoryStore::new();
        let d = deque(store.clone());
        assert_eq!(d.metadata().await, Ok(DequeMeta::default()));
        assert!(store.is_empty().await);

        tokio_test::assert_ok!(d.push_back(b"x").await);
        assert!(store.contains_key("c::meta").await);
        assert!(store.contains_key("c::0").await);
    }

    #[tokio::test]
    async fn push_front_moves_head_negative() {
        let d = deque(MemoryStore::new());
        tokio_test::assert_ok!(d.push_front(b"a").await);
        tokio_test::assert_ok!(d.push_front(b"b").await);
        assert_eq!(d.metadata().await, Ok(DequeMeta { head: -2, tail: 0 }));
    }

    #[tokio::test]
    async fn drained_collection_keeps_indices() {
        let d = deque(MemoryStore::new());
        tokio_test::assert_ok!(d.push_front(b"a").await);
        tokio_test::assert_ok!(d.push_front(b"b").await);
        tokio_test::assert_ok!(d.drain_back().await);
        assert_eq!(d.metadata().await, Ok(DequeMeta { head: -2, tail: -2 }));
    }

    #[tokio::test]
    async fn failed_read_mid_drain_removes_nothing() {
        let store = FlakyStore::default();
        let d = deque(store.clone());
        for v in [b"a", b"b", b"c"] {
            tokio_test::assert_ok!(d.push_front(v).await);
        }

        set_rule(&store.fail_reads, Some("::-2"));
        assert!(matches!(
            d.drain_back().await,
            Err(DequeError::Storage(StoreError::Read { .. }))
        ));
        set_rule(&store.fail_reads, None);

        assert_eq!(d.len().await, Ok(3));
        assert_eq!(
            d.drain_back().await,
            Ok(vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()])
        );
    }

    #[tokio::test]
    async fn failed_meta_write_during_drain_removes_nothing() {
        let store = FlakyStore::default();
        let d = deque(store.clone());
        tokio_test::assert_ok!(d.push_front(b"a").await);
        tokio_test::assert_ok!(d.push_front(b"b").await);

        set_rule(&store.fail_writes, Some("::meta"));
        assert!(d.drain_back().await.is_err());
        set_rule(&store.fail_writes, None);

        assert_eq!(d.len().await, Ok(2));
        assert!(store.inner.contains_key("c::-1").await);
        assert!(store.inner.contains_key("c::-2").await);
    }

    #[tokio::test]
    async fn drain_releases_every_slot() {
        let store = MemoryStore::new();
        let d = deque(store.clone());
        tokio_test::assert_ok!(d.push_back(b"a").await);
        tokio_test::assert_ok!(d.push_front(b"b").await);
        tokio_test::assert_ok!(d.drain_back().await);
        assert_eq!(store.len().await, 1);
        assert!(store.contains_key("c::meta").await);
    }

    #[tokio::test]
    async fn pop_deletes_slot() {
        let store = MemoryStore::new();
        let d = deque(store.clone());
        tokio_test::assert_ok!(d.push_back(b"a").await);
        assert_eq!(d.pop_back().await, Ok(b"a".to_vec()));
        assert!(!store.contains_key("c::0").await);
    }

    #[tokio::test]
    async fn peeks_do_not_mutate() {
        let d = deque(MemoryStore::new());
        assert_eq!(d.front().await, Ok(None));
        assert_eq!(d.back().await, Ok(None));

        tokio_test::assert_ok!(d.push_back(b"1").await);
        tokio_test::assert_ok!(d.push_back(b"2").await);
        tokio_test::assert_ok!(d.push_front(b"0").await);

        assert_eq!(d.front().await, Ok(Some(b"0".to_vec())));
        assert_eq!(d.back().await, Ok(Some(b"2".to_vec())));
        assert_eq!(d.get(1).await, Ok(Some(b"1".to_vec())));
        assert_eq!(d.get(3).await, Ok(None));
        assert_eq!(d.len().await, Ok(3));
    }

    #[tokio::test]
    async fn failed_meta_write_leaves_no_phantom() {
        let store = FlakyStore::default();
        let d = deque(store.clone());
        tokio_test::assert_ok!(d.push_front(b"kept").await);

        set_rule(&store.fail_writes, Some("::meta"));
        let result = d.push_front(b"lost").await;
        assert!(matches!(
            result,
            Err(DequeError::Storage(StoreError::Write { .. }))
        ));
        set_rule(&store.fail_writes, None);

        // The orphaned slot exists but is outside [head, tail).
        assert!(store.inner.contains_key("c::-2").await);
        assert_eq!(d.len().await, Ok(1));
        assert_eq!(d.front().await, Ok(Some(b"kept".to_vec())));

        tokio_test::assert_ok!(d.push_front(b"next").await);
        assert_eq!(d.front().await, Ok(Some(b"next".to_vec())));
        assert_eq!(d.len().await, Ok(2));
    }

    #[tokio::test]
    async fn failed_element_write_leaves_len_unchanged() {
        let store = FlakyStore::default();
        let d = deque(store.clone());

        set_rule(&store.fail_writes, Some("::0"));
        assert!(d.push_back(b"v").await.is_err());
        set_rule(&store.fail_writes, None);

        assert_eq!(d.len().await, Ok(0));
        assert!(!store.inner.contains_key("c::meta").await);
    }

    #[tokio::test]
    async fn failed_delete_still_commits_pop() {
        let store = FlakyStore::default();
        let d = deque(store.clone());
        tokio_test::assert_ok!(d.push_back(b"a").await);
        tokio_test::assert_ok!(d.push_back(b"b").await);

        set_rule(&store.fail_deletes, Some("::1"));
        assert_eq!(d.pop_back().await, Ok(b"b".to_vec()));
        set_rule(&store.fail_deletes, None);

        assert_eq!(d.len().await, Ok(1));
        assert!(store.inner.contains_key("c::1").await);
        assert_eq!(d.pop_back().await, Ok(b"a".to_vec()));
    }

    #[tokio::test]
    async fn failed_meta_write_during_pop_keeps_element() {
        let store = FlakyStore::default();
        let d = deque(store.clone());
        tokio_test::assert_ok!(d.push_back(b"a").await);

        set_rule(&store.fail_writes, Some("::meta"));
        assert!(d.pop_front().await.is_err());
        set_rule(&store.fail_writes, None);

        assert_eq!(d.pop_front().await, Ok(b"a".to_vec()));
    }

    #[tokio::test]
    async fn read_failure_propagates_from_is_empty() {
        let store = FlakyStore::default();
        let d = deque(store.clone());
        set_rule(&store.fail_reads, Some("::meta"));

        let result = d.is_empty().await;
        assert!(matches!(
            result,
            Err(DequeError::Storage(StoreError::Read { .. }))
        ));
    }

    #[tokio::test]
    async fn undecodable_metadata_is_corrupt() {
        let store = MemoryStore::new();
        tokio_test::assert_ok!(store.set("c::meta", b"not json").await);
        let d = deque(store);
        assert!(matches!(
            d.len().await,
            Err(DequeError::CorruptMetadata { .. })
        ));
    }

    #[tokio::test]
    async fn inverted_metadata_is_corrupt() {
        let store = MemoryStore::new();
        tokio_test::assert_ok!(store.set("c::meta", br#"{"head":3,"tail":1}"#).await);
        let d = deque(store);
        assert!(matches!(
            d.is_empty().await,
            Err(DequeError::CorruptMetadata { .. })
        ));
    }

    #[tokio::test]
    async fn indexed_but_absent_slot_is_missing() {
        let store = MemoryStore::new();
        tokio_test::assert_ok!(store.set("c::meta", br#"{"head":-1,"tail":0}"#).await);
        let d = deque(store);
        assert_eq!(
            d.pop_back().await,
            Err(DequeError::MissingElement {
                collection: "c".to_string(),
                index: -1,
            })
        );
        // The failed pop did not advance the metadata.
        assert_eq!(d.len().await, Ok(1));
    }

    #[tokio::test]
    async fn head_at_min_overflows() {
        let store = MemoryStore::new();
        let meta = format!(r#"{{"head":{0},"tail":{0}}}"#, i64::MIN);
        tokio_test::assert_ok!(store.set("c::meta", meta.as_bytes()).await);
        let d = deque(store.clone());

        assert_eq!(
            d.push_front(b"x").await,
            Err(DequeError::IndexOverflow {
                collection: "c".to_string()
            })
        );
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn tail_at_max_overflows() {
        let store = MemoryStore::new();
        let meta = format!(r#"{{"head":{0},"tail":{0}}}"#, i64::MAX);
        tokio_test::assert_ok!(store.set("c::meta", meta.as_bytes()).await);
        let d = deque(store);
        assert!(matches!(
            d.push_back(b"x").await,
            Err(DequeError::IndexOverflow { .. })
        ));
    }

    #[test]
    fn empty_collection_key_rejected() {
        let result = PersistentDeque::new(MemoryStore::new(), "");
        assert!(matches!(result, Err(DequeError::InvalidCollectionKey(_))));
    }
}
