//! Behavioural properties of `PersistentDeque` over the in-memory store.
#![allow(clippy::panic)]

use deque_gateway::deque::{DequeError, PersistentDeque};
use deque_gateway::store::{KeyValueStore, MemoryStore};

fn deque(store: &MemoryStore, collection: &str) -> PersistentDeque<MemoryStore> {
    let Ok(deque) = PersistentDeque::new(store.clone(), collection) else {
        panic!("valid collection key");
    };
    deque
}

async fn pop_all_back(deque: &PersistentDeque<MemoryStore>) -> Vec<Vec<u8>> {
    let mut out = Vec::new();
    while let Ok(value) = deque.pop_back().await {
        out.push(value);
    }
    out
}

#[tokio::test]
async fn push_front_then_pop_back_is_fifo() {
    let store = MemoryStore::new();
    let d = deque(&store, "fifo");
    for v in [b"a", b"b", b"c"] {
        tokio_test::assert_ok!(d.push_front(v).await);
    }
    assert_eq!(
        pop_all_back(&d).await,
        vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]
    );
}

#[tokio::test]
async fn push_front_then_pop_front_is_lifo() {
    let store = MemoryStore::new();
    let d = deque(&store, "lifo");
    for v in [b"a", b"b", b"c"] {
        tokio_test::assert_ok!(d.push_front(v).await);
    }
    let mut out = Vec::new();
    while let Ok(value) = d.pop_front().await {
        out.push(value);
    }
    assert_eq!(out, vec![b"c".to_vec(), b"b".to_vec(), b"a".to_vec()]);
}

#[tokio::test]
async fn mixed_ends_keep_sequence_order() {
    let store = MemoryStore::new();
    let d = deque(&store, "mixed");
    tokio_test::assert_ok!(d.push_back(b"2").await);
    tokio_test::assert_ok!(d.push_front(b"1").await);
    tokio_test::assert_ok!(d.push_back(b"3").await);

    assert_eq!(d.len().await.ok(), Some(3));
    assert_eq!(d.front().await.ok().flatten(), Some(b"1".to_vec()));
    assert_eq!(d.back().await.ok().flatten(), Some(b"3".to_vec()));
    assert_eq!(d.get(1).await.ok().flatten(), Some(b"2".to_vec()));
    assert_eq!(d.get(3).await.ok().flatten(), None);
}

#[tokio::test]
async fn drained_collection_leaves_only_metadata() {
    let store = MemoryStore::new();
    let d = deque(&store, "drain");
    for v in [b"x", b"y"] {
        tokio_test::assert_ok!(d.push_front(v).await);
    }
    let Ok(drained) = d.drain_back().await else {
        panic!("drain succeeds");
    };
    assert_eq!(drained, vec![b"x".to_vec(), b"y".to_vec()]);
    assert_eq!(d.is_empty().await.ok(), Some(true));
    assert_eq!(store.len().await, 1);
    assert!(store.contains_key("drain::meta").await);
}

#[tokio::test]
async fn pop_on_empty_fails_without_writes() {
    let store = MemoryStore::new();
    let d = deque(&store, "empty");
    let result = d.pop_back().await;
    assert!(matches!(result, Err(DequeError::EmptyCollection { .. })));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn reopened_deque_sees_prior_state() {
    let store = MemoryStore::new();
    {
        let d = deque(&store, "durable");
        tokio_test::assert_ok!(d.push_front(b"first").await);
        tokio_test::assert_ok!(d.push_front(b"second").await);
    }
    let reopened = deque(&store, "durable");
    assert_eq!(reopened.len().await.ok(), Some(2));
    assert_eq!(reopened.pop_back().await.ok(), Some(b"first".to_vec()));
}

#[tokio::test]
async fn collections_are_isolated() {
    let store = MemoryStore::new();
    let alice = deque(&store, "messages_alice");
    let bob = deque(&store, "messages_bob");
    tokio_test::assert_ok!(alice.push_front(b"hi").await);
    assert_eq!(bob.is_empty().await.ok(), Some(true));
    assert_eq!(alice.len().await.ok(), Some(1));
}

#[tokio::test]
async fn corrupt_metadata_is_reported() {
    let store = MemoryStore::new();
    tokio_test::assert_ok!(store.set("broken::meta", b"not json").await);
    let d = deque(&store, "broken");
    assert!(matches!(
        d.len().await,
        Err(DequeError::CorruptMetadata { .. })
    ));
}

#[tokio::test]
async fn empty_values_round_trip() {
    let store = MemoryStore::new();
    let d = deque(&store, "blank");
    tokio_test::assert_ok!(d.push_back(b"").await);
    assert_eq!(d.len().await.ok(), Some(1));
    assert_eq!(d.pop_front().await.ok(), Some(Vec::new()));
}

#[tokio::test]
async fn push_front_then_push_back_pops_front_in_order() {
    let store = MemoryStore::new();
    let d = deque(&store, "ends");
    tokio_test::assert_ok!(d.push_front(b"a").await);
    tokio_test::assert_ok!(d.push_back(b"b").await);
    assert_eq!(d.pop_front().await.ok(), Some(b"a".to_vec()));
    assert_eq!(d.pop_front().await.ok(), Some(b"b".to_vec()));
    assert_eq!(d.is_empty().await.ok(), Some(true));
}

#[tokio::test]
async fn pop_front_on_empty_fails() {
    let store = MemoryStore::new();
    let d = deque(&store, "empty_front");
    assert!(matches!(
        d.pop_front().await,
        Err(DequeError::EmptyCollection { .. })
    ));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn push_after_drain_is_independent() {
    let store = MemoryStore::new();
    let d = deque(&store, "reuse");
    for v in [b"a", b"b"] {
        tokio_test::assert_ok!(d.push_front(v).await);
    }
    tokio_test::assert_ok!(d.drain_back().await);

    tokio_test::assert_ok!(d.push_front(b"x").await);
    assert_eq!(d.len().await.ok(), Some(1));
    assert_eq!(d.pop_back().await.ok(), Some(b"x".to_vec()));
    assert_eq!(d.is_empty().await.ok(), Some(true));
}
