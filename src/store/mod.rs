//! Backing stores: the key-value contract persistent deques are layered over.
//!
//! [`KeyValueStore`] is the only interface the deque sees. Two
//! implementations ship with the gateway: [`MemoryStore`] for tests and
//! ephemeral deployments, and [`PostgresStore`] for durable storage via
//! `sqlx::PgPool`. [`StoreBackend`] selects one at startup.

pub mod memory;
pub mod postgres;

use std::fmt::Debug;
use std::future::Future;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

/// Failure reported by a backing store.
///
/// Both variants carry the store key involved so that errors surfaced to
/// callers identify the slot or metadata record that failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Reading a key failed.
    #[error("storage read failed for key {key}: {reason}")]
    Read {
        /// Store key being read.
        key: String,
        /// Backend-specific failure description.
        reason: String,
    },

    /// Writing or deleting a key failed.
    #[error("storage write failed for key {key}: {reason}")]
    Write {
        /// Store key being written or deleted.
        key: String,
        /// Backend-specific failure description.
        reason: String,
    },
}

/// Minimal asynchronous key-value contract.
///
/// Implementations must be cheap to clone; clones share the same
/// underlying storage. Deleting an absent key succeeds.
pub trait KeyValueStore: Clone + Debug + Send + Sync + 'static {
    /// Returns the bytes stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Read`] if the backend cannot be read.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<Vec<u8>>, StoreError>> + Send;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if the backend rejects the write.
    fn set(&self, key: &str, value: &[u8]) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Removes `key` from the store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if the backend rejects the delete.
    fn delete(&self, key: &str) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Backing store selected from configuration at startup.
#[derive(Debug, Clone)]
pub enum StoreBackend {
    /// Process-local, non-durable store.
    Memory(MemoryStore),
    /// PostgreSQL-backed durable store.
    Postgres(PostgresStore),
}

impl StoreBackend {
    /// Short backend name reported by the system endpoints.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Postgres(_) => "postgres",
        }
    }

    /// Returns `true` if data survives a process restart.
    #[must_use]
    pub const fn is_durable(&self) -> bool {
        matches!(self, Self::Postgres(_))
    }
}

impl Default for StoreBackend {
    fn default() -> Self {
        Self::Memory(MemoryStore::new())
    }
}

impl KeyValueStore for StoreBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        match self {
            Self::Memory(store) => store.get(key).await,
            Self::Postgres(store) => store.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        match self {
            Self::Memory(store) => store.set(key, value).await,
            Self::Postgres(store) => store.set(key, value).await,
        }
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        match self {
            Self::Memory(store) => store.delete(key).await,
            Self::Postgres(store) => store.delete(key).await,
        }
    }
}
