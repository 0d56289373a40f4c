//! Message service: the message-board contract over persistent deques.

use std::sync::Arc;

use chrono::Utc;

use crate::deque::PersistentDeque;
use crate::domain::{AccountId, CollectionLocks, EventBus, MessageEvent};
use crate::error::GatewayError;
use crate::store::{KeyValueStore, StoreBackend};

/// Fixed greeting returned by [`MessageService::say_hello_world`].
pub const GREETING: &str = "Hello World!";

/// Outcome of [`MessageService::save_message`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedMessage {
    /// Resolved author.
    pub author: AccountId,
    /// Collection key the message was pushed to.
    pub collection: String,
    /// Collection length after the push.
    pub queue_len: u64,
}

/// Orchestration layer for the message-board contract.
///
/// Each author's messages live in a [`PersistentDeque`] under
/// `"{key_prefix}{author}"`. Saving pushes to the front; reading drains
/// from the back, which consumes the messages. Every mutating call holds
/// the collection's lock from [`CollectionLocks`] for its whole
/// read-modify-write, and publishes events through the [`EventBus`].
#[derive(Debug, Clone)]
pub struct MessageService<S = StoreBackend> {
    store: S,
    locks: Arc<CollectionLocks>,
    event_bus: EventBus,
    key_prefix: String,
    max_message_bytes: usize,
}

impl<S: KeyValueStore> MessageService<S> {
    /// Creates a new `MessageService`.
    #[must_use]
    pub fn new(
        store: S,
        event_bus: EventBus,
        key_prefix: impl Into<String>,
        max_message_bytes: usize,
    ) -> Self {
        Self {
            store,
            locks: Arc::new(CollectionLocks::new()),
            event_bus,
            key_prefix: key_prefix.into(),
            max_message_bytes,
        }
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Returns a reference to the backing store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Prefix used to derive collection keys.
    #[must_use]
    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    /// Largest accepted message, in bytes.
    #[must_use]
    pub const fn max_message_bytes(&self) -> usize {
        self.max_message_bytes
    }

    /// Returns the fixed greeting.
    pub fn say_hello_world(&self) -> &'static str {
        self.log(None, "say_hello_world() was called".to_string());
        GREETING
    }

    /// Saves `message` for `sender`, or for `caller` when no sender is given.
    ///
    /// The stored text is `"{author} says {message}"`, pushed to the front
    /// of the author's collection.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::MissingCaller`] if no author can be resolved,
    /// [`GatewayError::InvalidRequest`] for an empty or oversized message, and
    /// a persistence error if the store fails.
    pub async fn save_message(
        &self,
        message: &str,
        sender: Option<AccountId>,
        caller: Option<AccountId>,
    ) -> Result<SavedMessage, GatewayError> {
        self.log(None, "save_message() was called".to_string());

        let author = resolve_author(sender, caller)?;
        if message.is_empty() {
            return Err(GatewayError::InvalidRequest(
                "message can not be blank".to_string(),
            ));
        }
        if message.len() > self.max_message_bytes {
            return Err(GatewayError::InvalidRequest(format!(
                "message exceeds {} bytes",
                self.max_message_bytes
            )));
        }

        let deque = self.deque_for(&author)?;
        let entry = format!("{author} says {message}");

        let guard = self.locks.acquire(deque.collection()).await;
        deque.push_front(entry.as_bytes()).await?;
        let queue_len = deque.len().await?;
        drop(guard);

        let saved = SavedMessage {
            author,
            collection: deque.collection().to_string(),
            queue_len,
        };

        self.event_bus.publish(MessageEvent::MessageSaved {
            author: saved.author.clone(),
            collection: saved.collection.clone(),
            queue_len,
            timestamp: Utc::now(),
        });

        tracing::info!(author = %saved.author, queue_len, "message saved");
        Ok(saved)
    }

    /// Drains every message for `sender` (or `caller`), oldest first.
    ///
    /// Reading consumes the messages: the collection is empty afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::MissingCaller`] if no author can be resolved
    /// and a persistence error if the store fails mid-drain.
    pub async fn get_all_messages(
        &self,
        sender: Option<AccountId>,
        caller: Option<AccountId>,
    ) -> Result<(AccountId, Vec<String>), GatewayError> {
        let author = resolve_author(sender, caller)?;
        self.log(
            Some(author.clone()),
            format!("get_all_messages() was called by {author}"),
        );

        let deque = self.deque_for(&author)?;
        let guard = self.locks.acquire(deque.collection()).await;
        let drained = deque.drain_back().await?;
        drop(guard);

        let messages: Vec<String> = drained
            .into_iter()
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .collect();

        self.event_bus.publish(MessageEvent::MessagesDrained {
            author: author.clone(),
            collection: deque.collection().to_string(),
            count: messages.len(),
            timestamp: Utc::now(),
        });

        tracing::info!(%author, count = messages.len(), "messages drained");
        Ok((author, messages))
    }

    /// Number of stored messages for `sender` (or `caller`), without
    /// consuming them.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::MissingCaller`] if no author can be resolved
    /// and a persistence error if the store cannot be read.
    pub async fn count_messages(
        &self,
        sender: Option<AccountId>,
        caller: Option<AccountId>,
    ) -> Result<(AccountId, u64), GatewayError> {
        let author = resolve_author(sender, caller)?;
        let count = self.deque_for(&author)?.len().await?;
        Ok((author, count))
    }

    fn deque_for(&self, author: &AccountId) -> Result<PersistentDeque<S>, GatewayError> {
        PersistentDeque::new(self.store.clone(), author.collection_key(&self.key_prefix))
            .map_err(GatewayError::from)
    }

    fn log(&self, author: Option<AccountId>, message: String) {
        tracing::info!(contract_log = %message);
        self.event_bus.publish(MessageEvent::ContractLog {
            author,
            message,
            timestamp: Utc::now(),
        });
    }
}

/// Picks the explicit sender, falling back to the caller identity.
fn resolve_author(
    sender: Option<AccountId>,
    caller: Option<AccountId>,
) -> Result<AccountId, GatewayError> {
    sender.or(caller).ok_or(GatewayError::MissingCaller)
}
