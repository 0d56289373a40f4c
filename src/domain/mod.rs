//! Domain layer: account identity, message events, and coordination.
//!
//! This module contains the server-side domain model: the validated
//! [`AccountId`] that addresses each author's message collection, the
//! [`MessageEvent`]s broadcast through the [`EventBus`], and the
//! [`CollectionLocks`] registry that serializes mutations per collection.

pub mod account_id;
pub mod collection_locks;
pub mod event_bus;
pub mod message_event;

pub use account_id::{AccountId, AccountIdError};
pub use collection_locks::{CollectionGuard, CollectionLocks};
pub use event_bus::EventBus;
pub use message_event::MessageEvent;
