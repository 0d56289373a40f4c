//! Service layer: business logic orchestration.
//!
//! [`MessageService`] implements the message-board contract on top of
//! [`crate::deque::PersistentDeque`] and emits events through the
//! [`super::domain::EventBus`].

pub mod message_service;

pub use message_service::{GREETING, MessageService, SavedMessage};
