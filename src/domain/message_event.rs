//! Domain events emitted by the message service.
//!
//! Every contract call publishes a [`MessageEvent::ContractLog`] line, and
//! every mutation publishes an event describing it. Events are broadcast
//! to WebSocket subscribers through the [`super::EventBus`].

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::AccountId;

/// Event published after a contract call or collection mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum MessageEvent {
    /// A log line emitted by a contract call.
    ContractLog {
        /// Account the call concerned, if it resolved one.
        author: Option<AccountId>,
        /// Log text.
        message: String,
        /// Emission timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A message was pushed onto an author's collection.
    MessageSaved {
        /// Message author.
        author: AccountId,
        /// Collection key written to.
        collection: String,
        /// Collection length after the push.
        queue_len: u64,
        /// Save timestamp.
        timestamp: DateTime<Utc>,
    },

    /// An author's collection was drained.
    MessagesDrained {
        /// Message author.
        author: AccountId,
        /// Collection key drained.
        collection: String,
        /// Number of messages removed.
        count: usize,
        /// Drain timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl MessageEvent {
    /// Author the event concerns, if any.
    #[must_use]
    pub fn author(&self) -> Option<&AccountId> {
        match self {
            Self::ContractLog { author, .. } => author.as_ref(),
            Self::MessageSaved { author, .. } | Self::MessagesDrained { author, .. } => {
                Some(author)
            }
        }
    }

    /// Event discriminator string, matching the serialized `event_type`.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::ContractLog { .. } => "contract_log",
            Self::MessageSaved { .. } => "message_saved",
            Self::MessagesDrained { .. } => "messages_drained",
        }
    }

    /// Timestamp of the event.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::ContractLog { timestamp, .. }
            | Self::MessageSaved { timestamp, .. }
            | Self::MessagesDrained { timestamp, .. } => *timestamp,
        }
    }
}
