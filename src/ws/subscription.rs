//! Per-connection subscription manager.
//!
//! Tracks which authors a WebSocket client is subscribed to and provides
//! server-side event filtering.

use std::collections::HashSet;

use crate::domain::{AccountId, MessageEvent};

/// Manages the set of author subscriptions for a single connection.
#[derive(Debug, Default)]
pub struct SubscriptionManager {
    /// Subscribed authors. Ignored while `subscribe_all` is set.
    authors: HashSet<AccountId>,
    /// Whether the client subscribed with the `"*"` wildcard.
    subscribe_all: bool,
}

impl SubscriptionManager {
    /// Creates a new empty subscription manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds authors to the subscription set, optionally enabling the wildcard.
    pub fn subscribe(&mut self, authors: &[AccountId], wildcard: bool) {
        if wildcard {
            self.subscribe_all = true;
        }
        self.authors.extend(authors.iter().cloned());
    }

    /// Removes authors from the subscription set.
    pub fn unsubscribe(&mut self, authors: &[AccountId]) {
        for author in authors {
            self.authors.remove(author);
        }
    }

    /// Returns `true` if `event` passes the filter.
    ///
    /// Events without an author only reach wildcard subscribers.
    #[must_use]
    pub fn matches(&self, event: &MessageEvent) -> bool {
        if self.subscribe_all {
            return true;
        }
        event
            .author()
            .is_some_and(|author| self.authors.contains(author))
    }

    /// Returns the number of explicitly subscribed authors.
    #[must_use]
    pub fn count(&self) -> usize {
        self.authors.len()
    }

    /// Returns `true` if the wildcard subscription is active.
    #[must_use]
    pub fn is_subscribed_all(&self) -> bool {
        self.subscribe_all
    }
}
