//! # deque-gateway
//!
//! A durable double-ended queue layered over a key-value store, and a small
//! message-board service built on it, exposed over REST and WebSocket.
//!
//! Every deque is addressed by a collection key. Elements live under
//! `"{collection}::{index}"` and the `(head, tail)` bounds under
//! `"{collection}::meta"`, so the queue survives process restarts whenever
//! the backing store does.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── MessageService (service/)
//!     ├── EventBus, CollectionLocks (domain/)
//!     │
//!     ├── PersistentDeque (deque/)
//!     │
//!     └── KeyValueStore (store/): memory or PostgreSQL
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod deque;
pub mod domain;
pub mod error;
pub mod service;
pub mod store;
pub mod ws;
