//! WebSocket layer: connection handling and per-connection subscriptions.
//!
//! The WebSocket endpoint at `/ws` streams [`crate::domain::MessageEvent`]s
//! to clients, filtered by the authors each client subscribes to.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;
