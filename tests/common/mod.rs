//! Shared helpers for the HTTP and WebSocket integration tests.
#![allow(dead_code, clippy::panic)]

use std::net::SocketAddr;

use deque_gateway::api::build_app;
use deque_gateway::app_state::AppState;
use deque_gateway::domain::EventBus;
use deque_gateway::service::MessageService;
use deque_gateway::store::{MemoryStore, StoreBackend};

/// Builds an in-memory application state with default limits.
pub fn memory_state() -> AppState {
    let service = MessageService::new(
        StoreBackend::Memory(MemoryStore::new()),
        EventBus::new(64),
        "messages_",
        1024,
    );
    AppState::new(service)
}

/// Serves the gateway on an ephemeral port and returns its address.
pub async fn spawn_gateway() -> SocketAddr {
    let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
        panic!("bind ephemeral port");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("local addr");
    };
    let app = build_app(memory_state());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}
