//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::EventBus;
use crate::service::MessageService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Message service for all business logic.
    pub message_service: Arc<MessageService>,
    /// Event bus for WebSocket subscriptions.
    pub event_bus: EventBus,
}

impl AppState {
    /// Wraps `service`, sharing its event bus with WebSocket connections.
    #[must_use]
    pub fn new(service: MessageService) -> Self {
        let event_bus = service.event_bus().clone();
        Self {
            message_service: Arc::new(service),
            event_bus,
        }
    }
}
