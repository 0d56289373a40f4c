//! Message-board DTOs for save, drain, and count operations.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Response body for `GET /hello`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HelloResponse {
    /// Fixed greeting text.
    pub greeting: String,
}

/// Request body for `POST /messages`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SaveMessageRequest {
    /// Message text; must not be empty.
    pub message: String,
    /// Author to save under. Defaults to the caller identity.
    #[serde(default)]
    pub sender: Option<String>,
}

/// Response body for `POST /messages` (201 Created).
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SaveMessageResponse {
    /// Always `true` on success.
    pub saved: bool,
    /// Resolved author.
    pub author: String,
    /// Collection key the message was stored under.
    pub collection: String,
    /// Number of messages stored for the author after this save.
    pub queue_len: u64,
}

/// Optional sender selection for drain and count.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SenderQuery {
    /// Author whose messages are addressed. Defaults to the caller identity.
    #[serde(default)]
    pub sender: Option<String>,
}

/// Response body for `POST /messages/drain`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DrainMessagesResponse {
    /// Resolved author.
    pub author: String,
    /// Drained messages, oldest first.
    pub messages: Vec<String>,
}

/// Response body for `GET /messages/count`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageCountResponse {
    /// Resolved author.
    pub author: String,
    /// Number of stored messages.
    pub count: u64,
}
