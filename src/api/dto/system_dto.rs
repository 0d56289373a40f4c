//! System endpoint DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `"healthy"` when the process is serving.
    pub status: String,
    /// RFC 3339 server time.
    pub timestamp: String,
    /// Crate version.
    pub version: String,
}

/// Storage configuration as seen by clients.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StorageInfoResponse {
    /// Backend name (`"memory"` or `"postgres"`).
    pub backend: String,
    /// Whether stored messages survive a restart.
    pub durable: bool,
    /// Prefix prepended to account ids to form collection keys.
    pub key_prefix: String,
    /// Largest accepted message, in bytes.
    pub max_message_bytes: usize,
}
