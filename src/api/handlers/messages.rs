//! Message-board handlers: greeting, save, drain, count.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    DrainMessagesResponse, HelloResponse, MessageCountResponse, SaveMessageRequest,
    SaveMessageResponse, SenderQuery,
};
use crate::api::extract::{Caller, parse_sender};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, GatewayError};

/// `GET /hello` — Fixed greeting.
#[utoipa::path(
    get,
    path = "/api/v1/hello",
    tag = "Messages",
    summary = "Say hello",
    description = "Returns the fixed greeting and emits a contract log event.",
    responses(
        (status = 200, description = "Greeting", body = HelloResponse),
    )
)]
pub async fn hello(State(state): State<AppState>) -> impl IntoResponse {
    Json(HelloResponse {
        greeting: state.message_service.say_hello_world().to_string(),
    })
}

/// `POST /messages` — Save a message for the sender or caller.
///
/// # Errors
///
/// Returns [`GatewayError`] on an empty or oversized message, a missing or
/// malformed identity, or a storage failure.
#[utoipa::path(
    post,
    path = "/api/v1/messages",
    tag = "Messages",
    summary = "Save a message",
    description = "Stores `\"{author} says {message}\"` at the front of the author's collection. Empty messages are rejected; whitespace is stored as sent. The author is `sender` if given, otherwise the `x-caller-id` header.",
    request_body = SaveMessageRequest,
    params(
        ("x-caller-id" = Option<String>, Header, description = "Caller account id"),
    ),
    responses(
        (status = 201, description = "Message saved", body = SaveMessageResponse),
        (status = 400, description = "Invalid message or identity", body = ErrorResponse),
    )
)]
pub async fn save_message(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Json(req): Json<SaveMessageRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let sender = parse_sender(req.sender.as_deref())?;
    let saved = state
        .message_service
        .save_message(&req.message, sender, caller)
        .await?;

    let response = SaveMessageResponse {
        saved: true,
        author: saved.author.to_string(),
        collection: saved.collection,
        queue_len: saved.queue_len,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// `POST /messages/drain` — Return and remove every stored message.
///
/// # Errors
///
/// Returns [`GatewayError`] on a missing or malformed identity or a
/// storage failure.
#[utoipa::path(
    post,
    path = "/api/v1/messages/drain",
    tag = "Messages",
    summary = "Drain all messages",
    description = "Pops every message from the back of the author's collection and returns them oldest first. Reading consumes the messages.",
    params(
        SenderQuery,
        ("x-caller-id" = Option<String>, Header, description = "Caller account id"),
    ),
    responses(
        (status = 200, description = "Drained messages", body = DrainMessagesResponse),
        (status = 400, description = "Invalid identity", body = ErrorResponse),
    )
)]
pub async fn drain_messages(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Query(query): Query<SenderQuery>,
) -> Result<impl IntoResponse, GatewayError> {
    let sender = parse_sender(query.sender.as_deref())?;
    let (author, messages) = state
        .message_service
        .get_all_messages(sender, caller)
        .await?;

    Ok(Json(DrainMessagesResponse {
        author: author.to_string(),
        messages,
    }))
}

/// `GET /messages/count` — Number of stored messages.
///
/// # Errors
///
/// Returns [`GatewayError`] on a missing or malformed identity or a
/// storage failure.
#[utoipa::path(
    get,
    path = "/api/v1/messages/count",
    tag = "Messages",
    summary = "Count messages",
    description = "Returns how many messages are stored for the author without consuming them.",
    params(
        SenderQuery,
        ("x-caller-id" = Option<String>, Header, description = "Caller account id"),
    ),
    responses(
        (status = 200, description = "Message count", body = MessageCountResponse),
        (status = 400, description = "Invalid identity", body = ErrorResponse),
    )
)]
pub async fn count_messages(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Query(query): Query<SenderQuery>,
) -> Result<impl IntoResponse, GatewayError> {
    let sender = parse_sender(query.sender.as_deref())?;
    let (author, count) = state
        .message_service
        .count_messages(sender, caller)
        .await?;

    Ok(Json(MessageCountResponse {
        author: author.to_string(),
        count,
    }))
}

/// Message-board routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/hello", get(hello))
        .route("/messages", post(save_message))
        .route("/messages/drain", post(drain_messages))
        .route("/messages/count", get(count_messages))
}
