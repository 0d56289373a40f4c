//! WebSocket connection loop.
//!
//! Handles the read/write loop for a single WebSocket connection,
//! dispatching subscription commands and forwarding filtered events.

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use super::messages::{WsCommand, WsMessage, WsMessageType};
use super::subscription::SubscriptionManager;
use crate::domain::{AccountId, MessageEvent};

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Reads commands from the client and updates its subscriptions.
/// - Forwards matching events from the [`broadcast::Receiver`] to the client.
pub async fn run_connection(socket: WebSocket, mut event_rx: broadcast::Receiver<MessageEvent>) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut subs = SubscriptionManager::new();

    loop {
        tokio::select! {
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let response = handle_text_message(&text, &mut subs);
                        if let Some(resp_json) = response
                            && ws_tx.send(Message::text(resp_json)).await.is_err() {
                                break;
                            }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
            event = event_rx.recv() => {
                match event {
                    Ok(event) => {
                        if subs.matches(&event)
                            && let Some(json) = event_envelope(&event)
                            && ws_tx.send(Message::text(json)).await.is_err() {
                                break;
                            }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, "ws client lagged behind event bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    tracing::debug!("ws connection closed");
}

/// Wraps a domain event in a server-generated envelope.
fn event_envelope(event: &MessageEvent) -> Option<String> {
    let msg = WsMessage {
        id: uuid::Uuid::new_v4().to_string(),
        msg_type: WsMessageType::Event,
        timestamp: event.timestamp(),
        payload: serde_json::to_value(event).ok()?,
    };
    serde_json::to_string(&msg).ok()
}

/// Handles a text message from the client, returning an optional JSON response.
fn handle_text_message(text: &str, subs: &mut SubscriptionManager) -> Option<String> {
    let Ok(msg) = serde_json::from_str::<WsMessage>(text) else {
        return error_reply(String::new(), 400, "malformed JSON");
    };

    let Ok(command) = serde_json::from_value::<WsCommand>(msg.payload) else {
        return error_reply(msg.id, 404, "unknown command");
    };

    let payload = match command {
        WsCommand::Subscribe { authors } => {
            let (ids, wildcard, rejected) = parse_authors(&authors);
            subs.subscribe(&ids, wildcard);
            serde_json::json!({
                "subscribed": ids.iter().map(AccountId::as_str).collect::<Vec<_>>(),
                "rejected": rejected,
                "count": subs.count(),
                "wildcard": subs.is_subscribed_all(),
            })
        }
        WsCommand::Unsubscribe { authors } => {
            let (ids, _, rejected) = parse_authors(&authors);
            subs.unsubscribe(&ids);
            serde_json::json!({
                "unsubscribed": ids.iter().map(AccountId::as_str).collect::<Vec<_>>(),
                "rejected": rejected,
                "remaining_count": subs.count(),
            })
        }
    };

    serde_json::to_string(&WsMessage::reply(msg.id, WsMessageType::Response, payload)).ok()
}

/// Splits raw author strings into valid ids, the wildcard flag, and rejects.
fn parse_authors(raw: &[String]) -> (Vec<AccountId>, bool, Vec<String>) {
    let mut ids = Vec::new();
    let mut wildcard = false;
    let mut rejected = Vec::new();
    for author in raw {
        if author == "*" {
            wildcard = true;
        } else if let Ok(id) = author.parse::<AccountId>() {
            ids.push(id);
        } else {
            rejected.push(author.clone());
        }
    }
    (ids, wildcard, rejected)
}

fn error_reply(id: String, code: u16, message: &str) -> Option<String> {
    let err = WsMessage::reply(
        id,
        WsMessageType::Error,
        serde_json::json!({ "code": code, "message": message }),
    );
    serde_json::to_string(&err).ok()
}
