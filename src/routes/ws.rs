//! WebSocket handler: the canvas protocol endpoint.
//!
//! DESIGN
//! ======
//! On upgrade, registers the connection (which assigns its client id), sends
//! `InitClient`, and enters a `select!` loop:
//! - Incoming text messages → decode + dispatch to the canvas service
//! - Relays queued by other connections → forward to this client
//!
//! Dispatch returns the messages owed to the sender (replies and errors).
//! Relays to other clients go through their channels inside the service.
//!
//! LIFECYCLE
//! =========
//! 1. Upgrade → connect → send `InitClient { id }`
//! 2. Client sends messages → dispatch → replies to sender
//! 3. Close → drop the connection handle (canvas memberships persist)

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use frames::{ClientMessage, ServerMessage};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::error::{ErrorCode, error_reply};
use crate::services;
use crate::services::canvas::CanvasError;
use crate::state::AppState;

/// Binary frames are not part of the protocol.
#[derive(Debug, thiserror::Error)]
#[error("binary frames are not supported; send JSON text")]
struct BinaryFrame;

impl ErrorCode for BinaryFrame {
    fn error_code(&self) -> &'static str {
        "E_MALFORMED_MESSAGE"
    }
}

// =============================================================================
// UPGRADE
// =============================================================================

pub async fn handle_ws(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| run_ws(socket, state))
}

// =============================================================================
// CONNECTION
// =============================================================================

async fn run_ws(mut socket: WebSocket, state: AppState) {
    // Per-connection channel for relays queued by other connections.
    let (client_tx, mut client_rx) = mpsc::channel::<ServerMessage>(state.config.client_queue_capacity);
    let client_id = services::session::connect_client(&state, client_tx).await;

    let welcome = ServerMessage::InitClient { id: client_id.clone() };
    if send_message(&mut socket, &welcome).await.is_ok() {
        loop {
            tokio::select! {
                msg = socket.recv() => {
                    let Some(Ok(msg)) = msg else { break };
                    let replies = match msg {
                        Message::Text(text) => process_inbound_text(&state, &client_id, text.as_str()).await,
                        Message::Binary(_) => vec![reject(&client_id, &BinaryFrame)],
                        Message::Close(_) => break,
                        Message::Ping(_) | Message::Pong(_) => Vec::new(),
                    };
                    if send_all(&mut socket, &replies).await.is_err() {
                        break;
                    }
                }
                Some(relay) = client_rx.recv() => {
                    if send_message(&mut socket, &relay).await.is_err() {
                        break;
                    }
                }
            }
        }
    }

    services::session::disconnect_client(&state, &client_id).await;
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Decode and handle one inbound text message, returning what the sender
/// should receive.
///
/// Kept free of socket I/O so tests can drive the protocol directly.
async fn process_inbound_text(state: &AppState, client_id: &str, text: &str) -> Vec<ServerMessage> {
    let msg = match frames::decode_client_message(text) {
        Ok(msg) => msg,
        Err(e) => return vec![reject(client_id, &e)],
    };

    debug!(%client_id, kind = msg.kind(), "ws: recv message");
    match dispatch(state, client_id, msg).await {
        Ok(replies) => replies,
        Err(e) => vec![reject(client_id, &e)],
    }
}

async fn dispatch(state: &AppState, client_id: &str, msg: ClientMessage) -> Result<Vec<ServerMessage>, CanvasError> {
    match msg {
        ClientMessage::CreateCanvas => {
            let canvas_id = services::canvas::create_canvas(state).await;
            Ok(vec![ServerMessage::CreateCanvasComplete { canvas_id }])
        }
        ClientMessage::GetCanvasIds => {
            let canvas_ids = services::canvas::list_canvas_ids(state).await;
            Ok(vec![ServerMessage::CanvasIds { canvas_ids }])
        }
        ClientMessage::RegisterForCanvas { client_id: claimed, canvas_id } => {
            ensure_own_id(client_id, claimed)?;
            services::canvas::register_for_canvas(state, client_id, &canvas_id).await?;
            Ok(Vec::new())
        }
        ClientMessage::UnregisterForCanvas { client_id: claimed, canvas_id } => {
            ensure_own_id(client_id, claimed)?;
            services::canvas::unregister_for_canvas(state, client_id, &canvas_id).await?;
            Ok(Vec::new())
        }
        ClientMessage::AddCanvasEvent { client_id: claimed, canvas_id, event } => {
            ensure_own_id(client_id, claimed)?;
            services::canvas::add_canvas_event(state, client_id, &canvas_id, event).await?;
            Ok(Vec::new())
        }
    }
}

/// A connection may only act as itself.
fn ensure_own_id(client_id: &str, claimed: String) -> Result<(), CanvasError> {
    if claimed == client_id {
        Ok(())
    } else {
        Err(CanvasError::ClientMismatch { claimed })
    }
}

fn reject(client_id: &str, err: &impl ErrorCode) -> ServerMessage {
    warn!(%client_id, code = err.error_code(), retryable = err.retryable(), error = %err, "ws: request rejected");
    error_reply(err)
}

// =============================================================================
// HELPERS
// =============================================================================

async fn send_all(socket: &mut WebSocket, messages: &[ServerMessage]) -> Result<(), ()> {
    for msg in messages {
        send_message(socket, msg).await?;
    }
    Ok(())
}

async fn send_message(socket: &mut WebSocket, msg: &ServerMessage) -> Result<(), ()> {
    let json = match frames::encode_message(msg) {
        Ok(j) => j,
        Err(e) => {
            warn!(error = %e, "ws: failed to encode message");
            return Err(());
        }
    };
    if let ServerMessage::InitClient { id } = msg {
        info!(client_id = %id, "ws: client initialized");
    }
    socket.send(Message::Text(json.into())).await.map_err(|e| {
        debug!(error = %e, "ws: send failed");
    })
}

#[cfg(test)]
#[path = "ws_test.rs"]
mod tests;
