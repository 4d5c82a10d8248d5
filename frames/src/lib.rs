//! Shared message model and JSON codec for the realtime WS transport.
//!
//! This crate owns the wire representation used by both the server and the
//! CLI client. Every message is a JSON text frame tagged by `type`. Canvas
//! events travel inside `AddCanvasEvent` in their own `{name, payload}` form
//! (see `canvas::event`). Anything that fails to parse, from an unknown
//! `type` down to an out-of-range color, surfaces as [`CodecError::Malformed`].

use canvas::event::CanvasEvent;
use canvas::shape::{CanvasId, ClientId};
use canvas::sync::OutboundEvent;
use serde::{Deserialize, Serialize};

/// Error returned by the encode/decode helpers.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The text is not a well-formed message of the expected direction.
    #[error("malformed message: {0}")]
    Malformed(serde_json::Error),
    /// A message could not be serialized.
    #[error("failed to encode message: {0}")]
    Encode(serde_json::Error),
}

/// Messages a client sends to the server.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Ask for a fresh canvas.
    CreateCanvas,
    #[serde(rename_all = "camelCase")]
    RegisterForCanvas { client_id: ClientId, canvas_id: CanvasId },
    #[serde(rename_all = "camelCase")]
    UnregisterForCanvas { client_id: ClientId, canvas_id: CanvasId },
    /// Append `event` to the canvas log and relay it to the other members.
    #[serde(rename_all = "camelCase")]
    AddCanvasEvent { client_id: ClientId, canvas_id: CanvasId, event: CanvasEvent },
    /// List every canvas id the server knows.
    GetCanvasIds,
}

/// Messages the server sends to a client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// First message on every connection: the id assigned to this client.
    InitClient { id: ClientId },
    #[serde(rename_all = "camelCase")]
    CreateCanvasComplete { canvas_id: CanvasId },
    /// Relay of another client's event.
    #[serde(rename_all = "camelCase")]
    AddCanvasEvent { canvas_id: CanvasId, client_id: ClientId, event: CanvasEvent },
    #[serde(rename_all = "camelCase")]
    CanvasIds { canvas_ids: Vec<CanvasId> },
    /// A request was rejected. `code` is a stable, grepable identifier.
    Error { code: String, message: String },
}

impl ClientMessage {
    /// Wire discriminator, for log fields.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CreateCanvas => "CreateCanvas",
            Self::RegisterForCanvas { .. } => "RegisterForCanvas",
            Self::UnregisterForCanvas { .. } => "UnregisterForCanvas",
            Self::AddCanvasEvent { .. } => "AddCanvasEvent",
            Self::GetCanvasIds => "GetCanvasIds",
        }
    }
}

impl ServerMessage {
    #[must_use]
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Error { code: code.into(), message: message.into() }
    }
}

impl From<OutboundEvent> for ClientMessage {
    fn from(out: OutboundEvent) -> Self {
        Self::AddCanvasEvent { client_id: out.client_id, canvas_id: out.canvas_id, event: out.event }
    }
}

/// Encode any message as a JSON text frame.
///
/// # Errors
///
/// Returns [`CodecError::Encode`] if serialization fails.
pub fn encode_message<T: Serialize>(message: &T) -> Result<String, CodecError> {
    serde_json::to_string(message).map_err(CodecError::Encode)
}

/// Decode a client-to-server text frame.
///
/// # Errors
///
/// Returns [`CodecError::Malformed`] for invalid JSON, unknown types, or bad payloads.
pub fn decode_client_message(text: &str) -> Result<ClientMessage, CodecError> {
    serde_json::from_str(text).map_err(CodecError::Malformed)
}

/// Decode a server-to-client text frame.
///
/// # Errors
///
/// Returns [`CodecError::Malformed`] for invalid JSON, unknown types, or bad payloads.
pub fn decode_server_message(text: &str) -> Result<ServerMessage, CodecError> {
    serde_json::from_str(text).map_err(CodecError::Malformed)
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
