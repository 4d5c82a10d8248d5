//! Canvas service: creation, membership, and event append + relay.
//!
//! DESIGN
//! ======
//! The server never folds a canvas. It appends each event to the canonical
//! log and relays it verbatim to every registered member except the sender,
//! in registration order. Append and relay run under one registry write
//! lock, so every member sees one canvas's events in log order.
//!
//! Registering does not replay history: a member only receives events added
//! after it registered.
//!
//! ERROR HANDLING
//! ==============
//! Unknown canvas or client ids are rejected with no state change. Relays
//! are fire-and-forget `try_send`: a full queue drops the message with a
//! warning, and a member without a live connection is skipped.

use canvas::event::CanvasEvent;
use canvas::shape::{CanvasId, ClientId};
use frames::ServerMessage;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, info, warn};

use crate::error::ErrorCode;
use crate::state::{AppState, CanvasState, Registry};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CanvasError {
    #[error("canvas not found: {0}")]
    CanvasNotFound(CanvasId),
    #[error("client not found: {0}")]
    ClientNotFound(ClientId),
    #[error("clientId {claimed} does not match this connection")]
    ClientMismatch { claimed: ClientId },
}

impl ErrorCode for CanvasError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::CanvasNotFound(_) => "E_CANVAS_NOT_FOUND",
            Self::ClientNotFound(_) => "E_CLIENT_NOT_FOUND",
            Self::ClientMismatch { .. } => "E_CLIENT_MISMATCH",
        }
    }
}

// =============================================================================
// CREATE / LIST
// =============================================================================

/// Create an empty canvas under a fresh 40-hex-char id.
pub async fn create_canvas(state: &AppState) -> CanvasId {
    let mut registry = state.registry.write().await;
    let canvas_id = loop {
        let candidate = random_canvas_id();
        if !registry.canvases.contains_key(&candidate) {
            break candidate;
        }
    };
    registry.canvases.insert(canvas_id.clone(), CanvasState::new());
    info!(%canvas_id, canvases = registry.canvases.len(), "canvas: created");
    canvas_id
}

/// Every canvas id, sorted.
pub async fn list_canvas_ids(state: &AppState) -> Vec<CanvasId> {
    state.registry.read().await.canvases.keys().cloned().collect()
}

fn random_canvas_id() -> CanvasId {
    let bytes: [u8; 20] = rand::random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

// =============================================================================
// MEMBERSHIP
// =============================================================================

/// Add a connected client to a canvas. Registering twice is a no-op.
///
/// # Errors
///
/// Returns [`CanvasError::ClientNotFound`] if the client is not connected and
/// [`CanvasError::CanvasNotFound`] if the canvas does not exist.
pub async fn register_for_canvas(state: &AppState, client_id: &str, canvas_id: &str) -> Result<(), CanvasError> {
    let mut registry = state.registry.write().await;
    if !registry.clients.contains_key(client_id) {
        return Err(CanvasError::ClientNotFound(client_id.to_owned()));
    }
    let canvas = canvas_mut(&mut registry, canvas_id)?;
    if canvas.is_registered(client_id) {
        debug!(%client_id, %canvas_id, "canvas: already registered");
        return Ok(());
    }
    canvas.registered.push(client_id.to_owned());
    info!(%client_id, %canvas_id, members = canvas.registered.len(), "canvas: client registered");
    Ok(())
}

/// Remove a client from a canvas. Removing a non-member is a no-op, and the
/// client need not be connected.
///
/// # Errors
///
/// Returns [`CanvasError::CanvasNotFound`] if the canvas does not exist.
pub async fn unregister_for_canvas(state: &AppState, client_id: &str, canvas_id: &str) -> Result<(), CanvasError> {
    let mut registry = state.registry.write().await;
    let canvas = canvas_mut(&mut registry, canvas_id)?;
    let before = canvas.registered.len();
    canvas.registered.retain(|id| id != client_id);
    if canvas.registered.len() < before {
        info!(%client_id, %canvas_id, members = canvas.registered.len(), "canvas: client unregistered");
    }
    Ok(())
}

// =============================================================================
// EVENTS
// =============================================================================

/// Append `event` to the canvas log and relay it to every other member.
/// Returns how many members the relay was queued for.
///
/// # Errors
///
/// Returns [`CanvasError::CanvasNotFound`] if the canvas does not exist.
pub async fn add_canvas_event(
    state: &AppState,
    client_id: &str,
    canvas_id: &str,
    event: CanvasEvent,
) -> Result<usize, CanvasError> {
    let mut guard = state.registry.write().await;
    let Registry { canvases, clients } = &mut *guard;
    let Some(canvas) = canvases.get_mut(canvas_id) else {
        return Err(CanvasError::CanvasNotFound(canvas_id.to_owned()));
    };

    debug!(%client_id, %canvas_id, name = event.name(), shape_id = event.shape_id(), "canvas: event appended");
    canvas.events.append(event.clone());

    let relay = ServerMessage::AddCanvasEvent {
        canvas_id: canvas_id.to_owned(),
        client_id: client_id.to_owned(),
        event,
    };

    let mut delivered = 0;
    for member in canvas.registered.iter().filter(|id| *id != client_id) {
        let Some(tx) = clients.get(member) else {
            debug!(%member, %canvas_id, "canvas: member not connected, relay skipped");
            continue;
        };
        match tx.try_send(relay.clone()) {
            Ok(()) => delivered += 1,
            Err(TrySendError::Full(_)) => {
                warn!(%member, %canvas_id, "canvas: member queue full, relay dropped");
            }
            Err(TrySendError::Closed(_)) => {
                debug!(%member, %canvas_id, "canvas: member channel closed, relay skipped");
            }
        }
    }
    Ok(delivered)
}

// =============================================================================
// HELPERS
// =============================================================================

fn canvas_mut<'a>(registry: &'a mut Registry, canvas_id: &str) -> Result<&'a mut CanvasState, CanvasError> {
    registry
        .canvases
        .get_mut(canvas_id)
        .ok_or_else(|| CanvasError::CanvasNotFound(canvas_id.to_owned()))
}

#[cfg(test)]
#[path = "canvas_test.rs"]
mod tests;
