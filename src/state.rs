//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds one [`Registry`] behind one lock: the canvases (each with its
//! canonical event log and registered members) and the connected clients'
//! outbound channels. Every inbound message that mutates anything takes the
//! write lock once, so appending to a log and relaying the event happen as
//! one step relative to other messages.
//!
//! Canvas membership and connection are separate. A client that disconnects
//! without unregistering stays in its canvases' member lists; relays to it
//! are skipped because its channel is gone.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use canvas::event_log::EventLog;
use canvas::shape::{CanvasId, ClientId};
use frames::ServerMessage;
use tokio::sync::{RwLock, mpsc};

use crate::config::ServerConfig;

// =============================================================================
// CANVAS STATE
// =============================================================================

/// Server-side canvas: canonical log plus members in registration order.
#[derive(Debug, Default)]
pub struct CanvasState {
    pub events: EventLog,
    pub registered: Vec<ClientId>,
}

impl CanvasState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_registered(&self, client_id: &str) -> bool {
        self.registered.iter().any(|id| id == client_id)
    }
}

// =============================================================================
// REGISTRY
// =============================================================================

#[derive(Debug, Default)]
pub struct Registry {
    /// Canvases keyed by id. Ordered so listings come out sorted.
    pub canvases: BTreeMap<CanvasId, CanvasState>,
    /// Connected clients: `client_id` -> sender for outgoing messages.
    pub clients: HashMap<ClientId, mpsc::Sender<ServerMessage>>,
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; the registry is Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<RwLock<Registry>>,
    pub config: ServerConfig,
}

impl AppState {
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        Self { registry: Arc::new(RwLock::new(Registry::default())), config }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
