//! Connection lifecycle: id assignment on connect, handle removal on
//! disconnect.

use canvas::shape::ClientId;
use frames::ServerMessage;
use tokio::sync::mpsc;
use tracing::info;
use uuid::Uuid;

use crate::state::AppState;

/// Register a live connection and return its freshly assigned client id.
pub async fn connect_client(state: &AppState, tx: mpsc::Sender<ServerMessage>) -> ClientId {
    let mut registry = state.registry.write().await;
    let client_id = loop {
        let candidate = Uuid::new_v4().to_string();
        if !registry.clients.contains_key(&candidate) {
            break candidate;
        }
    };
    registry.clients.insert(client_id.clone(), tx);
    info!(%client_id, connected = registry.clients.len(), "session: client connected");
    client_id
}

/// Drop the connection handle. Canvas memberships are left as they are.
pub async fn disconnect_client(state: &AppState, client_id: &str) {
    let mut registry = state.registry.write().await;
    if registry.clients.remove(client_id).is_some() {
        info!(%client_id, connected = registry.clients.len(), "session: client disconnected");
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
