//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One Axum router serves both transports on a single port: the websocket
//! endpoint that carries the canvas protocol, and a small HTTP API for
//! listing canvases and health checks.

pub mod canvases;
pub mod ws;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/ws", get(ws::handle_ws))
        .route("/api/canvasIds", get(canvases::list_canvas_ids))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
