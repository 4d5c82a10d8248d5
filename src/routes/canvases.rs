//! Canvas listing over plain HTTP.

use axum::extract::State;
use axum::response::Json;
use serde::Serialize;

use crate::services::canvas;
use crate::state::AppState;

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CanvasIdsResponse {
    pub canvas_ids: Vec<String>,
}

/// `GET /api/canvasIds`: every canvas id, sorted.
pub async fn list_canvas_ids(State(state): State<AppState>) -> Json<CanvasIdsResponse> {
    Json(CanvasIdsResponse { canvas_ids: canvas::list_canvas_ids(&state).await })
}

#[cfg(test)]
#[path = "canvases_test.rs"]
mod tests;
