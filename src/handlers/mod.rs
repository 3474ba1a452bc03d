pub mod items;

use axum::{extract::State, http::StatusCode, Json};
use serde_json::json;

use crate::{db, AppState};

/// Always 200; connectivity is reported in the body so orchestrators can poll
/// it without tripping on a down database.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let mongodb = if db::acquire(&state.client, &state.config).await.is_some() {
        "connected"
    } else {
        "disconnected"
    };
    (
        StatusCode::OK,
        Json(json!({ "status": "healthy", "mongodb": mongodb })),
    )
}
