use axum::Json;
use axum::extract::State;
use axum::response::Html;
use serde::{Deserialize, Serialize};

use super::AppState;
use super::error::AppResult;
use crate::store::Snapshot;

#[derive(Debug, Deserialize)]
pub struct SendRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct SendResponse {
    pub status: &'static str,
    #[serde(flatten)]
    pub snapshot: Snapshot,
}

/// `/stream` keeps the `text` key the page script reads.
#[derive(Debug, Serialize)]
pub struct StreamResponse {
    pub text: String,
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let page = state.pages.render_index(&state.store.get_current())?;
    Ok(Html(page))
}

/// Blocks until the answer service replies, fails, or times out.
pub async fn send(
    State(state): State<AppState>,
    Json(req): Json<SendRequest>,
) -> AppResult<Json<SendResponse>> {
    let snapshot = state.store.submit(&req.text).await?;
    Ok(Json(SendResponse {
        status: "ok",
        snapshot,
    }))
}

pub async fn stream(State(state): State<AppState>) -> Json<StreamResponse> {
    let snapshot = state.store.get_current();
    Json(StreamResponse {
        text: snapshot.question,
        answer: snapshot.answer,
    })
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
