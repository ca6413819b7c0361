use axum::{extract::State, Json};
use std::collections::BTreeMap;

use crate::models::chat::InfoResponse;
use crate::state::AppState;

pub async fn info(State(state): State<AppState>) -> Json<InfoResponse> {
    let endpoints = [
        ("health", "GET /health"),
        ("chat", "POST /chat"),
        ("history", "GET /history"),
        ("clear_history", "DELETE /history"),
        ("info", "GET /info"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect::<BTreeMap<_, _>>();

    Json(InfoResponse {
        name: "Mini-Agent".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        description: "A simple AI agent bot powered by Google Gemini".to_string(),
        model: state.agent.model_name(),
        endpoints,
    })
}
