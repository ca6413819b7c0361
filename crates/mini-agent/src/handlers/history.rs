use axum::{
    extract::{Query, State},
    Json,
};
use tracing::info;

use super::require_user_id;
use crate::models::chat::{ClearHistoryResponse, HistoryQuery};
use crate::services::conversation::Turn;
use crate::state::AppState;
use crate::utils::error::ApiError;

pub async fn get_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<Turn>>, ApiError> {
    let user_id = require_user_id(&query.user_id)?;
    Ok(Json(state.store.history(Some(user_id))))
}

pub async fn clear_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<ClearHistoryResponse>, ApiError> {
    let user_id = require_user_id(&query.user_id)?;
    state.store.clear(Some(user_id));
    info!("History cleared for user {}", user_id);

    Ok(Json(ClearHistoryResponse {
        message: format!("History cleared for user: {}", user_id),
    }))
}
