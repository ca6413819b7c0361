use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::Utc;
use std::time::Instant;
use tracing::{info, warn};

use super::require_user_id;
use crate::models::chat::{ChatRequest, ChatResponse};
use crate::services::conversation::{context_from_turns, format_timestamp, window};
use crate::state::AppState;
use crate::utils::error::ApiError;

/// Replays the user's recent turns, asks the agent, records the turn.
///
/// A failed provider call still answers 200 with
/// `Error processing message: <cause>` but is not recorded. Anything that
/// escapes the agent (a panic in the task) becomes a 500.
pub async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let start_time = Instant::now();
    let Json(request) = payload?;
    let user_id = require_user_id(request.user_id())?.to_string();

    info!(
        "Chat request: user={}, message_len={}",
        user_id,
        request.message.len()
    );

    let task_state = state.clone();
    let task_user = user_id.clone();
    let message = request.message;

    let response = tokio::spawn(async move {
        let conversation = &task_state.settings.conversation;
        let turns = task_state
            .store
            .recent(&task_user, conversation.context_exchanges);
        let context = context_from_turns(&turns);
        let context = window(&context, conversation.context_entries());

        match task_state.agent.respond(&message, context).await {
            Ok(reply) => {
                let turn = task_state.store.append(&task_user, &message, &reply);
                ChatResponse {
                    response: turn.agent_response,
                    timestamp: format_timestamp(&turn.timestamp),
                    user_id: turn.user_id,
                }
            }
            Err(e) => {
                warn!("Chat turn for user {} not recorded: {}", task_user, e);
                ChatResponse {
                    response: e.to_reply_text(),
                    timestamp: format_timestamp(&Utc::now()),
                    user_id: task_user,
                }
            }
        }
    })
    .await?;

    info!(
        "Chat completed for user {} in {}ms",
        user_id,
        start_time.elapsed().as_millis()
    );

    Ok(Json(response))
}
