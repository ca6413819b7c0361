use super::types::{ContextMessage, Turn};

/// Expand stored turns into alternating user/assistant entries
pub fn context_from_turns(turns: &[Turn]) -> Vec<ContextMessage> {
    turns
        .iter()
        .flat_map(|turn| {
            [
                ContextMessage::user(turn.user_message.clone()),
                ContextMessage::assistant(turn.agent_response.clone()),
            ]
        })
        .collect()
}

/// Keep only the newest `max_entries` entries. Older history is dropped
/// from the front.
pub fn window(context: &[ContextMessage], max_entries: usize) -> &[ContextMessage] {
    let start = context.len().saturating_sub(max_entries);
    &context[start..]
}

/// In-place variant for callers that keep a rolling context
pub fn truncate_front(context: &mut Vec<ContextMessage>, max_entries: usize) {
    let excess = context.len().saturating_sub(max_entries);
    if excess > 0 {
        context.drain(..excess);
    }
}
