use parking_lot::RwLock;
use tracing::{debug, info};

use super::types::Turn;

/// Thread-safe in-memory conversation log.
///
/// Turns from every user live in one sequence, insertion order being
/// chronological order. A single lock guards mutation, so concurrent appends
/// never interleave partial writes. Nothing survives a restart.
pub struct ConversationStore {
    turns: RwLock<Vec<Turn>>,
    /// Per-user retention cap, always >= 1
    max_turns_per_user: usize,
}

impl ConversationStore {
    /// Create new store; `max_turns_per_user` of 0 is treated as 1
    pub fn new(max_turns_per_user: usize) -> Self {
        let max_turns_per_user = max_turns_per_user.max(1);
        info!(
            "Initializing conversation store (max {} turns per user)",
            max_turns_per_user
        );
        Self {
            turns: RwLock::new(Vec::new()),
            max_turns_per_user,
        }
    }

    /// Append a turn stamped with the current time
    pub fn append(&self, user_id: &str, user_message: &str, agent_response: &str) -> Turn {
        let turn = Turn::new(user_id, user_message, agent_response);

        let mut turns = self.turns.write();
        turns.push(turn.clone());

        let held = turns.iter().filter(|t| t.user_id == user_id).count();
        if held > self.max_turns_per_user {
            let mut excess = held - self.max_turns_per_user;
            turns.retain(|t| {
                if excess > 0 && t.user_id == user_id {
                    excess -= 1;
                    false
                } else {
                    true
                }
            });
            debug!(
                "Evicted {} old turn(s) for user {}",
                held - self.max_turns_per_user,
                user_id
            );
        }

        debug!("Stored turn for user {} ({} total)", user_id, turns.len());
        turn
    }

    /// Turns of one user, or every turn when `user_id` is `None`, in order
    pub fn history(&self, user_id: Option<&str>) -> Vec<Turn> {
        let turns = self.turns.read();
        match user_id {
            Some(id) => turns.iter().filter(|t| t.user_id == id).cloned().collect(),
            None => turns.clone(),
        }
    }

    /// The newest `count` turns of a user, oldest first
    pub fn recent(&self, user_id: &str, count: usize) -> Vec<Turn> {
        let turns = self.turns.read();
        let mut recent: Vec<Turn> = turns
            .iter()
            .rev()
            .filter(|t| t.user_id == user_id)
            .take(count)
            .cloned()
            .collect();
        recent.reverse();
        recent
    }

    /// Remove one user's turns, or all turns when `user_id` is `None`
    pub fn clear(&self, user_id: Option<&str>) {
        let mut turns = self.turns.write();
        let before = turns.len();
        match user_id {
            Some(id) => turns.retain(|t| t.user_id != id),
            None => turns.clear(),
        }
        info!(
            "Cleared {} turn(s) for {}",
            before - turns.len(),
            user_id.unwrap_or("all users")
        );
    }

    pub fn len(&self) -> usize {
        self.turns.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.read().is_empty()
    }
}
