pub mod chat;
pub mod health;
pub mod history;
pub mod info;

use crate::utils::error::ApiError;

fn require_user_id(user_id: &str) -> Result<&str, ApiError> {
    if user_id.trim().is_empty() {
        return Err(ApiError::BadRequest("user_id must not be empty".to_string()));
    }
    Ok(user_id)
}
