//! Reading-goal workflow: load the current goal and save a new one.

#[cfg(test)]
#[path = "goal_test.rs"]
mod goal_test;

use super::ui::Notice;
use crate::net::api;
use crate::net::client::ApiClient;
use crate::net::error::ApiError;
use crate::net::http::HttpTransport;
use crate::net::types::Goal;

/// Current goal; no goal set (404) yields the default `books`/`daily`/0.
///
/// # Errors
///
/// Returns an error notice for any other failure.
pub async fn load_goal<T: HttpTransport>(api: &ApiClient<T>) -> Result<Goal, Notice> {
    match api::fetch_goal(api).await {
        Ok(goal) => Ok(goal),
        Err(err) if err.is_not_found() => Ok(Goal::default()),
        Err(err) => Err(Notice::error(err.user_message("Failed to fetch current goal"))),
    }
}

/// # Errors
///
/// Returns `Validation` unless the goal value is at least 1.
pub fn validate_goal(goal: &Goal) -> Result<(), ApiError> {
    if goal.value < 1 {
        return Err(ApiError::validation("Goal value must be at least 1."));
    }
    Ok(())
}

/// Save `next`; on success `current` becomes the stored goal.
pub async fn save_goal<T: HttpTransport>(api: &ApiClient<T>, current: &mut Goal, next: Goal) -> Notice {
    if let Err(err) = validate_goal(&next) {
        return Notice::error(err.user_message("Failed to update goal"));
    }
    match api::update_goal(api, &next).await {
        Ok(saved) => {
            *current = saved;
            Notice::success("Goal updated successfully")
        }
        Err(err) => Notice::error(err.user_message("Failed to update goal")),
    }
}
