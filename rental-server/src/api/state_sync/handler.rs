//! Full-state sync handlers

use std::collections::HashMap;

use axum::{Json, extract::State};

use shared::AppState;

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// GET /api/state - full state for the mobile client
pub async fn get_state(State(state): State<ServerState>) -> Json<AppState> {
    Json(state.store.snapshot())
}

/// PUT /api/state - full-state replace, last-write-wins
///
/// The only validation is referential sanity on users: duplicate usernames
/// or emails would make later merges ambiguous, so they are rejected before
/// the replace.
pub async fn put_state(
    State(state): State<ServerState>,
    Json(next): Json<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let mut usernames: HashMap<String, String> = HashMap::new();
    let mut emails: HashMap<String, String> = HashMap::new();

    for user in &next.users {
        let username = user.username.to_lowercase();
        if let Some(other) = usernames.insert(username, user.id.clone()) {
            return Err(AppError::validation(format!(
                "Duplicate username: \"{}\" (users: {other}, {})",
                user.username, user.id
            )));
        }
        let email = user.email.to_lowercase();
        if let Some(other) = emails.insert(email, user.id.clone()) {
            return Err(AppError::validation(format!(
                "Duplicate email: \"{}\" (users: {other}, {})",
                user.email, user.id
            )));
        }
    }

    tracing::info!(
        users = next.users.len(),
        rentals = next.rentals.len(),
        "Replacing application state from client push"
    );
    state.store.replace(next);

    Ok(Json(serde_json::json!({ "success": true })))
}
