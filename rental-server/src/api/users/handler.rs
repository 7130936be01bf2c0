//! User handlers

use axum::{Json, extract::State};

use shared::models::PublicUser;

use crate::auth::CurrentAdmin;
use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/users - registered users, credentials stripped
pub async fn list(
    State(state): State<ServerState>,
    _admin: CurrentAdmin,
) -> AppResult<Json<Vec<PublicUser>>> {
    Ok(Json(state.store.read(|s| {
        s.users.iter().map(PublicUser::from).collect()
    })))
}
