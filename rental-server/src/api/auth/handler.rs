//! Admin auth handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::auth::{AdminInfo, CurrentAdmin};
use crate::core::ServerState;
use crate::utils::validation::validate_password;
use crate::utils::{AppError, AppResult};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub admin: AdminInfo,
    pub token: String,
}

/// POST /api/auth/login - admin console login
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    if payload.username.trim().is_empty() || payload.password.is_empty() {
        return Err(AppError::validation("Username and password are required"));
    }

    let admin = state
        .admins
        .verify_login(payload.username.trim(), &payload.password)
        .ok_or_else(AppError::invalid_credentials)?;

    let token = state.admins.issue_token(&admin);
    tracing::info!(admin = %admin.username, "Admin logged in");

    Ok(Json(LoginResponse {
        success: true,
        admin: AdminInfo::from(&admin),
        token,
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// POST /api/auth/change-password
pub async fn change_password(
    State(state): State<ServerState>,
    admin: CurrentAdmin,
    Json(payload): Json<ChangePasswordRequest>,
) -> AppResult<Json<serde_json::Value>> {
    validate_password(&payload.new_password)?;
    state
        .admins
        .change_password(&admin.id, &payload.current_password, &payload.new_password)?;
    Ok(Json(serde_json::json!({ "success": true })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeUsernameRequest {
    pub new_username: String,
    pub password: String,
}

/// POST /api/auth/change-username
pub async fn change_username(
    State(state): State<ServerState>,
    admin: CurrentAdmin,
    Json(payload): Json<ChangeUsernameRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let new_username = payload.new_username.trim();
    if new_username.len() < 3 {
        return Err(AppError::validation(
            "Username must have at least 3 characters",
        ));
    }

    let info = state
        .admins
        .change_username(&admin.id, new_username, &payload.password)?;
    Ok(Json(serde_json::json!({ "success": true, "admin": info })))
}
