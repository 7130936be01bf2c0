//! Bike fleet handlers
//!
//! Admin CRUD lives here, outside the rental state machine. The one rule the
//! fleet editor must respect is the machine's ownership of `rented`: a bike
//! with an active rental cannot change status or be deleted.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use shared::models::{Bike, BikeCreate, BikeStatus, BikeUpdate};
use shared::util::{now_millis, prefixed_id};

use crate::auth::CurrentAdmin;
use crate::core::ServerState;
use crate::utils::validation::{
    MAX_NAME_LEN, validate_coordinates, validate_latitude, validate_longitude, validate_price,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// GET /api/bikes - list the fleet
pub async fn list(
    State(state): State<ServerState>,
    _admin: CurrentAdmin,
) -> AppResult<Json<Vec<Bike>>> {
    Ok(Json(state.store.read(|s| s.bikes.clone())))
}

/// GET /api/bikes/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    _admin: CurrentAdmin,
    Path(id): Path<String>,
) -> AppResult<Json<Bike>> {
    state
        .store
        .read(|s| s.bike(&id).cloned())
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("Bike not found: {id}")))
}

/// POST /api/bikes - add a bike to the fleet
pub async fn create(
    State(state): State<ServerState>,
    _admin: CurrentAdmin,
    Json(payload): Json<BikeCreate>,
) -> AppResult<Json<Bike>> {
    validate_required_text(&payload.label, "label", MAX_NAME_LEN)?;
    validate_price(payload.price_per_hour)?;
    validate_coordinates(payload.lat, payload.lng)?;

    let bike = state.store.commit(|s| {
        if s.bikes.iter().any(|b| b.label == payload.label) {
            return Err(AppError::conflict(format!(
                "A bike labeled {} already exists",
                payload.label
            )));
        }

        let bike = Bike {
            id: prefixed_id("bike"),
            label: payload.label.clone(),
            bike_type: payload.bike_type,
            price_per_hour: payload.price_per_hour,
            lat: payload.lat,
            lng: payload.lng,
            status: payload.status.unwrap_or(BikeStatus::Available),
            updated_at: now_millis(),
        };
        s.bikes.push(bike.clone());
        Ok(bike)
    })?;

    tracing::info!(bike_id = %bike.id, label = %bike.label, "Bike created");
    Ok(Json(bike))
}

/// PUT /api/bikes/{id} - edit a bike
pub async fn update(
    State(state): State<ServerState>,
    _admin: CurrentAdmin,
    Path(id): Path<String>,
    Json(payload): Json<BikeUpdate>,
) -> AppResult<Json<Bike>> {
    if let Some(label) = &payload.label {
        validate_required_text(label, "label", MAX_NAME_LEN)?;
    }
    if let Some(price) = payload.price_per_hour {
        validate_price(price)?;
    }
    if let Some(lat) = payload.lat {
        validate_latitude(lat)?;
    }
    if let Some(lng) = payload.lng {
        validate_longitude(lng)?;
    }

    let bike = state.store.commit(|s| {
        let actively_rented = s.bike_actively_rented(&id);

        if let Some(label) = &payload.label
            && s.bikes.iter().any(|b| b.id != id && b.label == *label)
        {
            return Err(AppError::conflict(format!(
                "A bike labeled {label} already exists"
            )));
        }

        let bike = s
            .bike_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Bike not found: {id}")))?;

        if actively_rented
            && let Some(status) = payload.status
            && status != BikeStatus::Rented
        {
            return Err(AppError::conflict(
                "Cannot change the status of a bike that is currently rented",
            ));
        }

        if let Some(label) = &payload.label {
            bike.label = label.clone();
        }
        if let Some(bike_type) = payload.bike_type {
            bike.bike_type = bike_type;
        }
        if let Some(price) = payload.price_per_hour {
            bike.price_per_hour = price;
        }
        if let Some(lat) = payload.lat {
            bike.lat = lat;
        }
        if let Some(lng) = payload.lng {
            bike.lng = lng;
        }
        if let Some(status) = payload.status {
            bike.status = status;
        }
        bike.updated_at = now_millis();

        Ok(bike.clone())
    })?;

    Ok(Json(bike))
}

#[derive(Deserialize)]
pub struct StatusPayload {
    pub status: BikeStatus,
}

/// PATCH /api/bikes/{id}/status - admin status override
pub async fn set_status(
    State(state): State<ServerState>,
    _admin: CurrentAdmin,
    Path(id): Path<String>,
    Json(payload): Json<StatusPayload>,
) -> AppResult<Json<Bike>> {
    let bike = state.store.commit(|s| {
        if s.bike_actively_rented(&id) && payload.status != BikeStatus::Rented {
            return Err(AppError::conflict(
                "Cannot change the status of a bike that is currently rented",
            ));
        }

        let bike = s
            .bike_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Bike not found: {id}")))?;
        bike.status = payload.status;
        bike.updated_at = now_millis();
        Ok(bike.clone())
    })?;

    Ok(Json(bike))
}

#[derive(Deserialize)]
pub struct LocationPayload {
    pub lat: f64,
    pub lng: f64,
}

/// PATCH /api/bikes/{id}/location - report a bike's resting location
pub async fn set_location(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<LocationPayload>,
) -> AppResult<Json<serde_json::Value>> {
    validate_coordinates(payload.lat, payload.lng)?;

    let bike = state.store.commit(|s| {
        let bike = s
            .bike_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Bike not found: {id}")))?;
        bike.lat = payload.lat;
        bike.lng = payload.lng;
        bike.updated_at = now_millis();
        Ok::<_, AppError>(bike.clone())
    })?;

    tracing::info!(bike = %bike.label, lat = payload.lat, lng = payload.lng, "Bike location updated");
    Ok(Json(serde_json::json!({ "success": true, "bike": bike })))
}

/// DELETE /api/bikes/{id}
pub async fn delete(
    State(state): State<ServerState>,
    _admin: CurrentAdmin,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    state.store.commit(|s| {
        if s.bike(&id).is_none() {
            return Err(AppError::not_found(format!("Bike not found: {id}")));
        }
        if s.bike_actively_rented(&id) {
            return Err(AppError::conflict(
                "Cannot delete a bike that is currently rented",
            ));
        }
        s.bikes.retain(|b| b.id != id);
        Ok(())
    })?;

    Ok(Json(serde_json::json!({ "success": true })))
}
