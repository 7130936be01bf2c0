//! Parking zone handlers
//!
//! Zones are read-only from the rental core's perspective; every mutation
//! happens here, including the case-insensitive name uniqueness rule.

use axum::{
    Json,
    extract::{Path, State},
};

use shared::models::{ParkingZone, ParkingZoneCreate, ParkingZoneUpdate};
use shared::util::prefixed_id;

use crate::auth::CurrentAdmin;
use crate::core::ServerState;
use crate::utils::validation::{
    MAX_NAME_LEN, validate_coordinates, validate_latitude, validate_longitude,
    validate_required_text, validate_zone_capacity, validate_zone_radius,
};
use crate::utils::{AppError, AppResult};

/// GET /api/parking-zones
pub async fn list(
    State(state): State<ServerState>,
    _admin: CurrentAdmin,
) -> AppResult<Json<Vec<ParkingZone>>> {
    Ok(Json(state.store.read(|s| s.parking_zones.clone())))
}

/// GET /api/parking-zones/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    _admin: CurrentAdmin,
    Path(id): Path<String>,
) -> AppResult<Json<ParkingZone>> {
    state
        .store
        .read(|s| s.parking_zones.iter().find(|z| z.id == id).cloned())
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("Parking zone not found: {id}")))
}

/// POST /api/parking-zones
pub async fn create(
    State(state): State<ServerState>,
    _admin: CurrentAdmin,
    Json(payload): Json<ParkingZoneCreate>,
) -> AppResult<Json<ParkingZone>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_coordinates(payload.lat, payload.lng)?;
    validate_zone_radius(payload.radius_meters)?;
    validate_zone_capacity(payload.capacity)?;

    let zone = state.store.commit(|s| {
        if s.parking_zones
            .iter()
            .any(|z| z.name.eq_ignore_ascii_case(&payload.name))
        {
            return Err(AppError::conflict(format!(
                "A parking zone named {} already exists",
                payload.name
            )));
        }

        let zone = ParkingZone {
            id: prefixed_id("pz"),
            name: payload.name.clone(),
            lat: payload.lat,
            lng: payload.lng,
            radius_meters: payload.radius_meters,
            capacity: payload.capacity,
        };
        s.parking_zones.push(zone.clone());
        Ok(zone)
    })?;

    tracing::info!(zone_id = %zone.id, name = %zone.name, "Parking zone created");
    Ok(Json(zone))
}

/// PUT /api/parking-zones/{id}
pub async fn update(
    State(state): State<ServerState>,
    _admin: CurrentAdmin,
    Path(id): Path<String>,
    Json(payload): Json<ParkingZoneUpdate>,
) -> AppResult<Json<ParkingZone>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(lat) = payload.lat {
        validate_latitude(lat)?;
    }
    if let Some(lng) = payload.lng {
        validate_longitude(lng)?;
    }
    if let Some(radius) = payload.radius_meters {
        validate_zone_radius(radius)?;
    }
    if let Some(capacity) = payload.capacity {
        validate_zone_capacity(capacity)?;
    }

    let zone = state.store.commit(|s| {
        if let Some(name) = &payload.name
            && s.parking_zones
                .iter()
                .any(|z| z.id != id && z.name.eq_ignore_ascii_case(name))
        {
            return Err(AppError::conflict(format!(
                "A parking zone named {name} already exists"
            )));
        }

        let zone = s
            .parking_zones
            .iter_mut()
            .find(|z| z.id == id)
            .ok_or_else(|| AppError::not_found(format!("Parking zone not found: {id}")))?;

        if let Some(name) = &payload.name {
            zone.name = name.clone();
        }
        if let Some(lat) = payload.lat {
            zone.lat = lat;
        }
        if let Some(lng) = payload.lng {
            zone.lng = lng;
        }
        if let Some(radius) = payload.radius_meters {
            zone.radius_meters = radius;
        }
        if let Some(capacity) = payload.capacity {
            zone.capacity = capacity;
        }

        Ok(zone.clone())
    })?;

    Ok(Json(zone))
}

/// DELETE /api/parking-zones/{id}
pub async fn delete(
    State(state): State<ServerState>,
    _admin: CurrentAdmin,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    state.store.commit(|s| {
        if !s.parking_zones.iter().any(|z| z.id == id) {
            return Err(AppError::not_found(format!("Parking zone not found: {id}")));
        }
        s.parking_zones.retain(|z| z.id != id);
        Ok(())
    })?;

    Ok(Json(serde_json::json!({ "success": true })))
}
