//! Rental handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use shared::AppState;
use shared::geo::Point;
use shared::models::{Bike, PublicUser, Rental};

use crate::auth::CurrentAdmin;
use crate::core::ServerState;
use crate::rentals::{EndRental, StartRental};
use crate::utils::validation::validate_coordinates;
use crate::utils::{AppError, AppResult};

/// Rental joined with its user and bike for the admin console
#[derive(Debug, Serialize)]
pub struct EnrichedRental {
    #[serde(flatten)]
    pub rental: Rental,
    pub user: Option<PublicUser>,
    pub bike: Option<Bike>,
}

fn enrich(state: &AppState, rental: &Rental) -> EnrichedRental {
    EnrichedRental {
        rental: rental.clone(),
        user: state.user(&rental.user_id).map(PublicUser::from),
        bike: state.bike(&rental.bike_id).cloned(),
    }
}

/// GET /api/rentals - all rentals, newest first
pub async fn list(
    State(state): State<ServerState>,
    _admin: CurrentAdmin,
) -> AppResult<Json<Vec<EnrichedRental>>> {
    let mut rentals = state.store.read(|s| {
        s.rentals
            .iter()
            .map(|r| enrich(s, r))
            .collect::<Vec<_>>()
    });
    rentals.sort_by_key(|r| std::cmp::Reverse(r.rental.start_at));
    Ok(Json(rentals))
}

/// GET /api/rentals/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    _admin: CurrentAdmin,
    Path(id): Path<String>,
) -> AppResult<Json<EnrichedRental>> {
    state
        .store
        .read(|s| s.rental(&id).map(|r| enrich(s, r)))
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("Rental not found: {id}")))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveQuery {
    pub user_id: String,
}

/// GET /api/rentals/active?userId= - the user's active rental, if any
pub async fn active(
    State(state): State<ServerState>,
    Query(query): Query<ActiveQuery>,
) -> AppResult<Json<Option<Rental>>> {
    Ok(Json(state.rentals.active_rental_for(&query.user_id)))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartRentalRequest {
    pub user_id: String,
    pub bike_id: String,
    pub start_lat: Option<f64>,
    pub start_lng: Option<f64>,
}

/// POST /api/rentals - start a rental (scan QR)
pub async fn start(
    State(state): State<ServerState>,
    Json(payload): Json<StartRentalRequest>,
) -> AppResult<Json<Rental>> {
    if payload.user_id.trim().is_empty() {
        return Err(AppError::validation("userId is required"));
    }

    let position = match (payload.start_lat, payload.start_lng) {
        (Some(lat), Some(lng)) => {
            validate_coordinates(lat, lng)?;
            Some(Point::new(lat, lng))
        }
        _ => None,
    };

    let rental = state
        .rentals
        .start_rental(StartRental {
            user_id: payload.user_id,
            bike_id: payload.bike_id,
            position,
        })
        .await?;

    Ok(Json(rental))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndRentalRequest {
    /// When present, the rental must belong to this user
    pub user_id: Option<String>,
    pub end_lat: f64,
    pub end_lng: f64,
    #[serde(rename = "returnPhotoUri", default)]
    pub return_photo: String,
}

/// POST /api/rentals/{id}/end - return the bike
pub async fn end(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<EndRentalRequest>,
) -> AppResult<Json<Rental>> {
    validate_coordinates(payload.end_lat, payload.end_lng)?;

    let rental = state
        .rentals
        .end_rental(EndRental {
            rental_id: id,
            user_id: payload.user_id,
            position: Point::new(payload.end_lat, payload.end_lng),
            photo_ref: payload.return_photo,
        })
        .await?;

    Ok(Json(rental))
}
