//! FleetStore - bike status transitions owned by the rental state machine
//!
//! Pure transformations over the bike collection, invoked by the
//! [`RentalManager`](crate::rentals::RentalManager) inside the single-writer
//! commit. Admin CRUD goes through the API layer instead and never calls
//! these.

use shared::geo::Point;
use shared::models::{Bike, BikeStatus};
use shared::util::now_millis;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FleetError {
    #[error("Bike not found: {0}")]
    NotFound(String),

    #[error("Bike is not available: {0}")]
    NotAvailable(String),
}

/// Transition a bike to `rented`.
///
/// Fails if the bike is absent or not currently `available`.
pub fn mark_rented<'a>(bikes: &'a mut [Bike], bike_id: &str) -> Result<&'a Bike, FleetError> {
    let bike = bikes
        .iter_mut()
        .find(|b| b.id == bike_id)
        .ok_or_else(|| FleetError::NotFound(bike_id.to_string()))?;

    if bike.status != BikeStatus::Available {
        return Err(FleetError::NotAvailable(bike_id.to_string()));
    }

    bike.status = BikeStatus::Rented;
    bike.updated_at = now_millis();
    Ok(bike)
}

/// Transition a bike back to `available`, optionally moving it to the
/// return location.
///
/// No precondition on the prior status: this doubles as the recovery path
/// for admin overrides. The manager only calls it from `rented`.
pub fn mark_available<'a>(
    bikes: &'a mut [Bike],
    bike_id: &str,
    new_position: Option<Point>,
) -> Result<&'a Bike, FleetError> {
    let bike = bikes
        .iter_mut()
        .find(|b| b.id == bike_id)
        .ok_or_else(|| FleetError::NotFound(bike_id.to_string()))?;

    bike.status = BikeStatus::Available;
    if let Some(pos) = new_position {
        bike.lat = pos.lat;
        bike.lng = pos.lng;
    }
    bike.updated_at = now_millis();
    Ok(bike)
}
