//! RentalLedger - append-only rental history with a two-state machine
//!
//! Owns the "at most one active rental per user" invariant and the one-way
//! `active -> finished` transition. Like [`fleet`](crate::rentals::fleet),
//! these are pure transformations run inside the single-writer commit.

use shared::geo::Point;
use shared::models::{Rental, RentalStatus};
use shared::util::{now_millis, prefixed_id};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Rental not found: {0}")]
    NotFound(String),

    #[error("User already has an active rental: {0}")]
    AlreadyActive(String),

    #[error("Rental is not active: {0}")]
    NotActive(String),
}

/// The user's active rental, if any (linear scan).
pub fn active_rental_for<'a>(rentals: &'a [Rental], user_id: &str) -> Option<&'a Rental> {
    rentals
        .iter()
        .find(|r| r.user_id == user_id && r.is_active())
}

/// Open a new active rental for `user_id` on `bike_id`.
///
/// Fails with [`LedgerError::AlreadyActive`] if the user already holds one;
/// the error carries the existing rental's id.
pub fn open(
    rentals: &mut Vec<Rental>,
    user_id: &str,
    bike_id: &str,
    start_position: Option<Point>,
) -> Result<Rental, LedgerError> {
    if let Some(existing) = active_rental_for(rentals, user_id) {
        return Err(LedgerError::AlreadyActive(existing.id.clone()));
    }

    let rental = Rental {
        id: prefixed_id("ren"),
        user_id: user_id.to_string(),
        bike_id: bike_id.to_string(),
        status: RentalStatus::Active,
        start_at: now_millis(),
        end_at: None,
        start_lat: start_position.map(|p| p.lat),
        start_lng: start_position.map(|p| p.lng),
        end_lat: None,
        end_lng: None,
        total_price: None,
        return_photo: None,
    };
    rentals.push(rental.clone());
    Ok(rental)
}

/// Close an active rental: set the end timestamp, position, price and photo
/// reference, and flip the status to `finished`.
///
/// One-way: a finished rental can never be reopened, so a second close on
/// the same id fails with [`LedgerError::NotActive`] and changes nothing.
pub fn close(
    rentals: &mut [Rental],
    rental_id: &str,
    end_position: Point,
    total_price: f64,
    photo_ref: &str,
) -> Result<Rental, LedgerError> {
    let rental = rentals
        .iter_mut()
        .find(|r| r.id == rental_id)
        .ok_or_else(|| LedgerError::NotFound(rental_id.to_string()))?;

    if !rental.is_active() {
        return Err(LedgerError::NotActive(rental_id.to_string()));
    }

    rental.end_at = Some(now_millis());
    rental.end_lat = Some(end_position.lat);
    rental.end_lng = Some(end_position.lng);
    rental.total_price = Some(total_price);
    rental.return_photo = Some(photo_ref.to_string());
    rental.status = RentalStatus::Finished;
    Ok(rental.clone())
}
