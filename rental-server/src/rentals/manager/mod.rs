//! RentalManager - the rental lifecycle coordinator
//!
//! This module handles:
//! - `start_rental` / `end_rental` validation and commit
//! - Price accrual via [`money`](crate::rentals::money)
//! - Geofenced return validation via [`zones`](crate::rentals::zones)
//! - Notification records (best-effort, appended newest first)
//! - Best-effort remote photo mirroring before the close commits
//!
//! # Operation Flow
//!
//! ```text
//! end_rental(input)
//!     ├─ 1. Pre-check against a snapshot (cheap rejects)
//!     ├─ 2. Mirror photo to upstream (best-effort, keeps local ref on failure)
//!     ├─ 3. StateStore::commit
//!     │      ├─ re-validate (snapshot check ran outside the lock)
//!     │      ├─ compute price from elapsed time
//!     │      ├─ ledger::close + fleet::mark_available
//!     │      └─ append notification
//!     └─ 4. Return the finished rental
//! ```
//!
//! Both operations either commit fully or leave no visible effect; the
//! scratch-copy commit in [`StateStore`](crate::store::StateStore) is what
//! makes the bike flip and the ledger write land together.

mod error;
pub use error::*;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use shared::AppState;
use shared::geo::{NearestZone, Point};
use shared::models::{AppNotification, BikeStatus, Rental};
use shared::util::{now_millis, prefixed_id};

use crate::rentals::{fleet, ledger, money, zones::ZoneIndex};
use crate::store::StateStore;
use crate::sync::SyncService;

/// Notification copy, verbatim from the mobile product (Serbian locale).
const NOTIF_STARTED_TITLE: &str = "Iznajmljivanje započeto";
const NOTIF_FINISHED_TITLE: &str = "Iznajmljivanje završeno";

/// Input for `start_rental`
#[derive(Debug, Clone)]
pub struct StartRental {
    pub user_id: String,
    pub bike_id: String,
    pub position: Option<Point>,
}

/// Input for `end_rental`
#[derive(Debug, Clone)]
pub struct EndRental {
    pub rental_id: String,
    /// When set, the rental must belong to this user
    pub user_id: Option<String>,
    pub position: Point,
    pub photo_ref: String,
}

/// Context captured by end-rental validation
struct EndContext {
    bike_id: String,
    bike_label: String,
    price_per_hour: f64,
    start_at: i64,
}

pub struct RentalManager {
    store: Arc<StateStore>,
    /// Upstream authority for photo mirroring; `None` in offline/local mode
    sync: Option<Arc<SyncService>>,
}

impl RentalManager {
    pub fn new(store: Arc<StateStore>) -> Self {
        Self { store, sync: None }
    }

    pub fn with_sync(store: Arc<StateStore>, sync: Option<Arc<SyncService>>) -> Self {
        Self { store, sync }
    }

    /// Get the underlying store
    pub fn store(&self) -> &StateStore {
        &self.store
    }

    /// The user's active rental, if any.
    pub fn active_rental_for(&self, user_id: &str) -> Option<Rental> {
        self.store
            .read(|state| state.active_rental_for(user_id).cloned())
    }

    /// Start a rental: flip the bike to `rented` and open a ledger entry,
    /// atomically.
    pub async fn start_rental(&self, input: StartRental) -> RentalResult<Rental> {
        let rental = self.store.commit(|state| {
            if let Some(existing) = ledger::active_rental_for(&state.rentals, &input.user_id) {
                return Err(RentalError::AlreadyActive(existing.id.clone()));
            }

            let bike = state
                .bike(&input.bike_id)
                .ok_or_else(|| RentalError::BikeNotFound(input.bike_id.clone()))?;
            if bike.status != BikeStatus::Available {
                return Err(RentalError::BikeUnavailable(input.bike_id.clone()));
            }
            let label = bike.label.clone();

            fleet::mark_rented(&mut state.bikes, &input.bike_id)?;
            let rental = ledger::open(
                &mut state.rentals,
                &input.user_id,
                &input.bike_id,
                input.position,
            )?;

            push_notification(
                state,
                &input.user_id,
                NOTIF_STARTED_TITLE,
                format!("Uspešno ste započeli iznajmljivanje bicikla {label}."),
                Some(rental.id.clone()),
            );

            Ok(rental)
        })?;

        tracing::info!(
            rental_id = %rental.id,
            user_id = %rental.user_id,
            bike_id = %rental.bike_id,
            "Rental started"
        );
        Ok(rental)
    }

    /// End a rental: validate the return (photo, geofence), accrue the
    /// price, close the ledger entry and release the bike at the return
    /// location.
    pub async fn end_rental(&self, input: EndRental) -> RentalResult<Rental> {
        // Cheap rejects against a snapshot, so an invalid request never pays
        // for the remote photo mirror.
        self.store.read(|state| Self::validate_end(state, &input))?;

        // Mirror the photo upstream before the close commits; on failure the
        // local reference is retained and the close proceeds.
        let mut photo_ref = input.photo_ref.clone();
        if let Some(sync) = &self.sync {
            match sync.upload_photo(&photo_ref, "rental").await {
                Ok(url) => photo_ref = url,
                Err(e) => {
                    tracing::warn!(
                        rental_id = %input.rental_id,
                        error = %e,
                        "Photo mirror failed, keeping local reference"
                    );
                }
            }
        }

        let rental = self.store.commit(|state| {
            // Re-validate inside the commit: the snapshot check ran outside
            // the write lock.
            let ctx = Self::validate_end(state, &input)?;

            let elapsed_ms = now_millis() - ctx.start_at;
            let total_price = money::rental_price(elapsed_ms, ctx.price_per_hour);

            let rental = ledger::close(
                &mut state.rentals,
                &input.rental_id,
                input.position,
                total_price,
                &photo_ref,
            )?;
            // The bike's resting location becomes the return location.
            fleet::mark_available(&mut state.bikes, &ctx.bike_id, Some(input.position))?;

            push_notification(
                state,
                &rental.user_id,
                NOTIF_FINISHED_TITLE,
                format!(
                    "Iznajmljivanje bicikla {} je završeno. Ukupan iznos: {} RSD.",
                    ctx.bike_label, total_price
                ),
                Some(rental.id.clone()),
            );

            Ok::<_, RentalError>(rental)
        })?;

        tracing::info!(
            rental_id = %rental.id,
            bike_id = %rental.bike_id,
            total_price = rental.total_price,
            "Rental finished"
        );
        Ok(rental)
    }

    /// Everything that can fail on `end_rental` before any mutation.
    fn validate_end(state: &AppState, input: &EndRental) -> RentalResult<EndContext> {
        let rental = state
            .rental(&input.rental_id)
            .ok_or_else(|| RentalError::RentalNotFound(input.rental_id.clone()))?;

        // A foreign rental is indistinguishable from a missing one.
        if let Some(user_id) = &input.user_id
            && rental.user_id != *user_id
        {
            return Err(RentalError::RentalNotFound(input.rental_id.clone()));
        }

        if !rental.is_active() {
            return Err(RentalError::InvalidState(input.rental_id.clone()));
        }

        // Absent bike here means the fleet invariant was violated elsewhere.
        let bike = state
            .bike(&rental.bike_id)
            .ok_or_else(|| RentalError::BikeNotFound(rental.bike_id.clone()))?;

        if input.photo_ref.trim().is_empty() {
            return Err(RentalError::PhotoRequired);
        }

        let index = ZoneIndex::new(&state.parking_zones);
        if index.containing(input.position).is_none() {
            return Err(RentalError::NotInParkingZone {
                nearest: index.nearest(input.position).map(NearestZone::from_scan),
            });
        }

        Ok(EndContext {
            bike_id: bike.id.clone(),
            bike_label: bike.label.clone(),
            price_per_hour: bike.price_per_hour,
            start_at: rental.start_at,
        })
    }
}

/// Append a notification record, newest first. Emission is a state append
/// and cannot fail the surrounding operation.
fn push_notification(
    state: &mut AppState,
    user_id: &str,
    title: &str,
    message: String,
    related_rental_id: Option<String>,
) {
    let notification = AppNotification {
        id: prefixed_id("not"),
        user_id: user_id.to_string(),
        created_at: now_millis(),
        title: title.to_string(),
        message,
        related_rental_id,
    };
    state.notifications.insert(0, notification);
}
