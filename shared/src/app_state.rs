//! The whole-application state value
//!
//! One `AppState` is the unit of persistence (state.json) and of sync
//! (full-state replace, last-write-wins). The rental manager is the sole
//! writer of `Bike.status` and `Rental.status` transitions; everything else
//! mutates through the admin CRUD handlers.

use serde::{Deserialize, Serialize};

use crate::models::{AppNotification, Bike, IssueReport, ParkingZone, Rental, User};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub bikes: Vec<Bike>,
    #[serde(default)]
    pub parking_zones: Vec<ParkingZone>,
    #[serde(default)]
    pub rentals: Vec<Rental>,
    #[serde(default)]
    pub notifications: Vec<AppNotification>,
    #[serde(default)]
    pub issues: Vec<IssueReport>,
    /// Session marker written by the mobile client; round-tripped untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_user_id: Option<String>,
}

impl AppState {
    pub fn bike(&self, id: &str) -> Option<&Bike> {
        self.bikes.iter().find(|b| b.id == id)
    }

    pub fn bike_mut(&mut self, id: &str) -> Option<&mut Bike> {
        self.bikes.iter_mut().find(|b| b.id == id)
    }

    pub fn rental(&self, id: &str) -> Option<&Rental> {
        self.rentals.iter().find(|r| r.id == id)
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// The user's active rental, if any. The single-active-rental invariant
    /// makes the first match the only match.
    pub fn active_rental_for(&self, user_id: &str) -> Option<&Rental> {
        self.rentals
            .iter()
            .find(|r| r.user_id == user_id && r.is_active())
    }

    /// Whether an active rental references this bike.
    pub fn bike_actively_rented(&self, bike_id: &str) -> bool {
        self.rentals
            .iter()
            .any(|r| r.bike_id == bike_id && r.is_active())
    }
}
