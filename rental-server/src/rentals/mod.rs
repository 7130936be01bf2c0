//! Rental lifecycle engine
//!
//! # Structure
//!
//! - [`manager`] - the coordinator: `start_rental` / `end_rental` as
//!   atomic-looking operations over the application state
//! - [`fleet`] - bike status transitions (`available <-> rented`)
//! - [`ledger`] - rental records and the one-way `active -> finished` machine
//! - [`zones`] - read-only geofence lookups for return validation
//! - [`money`] - elapsed-time-to-price conversion

pub mod fleet;
pub mod ledger;
pub mod manager;
pub mod money;
pub mod zones;

pub use manager::{EndRental, RentalError, RentalManager, StartRental};
