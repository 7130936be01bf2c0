use shared::geo::NearestZone;
use thiserror::Error;

use crate::rentals::fleet::FleetError;
use crate::rentals::ledger::LedgerError;
use crate::utils::AppError;

/// Rental operation errors
///
/// Everything here is terminal for the operation and reported synchronously.
/// `PhotoRequired` and `NotInParkingZone` are recoverable by retrying with
/// corrected input; the rest require a different target or indicate a bug.
#[derive(Debug, Error)]
pub enum RentalError {
    #[error("Bike not found: {0}")]
    BikeNotFound(String),

    #[error("Rental not found: {0}")]
    RentalNotFound(String),

    #[error("User already has an active rental: {0}")]
    AlreadyActive(String),

    #[error("Bike is not available: {0}")]
    BikeUnavailable(String),

    #[error("Rental is not active: {0}")]
    InvalidState(String),

    #[error("A return photo is required")]
    PhotoRequired,

    #[error("Return position is outside every parking zone")]
    NotInParkingZone { nearest: Option<NearestZone> },
}

impl From<FleetError> for RentalError {
    fn from(err: FleetError) -> Self {
        match err {
            FleetError::NotFound(id) => RentalError::BikeNotFound(id),
            FleetError::NotAvailable(id) => RentalError::BikeUnavailable(id),
        }
    }
}

impl From<LedgerError> for RentalError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::NotFound(id) => RentalError::RentalNotFound(id),
            LedgerError::AlreadyActive(id) => RentalError::AlreadyActive(id),
            LedgerError::NotActive(id) => RentalError::InvalidState(id),
        }
    }
}

impl From<RentalError> for AppError {
    fn from(err: RentalError) -> Self {
        match err {
            RentalError::BikeNotFound(id) => AppError::not_found(format!("Bike not found: {id}")),
            RentalError::RentalNotFound(id) => {
                AppError::not_found(format!("Rental not found: {id}"))
            }
            RentalError::AlreadyActive(id) => {
                AppError::conflict(format!("User already has an active rental: {id}"))
            }
            RentalError::BikeUnavailable(id) => {
                AppError::conflict(format!("Bike is not available: {id}"))
            }
            RentalError::InvalidState(id) => {
                AppError::conflict(format!("Rental is not active: {id}"))
            }
            RentalError::PhotoRequired => AppError::validation("A return photo is required"),
            RentalError::NotInParkingZone { nearest } => AppError::NotInParkingZone {
                message: "Return position is outside every parking zone".to_string(),
                nearest,
            },
        }
    }
}

pub type RentalResult<T> = Result<T, RentalError>;
