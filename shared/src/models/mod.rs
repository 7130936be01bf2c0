//! Entity models
//!
//! One file per entity, each with its Create/Update payloads where the admin
//! API mutates it.

mod bike;
mod issue;
mod notification;
mod parking_zone;
mod rental;
mod user;

pub use bike::{Bike, BikeCreate, BikeStatus, BikeType, BikeUpdate};
pub use issue::{BikeAction, IssueReport, IssueStatus, IssueUpdate};
pub use notification::AppNotification;
pub use parking_zone::{ParkingZone, ParkingZoneCreate, ParkingZoneUpdate};
pub use rental::{Rental, RentalStatus};
pub use user::{PublicUser, User};
