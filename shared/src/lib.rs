//! Shared types for the bike-rental platform
//!
//! Everything that crosses a process boundary lives here: the application
//! state value, the entity models it is made of, and the pure geo math both
//! the server and any embedded client need.
//!
//! The JSON shape is camelCase because the state file and both existing
//! clients (mobile app, admin web console) already speak that shape.

pub mod app_state;
pub mod geo;
pub mod models;
pub mod util;

pub use app_state::AppState;
pub use models::{
    AppNotification, Bike, BikeStatus, BikeType, IssueReport, IssueStatus, ParkingZone, Rental,
    RentalStatus, User,
};
