//! Initial application state
//!
//! The Belgrade pilot fleet and parking zones. Used when no state.json
//! exists yet (fresh install) or when the existing file cannot be parsed.

use shared::AppState;
use shared::models::{Bike, BikeStatus, BikeType, ParkingZone};
use shared::util::now_millis;

fn bike(id: &str, label: &str, bike_type: BikeType, price: f64, lat: f64, lng: f64, status: BikeStatus) -> Bike {
    Bike {
        id: id.to_string(),
        label: label.to_string(),
        bike_type,
        price_per_hour: price,
        lat,
        lng,
        status,
        updated_at: now_millis(),
    }
}

fn zone(id: &str, name: &str, lat: f64, lng: f64, radius_meters: f64, capacity: u32) -> ParkingZone {
    ParkingZone {
        id: id.to_string(),
        name: name.to_string(),
        lat,
        lng,
        radius_meters,
        capacity,
    }
}

pub fn initial_state() -> AppState {
    use BikeStatus::*;
    use BikeType::*;

    AppState {
        users: vec![],
        bikes: vec![
            bike("bike_1", "BG-001", City, 120.0, 44.8158, 20.4600, Available),
            bike("bike_2", "BG-002", EBike, 220.0, 44.8142, 20.4555, Available),
            bike("bike_3", "BG-003", Mtb, 160.0, 44.8206, 20.4526, Available),
            bike("bike_4", "BG-004", City, 120.0, 44.8017, 20.4657, Available),
            bike("bike_5", "BG-005", City, 120.0, 44.8036, 20.4688, Available),
            bike("bike_6", "BG-006", EBike, 220.0, 44.8150, 20.4335, Available),
            bike("bike_7", "BG-007", Mtb, 160.0, 44.8165, 20.4360, Available),
            bike("bike_8", "BG-008", City, 120.0, 44.8050, 20.4860, Available),
            bike("bike_9", "BG-009", EBike, 220.0, 44.8040, 20.4900, Maintenance),
            bike("bike_10", "BG-010", City, 120.0, 44.7920, 20.4750, Disabled),
        ],
        parking_zones: vec![
            zone("pz_1", "Trg Republike", 44.8166, 20.4602, 180.0, 15),
            zone("pz_2", "Kalemegdan", 44.8231, 20.4502, 220.0, 20),
            zone("pz_3", "Slavija", 44.8025, 20.4661, 200.0, 18),
            zone("pz_4", "Ušće", 44.8160, 20.4345, 240.0, 25),
            zone("pz_5", "Vukov spomenik", 44.8047, 20.4867, 200.0, 15),
            zone("pz_bilecka", "Bilećka 14", 44.7732, 20.4785, 100.0, 8),
        ],
        rentals: vec![],
        notifications: vec![],
        issues: vec![],
        current_user_id: None,
    }
}
