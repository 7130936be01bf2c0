//! Parking Zone Model

use serde::{Deserialize, Serialize};

use crate::geo::Point;

fn default_capacity() -> u32 {
    // Older state files predate the capacity field
    10
}

/// Circular geofenced parking zone
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingZone {
    pub id: String,
    /// Unique case-insensitively within the zone collection
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub radius_meters: f64,
    /// Advisory only, never enforced as a hard limit
    #[serde(default = "default_capacity")]
    pub capacity: u32,
}

impl ParkingZone {
    pub fn center(&self) -> Point {
        Point {
            lat: self.lat,
            lng: self.lng,
        }
    }
}

/// Create zone payload (admin)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingZoneCreate {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub radius_meters: f64,
    pub capacity: u32,
}

/// Update zone payload (admin)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingZoneUpdate {
    pub name: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub radius_meters: Option<f64>,
    pub capacity: Option<u32>,
}
