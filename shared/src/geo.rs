//! Great-circle geometry for geofenced parking validation
//!
//! Pure functions over point-in-time position snapshots. Distances are
//! spherical (haversine) on Earth's mean radius, which is accurate to well
//! under a meter at parking-zone scale.

use serde::{Deserialize, Serialize};

use crate::models::ParkingZone;

/// Earth mean radius in meters
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A lat/lng position snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub lat: f64,
    pub lng: f64,
}

impl Point {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Great-circle distance between two points in meters.
///
/// Symmetric, zero for identical points, monotonic with separation.
pub fn haversine_meters(a: Point, b: Point) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

/// Whether `point` lies inside `zone`. Boundary-inclusive: a point exactly
/// on the radius counts as inside.
pub fn is_inside(point: Point, zone: &ParkingZone) -> bool {
    haversine_meters(point, zone.center()) <= zone.radius_meters
}

/// Nearest zone to `point` with its distance in meters.
///
/// Linear scan; exact distance ties keep the first-encountered zone so the
/// result is stable in collection order. `None` for an empty collection.
pub fn nearest<'a>(point: Point, zones: &'a [ParkingZone]) -> Option<(&'a ParkingZone, f64)> {
    let mut best: Option<(&ParkingZone, f64)> = None;
    for zone in zones {
        let d = haversine_meters(point, zone.center());
        if best.is_none_or(|(_, bd)| d < bd) {
            best = Some((zone, d));
        }
    }
    best
}

/// Structured guidance attached to a failed return-location check
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearestZone {
    pub zone_id: String,
    pub zone_name: String,
    pub distance_meters: f64,
}

impl NearestZone {
    pub fn from_scan(scan: (&ParkingZone, f64)) -> Self {
        let (zone, distance) = scan;
        Self {
            zone_id: zone.id.clone(),
            zone_name: zone.name.clone(),
            distance_meters: distance,
        }
    }
}
