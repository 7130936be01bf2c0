//! ParkingZoneIndex - read-only zone view for return validation
//!
//! Zone mutation is an admin concern (API layer); the rental core only ever
//! asks "is this point inside any zone, and if not, which one is closest".

use shared::geo::{self, Point};
use shared::models::ParkingZone;

/// Borrowing view over the zone collection.
pub struct ZoneIndex<'a> {
    zones: &'a [ParkingZone],
}

impl<'a> ZoneIndex<'a> {
    pub fn new(zones: &'a [ParkingZone]) -> Self {
        Self { zones }
    }

    pub fn all(&self) -> &'a [ParkingZone] {
        self.zones
    }

    /// First zone containing `point` (boundary-inclusive), with the distance
    /// to its center.
    pub fn containing(&self, point: Point) -> Option<(&'a ParkingZone, f64)> {
        self.zones.iter().find_map(|z| {
            let d = geo::haversine_meters(point, z.center());
            (d <= z.radius_meters).then_some((z, d))
        })
    }

    /// Nearest zone regardless of containment.
    pub fn nearest(&self, point: Point) -> Option<(&'a ParkingZone, f64)> {
        geo::nearest(point, self.zones)
    }
}
