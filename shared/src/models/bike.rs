//! Bike Model

use serde::{Deserialize, Serialize};

/// Bike category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BikeType {
    #[serde(rename = "CITY")]
    City,
    #[serde(rename = "E-BIKE")]
    EBike,
    #[serde(rename = "MTB")]
    Mtb,
}

/// Bike availability status
///
/// `Rented` is owned by the rental state machine: a bike is `Rented` if and
/// only if exactly one active rental references it. Admin status overrides
/// may only move between the other three states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BikeStatus {
    Available,
    Rented,
    Maintenance,
    Disabled,
}

/// Bike entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bike {
    pub id: String,
    /// Short human-friendly code, unique within the fleet (e.g. "BG-001")
    pub label: String,
    #[serde(rename = "type")]
    pub bike_type: BikeType,
    /// Hourly price in RSD
    pub price_per_hour: f64,
    pub lat: f64,
    pub lng: f64,
    pub status: BikeStatus,
    pub updated_at: i64,
}

/// Create bike payload (admin)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BikeCreate {
    pub label: String,
    #[serde(rename = "type")]
    pub bike_type: BikeType,
    pub price_per_hour: f64,
    pub lat: f64,
    pub lng: f64,
    pub status: Option<BikeStatus>,
}

/// Update bike payload (admin)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BikeUpdate {
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub bike_type: Option<BikeType>,
    pub price_per_hour: Option<f64>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub status: Option<BikeStatus>,
}
