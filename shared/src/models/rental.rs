//! Rental Model

use serde::{Deserialize, Serialize};

/// Rental lifecycle status
///
/// The transition `Active -> Finished` happens exactly once; a finished
/// rental is append-only history and is never mutated again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RentalStatus {
    Active,
    Finished,
}

/// Rental entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rental {
    pub id: String,
    pub user_id: String,
    pub bike_id: String,
    pub status: RentalStatus,
    pub start_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_lng: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_lng: Option<f64>,
    /// Set exactly once, when the rental finishes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<f64>,
    /// Mandatory return evidence; local path or uploaded URL
    #[serde(rename = "returnPhotoUri", skip_serializing_if = "Option::is_none")]
    pub return_photo: Option<String>,
}

impl Rental {
    pub fn is_active(&self) -> bool {
        self.status == RentalStatus::Active
    }
}
