//! Input validation helpers
//!
//! Centralized limits and validation functions used by the CRUD handlers.
//! Coordinate and radius bounds match what the admin console enforces
//! client-side; the server re-checks everything.

use crate::utils::AppError;

// ── Limits ──────────────────────────────────────────────────────────

/// Entity names and labels
pub const MAX_NAME_LEN: usize = 200;

/// Notes and descriptions (issue report, admin note)
pub const MAX_NOTE_LEN: usize = 500;

/// Passwords (before hashing)
pub const MIN_PASSWORD_LEN: usize = 6;

/// Hourly prices in RSD
pub const MAX_PRICE_PER_HOUR: f64 = 100_000.0;

/// Parking zone radius in meters
pub const MAX_ZONE_RADIUS_M: f64 = 1000.0;

/// Parking zone capacity
pub const MAX_ZONE_CAPACITY: u32 = 200;

// ── Helpers ─────────────────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

pub fn validate_latitude(lat: f64) -> Result<(), AppError> {
    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return Err(AppError::validation(format!("invalid latitude: {lat}")));
    }
    Ok(())
}

pub fn validate_longitude(lng: f64) -> Result<(), AppError> {
    if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
        return Err(AppError::validation(format!("invalid longitude: {lng}")));
    }
    Ok(())
}

/// Validate a latitude/longitude pair.
pub fn validate_coordinates(lat: f64, lng: f64) -> Result<(), AppError> {
    validate_latitude(lat)?;
    validate_longitude(lng)
}

/// Validate an hourly price: finite, positive, bounded.
pub fn validate_price(value: f64) -> Result<(), AppError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(AppError::validation(format!(
            "price must be positive, got {value}"
        )));
    }
    if value > MAX_PRICE_PER_HOUR {
        return Err(AppError::validation(format!(
            "price exceeds maximum allowed ({MAX_PRICE_PER_HOUR}), got {value}"
        )));
    }
    Ok(())
}

/// Validate a parking-zone radius (1–1000 m).
pub fn validate_zone_radius(value: f64) -> Result<(), AppError> {
    if !value.is_finite() || value <= 0.0 || value > MAX_ZONE_RADIUS_M {
        return Err(AppError::validation(format!(
            "radius must be between 1 and {MAX_ZONE_RADIUS_M} meters, got {value}"
        )));
    }
    Ok(())
}

/// Validate a parking-zone capacity (1–200, advisory).
pub fn validate_zone_capacity(value: u32) -> Result<(), AppError> {
    if value < 1 || value > MAX_ZONE_CAPACITY {
        return Err(AppError::validation(format!(
            "capacity must be between 1 and {MAX_ZONE_CAPACITY}, got {value}"
        )));
    }
    Ok(())
}

/// Minimal password rule shared by admin and user credentials.
pub fn validate_password(value: &str) -> Result<(), AppError> {
    if value.trim().len() < MIN_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "password must have at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}
