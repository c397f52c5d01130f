//! Validation utilities for coastal data inputs

use validator::Validate;

use crate::models::{ScenarioSettings, WeatherReading};
use crate::types::Coordinate;

// ============================================================================
// Position Validations
// ============================================================================

/// Validate a WGS84 coordinate
pub fn validate_coordinate(coordinate: &Coordinate) -> Result<(), &'static str> {
    if !coordinate.lat.is_finite() || !coordinate.lon.is_finite() {
        return Err("Coordinate must be finite");
    }
    if !(-90.0..=90.0).contains(&coordinate.lat) {
        return Err("Latitude must be between -90 and 90");
    }
    if !(-180.0..=180.0).contains(&coordinate.lon) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

// ============================================================================
// Weather Validations
// ============================================================================

/// Validate a raw forecast reading before it enters the dashboard
pub fn validate_weather_reading(reading: &WeatherReading) -> Result<(), &'static str> {
    if !reading.wind.is_finite() || reading.wind < 0.0 {
        return Err("Wind speed must be a non-negative number");
    }
    if let Some(gust) = reading.gust {
        if !gust.is_finite() || gust < 0.0 {
            return Err("Wind gust must be a non-negative number");
        }
    }
    if !reading.precip.is_finite() || reading.precip < 0.0 {
        return Err("Precipitation must be a non-negative number");
    }
    Ok(())
}

// ============================================================================
// Scenario Validations
// ============================================================================

/// Validate scenario inputs against the slider bounds
pub fn validate_scenario(settings: &ScenarioSettings) -> Result<(), &'static str> {
    settings
        .validate()
        .map_err(|_| "Scenario settings out of range")
}
