//! Monitored locations

use serde::Serialize;

use super::risk::RiskLevel;
use super::weather::WeatherObservation;
use crate::types::{City, Coordinate};

/// Name given to the transient location created from a geolocation fix
pub const MY_LOCATION: &str = "My location";

/// A monitored point with its latest weather.
///
/// The risk level is derived from the weather whenever the weather is
/// set and cannot be assigned on its own.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub name: String,
    pub coordinate: Coordinate,
    weather: Option<WeatherObservation>,
    risk_level: Option<RiskLevel>,
}

impl Location {
    pub fn new(name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            name: name.into(),
            coordinate,
            weather: None,
            risk_level: None,
        }
    }

    /// Attach weather, deriving the risk level from it
    pub fn with_weather(mut self, weather: WeatherObservation) -> Self {
        self.set_weather(weather);
        self
    }

    pub fn set_weather(&mut self, weather: WeatherObservation) {
        self.risk_level = Some(weather.risk());
        self.weather = Some(weather);
    }

    pub fn weather(&self) -> Option<&WeatherObservation> {
        self.weather.as_ref()
    }

    pub fn risk_level(&self) -> Option<RiskLevel> {
        self.risk_level
    }
}

impl From<&City> for Location {
    fn from(city: &City) -> Self {
        Location::new(city.name, city.coordinate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_new_location_has_no_weather() {
        let location = Location::new("Bergen", Coordinate::new(60.39, 5.32));
        assert!(location.weather().is_none());
        assert!(location.risk_level().is_none());
    }

    #[test]
    fn test_risk_follows_weather() {
        let mut location = Location::new("Bodø", Coordinate::new(67.28, 14.40));
        location.set_weather(WeatherObservation::new(22.0, 30.0, 0.0, Utc::now()));
        assert_eq!(location.risk_level(), Some(RiskLevel::Severe));

        location.set_weather(WeatherObservation::new(3.0, 4.0, 0.0, Utc::now()));
        assert_eq!(location.risk_level(), Some(RiskLevel::Low));
    }
}
