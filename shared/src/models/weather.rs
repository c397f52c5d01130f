//! Weather data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::risk::{classify, RiskLevel};

/// Raw point forecast as delivered by a forecast provider.
///
/// Gust is frequently missing upstream; it is resolved once, when the
/// reading becomes a [`WeatherObservation`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherReading {
    /// Sustained wind speed (m/s)
    pub wind: f64,
    /// Wind gust speed (m/s), if reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gust: Option<f64>,
    /// Precipitation for the forecast window (mm)
    pub precip: f64,
    #[serde(rename = "timeISO")]
    pub time: DateTime<Utc>,
}

impl WeatherReading {
    /// Normalise into an observation.
    ///
    /// Missing gust is replaced with the sustained wind speed. This is the
    /// only place the fallback is applied.
    pub fn into_observation(self) -> WeatherObservation {
        WeatherObservation {
            wind: self.wind,
            gust: self.gust.unwrap_or(self.wind),
            precip: self.precip,
            observed_at: self.time,
        }
    }
}

/// A normalised weather observation attached to a location
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherObservation {
    pub wind: f64,
    pub gust: f64,
    pub precip: f64,
    pub observed_at: DateTime<Utc>,
}

impl WeatherObservation {
    pub fn new(wind: f64, gust: f64, precip: f64, observed_at: DateTime<Utc>) -> Self {
        Self {
            wind,
            gust,
            precip,
            observed_at,
        }
    }

    pub fn risk(&self) -> RiskLevel {
        classify(self.wind, self.gust, self.precip)
    }
}

impl From<WeatherReading> for WeatherObservation {
    fn from(reading: WeatherReading) -> Self {
        reading.into_observation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 2, 12, 0, 0).unwrap()
    }

    /// Gust fallback policy: a missing gust takes the sustained wind speed,
    /// not a scaled value such as `wind * 1.3`.
    #[test]
    fn test_missing_gust_falls_back_to_sustained_wind() {
        let reading = WeatherReading {
            wind: 14.0,
            gust: None,
            precip: 0.0,
            time: at(),
        };
        let observation = reading.into_observation();
        assert_eq!(observation.gust, 14.0);
        // 14 * 1.3 would have crossed the moderate gust threshold
        assert_eq!(observation.risk(), RiskLevel::Moderate);
    }

    #[test]
    fn test_reported_gust_is_kept() {
        let observation: WeatherObservation = WeatherReading {
            wind: 8.0,
            gust: Some(21.5),
            precip: 2.0,
            time: at(),
        }
        .into();
        assert_eq!(observation.gust, 21.5);
        assert_eq!(observation.observed_at, at());
        assert_eq!(observation.risk(), RiskLevel::High);
    }

    #[test]
    fn test_reading_deserializes_without_gust() {
        let reading: WeatherReading = serde_json::from_str(
            r#"{"wind": 5.0, "precip": 1.2, "timeISO": "2024-11-02T12:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(reading.gust, None);
        assert_eq!(reading.time, at());
    }
}
