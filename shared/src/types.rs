//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// A point on the Earth's surface in decimal degrees (WGS84)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lon)
    }
}

/// One of the fixed coastal cities monitored at startup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct City {
    pub name: &'static str,
    pub coordinate: Coordinate,
}

/// Monitored Norwegian coastal cities
pub const NORWEGIAN_CITIES: [City; 6] = [
    City {
        name: "Bergen",
        coordinate: Coordinate::new(60.3913, 5.3221),
    },
    City {
        name: "Stavanger",
        coordinate: Coordinate::new(58.9700, 5.7331),
    },
    City {
        name: "Tromsø",
        coordinate: Coordinate::new(69.6492, 18.9553),
    },
    City {
        name: "Bodø",
        coordinate: Coordinate::new(67.2804, 14.4049),
    },
    City {
        name: "Ålesund",
        coordinate: Coordinate::new(62.4722, 6.1549),
    },
    City {
        name: "Kristiansand",
        coordinate: Coordinate::new(58.1467, 7.9956),
    },
];

/// Error returned when a label does not name a known variant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind}: {value}")]
pub struct ParseError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseError {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
