//! Coastal risk levels and the threshold classifier

use serde::{Deserialize, Serialize};

use crate::types::ParseError;

/// Four-level coastal risk classification.
///
/// Variants are declared in ascending severity, so the derived `Ord`
/// follows the ordinal index (`Low < Moderate < High < Severe`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Severe,
}

impl RiskLevel {
    /// All levels in ascending order
    pub const ALL: [RiskLevel; 4] = [
        RiskLevel::Low,
        RiskLevel::Moderate,
        RiskLevel::High,
        RiskLevel::Severe,
    ];

    pub fn ordinal(self) -> u8 {
        match self {
            RiskLevel::Low => 0,
            RiskLevel::Moderate => 1,
            RiskLevel::High => 2,
            RiskLevel::Severe => 3,
        }
    }

    /// Map an ordinal back to a level, saturating at `Severe`
    pub fn from_ordinal(index: u8) -> Self {
        match index {
            0 => RiskLevel::Low,
            1 => RiskLevel::Moderate,
            2 => RiskLevel::High,
            _ => RiskLevel::Severe,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
            RiskLevel::Severe => "severe",
        }
    }

    /// Capitalised label, e.g. "Moderate"
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
            RiskLevel::Severe => "Severe",
        }
    }

    /// Upper-case label used in alert messages
    pub fn shout(self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Moderate => "MODERATE",
            RiskLevel::High => "HIGH",
            RiskLevel::Severe => "SEVERE",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RiskLevel {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "moderate" => Ok(RiskLevel::Moderate),
            "high" => Ok(RiskLevel::High),
            "severe" => Ok(RiskLevel::Severe),
            _ => Err(ParseError::new("risk level", s)),
        }
    }
}

/// Classify raw weather into a risk level.
///
/// Wind and gust are in m/s, precipitation in mm per forecast window.
/// Tiers are checked from most to least severe and every comparison is
/// strict, so a value sitting exactly on a threshold falls to the tier
/// below.
///
/// NaN inputs are not special-cased: every comparison involving NaN is
/// false, so a NaN field never triggers a tier on its own and an all-NaN
/// triple classifies as `Low`.
pub fn classify(wind: f64, gust: f64, precip: f64) -> RiskLevel {
    if wind > 20.0 || gust > 25.0 || precip > 50.0 {
        RiskLevel::Severe
    } else if wind > 15.0 || gust > 20.0 || precip > 30.0 {
        RiskLevel::High
    } else if wind > 10.0 || gust > 15.0 || precip > 10.0 {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}
