//! Fishing condition advice models

use serde::{Deserialize, Serialize};

use super::risk::RiskLevel;

/// Overall fishing recommendation tier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Recommendation {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Recommendation {
    /// Tier for a clamped score; lower bounds are inclusive
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => Recommendation::Excellent,
            60..=79 => Recommendation::Good,
            40..=59 => Recommendation::Fair,
            _ => Recommendation::Poor,
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Recommendation::Excellent => "Excellent",
            Recommendation::Good => "Good",
            Recommendation::Fair => "Fair",
            Recommendation::Poor => "Poor",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

/// One contribution to a fishing score
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdviceFactor {
    pub label: String,
    pub detail: String,
    pub tone: Tone,
}

impl AdviceFactor {
    pub fn new(label: impl Into<String>, detail: impl Into<String>, tone: Tone) -> Self {
        Self {
            label: label.into(),
            detail: detail.into(),
            tone,
        }
    }
}

/// Scored advice for one location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FishingAdvice {
    pub location: String,
    pub score: u8,
    pub recommendation: Recommendation,
    pub risk_level: Option<RiskLevel>,
    pub window_hours: u32,
    pub factors: Vec<AdviceFactor>,
    pub summary: String,
}

/// Behavioural profile for a target species
#[derive(Debug)]
pub struct SpeciesProfile {
    pub key: &'static str,
    pub label: &'static str,
    pub wind_tolerance: f64,
    pub precip_tolerance: f64,
    pub note: &'static str,
}

pub const SPECIES_PROFILES: [SpeciesProfile; 3] = [
    SpeciesProfile {
        key: "cod",
        label: "Cod",
        wind_tolerance: 1.05,
        precip_tolerance: 1.0,
        note: "Cod tolerate some chop and turbidity.",
    },
    SpeciesProfile {
        key: "salmon",
        label: "Salmon",
        wind_tolerance: 0.85,
        precip_tolerance: 0.9,
        note: "Salmon runs prefer calmer, clearer water.",
    },
    SpeciesProfile {
        key: "mackerel",
        label: "Mackerel",
        wind_tolerance: 1.1,
        precip_tolerance: 1.15,
        note: "Mackerel schooling improves with mild agitation.",
    },
];
