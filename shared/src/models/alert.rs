//! Coastal risk alerts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::risk::RiskLevel;

/// Alert severity; only elevated risk produces alerts
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    High,
    Severe,
}

impl AlertLevel {
    /// Alert level for a risk, or `None` when the risk is not alert-worthy
    pub fn from_risk(risk: RiskLevel) -> Option<Self> {
        match risk {
            RiskLevel::Severe => Some(AlertLevel::Severe),
            RiskLevel::High => Some(AlertLevel::High),
            RiskLevel::Moderate | RiskLevel::Low => None,
        }
    }

    pub fn risk(self) -> RiskLevel {
        match self {
            AlertLevel::High => RiskLevel::High,
            AlertLevel::Severe => RiskLevel::Severe,
        }
    }

    /// Display priority: lower sorts first
    pub fn rank(self) -> u8 {
        match self {
            AlertLevel::Severe => 0,
            AlertLevel::High => 1,
        }
    }
}

/// An alert for one location's current observation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Alert {
    /// `<city>-<observation time>`; stable across regenerations
    pub id: String,
    pub city: String,
    pub level: AlertLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}
