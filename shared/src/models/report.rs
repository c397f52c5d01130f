//! Citizen incident report models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::types::{Coordinate, ParseError};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ReportCategory {
    Litter,
    Damage,
    Wildlife,
    Pollution,
    Safety,
    Other,
}

impl ReportCategory {
    pub fn label(self) -> &'static str {
        match self {
            ReportCategory::Litter => "Marine Litter",
            ReportCategory::Damage => "Environmental Damage",
            ReportCategory::Wildlife => "Wildlife Sighting",
            ReportCategory::Pollution => "Pollution",
            ReportCategory::Safety => "Safety Hazard",
            ReportCategory::Other => "Other",
        }
    }
}

impl std::str::FromStr for ReportCategory {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "litter" => Ok(ReportCategory::Litter),
            "damage" => Ok(ReportCategory::Damage),
            "wildlife" => Ok(ReportCategory::Wildlife),
            "pollution" => Ok(ReportCategory::Pollution),
            "safety" => Ok(ReportCategory::Safety),
            "other" => Ok(ReportCategory::Other),
            _ => Err(ParseError::new("report category", s)),
        }
    }
}

/// Triage priority, most pressing first
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ReportPriority {
    Urgent,
    High,
    Medium,
    Low,
}

impl ReportPriority {
    pub fn prefix(self) -> &'static str {
        match self {
            ReportPriority::Urgent => "URGENT",
            ReportPriority::High => "High Priority",
            ReportPriority::Medium => "Medium Priority",
            ReportPriority::Low => "Low Priority",
        }
    }
}

/// Result of keyword triage
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportClassification {
    pub priority: ReportPriority,
    pub topic: String,
}

impl std::fmt::Display for ReportClassification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.priority.prefix(), self.topic)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    #[default]
    Pending,
    Verified,
    Resolved,
}

/// Form input for a new report
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReportInput {
    pub category: ReportCategory,
    #[validate(length(min = 1, max = 2000))]
    pub description: String,
}

/// A submitted citizen report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CitizenReport {
    pub id: Uuid,
    pub category: ReportCategory,
    pub description: String,
    /// Reporter position, when a geolocation fix was available
    pub coordinates: Option<Coordinate>,
    pub timestamp: DateTime<Utc>,
    pub classification: ReportClassification,
    pub status: ReportStatus,
}
