//! Emergency response planning models

use serde::{Deserialize, Serialize};

use crate::types::ParseError;

/// Resources a responder can select
pub const RESOURCE_OPTIONS: [&str; 8] = [
    "Coast Guard Vessel",
    "Rescue Helicopter",
    "Emergency Medical Team",
    "Oil Spill Response Unit",
    "Diving Team",
    "Communication Equipment",
    "Weather Monitoring Station",
    "Evacuation Boats",
];

/// Kind of coastal incident being planned for
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Storm,
    Oil,
    Search,
    Medical,
}

/// Static planning profile for an event type
#[derive(Debug)]
pub struct EventProfile {
    pub label: &'static str,
    /// Cruise speed of the response in knots
    pub cruise_knots: f64,
    pub base_checklist: [&'static str; 4],
    pub recommended_resources: [&'static str; 3],
}

const STORM: EventProfile = EventProfile {
    label: "Severe Storm",
    cruise_knots: 14.0,
    base_checklist: [
        "Activate severe weather protocol and incident command structure",
        "Issue marine weather bulletin to civilian vessels",
        "Stage evacuation transport near vulnerable coastal assets",
        "Maintain hourly liaison with MET office for forecast updates",
    ],
    recommended_resources: [
        "Coast Guard Vessel",
        "Rescue Helicopter",
        "Weather Monitoring Station",
    ],
};

const OIL: EventProfile = EventProfile {
    label: "Oil Spill",
    cruise_knots: 10.0,
    base_checklist: [
        "Map spill perimeter and drift trajectory",
        "Deploy containment booms down-current first",
        "Notify environmental directorate and fisheries authorities",
        "Initiate wildlife impact monitoring and rehabilitation teams",
    ],
    recommended_resources: [
        "Oil Spill Response Unit",
        "Diving Team",
        "Communication Equipment",
    ],
};

const SEARCH: EventProfile = EventProfile {
    label: "Search & Rescue",
    cruise_knots: 16.0,
    base_checklist: [
        "Assign on-scene commander and rescue sectors",
        "Broadcast PAN-PAN / MAYDAY relay as appropriate",
        "Coordinate air and surface search patterns",
        "Establish medevac staging with local hospitals",
    ],
    recommended_resources: [
        "Rescue Helicopter",
        "Coast Guard Vessel",
        "Emergency Medical Team",
    ],
};

const MEDICAL: EventProfile = EventProfile {
    label: "Medical Emergency",
    cruise_knots: 15.0,
    base_checklist: [
        "Confirm casualty status and required medical support",
        "Prepare triage area and medevac transport",
        "Coordinate with nearest hospital for intake readiness",
        "Ensure redundancy for critical communications",
    ],
    recommended_resources: [
        "Emergency Medical Team",
        "Rescue Helicopter",
        "Communication Equipment",
    ],
};

impl EventType {
    pub const ALL: [EventType; 4] = [
        EventType::Storm,
        EventType::Oil,
        EventType::Search,
        EventType::Medical,
    ];

    pub fn profile(self) -> &'static EventProfile {
        match self {
            EventType::Storm => &STORM,
            EventType::Oil => &OIL,
            EventType::Search => &SEARCH,
            EventType::Medical => &MEDICAL,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EventType::Storm => "storm",
            EventType::Oil => "oil",
            EventType::Search => "search",
            EventType::Medical => "medical",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.profile().label)
    }
}

impl std::str::FromStr for EventType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "storm" => Ok(EventType::Storm),
            "oil" => Ok(EventType::Oil),
            "search" => Ok(EventType::Search),
            "medical" => Ok(EventType::Medical),
            _ => Err(ParseError::new("event type", s)),
        }
    }
}

/// Inputs collected by the planner form
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    pub event_type: Option<EventType>,
    pub start_point: Option<String>,
    #[serde(default)]
    pub resources: Vec<String>,
    /// Neighbours added to the route; the planner default when unset
    #[serde(default)]
    pub route_limit: Option<usize>,
}

pub const DEFAULT_ROUTE_LIMIT: usize = 2;

/// A generated response plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyPlan {
    pub event_type: EventType,
    pub event_label: String,
    pub start_point: String,
    /// Stops in visiting order, start point first
    pub route: Vec<String>,
    pub resources: Vec<String>,
    /// Recommended resources not yet selected
    pub suggested_resources: Vec<String>,
    pub distance_nm: f64,
    pub cruise_knots: f64,
    pub eta_hours: f64,
    pub eta_human: String,
    pub checklist: Vec<String>,
}
