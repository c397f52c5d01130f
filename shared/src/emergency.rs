//! Emergency response route and checklist planning

use crate::format::format_duration;
use crate::geo::{distance_km, km_to_nm};
use crate::models::{
    EmergencyPlan, EventType, Location, PlanRequest, RiskLevel, DEFAULT_ROUTE_LIMIT,
};

/// ETA used when the route has no legs
pub const MINIMUM_RESPONSE_HOURS: f64 = 0.5;

const CLOSING_STEP: &str = "Document actions and maintain unified communications log";

/// Route through the start point and its nearest neighbours
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub stops: Vec<String>,
    pub distance_km: f64,
}

/// Pick the `limit` locations closest to `start` and visit them in that
/// order.
///
/// Stops are ranked by straight-line distance from the start only; the
/// total sums consecutive legs along the resulting order.
pub fn compute_route(start: &Location, others: &[&Location], limit: usize) -> Route {
    let mut ranked: Vec<(&Location, f64)> = others
        .iter()
        .map(|&loc| (loc, distance_km(start.coordinate, loc.coordinate)))
        .collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    ranked.truncate(limit);

    let mut stops = vec![start.name.clone()];
    let mut distance = 0.0;
    let mut previous = start;
    for (location, _) in ranked {
        distance += distance_km(previous.coordinate, location.coordinate);
        stops.push(location.name.clone());
        previous = location;
    }

    Route {
        stops,
        distance_km: distance,
    }
}

/// Base checklist, resource-specific steps, then the closing log step
pub fn build_checklist(event: EventType, resources: &[String]) -> Vec<String> {
    let has = |resource: &str| resources.iter().any(|r| r == resource);

    let mut checklist: Vec<String> = event
        .profile()
        .base_checklist
        .iter()
        .map(|step| step.to_string())
        .collect();

    let targeted: [(&str, &str); 2] = match event {
        EventType::Storm => [
            (
                "Rescue Helicopter",
                "Deploy rotary wing unit to perform aerial damage reconnaissance",
            ),
            (
                "Emergency Medical Team",
                "Pre-position EMT near evacuation shelters for rapid response",
            ),
        ],
        EventType::Oil => [
            (
                "Oil Spill Response Unit",
                "Mobilise skimmers and sorbent teams to high-risk shoreline sectors",
            ),
            (
                "Diving Team",
                "Assign dive team to inspect sub-surface leak source and valves",
            ),
        ],
        EventType::Search => [
            (
                "Rescue Helicopter",
                "Brief aircrew on expanding square search pattern over incident datum",
            ),
            (
                "Coast Guard Vessel",
                "Task lead vessel with on-scene coordination channel and SAR patterns",
            ),
        ],
        EventType::Medical => [
            (
                "Emergency Medical Team",
                "Configure forward triage post with ALS capability",
            ),
            (
                "Rescue Helicopter",
                "Schedule medevac rotation slots with hospital helipad liaison",
            ),
        ],
    };

    checklist.extend(
        targeted
            .iter()
            .filter(|(resource, _)| has(*resource))
            .map(|(_, step)| step.to_string()),
    );
    checklist.push(CLOSING_STEP.to_string());
    checklist
}

/// Recommended resources not already selected, in recommendation order
pub fn suggest_resources(event: EventType, selected: &[String]) -> Vec<String> {
    event
        .profile()
        .recommended_resources
        .iter()
        .filter(|r| !selected.iter().any(|s| s.as_str() == **r))
        .map(|r| r.to_string())
        .collect()
}

/// Build a response plan.
///
/// Returns `None` when the event type or start point is missing, or the
/// start point does not name a known location.
pub fn build_plan(request: &PlanRequest, locations: &[Location]) -> Option<EmergencyPlan> {
    let event = request.event_type?;
    let start_name = request.start_point.as_deref().filter(|s| !s.is_empty())?;
    let start = locations.iter().find(|l| l.name == start_name)?;

    let others: Vec<&Location> = locations.iter().filter(|l| l.name != start_name).collect();
    let route = compute_route(
        start,
        &others,
        request.route_limit.unwrap_or(DEFAULT_ROUTE_LIMIT),
    );

    let profile = event.profile();
    let distance_nm = km_to_nm(route.distance_km);
    let eta_hours = if distance_nm == 0.0 {
        MINIMUM_RESPONSE_HOURS
    } else {
        distance_nm / profile.cruise_knots
    };

    Some(EmergencyPlan {
        event_type: event,
        event_label: profile.label.to_string(),
        start_point: start.name.clone(),
        route: route.stops,
        resources: request.resources.clone(),
        suggested_resources: suggest_resources(event, &request.resources),
        distance_nm,
        cruise_knots: profile.cruise_knots,
        eta_hours,
        eta_human: format_duration(eta_hours),
        checklist: build_checklist(event, &request.resources),
    })
}

/// Current risk at each stop; `None` where a stop has no weather
pub fn route_risk(plan: &EmergencyPlan, locations: &[Location]) -> Vec<(String, Option<RiskLevel>)> {
    plan.route
        .iter()
        .filter_map(|name| locations.iter().find(|l| &l.name == name))
        .map(|l| (l.name.clone(), l.risk_level()))
        .collect()
}
