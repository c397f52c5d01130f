//! WebAssembly module for the KystVern dashboard
//!
//! Provides client-side computation for:
//! - Risk classification and distances
//! - Alert generation
//! - Fisheries advice
//! - Emergency response planning
//! - Climate scenarios
//! - Citizen report triage
//!
//! Structured inputs and outputs are JSON strings. Each export wraps a
//! plain function returning `Result<String, String>` so the logic runs
//! natively in tests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use shared::format::{fmt1, format_duration};
use shared::{
    alerts, emergency, fisheries, geo, reports, scenario, Coordinate, Location, PlanRequest,
    ReportCategory, ReportInput, ScenarioSettings, WeatherReading, NORWEGIAN_CITIES,
};

/// Location as sent by the UI, with an optional raw forecast
#[derive(Debug, Deserialize)]
struct LocationInput {
    name: String,
    lat: f64,
    lon: f64,
    #[serde(default)]
    weather: Option<WeatherReading>,
}

impl TryFrom<LocationInput> for Location {
    type Error = String;

    fn try_from(input: LocationInput) -> Result<Self, Self::Error> {
        let coordinate = Coordinate::new(input.lat, input.lon);
        shared::validate_coordinate(&coordinate).map_err(|e| format!("{}: {}", input.name, e))?;

        let location = Location::new(input.name, coordinate);
        match input.weather {
            Some(reading) => {
                shared::validate_weather_reading(&reading)
                    .map_err(|e| format!("{}: {}", location.name, e))?;
                Ok(location.with_weather(reading.into_observation()))
            }
            None => Ok(location),
        }
    }
}

fn parse_locations(json: &str) -> Result<Vec<Location>, String> {
    let inputs: Vec<LocationInput> =
        serde_json::from_str(json).map_err(|e| format!("Invalid locations JSON: {}", e))?;
    inputs.into_iter().map(Location::try_from).collect()
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Failed to encode result: {}", e))
}

#[cfg(target_arch = "wasm32")]
fn now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
fn now() -> DateTime<Utc> {
    Utc::now()
}

#[cfg(target_arch = "wasm32")]
fn log_error(message: &str) {
    web_sys::console::error_1(&JsValue::from_str(message));
}

#[cfg(not(target_arch = "wasm32"))]
fn log_error(_message: &str) {}

fn into_js(result: Result<String, String>) -> Result<String, JsValue> {
    result.map_err(|e| {
        log_error(&e);
        JsValue::from_str(&e)
    })
}

// ============================================================================
// Plain implementations
// ============================================================================

fn risk_label(wind: f64, gust: Option<f64>, precip: f64) -> String {
    WeatherReading {
        wind,
        gust,
        precip,
        time: now(),
    }
    .into_observation()
    .risk()
    .to_string()
}

fn cities_json() -> Result<String, String> {
    let locations: Vec<Location> = NORWEGIAN_CITIES.iter().map(Location::from).collect();
    to_json(&locations)
}

fn nearest_city_json(lat: f64, lon: f64) -> Result<String, String> {
    let origin = Coordinate::new(lat, lon);
    shared::validate_coordinate(&origin)?;
    let nearest = geo::nearest_to(origin, NORWEGIAN_CITIES.iter().map(|c| (c.name, c.coordinate)));
    to_json(&nearest)
}

fn alerts_json(locations_json: &str) -> Result<String, String> {
    let locations = parse_locations(locations_json)?;
    to_json(&alerts::generate(&locations))
}

fn fishing_json(
    locations_json: &str,
    target: Option<&str>,
    species: Option<&str>,
    trip_hours: &str,
) -> Result<String, String> {
    let locations = parse_locations(locations_json)?;
    let hours = fisheries::parse_trip_hours(trip_hours);
    to_json(&fisheries::advise(&locations, target, species, hours))
}

/// Plan and the risk at each stop
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanResponse {
    plan: shared::EmergencyPlan,
    route_risk: Vec<(String, Option<shared::RiskLevel>)>,
}

/// `"null"` when the request is incomplete
fn plan_json(locations_json: &str, request_json: &str) -> Result<String, String> {
    let locations = parse_locations(locations_json)?;
    let request: PlanRequest =
        serde_json::from_str(request_json).map_err(|e| format!("Invalid plan request: {}", e))?;

    let response = emergency::build_plan(&request, &locations).map(|plan| PlanResponse {
        route_risk: emergency::route_risk(&plan, &locations),
        plan,
    });
    to_json(&response)
}

fn scenario_json(locations_json: &str, settings_json: &str) -> Result<String, String> {
    let locations = parse_locations(locations_json)?;
    let settings: ScenarioSettings = serde_json::from_str(settings_json)
        .map_err(|e| format!("Invalid scenario settings: {}", e))?;
    shared::validate_scenario(&settings)?;
    to_json(&scenario::run(&locations, &settings))
}

fn triage_label(category: &str, description: &str) -> Result<String, String> {
    let category: ReportCategory = category.parse().map_err(|e| format!("{}", e))?;
    Ok(reports::classify_report(category, description).to_string())
}

fn report_json(input_json: &str, lat: Option<f64>, lon: Option<f64>) -> Result<String, String> {
    let input: ReportInput =
        serde_json::from_str(input_json).map_err(|e| format!("Invalid report: {}", e))?;
    let coordinates = match (lat, lon) {
        (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
        _ => None,
    };

    let report = reports::submit_report(input, coordinates, now())
        .map_err(|e| format!("Invalid report: {}", e))?;
    to_json(&report)
}

// ============================================================================
// Exports
// ============================================================================

/// Classify raw weather into "low", "moderate", "high" or "severe".
/// A missing gust falls back to the sustained wind.
#[wasm_bindgen]
pub fn classify_risk(wind: f64, gust: Option<f64>, precip: f64) -> String {
    risk_label(wind, gust, precip)
}

/// Great-circle distance in kilometres
#[wasm_bindgen]
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    geo::distance_km(Coordinate::new(lat1, lon1), Coordinate::new(lat2, lon2))
}

/// The fixed monitored cities, without weather
#[wasm_bindgen]
pub fn monitored_cities() -> Result<String, JsValue> {
    into_js(cities_json())
}

#[wasm_bindgen]
pub fn nearest_city(lat: f64, lon: f64) -> Result<String, JsValue> {
    into_js(nearest_city_json(lat, lon))
}

#[wasm_bindgen]
pub fn generate_alerts(locations_json: &str) -> Result<String, JsValue> {
    into_js(alerts_json(locations_json))
}

#[wasm_bindgen]
pub fn advise_fishing(
    locations_json: &str,
    target: Option<String>,
    species: Option<String>,
    trip_hours: &str,
) -> Result<String, JsValue> {
    into_js(fishing_json(
        locations_json,
        target.as_deref(),
        species.as_deref(),
        trip_hours,
    ))
}

#[wasm_bindgen]
pub fn build_emergency_plan(locations_json: &str, request_json: &str) -> Result<String, JsValue> {
    into_js(plan_json(locations_json, request_json))
}

#[wasm_bindgen]
pub fn run_scenario(locations_json: &str, settings_json: &str) -> Result<String, JsValue> {
    into_js(scenario_json(locations_json, settings_json))
}

#[wasm_bindgen]
pub fn default_scenario() -> Result<String, JsValue> {
    into_js(to_json(&ScenarioSettings::default()))
}

#[wasm_bindgen]
pub fn describe_scenario(settings_json: &str) -> Result<String, JsValue> {
    let described = serde_json::from_str::<ScenarioSettings>(settings_json)
        .map(|s| s.describe())
        .map_err(|e| format!("Invalid scenario settings: {}", e));
    into_js(described)
}

#[wasm_bindgen]
pub fn classify_citizen_report(category: &str, description: &str) -> Result<String, JsValue> {
    into_js(triage_label(category, description))
}

#[wasm_bindgen]
pub fn submit_citizen_report(
    input_json: &str,
    lat: Option<f64>,
    lon: Option<f64>,
) -> Result<String, JsValue> {
    into_js(report_json(input_json, lat, lon))
}

/// "45 min", "2 h" or "1 h 30 min"
#[wasm_bindgen]
pub fn format_eta(hours: f64) -> String {
    format_duration(hours)
}

/// One decimal, or a dash for missing values
#[wasm_bindgen]
pub fn format_reading(value: Option<f64>) -> String {
    fmt1(value)
}
