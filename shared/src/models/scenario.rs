//! Climate scenario models

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::risk::RiskLevel;

/// User-chosen climate parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioSettings {
    /// Sea-level rise in metres
    #[validate(range(min = 0.0, max = 1.5))]
    pub sea_level_rise_m: f64,
    /// Multiplier applied to wind (and, with a surcharge, gusts)
    #[validate(range(min = 1.0, max = 2.0))]
    pub storm_intensity_multiplier: f64,
    /// Percentage change applied to precipitation
    #[validate(range(min = -40.0, max = 100.0))]
    pub precipitation_delta_pct: f64,
    /// Warming in degrees Celsius
    #[validate(range(min = 0.0, max = 4.0))]
    pub temperature_rise_c: f64,
}

impl Default for ScenarioSettings {
    fn default() -> Self {
        Self {
            sea_level_rise_m: 0.6,
            storm_intensity_multiplier: 1.3,
            precipitation_delta_pct: 20.0,
            temperature_rise_c: 1.8,
        }
    }
}

impl ScenarioSettings {
    /// Settings under which every location keeps its current risk
    pub fn neutral() -> Self {
        Self {
            sea_level_rise_m: 0.0,
            storm_intensity_multiplier: 1.0,
            precipitation_delta_pct: 0.0,
            temperature_rise_c: 1.8,
        }
    }

    /// One-line description, e.g. "0.6 m sea-level rise, 1.3× storms, ..."
    pub fn describe(&self) -> String {
        format!(
            "{:.1} m sea-level rise, {:.1}× storms, {:.1}°C warmer, {}{}% precipitation.",
            self.sea_level_rise_m,
            self.storm_intensity_multiplier,
            self.temperature_rise_c,
            if self.precipitation_delta_pct >= 0.0 { "+" } else { "" },
            self.precipitation_delta_pct,
        )
    }
}

/// Current vs projected risk for one location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResult {
    pub name: String,
    pub current_risk: RiskLevel,
    pub scenario_risk: RiskLevel,
    /// `ordinal(scenario) - ordinal(current)`
    pub delta: i8,
    pub change: String,
    pub narrative: String,
}

/// How many locations moved in each direction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AggregateSummary {
    pub higher: usize,
    pub unchanged: usize,
    pub lower: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioReport {
    pub results: Vec<ScenarioResult>,
    pub summary: AggregateSummary,
}
