//! Climate scenario projection

use crate::format::describe_delta;
use crate::models::{
    classify, AggregateSummary, Location, RiskLevel, ScenarioReport, ScenarioResult,
    ScenarioSettings, WeatherObservation,
};

/// Extra gust multiplier applied on top of an intensified storm multiplier
const GUST_SURGE: f64 = 0.1;

/// Effective gust multiplier.
///
/// The surcharge only applies once storms are intensified, so a 1.0
/// multiplier leaves gusts as observed. The factor is therefore
/// discontinuous at 1.0: ×1.0 at exactly 1.0, but just over ×1.1 for any
/// multiplier above it. Neutral settings stay an exact identity, and
/// intensified storms get the full `storm + 0.1` gust multiplier.
pub fn gust_factor(storm_intensity: f64) -> f64 {
    if storm_intensity > 1.0 {
        storm_intensity + GUST_SURGE
    } else {
        storm_intensity
    }
}

/// Weather scaled by the scenario's storm and precipitation settings
pub fn adjust(weather: &WeatherObservation, settings: &ScenarioSettings) -> WeatherObservation {
    WeatherObservation {
        wind: weather.wind * settings.storm_intensity_multiplier,
        gust: weather.gust * gust_factor(settings.storm_intensity_multiplier),
        precip: weather.precip * (1.0 + settings.precipitation_delta_pct / 100.0),
        observed_at: weather.observed_at,
    }
}

/// Ordinal shift from sea-level rise and warming
fn ordinal_shift(settings: &ScenarioSettings) -> f64 {
    let mut shift = 0.0;

    if settings.sea_level_rise_m >= 1.2 {
        shift += 1.0;
    } else if settings.sea_level_rise_m >= 0.7 {
        shift += 0.5;
    }

    if settings.temperature_rise_c >= 2.5 {
        shift += 0.5;
    } else if settings.temperature_rise_c <= 1.0 {
        shift -= 0.25;
    }

    shift
}

/// Project a location's risk under a climate scenario.
///
/// Classifies the scaled weather, adds the fractional sea-level and
/// temperature shifts to its ordinal, then rounds half away from zero
/// (`f64::round`) and clamps to `[low, severe]`.
pub fn project(weather: &WeatherObservation, settings: &ScenarioSettings) -> RiskLevel {
    let adjusted = adjust(weather, settings);
    let baseline = classify(adjusted.wind, adjusted.gust, adjusted.precip);

    let score = f64::from(baseline.ordinal()) + ordinal_shift(settings);
    RiskLevel::from_ordinal(score.round().clamp(0.0, 3.0) as u8)
}

pub fn narrative(delta: i8, settings: &ScenarioSettings) -> &'static str {
    if delta > 0 {
        if settings.storm_intensity_multiplier >= 1.4 && settings.precipitation_delta_pct >= 30.0 {
            "Stronger storms and heavier rain magnify exposure."
        } else if settings.sea_level_rise_m >= 0.9 {
            "Sea-level rise compounds surge and harbour flooding risk."
        } else {
            "A modest uptick driven by more frequent extreme weather."
        }
    } else if delta < 0 {
        "Scenario eases risk for this location under the chosen inputs."
    } else {
        "Climate adjustments keep risk steady for current parameters."
    }
}

/// Compare current and projected risk for one location
pub fn evaluate(location: &Location, settings: &ScenarioSettings) -> Option<ScenarioResult> {
    let weather = location.weather()?;
    let current_risk = location.risk_level().unwrap_or_else(|| weather.risk());
    let scenario_risk = project(weather, settings);
    let delta = scenario_risk.ordinal() as i8 - current_risk.ordinal() as i8;

    Some(ScenarioResult {
        name: location.name.clone(),
        current_risk,
        scenario_risk,
        delta,
        change: describe_delta(delta),
        narrative: narrative(delta, settings).to_string(),
    })
}

/// Run a scenario across every location that has weather
pub fn run(locations: &[Location], settings: &ScenarioSettings) -> ScenarioReport {
    let results: Vec<ScenarioResult> = locations
        .iter()
        .filter_map(|location| evaluate(location, settings))
        .collect();

    let summary = results
        .iter()
        .fold(AggregateSummary::default(), |mut acc, result| {
            match result.delta {
                d if d > 0 => acc.higher += 1,
                d if d < 0 => acc.lower += 1,
                _ => acc.unchanged += 1,
            }
            acc
        });

    ScenarioReport { results, summary }
}
