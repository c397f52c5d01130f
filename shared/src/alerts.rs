//! Alert generation from risk-annotated locations

use crate::models::{Alert, AlertLevel, Location};

/// Build the alert list for a set of locations.
///
/// Only locations with weather and `high` or `severe` risk produce an
/// alert. The result is a complete replacement for any earlier list:
/// severe before high, newest observation first within a level.
pub fn generate<'a, I>(locations: I) -> Vec<Alert>
where
    I: IntoIterator<Item = &'a Location>,
{
    let mut alerts: Vec<Alert> = locations
        .into_iter()
        .filter_map(|location| {
            let weather = location.weather()?;
            let risk = location.risk_level().unwrap_or_else(|| weather.risk());
            let level = AlertLevel::from_risk(risk)?;

            Some(Alert {
                id: format!("{}-{}", location.name, weather.observed_at.to_rfc3339()),
                city: location.name.clone(),
                level,
                message: format!(
                    "{}: {} risk - Wind: {:.1} m/s, Precip: {:.1} mm",
                    location.name,
                    risk.shout(),
                    weather.wind,
                    weather.precip
                ),
                timestamp: weather.observed_at,
            })
        })
        .collect();

    alerts.sort_by(|a, b| {
        a.level
            .rank()
            .cmp(&b.level.rank())
            .then_with(|| b.timestamp.cmp(&a.timestamp))
    });

    alerts
}
