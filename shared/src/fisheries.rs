//! Fishing condition scoring

use crate::models::{
    AdviceFactor, FishingAdvice, Location, Recommendation, RiskLevel, Tone, SPECIES_PROFILES,
};

const BASELINE_SCORE: i32 = 72;

/// Locations kept when ranking without a target
pub const TOP_PICKS: usize = 3;

/// Trip length assumed when the requested window cannot be parsed
pub const DEFAULT_TRIP_HOURS: u32 = 6;

const DEFAULT_SUMMARY: &str = "Weather looks workable; maintain standard watch and catch limits.";

/// Weather inputs for one scoring call
#[derive(Debug, Clone, Copy)]
pub struct FishingConditions<'a> {
    pub location_name: &'a str,
    pub wind: f64,
    pub gust: f64,
    pub precip: f64,
    pub base_risk: Option<RiskLevel>,
}

impl<'a> FishingConditions<'a> {
    /// Conditions for a location, or `None` if it has no weather yet
    pub fn from_location(location: &'a Location) -> Option<Self> {
        let weather = location.weather()?;
        Some(Self {
            location_name: &location.name,
            wind: weather.wind,
            gust: weather.gust,
            precip: weather.precip,
            base_risk: Some(location.risk_level().unwrap_or_else(|| weather.risk())),
        })
    }
}

fn risk_adjustment(risk: RiskLevel) -> i32 {
    match risk {
        RiskLevel::Low => 12,
        RiskLevel::Moderate => -10,
        RiskLevel::High => -28,
        RiskLevel::Severe => -45,
    }
}

/// Score fishing conditions out of 100.
///
/// Starts from a baseline of 72 and adds independent adjustments for
/// base risk, wind, gusts, precipitation, target species and trip length
/// before clamping to `[0, 100]`.
pub fn score(
    conditions: &FishingConditions<'_>,
    species_hint: Option<&str>,
    trip_hours: u32,
) -> FishingAdvice {
    let FishingConditions {
        location_name,
        wind,
        gust,
        precip,
        base_risk,
    } = *conditions;

    let mut factors = Vec::new();
    let mut score = BASELINE_SCORE;

    if let Some(risk) = base_risk {
        score += risk_adjustment(risk);
        factors.push(AdviceFactor::new(
            "MET risk profile",
            format!("{} risk reported by MET.", risk.label()),
            if risk == RiskLevel::Low {
                Tone::Positive
            } else {
                Tone::Negative
            },
        ));
    }

    if wind <= 5.0 {
        score += 8;
        factors.push(AdviceFactor::new(
            "Wind",
            "Calm seas — easy vessel handling.",
            Tone::Positive,
        ));
    } else if wind <= 9.0 {
        factors.push(AdviceFactor::new(
            "Wind",
            "Light breeze; manageable drift.",
            Tone::Neutral,
        ));
    } else if wind <= 14.0 {
        score -= 18;
        factors.push(AdviceFactor::new(
            "Wind",
            "Fresh breeze brings chop; secure gear.",
            Tone::Negative,
        ));
    } else {
        score -= 36;
        factors.push(AdviceFactor::new(
            "Wind",
            "Strong wind — postpone if possible.",
            Tone::Negative,
        ));
    }

    if (18.0..24.0).contains(&gust) {
        score -= 12;
        factors.push(AdviceFactor::new(
            "Gusts",
            "Gusty pulses could upset smaller craft.",
            Tone::Negative,
        ));
    } else if gust >= 24.0 {
        score -= 22;
        factors.push(AdviceFactor::new(
            "Gusts",
            "Severe gusts — high capsize risk.",
            Tone::Negative,
        ));
    } else if gust <= 12.0 {
        score += 4;
        factors.push(AdviceFactor::new(
            "Gusts",
            "Stable air mass, predictable drift.",
            Tone::Positive,
        ));
    }

    if precip <= 1.0 {
        score += 6;
        factors.push(AdviceFactor::new(
            "Precipitation",
            "Clear visibility keeps spotting easy.",
            Tone::Positive,
        ));
    } else if precip <= 3.0 {
        factors.push(AdviceFactor::new(
            "Precipitation",
            "Light rain — plan for slick decks.",
            Tone::Neutral,
        ));
    } else if precip <= 6.0 {
        score -= 12;
        factors.push(AdviceFactor::new(
            "Precipitation",
            "Sustained rain reduces surface visibility.",
            Tone::Negative,
        ));
    } else {
        score -= 20;
        factors.push(AdviceFactor::new(
            "Precipitation",
            "Heavy rain compromises safety and catch quality.",
            Tone::Negative,
        ));
    }

    let hint = species_hint.map(|s| s.trim().to_lowercase()).unwrap_or_default();
    if let Some(profile) = SPECIES_PROFILES
        .iter()
        .find(|p| !hint.is_empty() && hint.contains(p.key))
    {
        let adjusted_wind = wind * profile.wind_tolerance;
        if adjusted_wind <= 8.0 {
            score += 6;
            factors.push(AdviceFactor::new(
                format!("{} behaviour", profile.label),
                profile.note,
                Tone::Positive,
            ));
        } else if adjusted_wind >= 14.0 {
            score -= 8;
            factors.push(AdviceFactor::new(
                format!("{} behaviour", profile.label),
                format!("{} prefer calmer seas than current forecast.", profile.label),
                Tone::Negative,
            ));
        }

        if precip * profile.precip_tolerance >= 6.0 {
            score -= 6;
            factors.push(AdviceFactor::new(
                format!("{} clarity", profile.label),
                format!("{} catches fall in turbid runoff.", profile.label),
                Tone::Negative,
            ));
        }
    }

    if trip_hours > 12 {
        score -= 10;
        factors.push(AdviceFactor::new(
            "Trip duration",
            "Long outings expand exposure window — consider staggered shifts.",
            Tone::Negative,
        ));
    } else if trip_hours <= 4 {
        score += 4;
        factors.push(AdviceFactor::new(
            "Trip duration",
            "Short window keeps conditions predictable.",
            Tone::Positive,
        ));
    }

    let score = score.clamp(0, 100) as u8;

    let highlights: Vec<&str> = factors
        .iter()
        .filter(|f| f.tone != Tone::Neutral)
        .map(|f| f.detail.as_str())
        .take(2)
        .collect();
    let summary = if highlights.is_empty() {
        DEFAULT_SUMMARY.to_string()
    } else {
        highlights.join(" ")
    };

    FishingAdvice {
        location: location_name.to_string(),
        score,
        recommendation: Recommendation::from_score(score),
        risk_level: base_risk,
        window_hours: trip_hours,
        factors,
        summary,
    }
}

/// Parse a trip window such as "8" or "8h" from its leading digits,
/// falling back to the default
pub fn parse_trip_hours(input: &str) -> u32 {
    let trimmed = input.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .map_or(unsigned, |end| &unsigned[..end]);

    match digits.parse::<u32>() {
        Ok(hours) if hours > 0 => hours,
        _ => DEFAULT_TRIP_HOURS,
    }
}

/// Advice across a location set.
///
/// With a target, returns advice for that location only (empty when the
/// target has no weather or is unknown). Without one, ranks every
/// location with weather by descending score and keeps the top three;
/// equal scores keep input order.
pub fn advise(
    locations: &[Location],
    target: Option<&str>,
    species_hint: Option<&str>,
    trip_hours: u32,
) -> Vec<FishingAdvice> {
    let candidates = locations
        .iter()
        .filter_map(FishingConditions::from_location);

    match target.filter(|t| !t.is_empty()) {
        Some(target) => candidates
            .filter(|c| c.location_name == target)
            .take(1)
            .map(|c| score(&c, species_hint, trip_hours))
            .collect(),
        None => {
            let mut ranked: Vec<FishingAdvice> = candidates
                .map(|c| score(&c, species_hint, trip_hours))
                .collect();
            ranked.sort_by(|a, b| b.score.cmp(&a.score));
            ranked.truncate(TOP_PICKS);
            ranked
        }
    }
}
