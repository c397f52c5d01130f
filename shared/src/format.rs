//! Display formatting helpers

const MISSING: &str = "\u{2014}";

/// One-decimal formatting with a dash placeholder for missing or
/// non-finite values
pub fn fmt1(value: Option<f64>) -> String {
    match value {
        Some(x) if x.is_finite() => format!("{:.1}", x),
        _ => MISSING.to_string(),
    }
}

/// Human readable duration such as "45 min", "2 h" or "1 h 30 min".
/// Never shows less than one minute.
pub fn format_duration(hours: f64) -> String {
    let total_minutes = ((hours * 60.0).round() as i64).max(1);
    let h = total_minutes / 60;
    let m = total_minutes % 60;

    match (h, m) {
        (0, m) => format!("{} min", m),
        (h, 0) => format!("{} h", h),
        (h, m) => format!("{} h {} min", h, m),
    }
}

/// Signed risk change, e.g. "+1 level" or "-2 levels"
pub fn describe_delta(delta: i8) -> String {
    if delta == 0 {
        return "No change expected".to_string();
    }
    let prefix = if delta > 0 { "+" } else { "" };
    let word = if delta.abs() == 1 { "level" } else { "levels" };
    format!("{}{} {}", prefix, delta, word)
}
