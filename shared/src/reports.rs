//! Citizen report triage

use chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::models::{
    CitizenReport, ReportCategory, ReportClassification, ReportInput, ReportPriority,
    ReportStatus,
};
use crate::types::Coordinate;

fn mentions(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// Keyword-driven priority for a report.
///
/// Matching is case-insensitive substring search over the description, so
/// "Bottles" matches "bottle".
pub fn classify_report(category: ReportCategory, description: &str) -> ReportClassification {
    let text = description.to_lowercase();

    let (priority, topic) = match category {
        ReportCategory::Litter if mentions(&text, &["plastic", "bottle"]) => {
            (ReportPriority::High, "Plastic Pollution")
        }
        ReportCategory::Litter if mentions(&text, &["fishing", "net"]) => {
            (ReportPriority::Medium, "Fishing Gear")
        }
        ReportCategory::Litter => (ReportPriority::Low, "General Litter"),

        ReportCategory::Wildlife if mentions(&text, &["injured", "stranded"]) => {
            (ReportPriority::Urgent, "Injured Wildlife")
        }
        ReportCategory::Wildlife if mentions(&text, &["whale", "dolphin"]) => {
            (ReportPriority::High, "Marine Mammal")
        }
        ReportCategory::Wildlife => (ReportPriority::Medium, "Wildlife Observation"),

        ReportCategory::Pollution if mentions(&text, &["oil", "chemical"]) => {
            (ReportPriority::Urgent, "Chemical Pollution")
        }
        ReportCategory::Pollution if mentions(&text, &["sewage", "waste"]) => {
            (ReportPriority::High, "Waste Discharge")
        }
        ReportCategory::Pollution => (ReportPriority::Medium, "General Pollution"),

        ReportCategory::Damage => (ReportPriority::High, "Environmental Impact"),
        ReportCategory::Safety => (ReportPriority::Urgent, "Safety Risk"),
        ReportCategory::Other => (ReportPriority::Medium, "General Report"),
    };

    ReportClassification {
        priority,
        topic: topic.to_string(),
    }
}

/// Validate and triage a new report. The description is trimmed first, so
/// a blank description is rejected.
pub fn submit_report(
    input: ReportInput,
    coordinates: Option<Coordinate>,
    now: DateTime<Utc>,
) -> Result<CitizenReport, ValidationErrors> {
    let input = ReportInput {
        description: input.description.trim().to_string(),
        ..input
    };
    input.validate()?;

    let classification = classify_report(input.category, &input.description);

    Ok(CitizenReport {
        id: Uuid::new_v4(),
        category: input.category,
        description: input.description,
        coordinates,
        timestamp: now,
        classification,
        status: ReportStatus::Pending,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(category: ReportCategory, description: &str) -> ReportInput {
        ReportInput {
            category,
            description: description.to_string(),
        }
    }

    #[test]
    fn test_litter_triage() {
        assert_eq!(
            classify_report(ReportCategory::Litter, "Plastic bottles on the beach").to_string(),
            "High Priority - Plastic Pollution"
        );
        assert_eq!(
            classify_report(ReportCategory::Litter, "Abandoned NET near pier").to_string(),
            "Medium Priority - Fishing Gear"
        );
        assert_eq!(
            classify_report(ReportCategory::Litter, "Cardboard").to_string(),
            "Low Priority - General Litter"
        );
    }

    #[test]
    fn test_wildlife_injury_outranks_species() {
        let classification = classify_report(ReportCategory::Wildlife, "Stranded whale calf");
        assert_eq!(classification.priority, ReportPriority::Urgent);
        assert_eq!(classification.topic, "Injured Wildlife");

        assert_eq!(
            classify_report(ReportCategory::Wildlife, "Dolphins offshore").priority,
            ReportPriority::High
        );
        assert_eq!(
            classify_report(ReportCategory::Wildlife, "Seals resting").priority,
            ReportPriority::Medium
        );
    }

    #[test]
    fn test_pollution_triage() {
        assert_eq!(
            classify_report(ReportCategory::Pollution, "Oil sheen in harbour").to_string(),
            "URGENT - Chemical Pollution"
        );
        assert_eq!(
            classify_report(ReportCategory::Pollution, "sewage outlet running").to_string(),
            "High Priority - Waste Discharge"
        );
        assert_eq!(
            classify_report(ReportCategory::Pollution, "Brown foam").to_string(),
            "Medium Priority - General Pollution"
        );
    }

    #[test]
    fn test_fixed_categories_ignore_keywords() {
        assert_eq!(
            classify_report(ReportCategory::Damage, "oil").to_string(),
            "High Priority - Environmental Impact"
        );
        assert_eq!(
            classify_report(ReportCategory::Safety, "").to_string(),
            "URGENT - Safety Risk"
        );
        assert_eq!(
            classify_report(ReportCategory::Other, "injured whale").to_string(),
            "Medium Priority - General Report"
        );
    }

    #[test]
    fn test_submit_report() {
        let now = Utc::now();
        let position = Some(Coordinate::new(60.39, 5.32));
        let report = submit_report(
            input(ReportCategory::Safety, "  Loose mooring line  "),
            position,
            now,
        )
        .unwrap();

        assert_eq!(report.description, "Loose mooring line");
        assert_eq!(report.status, ReportStatus::Pending);
        assert_eq!(report.coordinates, position);
        assert_eq!(report.timestamp, now);
        assert_eq!(report.classification.priority, ReportPriority::Urgent);
    }

    #[test]
    fn test_blank_description_rejected() {
        assert!(submit_report(input(ReportCategory::Other, "   "), None, Utc::now()).is_err());
        assert!(submit_report(input(ReportCategory::Other, ""), None, Utc::now()).is_err());
    }

    #[test]
    fn test_reports_get_distinct_ids() {
        let now = Utc::now();
        let a = submit_report(input(ReportCategory::Other, "a"), None, now).unwrap();
        let b = submit_report(input(ReportCategory::Other, "a"), None, now).unwrap();
        assert_ne!(a.id, b.id);
    }
}
