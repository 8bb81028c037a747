//! Flat, one-line-per-prediction representation for tabular export.

use salary_model::{PredictionBreakdown, SkillKey};
use serde::Serialize;

/// Separator used when a set of skills is written into a single cell.
pub const SKILL_SEPARATOR: char = ';';

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownRow {
    pub role: String,
    pub level: String,
    pub skills: String,
    pub baseline_low: f64,
    pub baseline_high: f64,
    pub growth_low: f64,
    pub growth_high: f64,
    pub inflation_low: f64,
    pub inflation_high: f64,
    pub skills_multiplier: f64,
    pub geo_multiplier: f64,
    pub regression_multiplier: f64,
    pub final_low: f64,
    pub final_mid: f64,
    pub final_high: f64,
}

impl BreakdownRow {
    /// Column names in field order.
    pub const HEADERS: [&'static str; 15] = [
        "role",
        "level",
        "skills",
        "baseline_low",
        "baseline_high",
        "growth_low",
        "growth_high",
        "inflation_low",
        "inflation_high",
        "skills_multiplier",
        "geo_multiplier",
        "regression_multiplier",
        "final_low",
        "final_mid",
        "final_high",
    ];
}

impl From<&PredictionBreakdown> for BreakdownRow {
    fn from(breakdown: &PredictionBreakdown) -> Self {
        Self {
            role: breakdown.role.to_string(),
            level: breakdown.level.to_string(),
            skills: breakdown
                .skills
                .iter()
                .map(SkillKey::as_str)
                .collect::<Vec<_>>()
                .join(&SKILL_SEPARATOR.to_string()),
            baseline_low: breakdown.baseline_low,
            baseline_high: breakdown.baseline_high,
            growth_low: round_cents(breakdown.growth_low),
            growth_high: round_cents(breakdown.growth_high),
            inflation_low: round_cents(breakdown.inflation_low),
            inflation_high: round_cents(breakdown.inflation_high),
            skills_multiplier: round_ratio(breakdown.skills_multiplier),
            geo_multiplier: round_ratio(breakdown.geo_multiplier),
            regression_multiplier: round_ratio(breakdown.regression_multiplier),
            final_low: round_cents(breakdown.final_low),
            final_mid: round_cents(breakdown.final_mid),
            final_high: round_cents(breakdown.final_high),
        }
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round_ratio(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_follow_serialized_field_order() {
        let row = BreakdownRow {
            role: "soc_analyst".to_string(),
            level: "entry".to_string(),
            skills: String::new(),
            baseline_low: 0.0,
            baseline_high: 0.0,
            growth_low: 0.0,
            growth_high: 0.0,
            inflation_low: 0.0,
            inflation_high: 0.0,
            skills_multiplier: 1.0,
            geo_multiplier: 1.0,
            regression_multiplier: 1.0,
            final_low: 0.0,
            final_mid: 0.0,
            final_high: 0.0,
        };
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.serialize(&row).unwrap();
        let bytes = writer.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(header, BreakdownRow::HEADERS.join(","));
    }
}
