//! Tests for salary-model types.

use std::collections::BTreeSet;

use salary_model::{
    Candidates, ExtractedSignals, LevelKey, PredictionBreakdown, PredictionInput, RoleKey,
    SalaryRange, SkillKey,
};

fn sample_breakdown() -> PredictionBreakdown {
    let base = SalaryRange::new(100_000.0, 140_000.0);
    PredictionBreakdown {
        role: RoleKey::new("soc_analyst").unwrap(),
        level: LevelKey::new("mid").unwrap(),
        skills: BTreeSet::from([SkillKey::new("siem").unwrap()]),
        baseline_low: 95_000.0,
        baseline_high: 125_000.0,
        growth_low: 97_000.0,
        growth_high: 130_000.0,
        inflation_low: base.low,
        inflation_high: base.high,
        skills_multiplier: 1.25,
        geo_multiplier: 1.0,
        regression_multiplier: 1.0,
        candidates: Candidates {
            a: base,
            b: base.scale(1.25),
            c: base,
            d: base.scale(1.25),
            e: base.scale(1.25),
        },
        final_low: 102_000.0,
        final_mid: 122_400.0,
        final_high: 142_800.0,
    }
}

#[test]
fn breakdown_serializes_keys_as_strings() {
    let breakdown = sample_breakdown();
    let json = serde_json::to_value(&breakdown).expect("serialize breakdown");
    assert_eq!(json["role"], "soc_analyst");
    assert_eq!(json["skills"][0], "siem");
    let round: PredictionBreakdown = serde_json::from_value(json).expect("deserialize");
    assert_eq!(round, breakdown);
}

#[test]
fn breakdown_uplift_is_relative_to_baseline_mid() {
    let breakdown = sample_breakdown();
    let expected = 122_400.0 / 110_000.0 - 1.0;
    assert!((breakdown.uplift() - expected).abs() < 1e-12);
    assert_eq!(breakdown.final_range().mid(), 122_400.0);
}

#[test]
fn input_deserializes_without_optional_fields() {
    let input: PredictionInput = serde_json::from_str(
        r#"{"role": "Pen Tester", "level": "Senior", "years_experience": 9, "location": "ny"}"#,
    )
    .expect("parse input");
    assert!(input.skills.is_empty());
    assert!(input.description.is_none());
    assert_eq!(input.years_experience, 9.0);
}

#[test]
fn empty_signals() {
    assert!(ExtractedSignals::default().is_empty());
    let signals = ExtractedSignals {
        level: Some(LevelKey::new("entry").unwrap()),
        ..Default::default()
    };
    assert!(!signals.is_empty());
}
