//! Integration tests for the bundled demo requests and log redaction.

use salary_cli::demo::demo_inputs;
use salary_cli::logging::{LogConfig, LogFormat, REDACTED_VALUE, log_data_enabled, redact_value};
use salary_core::PredictionEngine;

#[test]
fn demo_requests_resolve_to_expected_roles() {
    let engine = PredictionEngine::default();
    let breakdowns = engine.predict_many(&demo_inputs());

    let resolved: Vec<(&str, &str)> = breakdowns
        .iter()
        .map(|b| (b.role.as_str(), b.level.as_str()))
        .collect();
    insta::assert_debug_snapshot!(resolved, @r#"
    [
        (
            "cybersecurity_engineer",
            "mid",
        ),
        (
            "cloud_security_engineer",
            "senior",
        ),
        (
            "soc_analyst",
            "entry",
        ),
    ]
    "#);

    for breakdown in &breakdowns {
        assert!(breakdown.final_low <= breakdown.final_mid);
        assert!(breakdown.final_mid <= breakdown.final_high);
        assert!(breakdown.final_mid > breakdown.baseline().mid());
    }
}

#[test]
fn first_demo_matches_hand_computed_midpoint() {
    let engine = PredictionEngine::default();
    let breakdown = engine.predict(&demo_inputs()[0]);
    assert!((breakdown.final_mid - 177_441.4993).abs() < 1e-3);
}

#[test]
fn descriptions_are_redacted_by_default() {
    assert!(!log_data_enabled());
    assert_eq!(redact_value("Entry SOC analyst"), REDACTED_VALUE);
}

#[test]
fn log_config_builders() {
    let config = LogConfig::default()
        .with_format(LogFormat::Json)
        .with_log_data(true)
        .with_log_file(None);
    assert_eq!(config.format, LogFormat::Json);
    assert!(config.log_data);
    assert!(config.use_env_filter);
}
