//! Built-in cybersecurity salary guide.
//!
//! The shipped `standards/` directory carries the same numbers; the
//! registry tests check that both stay in sync.

use std::collections::{BTreeMap, BTreeSet};

use salary_model::{LevelKey, RoleKey, SalaryRange, SkillKey};

use crate::tables::{Projection, RegressionPolicy, SalaryTables, SkillsPolicy};

pub const GUIDE_NAME: &str = "Cybersecurity Salary Guide 2026";
pub const DEFAULT_ROLE: &str = "cybersecurity_engineer";
pub const DEFAULT_LEVEL: &str = "mid";

/// 2024 survey (low, high) per role for entry, mid, senior.
const BASELINES: &[(&str, [(f64, f64); 3])] = &[
    (
        "cybersecurity_engineer",
        [(90_000.0, 120_000.0), (120_000.0, 160_000.0), (160_000.0, 210_000.0)],
    ),
    (
        "cloud_security_engineer",
        [(105_000.0, 135_000.0), (135_000.0, 175_000.0), (175_000.0, 230_000.0)],
    ),
    (
        "devsecops_engineer",
        [(100_000.0, 130_000.0), (130_000.0, 170_000.0), (170_000.0, 225_000.0)],
    ),
    (
        "appsec_engineer",
        [(100_000.0, 135_000.0), (135_000.0, 180_000.0), (180_000.0, 240_000.0)],
    ),
    (
        "soc_analyst",
        [(70_000.0, 95_000.0), (95_000.0, 125_000.0), (125_000.0, 160_000.0)],
    ),
    (
        "incident_response_dfir",
        [(95_000.0, 125_000.0), (125_000.0, 165_000.0), (165_000.0, 220_000.0)],
    ),
    (
        "threat_hunter",
        [(100_000.0, 130_000.0), (130_000.0, 175_000.0), (175_000.0, 230_000.0)],
    ),
    (
        "penetration_tester",
        [(85_000.0, 115_000.0), (115_000.0, 155_000.0), (155_000.0, 210_000.0)],
    ),
    (
        "iam_engineer",
        [(90_000.0, 120_000.0), (120_000.0, 160_000.0), (160_000.0, 210_000.0)],
    ),
    (
        "security_architect",
        [(135_000.0, 175_000.0), (175_000.0, 220_000.0), (220_000.0, 280_000.0)],
    ),
    (
        "grc_analyst",
        [(80_000.0, 105_000.0), (105_000.0, 140_000.0), (140_000.0, 185_000.0)],
    ),
];

const LEVELS: [&str; 3] = ["entry", "mid", "senior"];

const GROWTH_RATES: &[(&str, f64)] = &[
    ("appsec_engineer", 0.06),
    ("cloud_security_engineer", 0.07),
    ("devsecops_engineer", 0.07),
    ("security_architect", 0.06),
];

const LOCATIONS: &[(&str, f64)] = &[
    ("AZ", 0.97),
    ("CA", 1.18),
    ("CO", 1.05),
    ("DC", 1.12),
    ("FL", 1.00),
    ("GA", 0.98),
    ("IL", 1.02),
    ("MA", 1.10),
    ("NC", 0.98),
    ("NY", 1.15),
    ("OH", 0.95),
    ("PA", 0.97),
    ("REMOTE", 1.00),
    ("TX", 1.03),
    ("VA", 1.07),
    ("WA", 1.12),
];

const SKILL_PREMIUMS: &[(&str, f64)] = &[
    // cloud and platform
    ("aws_security", 0.05),
    ("azure_security", 0.05),
    ("gcp_security", 0.05),
    ("kubernetes", 0.04),
    ("terraform", 0.03),
    ("containers", 0.03),
    ("cnapp", 0.04),
    ("cspm", 0.03),
    // security engineering
    ("zero_trust", 0.04),
    ("iam", 0.03),
    ("okta", 0.02),
    ("entra_id", 0.02),
    ("sso_saml_oidc", 0.02),
    ("siem", 0.03),
    ("soar", 0.03),
    ("edr", 0.02),
    // detection and response
    ("dfir", 0.05),
    ("incident_response", 0.04),
    ("threat_hunting", 0.04),
    ("malware_analysis", 0.04),
    ("reverse_engineering", 0.04),
    // appsec
    ("secure_sdlc", 0.03),
    ("sast_dast", 0.03),
    ("threat_modeling", 0.03),
    // certifications
    ("oscp", 0.06),
    ("gcih", 0.05),
    ("gcfa", 0.05),
    ("gpen", 0.05),
    ("cissp", 0.05),
    ("ccsp", 0.05),
    ("security_plus", 0.02),
];

const ROLE_ALIASES: &[(&str, &str)] = &[
    ("security engineer", "cybersecurity_engineer"),
    ("cybersecurity engineer", "cybersecurity_engineer"),
    ("cyber security engineer", "cybersecurity_engineer"),
    ("cloud security engineer", "cloud_security_engineer"),
    ("devsecops engineer", "devsecops_engineer"),
    ("application security engineer", "appsec_engineer"),
    ("appsec engineer", "appsec_engineer"),
    ("soc analyst", "soc_analyst"),
    ("incident response", "incident_response_dfir"),
    ("dfir", "incident_response_dfir"),
    ("threat hunter", "threat_hunter"),
    ("penetration tester", "penetration_tester"),
    ("pen tester", "penetration_tester"),
    ("red team", "penetration_tester"),
    ("iam engineer", "iam_engineer"),
    ("security architect", "security_architect"),
    ("grc analyst", "grc_analyst"),
];

const LEVEL_ALIASES: &[(&str, &str)] = &[
    ("junior", "entry"),
    ("entry", "entry"),
    ("entry-level", "entry"),
    ("mid", "mid"),
    ("mid-level", "mid"),
    ("intermediate", "mid"),
    ("senior", "senior"),
    ("lead", "senior"),
    ("staff", "senior"),
    ("principal", "senior"),
];

const CERTIFICATION_ALIASES: &[(&str, &str)] = &[
    ("ccsp", "ccsp"),
    ("cissp", "cissp"),
    ("gcfa", "gcfa"),
    ("gcih", "gcih"),
    ("gpen", "gpen"),
    ("oscp", "oscp"),
    ("security plus", "security_plus"),
    ("security+", "security_plus"),
];

const SENSITIVE_ROLES: &[&str] = &[
    "cloud_security_engineer",
    "devsecops_engineer",
    "security_architect",
];

const REGRESSION_TARGETS: &[(&str, f64)] = &[("entry", 1.0), ("mid", 4.0), ("senior", 8.0)];

impl SalaryTables {
    /// The cybersecurity guide compiled into the binary.
    pub fn builtin() -> Self {
        let mut builder = SalaryTables::builder(
            RoleKey::from_static(DEFAULT_ROLE),
            LevelKey::from_static(DEFAULT_LEVEL),
        )
        .guide(GUIDE_NAME)
        .projection(Projection::default())
        .default_growth_rate(0.05)
        .inflation_multiplier(1.07)
        .default_location_multiplier(1.00)
        .skills_policy(SkillsPolicy::default())
        .regression(builtin_regression());

        for (role, ranges) in BASELINES {
            for (level, (low, high)) in LEVELS.iter().zip(ranges) {
                builder = builder.baseline(
                    RoleKey::from_static(role),
                    LevelKey::from_static(level),
                    SalaryRange::new(*low, *high),
                );
            }
        }
        for (role, rate) in GROWTH_RATES {
            builder = builder.growth_rate(RoleKey::from_static(role), *rate);
        }
        for (code, multiplier) in LOCATIONS {
            builder = builder.location(code, *multiplier);
        }
        for (skill, premium) in SKILL_PREMIUMS {
            builder = builder.skill_premium(SkillKey::from_static(skill), *premium);
        }
        for (phrase, role) in ROLE_ALIASES {
            builder = builder.role_alias(phrase, RoleKey::from_static(role));
        }
        for (phrase, level) in LEVEL_ALIASES {
            builder = builder.level_alias(phrase, LevelKey::from_static(level));
        }
        for (phrase, skill) in CERTIFICATION_ALIASES {
            builder = builder.certification_alias(phrase, SkillKey::from_static(skill));
        }

        builder.build_unchecked()
    }
}

fn builtin_regression() -> RegressionPolicy {
    RegressionPolicy {
        targets: REGRESSION_TARGETS
            .iter()
            .map(|(level, years)| (LevelKey::from_static(level), *years))
            .collect::<BTreeMap<_, _>>(),
        default_target: 4.0,
        leverage: 0.008,
        sensitive_leverage: 0.010,
        sensitive_roles: SENSITIVE_ROLES
            .iter()
            .map(|role| RoleKey::from_static(role))
            .collect::<BTreeSet<_>>(),
        floor: -0.05,
        ceiling: 0.08,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tables_pass_validation() {
        let tables = SalaryTables::builtin();
        let rebuilt = tables.clone().into_builder().build().unwrap();
        assert_eq!(rebuilt, tables);
    }

    #[test]
    fn builtin_covers_every_role_and_level() {
        let tables = SalaryTables::builtin();
        assert_eq!(tables.role_keys().count(), 11);
        assert_eq!(tables.baseline_count(), 33);
        let soc = RoleKey::from_static("soc_analyst");
        let entry = LevelKey::from_static("entry");
        assert_eq!(
            tables.baseline(&soc, &entry),
            Some(SalaryRange::new(70_000.0, 95_000.0))
        );
    }

    #[test]
    fn builtin_growth_and_locations() {
        let tables = SalaryTables::builtin();
        assert_eq!(
            tables.growth_rate(&RoleKey::from_static("cloud_security_engineer")),
            0.07
        );
        assert_eq!(tables.growth_rate(&RoleKey::from_static("soc_analyst")), 0.05);
        assert_eq!(tables.location_multiplier(" tx "), 1.03);
        assert_eq!(tables.location_multiplier("ZZ"), 1.0);
        assert_eq!(tables.inflation_multiplier(), 1.07);
        assert_eq!(tables.projection().years(), 2);
    }

    #[test]
    fn builtin_aliases_are_lowercase_phrases() {
        let tables = SalaryTables::builtin();
        assert_eq!(
            tables.role_aliases().get("pen tester").map(RoleKey::as_str),
            Some("penetration_tester")
        );
        assert_eq!(
            tables.certification_aliases().get("security+").map(SkillKey::as_str),
            Some("security_plus")
        );
        assert_eq!(tables.level_aliases().len(), 10);
    }
}
