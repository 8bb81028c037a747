#![deny(unsafe_code)]

//! Parsers for the three table files referenced by the manifest.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use salary_model::{LevelKey, RoleKey, SalaryRange, SkillKey};
use serde::Deserialize;

use crate::error::StandardsError;
use crate::tables::{Projection, RegressionPolicy, SkillsPolicy};

/// One row of `baselines.csv`.
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineRow {
    pub role: RoleKey,
    pub level: LevelKey,
    pub range: SalaryRange,
}

#[derive(Debug, Deserialize)]
struct RawBaselineRow {
    role: String,
    level: String,
    low: f64,
    high: f64,
}

pub fn parse_baselines_csv(path: &Path) -> Result<Vec<BaselineRow>, StandardsError> {
    let bytes = std::fs::read(path).map_err(|e| StandardsError::io(path, e))?;
    parse_baselines(path, bytes.as_slice())
}

fn parse_baselines(path: &Path, bytes: &[u8]) -> Result<Vec<BaselineRow>, StandardsError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let mut rows = Vec::new();
    let mut seen = BTreeSet::new();
    for (idx, record) in reader.deserialize::<RawBaselineRow>().enumerate() {
        let raw = record.map_err(|e| StandardsError::Csv {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let invalid_key = |source| StandardsError::InvalidKey {
            path: path.to_path_buf(),
            source,
        };
        let role = RoleKey::new(raw.role).map_err(invalid_key)?;
        let level = LevelKey::new(raw.level).map_err(invalid_key)?;
        if !seen.insert((role.clone(), level.clone())) {
            return Err(StandardsError::Csv {
                path: path.to_path_buf(),
                message: format!("row {}: duplicate baseline {role}/{level}", idx + 2),
            });
        }
        rows.push(BaselineRow {
            role,
            level,
            range: SalaryRange::new(raw.low, raw.high),
        });
    }

    if rows.is_empty() {
        return Err(StandardsError::Csv {
            path: path.to_path_buf(),
            message: "no baseline rows".to_string(),
        });
    }
    Ok(rows)
}

/// Contents of `factors.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FactorsFile {
    pub guide: GuideSection,
    #[serde(default)]
    pub projection: Projection,
    pub defaults: DefaultsSection,
    pub growth: GrowthSection,
    pub inflation: InflationSection,
    pub locations: LocationsSection,
    pub skills: SkillsSection,
    pub regression: RegressionSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GuideSection {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DefaultsSection {
    pub role: RoleKey,
    pub level: LevelKey,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GrowthSection {
    pub default: f64,
    #[serde(default)]
    pub roles: BTreeMap<RoleKey, f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InflationSection {
    pub multiplier: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationsSection {
    #[serde(default = "default_multiplier")]
    pub default: f64,
    #[serde(default)]
    pub codes: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SkillsSection {
    #[serde(flatten)]
    pub policy: SkillsPolicy,
    #[serde(default)]
    pub premiums: BTreeMap<SkillKey, f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegressionSection {
    pub default_target: f64,
    pub leverage: f64,
    pub sensitive_leverage: f64,
    #[serde(default)]
    pub sensitive_roles: BTreeSet<RoleKey>,
    pub floor: f64,
    pub ceiling: f64,
    #[serde(default)]
    pub targets: BTreeMap<LevelKey, f64>,
}

impl From<RegressionSection> for RegressionPolicy {
    fn from(section: RegressionSection) -> Self {
        Self {
            targets: section.targets,
            default_target: section.default_target,
            leverage: section.leverage,
            sensitive_leverage: section.sensitive_leverage,
            sensitive_roles: section.sensitive_roles,
            floor: section.floor,
            ceiling: section.ceiling,
        }
    }
}

fn default_multiplier() -> f64 {
    1.0
}

/// Contents of `aliases.toml`: phrase to canonical key, per kind.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AliasesFile {
    #[serde(default)]
    pub roles: BTreeMap<String, RoleKey>,
    #[serde(default)]
    pub levels: BTreeMap<String, LevelKey>,
    #[serde(default)]
    pub certifications: BTreeMap<String, SkillKey>,
}

pub fn load_factors_toml(path: &Path) -> Result<FactorsFile, StandardsError> {
    read_toml(path)
}

pub fn load_aliases_toml(path: &Path) -> Result<AliasesFile, StandardsError> {
    read_toml(path)
}

fn read_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, StandardsError> {
    let contents = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
    toml::from_str(&contents).map_err(|e| StandardsError::Toml {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baselines_parse_and_trim() {
        let csv = b"role,level,low,high\n Soc_Analyst , entry , 70000, 95000\n";
        let rows = parse_baselines(Path::new("baselines.csv"), csv).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].role.as_str(), "soc_analyst");
        assert_eq!(rows[0].level.as_str(), "entry");
        assert_eq!(rows[0].range, SalaryRange::new(70_000.0, 95_000.0));
    }

    #[test]
    fn duplicate_baseline_is_reported_with_row() {
        let csv = b"role,level,low,high\na,mid,1,2\na,mid,3,4\n";
        let err = parse_baselines(Path::new("baselines.csv"), csv).unwrap_err();
        assert!(err.to_string().contains("row 3"), "{err}");
    }

    #[test]
    fn non_numeric_salary_is_a_csv_error() {
        let csv = b"role,level,low,high\na,mid,lots,2\n";
        let err = parse_baselines(Path::new("baselines.csv"), csv).unwrap_err();
        assert!(matches!(err, StandardsError::Csv { .. }));
    }

    #[test]
    fn empty_baselines_are_rejected() {
        let csv = b"role,level,low,high\n";
        assert!(parse_baselines(Path::new("baselines.csv"), csv).is_err());
    }

    #[test]
    fn aliases_sections_are_optional() {
        let text = "[roles]\n\"pen tester\" = \"penetration_tester\"\n";
        let aliases: AliasesFile = toml::from_str(text).unwrap();
        assert_eq!(aliases.roles.len(), 1);
        assert!(aliases.levels.is_empty());
        assert!(aliases.certifications.is_empty());
    }

    #[test]
    fn skills_section_flattens_policy() {
        let text = "cap = 0.3\ndamping = 0.5\n[premiums]\n\"Zero Trust\" = 0.04\n";
        let section: SkillsSection = toml::from_str(text).unwrap();
        assert_eq!(section.policy.cap, 0.3);
        assert_eq!(section.policy.damping, 0.5);
        assert_eq!(
            section.premiums.get(&SkillKey::from_static("zero_trust")),
            Some(&0.04)
        );
    }
}
