//! The immutable lookup tables consumed by the prediction engine.

use std::collections::{BTreeMap, BTreeSet};

use salary_model::{LevelKey, RoleKey, SalaryRange, SkillKey};
use serde::{Deserialize, Serialize};

use crate::error::StandardsError;

/// Longest projection horizon the tables accept.
pub const MAX_PROJECTION_YEARS: u32 = 50;

/// Base and target survey years; the growth exponent is their gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projection {
    pub base_year: i32,
    pub target_year: i32,
}

impl Projection {
    /// Whole years of growth to apply; never negative.
    pub fn years(&self) -> u32 {
        u32::try_from(self.target_year.saturating_sub(self.base_year)).unwrap_or(0)
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            base_year: 2024,
            target_year: 2026,
        }
    }
}

/// Diminishing-returns policy for stacked skill premiums.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkillsPolicy {
    pub cap: f64,
    pub damping: f64,
}

impl SkillsPolicy {
    /// Largest multiplier any skill set can produce.
    pub fn max_multiplier(&self) -> f64 {
        1.0 + self.damping * self.cap
    }
}

impl Default for SkillsPolicy {
    fn default() -> Self {
        Self {
            cap: 0.25,
            damping: 0.85,
        }
    }
}

/// Experience-deviation adjustment parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionPolicy {
    pub targets: BTreeMap<LevelKey, f64>,
    pub default_target: f64,
    pub leverage: f64,
    pub sensitive_leverage: f64,
    pub sensitive_roles: BTreeSet<RoleKey>,
    pub floor: f64,
    pub ceiling: f64,
}

impl RegressionPolicy {
    /// Expected years of experience for a level.
    pub fn target_years(&self, level: &LevelKey) -> f64 {
        self.targets
            .get(level)
            .copied()
            .unwrap_or(self.default_target)
    }

    pub fn leverage_for(&self, role: &RoleKey) -> f64 {
        if self.sensitive_roles.contains(role) {
            self.sensitive_leverage
        } else {
            self.leverage
        }
    }
}

/// Everything the engine looks up, keyed by canonical keys.
///
/// Built once (from [`SalaryTables::builtin`] or a verified standards
/// directory) and never mutated afterwards. Construction through
/// [`SalaryTablesBuilder::build`] checks cross-table consistency so the
/// engine can treat every lookup as total.
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryTables {
    pub(crate) guide: String,
    pub(crate) baselines: BTreeMap<RoleKey, BTreeMap<LevelKey, SalaryRange>>,
    pub(crate) default_growth_rate: f64,
    pub(crate) growth_rates: BTreeMap<RoleKey, f64>,
    pub(crate) inflation_multiplier: f64,
    pub(crate) default_location_multiplier: f64,
    pub(crate) location_multipliers: BTreeMap<String, f64>,
    pub(crate) skill_premiums: BTreeMap<SkillKey, f64>,
    pub(crate) role_aliases: BTreeMap<String, RoleKey>,
    pub(crate) level_aliases: BTreeMap<String, LevelKey>,
    pub(crate) certification_aliases: BTreeMap<String, SkillKey>,
    pub(crate) skills_policy: SkillsPolicy,
    pub(crate) regression: RegressionPolicy,
    pub(crate) projection: Projection,
    pub(crate) default_role: RoleKey,
    pub(crate) default_level: LevelKey,
}

impl Default for SalaryTables {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SalaryTables {
    pub fn builder(default_role: RoleKey, default_level: LevelKey) -> SalaryTablesBuilder {
        SalaryTablesBuilder::new(default_role, default_level)
    }

    /// Reopen the tables for modification; `build` validates again.
    pub fn into_builder(self) -> SalaryTablesBuilder {
        SalaryTablesBuilder { tables: self }
    }

    /// Human-readable name of the guide these tables describe.
    pub fn guide(&self) -> &str {
        &self.guide
    }

    pub fn baseline(&self, role: &RoleKey, level: &LevelKey) -> Option<SalaryRange> {
        self.baselines.get(role)?.get(level).copied()
    }

    pub fn has_role(&self, role: &RoleKey) -> bool {
        self.baselines.contains_key(role)
    }

    pub fn has_level(&self, level: &LevelKey) -> bool {
        self.baselines.values().any(|levels| levels.contains_key(level))
    }

    pub fn role_keys(&self) -> impl Iterator<Item = &RoleKey> {
        self.baselines.keys()
    }

    /// Levels present for a role, in key order.
    pub fn levels_for(&self, role: &RoleKey) -> impl Iterator<Item = (&LevelKey, &SalaryRange)> {
        self.baselines.get(role).into_iter().flatten()
    }

    pub fn baseline_count(&self) -> usize {
        self.baselines.values().map(BTreeMap::len).sum()
    }

    /// Annual growth rate for a role, or the global default.
    pub fn growth_rate(&self, role: &RoleKey) -> f64 {
        self.growth_rates
            .get(role)
            .copied()
            .unwrap_or(self.default_growth_rate)
    }

    pub fn default_growth_rate(&self) -> f64 {
        self.default_growth_rate
    }

    pub fn growth_overrides(&self) -> &BTreeMap<RoleKey, f64> {
        &self.growth_rates
    }

    pub fn inflation_multiplier(&self) -> f64 {
        self.inflation_multiplier
    }

    /// Multiplier for a location code; unknown or blank codes use the default.
    pub fn location_multiplier(&self, code: &str) -> f64 {
        let code = code.trim().to_uppercase();
        self.location_multipliers
            .get(&code)
            .copied()
            .unwrap_or(self.default_location_multiplier)
    }

    pub fn is_known_location(&self, code: &str) -> bool {
        self.location_multipliers
            .contains_key(&code.trim().to_uppercase())
    }

    pub fn default_location_multiplier(&self) -> f64 {
        self.default_location_multiplier
    }

    pub fn locations(&self) -> &BTreeMap<String, f64> {
        &self.location_multipliers
    }

    pub fn skill_premium(&self, skill: &SkillKey) -> Option<f64> {
        self.skill_premiums.get(skill).copied()
    }

    pub fn skill_premiums(&self) -> &BTreeMap<SkillKey, f64> {
        &self.skill_premiums
    }

    pub fn role_aliases(&self) -> &BTreeMap<String, RoleKey> {
        &self.role_aliases
    }

    pub fn level_aliases(&self) -> &BTreeMap<String, LevelKey> {
        &self.level_aliases
    }

    pub fn certification_aliases(&self) -> &BTreeMap<String, SkillKey> {
        &self.certification_aliases
    }

    pub fn skills_policy(&self) -> SkillsPolicy {
        self.skills_policy
    }

    pub fn regression(&self) -> &RegressionPolicy {
        &self.regression
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn default_role(&self) -> &RoleKey {
        &self.default_role
    }

    pub fn default_level(&self) -> &LevelKey {
        &self.default_level
    }
}

/// Accumulates table entries and validates them as a whole.
#[derive(Debug, Clone)]
pub struct SalaryTablesBuilder {
    tables: SalaryTables,
}

impl SalaryTablesBuilder {
    fn new(default_role: RoleKey, default_level: LevelKey) -> Self {
        Self {
            tables: SalaryTables {
                guide: String::new(),
                baselines: BTreeMap::new(),
                default_growth_rate: 0.05,
                growth_rates: BTreeMap::new(),
                inflation_multiplier: 1.0,
                default_location_multiplier: 1.0,
                location_multipliers: BTreeMap::new(),
                skill_premiums: BTreeMap::new(),
                role_aliases: BTreeMap::new(),
                level_aliases: BTreeMap::new(),
                certification_aliases: BTreeMap::new(),
                skills_policy: SkillsPolicy::default(),
                regression: RegressionPolicy {
                    targets: BTreeMap::new(),
                    default_target: 4.0,
                    leverage: 0.008,
                    sensitive_leverage: 0.010,
                    sensitive_roles: BTreeSet::new(),
                    floor: -0.05,
                    ceiling: 0.08,
                },
                projection: Projection::default(),
                default_role,
                default_level,
            },
        }
    }

    pub fn guide(mut self, guide: impl Into<String>) -> Self {
        self.tables.guide = guide.into();
        self
    }

    pub fn baseline(mut self, role: RoleKey, level: LevelKey, range: SalaryRange) -> Self {
        self.tables
            .baselines
            .entry(role)
            .or_default()
            .insert(level, range);
        self
    }

    pub fn default_growth_rate(mut self, rate: f64) -> Self {
        self.tables.default_growth_rate = rate;
        self
    }

    pub fn growth_rate(mut self, role: RoleKey, rate: f64) -> Self {
        self.tables.growth_rates.insert(role, rate);
        self
    }

    pub fn inflation_multiplier(mut self, multiplier: f64) -> Self {
        self.tables.inflation_multiplier = multiplier;
        self
    }

    pub fn default_location_multiplier(mut self, multiplier: f64) -> Self {
        self.tables.default_location_multiplier = multiplier;
        self
    }

    pub fn location(mut self, code: &str, multiplier: f64) -> Self {
        self.tables
            .location_multipliers
            .insert(code.trim().to_uppercase(), multiplier);
        self
    }

    pub fn skill_premium(mut self, skill: SkillKey, premium: f64) -> Self {
        self.tables.skill_premiums.insert(skill, premium);
        self
    }

    pub fn role_alias(mut self, phrase: &str, role: RoleKey) -> Self {
        self.tables
            .role_aliases
            .insert(normalize_phrase(phrase), role);
        self
    }

    pub fn level_alias(mut self, phrase: &str, level: LevelKey) -> Self {
        self.tables
            .level_aliases
            .insert(normalize_phrase(phrase), level);
        self
    }

    pub fn certification_alias(mut self, phrase: &str, skill: SkillKey) -> Self {
        self.tables
            .certification_aliases
            .insert(normalize_phrase(phrase), skill);
        self
    }

    pub fn skills_policy(mut self, policy: SkillsPolicy) -> Self {
        self.tables.skills_policy = policy;
        self
    }

    pub fn regression(mut self, policy: RegressionPolicy) -> Self {
        self.tables.regression = policy;
        self
    }

    pub fn projection(mut self, projection: Projection) -> Self {
        self.tables.projection = projection;
        self
    }

    pub fn build(self) -> Result<SalaryTables, StandardsError> {
        validate(&self.tables)?;
        Ok(self.tables)
    }

    /// Skip validation; only for tables whose contents are compiled in.
    pub(crate) fn build_unchecked(self) -> SalaryTables {
        self.tables
    }
}

fn normalize_phrase(phrase: &str) -> String {
    phrase.trim().to_lowercase()
}

fn validate(tables: &SalaryTables) -> Result<(), StandardsError> {
    if tables.baselines.is_empty() {
        return Err(StandardsError::table("baseline table is empty"));
    }
    for (role, levels) in &tables.baselines {
        for (level, range) in levels {
            if !range.is_well_formed() {
                return Err(StandardsError::table(format!(
                    "baseline {role}/{level} must satisfy 0 <= low <= high (got {} / {})",
                    range.low, range.high
                )));
            }
        }
        if !levels.contains_key(&tables.default_level) {
            return Err(StandardsError::table(format!(
                "role {role} has no baseline for default level {}",
                tables.default_level
            )));
        }
    }
    if !tables.baselines.contains_key(&tables.default_role) {
        return Err(StandardsError::table(format!(
            "default role {} has no baseline",
            tables.default_role
        )));
    }

    for (phrase, role) in &tables.role_aliases {
        if phrase.is_empty() {
            return Err(StandardsError::table("role alias phrase is empty"));
        }
        if !tables.baselines.contains_key(role) {
            return Err(StandardsError::table(format!(
                "role alias '{phrase}' points at unknown role {role}"
            )));
        }
    }
    for (phrase, level) in &tables.level_aliases {
        if phrase.is_empty() {
            return Err(StandardsError::table("level alias phrase is empty"));
        }
        if !tables.has_level(level) {
            return Err(StandardsError::table(format!(
                "level alias '{phrase}' points at unknown level {level}"
            )));
        }
    }
    if tables.certification_aliases.keys().any(String::is_empty) {
        return Err(StandardsError::table("certification alias phrase is empty"));
    }

    let years = tables.projection.years();
    if years > MAX_PROJECTION_YEARS {
        return Err(StandardsError::table(format!(
            "projection {} -> {} spans {years} years (at most {MAX_PROJECTION_YEARS})",
            tables.projection.base_year, tables.projection.target_year
        )));
    }
    check_rate("default growth rate", tables.default_growth_rate, years)?;
    for (role, rate) in &tables.growth_rates {
        check_rate(&format!("growth rate for {role}"), *rate, years)?;
    }
    check_positive("inflation multiplier", tables.inflation_multiplier)?;
    check_positive(
        "default location multiplier",
        tables.default_location_multiplier,
    )?;
    for (code, multiplier) in &tables.location_multipliers {
        check_positive(&format!("location multiplier for {code}"), *multiplier)?;
    }
    for (skill, premium) in &tables.skill_premiums {
        check_non_negative(&format!("premium for {skill}"), *premium)?;
    }

    let skills = tables.skills_policy;
    check_non_negative("skills cap", skills.cap)?;
    check_non_negative("skills damping", skills.damping)?;

    let regression = &tables.regression;
    check_non_negative("regression default target", regression.default_target)?;
    for (level, target) in &regression.targets {
        check_non_negative(&format!("regression target for {level}"), *target)?;
    }
    check_non_negative("regression leverage", regression.leverage)?;
    check_non_negative("regression sensitive leverage", regression.sensitive_leverage)?;
    if !regression.floor.is_finite()
        || !regression.ceiling.is_finite()
        || regression.floor > regression.ceiling
    {
        return Err(StandardsError::table(format!(
            "regression floor {} must not exceed ceiling {}",
            regression.floor, regression.ceiling
        )));
    }
    if regression.floor <= -1.0 {
        return Err(StandardsError::table(format!(
            "regression floor {} would make the multiplier non-positive",
            regression.floor
        )));
    }

    Ok(())
}

/// A rate must exceed -1 and stay finite once compounded over `years`.
fn check_rate(name: &str, value: f64, years: u32) -> Result<(), StandardsError> {
    if !value.is_finite() || value <= -1.0 {
        return Err(StandardsError::table(format!(
            "{name} must be greater than -1 (got {value})"
        )));
    }
    let compounded = (1.0 + value).powf(f64::from(years));
    if !compounded.is_finite() {
        return Err(StandardsError::table(format!(
            "{name} overflows when compounded over {years} years (got {value})"
        )));
    }
    Ok(())
}

fn check_positive(name: &str, value: f64) -> Result<(), StandardsError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(StandardsError::table(format!(
            "{name} must be positive (got {value})"
        )));
    }
    Ok(())
}

fn check_non_negative(name: &str, value: f64) -> Result<(), StandardsError> {
    if !value.is_finite() || value < 0.0 {
        return Err(StandardsError::table(format!(
            "{name} must be non-negative (got {value})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> SalaryTablesBuilder {
        let analyst = RoleKey::from_static("analyst");
        let mid = LevelKey::from_static("mid");
        SalaryTables::builder(analyst.clone(), mid.clone()).baseline(
            analyst,
            mid,
            SalaryRange::new(50_000.0, 70_000.0),
        )
    }

    #[test]
    fn projection_years_never_negative() {
        assert_eq!(Projection::default().years(), 2);
        let backwards = Projection {
            base_year: 2026,
            target_year: 2024,
        };
        assert_eq!(backwards.years(), 0);
    }

    #[test]
    fn minimal_tables_build() {
        let tables = minimal().location(" ca ", 1.2).build().unwrap();
        assert_eq!(tables.location_multiplier("CA"), 1.2);
        assert_eq!(tables.location_multiplier("ca"), 1.2);
        assert_eq!(tables.location_multiplier("nowhere"), 1.0);
        assert_eq!(tables.location_multiplier(""), 1.0);
        assert_eq!(tables.baseline_count(), 1);
    }

    #[test]
    fn known_locations_and_growth_overrides() {
        let tables = minimal()
            .location("TX", 1.03)
            .growth_rate(RoleKey::from_static("analyst"), 0.05)
            .build()
            .unwrap();
        assert!(tables.is_known_location(" tx "));
        assert!(!tables.is_known_location("ZZ"));
        assert_eq!(tables.growth_overrides().len(), 1);
        assert_eq!(tables.growth_rate(&RoleKey::from_static("analyst")), 0.05);
    }

    #[test]
    fn projection_horizon_is_bounded() {
        let long = Projection {
            base_year: 2024,
            target_year: 2024 + 51,
        };
        let err = minimal().projection(long).build().unwrap_err();
        assert!(err.to_string().contains("51 years"), "{err}");

        let longest = Projection {
            base_year: 2024,
            target_year: 2024 + 50,
        };
        assert!(minimal().projection(longest).build().is_ok());
    }

    #[test]
    fn overflowing_growth_rate_is_rejected() {
        let err = minimal().default_growth_rate(1e300).build().unwrap_err();
        assert!(err.to_string().contains("overflows"), "{err}");
    }

    #[test]
    fn inverted_baseline_is_rejected() {
        let err = minimal()
            .baseline(
                RoleKey::from_static("analyst"),
                LevelKey::from_static("senior"),
                SalaryRange::new(90_000.0, 80_000.0),
            )
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("analyst/senior"));
    }

    #[test]
    fn alias_to_unknown_role_is_rejected() {
        let err = minimal()
            .role_alias("pilot", RoleKey::from_static("pilot"))
            .build()
            .unwrap_err();
        assert!(matches!(err, StandardsError::InvalidTable { .. }));
    }

    #[test]
    fn missing_default_role_is_rejected() {
        let ghost = RoleKey::from_static("ghost");
        let result = SalaryTables::builder(ghost, LevelKey::from_static("mid"))
            .baseline(
                RoleKey::from_static("analyst"),
                LevelKey::from_static("mid"),
                SalaryRange::new(1.0, 2.0),
            )
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn non_positive_multipliers_are_rejected() {
        assert!(minimal().inflation_multiplier(0.0).build().is_err());
        assert!(minimal().location("TX", -1.0).build().is_err());
        assert!(
            minimal()
                .skill_premium(SkillKey::from_static("siem"), -0.01)
                .build()
                .is_err()
        );
    }

    #[test]
    fn regression_policy_lookups() {
        let mut policy = minimal().build().unwrap().regression().clone();
        policy.targets.insert(LevelKey::from_static("senior"), 8.0);
        policy
            .sensitive_roles
            .insert(RoleKey::from_static("architect"));
        assert_eq!(policy.target_years(&LevelKey::from_static("senior")), 8.0);
        assert_eq!(policy.target_years(&LevelKey::from_static("staff")), 4.0);
        assert_eq!(policy.leverage_for(&RoleKey::from_static("architect")), 0.010);
        assert_eq!(policy.leverage_for(&RoleKey::from_static("analyst")), 0.008);
    }
}
