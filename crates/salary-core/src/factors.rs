//! Adjustment factors.
//!
//! Every function here is pure: the result depends only on its arguments
//! and the immutable tables.

use std::collections::BTreeSet;

use salary_model::{LevelKey, RoleKey, SalaryRange, SkillKey};
use salary_standards::{SalaryTables, SkillsPolicy};

/// Compound growth factor `(1 + rate)^years` for a role over the table's
/// projection horizon.
pub fn growth_multiplier(tables: &SalaryTables, role: &RoleKey) -> f64 {
    let rate = tables.growth_rate(role);
    let years = tables.projection().years();
    (1.0 + rate).powf(f64::from(years))
}

pub fn apply_growth(range: SalaryRange, tables: &SalaryTables, role: &RoleKey) -> SalaryRange {
    range.scale(growth_multiplier(tables, role))
}

pub fn apply_inflation(range: SalaryRange, tables: &SalaryTables) -> SalaryRange {
    range.scale(tables.inflation_multiplier())
}

/// `1 + damping * min(sum, cap)`; the premium sum is clamped at zero from
/// below as well.
pub fn damped_premium(sum: f64, policy: SkillsPolicy) -> f64 {
    let capped = sum.clamp(0.0, policy.cap);
    1.0 + policy.damping * capped
}

/// Skills multiplier for a set of skills. Skills without a premium entry
/// contribute nothing.
pub fn skills_multiplier(tables: &SalaryTables, skills: &BTreeSet<SkillKey>) -> f64 {
    let sum: f64 = skills
        .iter()
        .filter_map(|skill| tables.skill_premium(skill))
        .sum();
    damped_premium(sum, tables.skills_policy())
}

pub fn geo_multiplier(tables: &SalaryTables, location: &str) -> f64 {
    tables.location_multiplier(location)
}

/// Experience-deviation multiplier, bounded to `1 + [floor, ceiling]`.
pub fn regression_multiplier(
    tables: &SalaryTables,
    role: &RoleKey,
    level: &LevelKey,
    years_experience: f64,
) -> f64 {
    let policy = tables.regression();
    let years = if years_experience.is_finite() {
        years_experience.max(0.0)
    } else {
        0.0
    };
    let delta = years - policy.target_years(level);
    let adjustment = (delta * policy.leverage_for(role)).clamp(policy.floor, policy.ceiling);
    1.0 + adjustment
}
