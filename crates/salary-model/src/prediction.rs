//! Engine output types.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{LevelKey, RoleKey, SalaryRange, SkillKey};

/// The five alternative estimates built from the adjusted baseline.
///
/// - `a`: growth + inflation only
/// - `b`: `a` × skills
/// - `c`: `a` × geo
/// - `d`: `a` × skills × geo
/// - `e`: `d` × regression
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candidates {
    pub a: SalaryRange,
    pub b: SalaryRange,
    pub c: SalaryRange,
    pub d: SalaryRange,
    pub e: SalaryRange,
}

/// Full audit trail of one prediction.
///
/// Every field is derived from the input, the lookup tables and the blend
/// weights; nothing depends on hidden state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionBreakdown {
    pub role: RoleKey,
    pub level: LevelKey,
    /// Skills that were considered, after merging extracted ones.
    pub skills: BTreeSet<SkillKey>,
    pub baseline_low: f64,
    pub baseline_high: f64,
    pub growth_low: f64,
    pub growth_high: f64,
    pub inflation_low: f64,
    pub inflation_high: f64,
    pub skills_multiplier: f64,
    pub geo_multiplier: f64,
    pub regression_multiplier: f64,
    pub candidates: Candidates,
    pub final_low: f64,
    pub final_mid: f64,
    pub final_high: f64,
}

impl PredictionBreakdown {
    pub fn baseline(&self) -> SalaryRange {
        SalaryRange::new(self.baseline_low, self.baseline_high)
    }

    pub fn final_range(&self) -> SalaryRange {
        SalaryRange::new(self.final_low, self.final_high)
    }

    /// Relative change of the final midpoint over the baseline midpoint.
    pub fn uplift(&self) -> f64 {
        let base = self.baseline().mid();
        if base > 0.0 {
            self.final_mid / base - 1.0
        } else {
            0.0
        }
    }
}
