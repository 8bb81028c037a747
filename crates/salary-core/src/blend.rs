//! Sequential weighted blend of the candidates.
//!
//! ```text
//! x = lerp(A, B, w_skills)
//! x = lerp(x, D, w_geo)
//! x = lerp(x, E, w_regression)
//! ```
//!
//! The steps are order dependent: the geographic step pulls toward `D`
//! (skills and geo), not toward `C`, and the regression step toward `E`.
//! Candidate `C` is reported but never blended.

use salary_model::{BlendWeights, Candidates, SalaryRange};

/// Final low/mid/high figures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blended {
    pub low: f64,
    pub mid: f64,
    pub high: f64,
}

impl Blended {
    pub fn range(&self) -> SalaryRange {
        SalaryRange::new(self.low, self.high)
    }
}

/// Blend with weights clamped into `[0, 1]`.
pub fn blend(candidates: &Candidates, weights: &BlendWeights) -> Blended {
    let weights = weights.clamped();
    let range = candidates
        .a
        .lerp(&candidates.b, weights.skills)
        .lerp(&candidates.d, weights.geo)
        .lerp(&candidates.e, weights.regression);
    Blended {
        low: range.low,
        mid: range.mid(),
        high: range.high,
    }
}
