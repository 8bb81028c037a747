//! The five alternative estimates.

use salary_model::{Candidates, SalaryRange};

/// Skills, geographic and regression multipliers for one request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Multipliers {
    pub skills: f64,
    pub geo: f64,
    pub regression: f64,
}

impl Multipliers {
    pub const NEUTRAL: Self = Self {
        skills: 1.0,
        geo: 1.0,
        regression: 1.0,
    };
}

/// Build candidates A..E from the growth- and inflation-adjusted base.
pub fn generate_candidates(base: SalaryRange, multipliers: Multipliers) -> Candidates {
    let skills = base.scale(multipliers.skills);
    let geo = base.scale(multipliers.geo);
    let skills_geo = skills.scale(multipliers.geo);
    Candidates {
        a: base,
        b: skills,
        c: geo,
        d: skills_geo,
        e: skills_geo.scale(multipliers.regression),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_multipliers_collapse_candidates() {
        let base = SalaryRange::new(100.0, 150.0);
        let candidates = generate_candidates(base, Multipliers::NEUTRAL);
        for candidate in [
            candidates.a,
            candidates.b,
            candidates.c,
            candidates.d,
            candidates.e,
        ] {
            assert_eq!(candidate, base);
        }
    }

    #[test]
    fn candidates_compose_multipliers() {
        let base = SalaryRange::new(100.0, 200.0);
        let candidates = generate_candidates(
            base,
            Multipliers {
                skills: 1.5,
                geo: 2.0,
                regression: 0.5,
            },
        );
        assert_eq!(candidates.b, SalaryRange::new(150.0, 300.0));
        assert_eq!(candidates.c, SalaryRange::new(200.0, 400.0));
        assert_eq!(candidates.d, SalaryRange::new(300.0, 600.0));
        assert_eq!(candidates.e, SalaryRange::new(150.0, 300.0));
    }
}
