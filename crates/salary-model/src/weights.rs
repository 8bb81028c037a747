//! Caller-tunable blend weights.

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Default weight for each tunable signal.
pub const DEFAULT_BLEND_WEIGHT: f64 = 0.20;

/// How strongly the skills, geographic and regression signals pull the
/// estimate away from the growth + inflation baseline.
///
/// Growth and inflation are always applied in full before blending, so they
/// have no weight here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlendWeights {
    pub skills: f64,
    pub geo: f64,
    pub regression: f64,
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self {
            skills: DEFAULT_BLEND_WEIGHT,
            geo: DEFAULT_BLEND_WEIGHT,
            regression: DEFAULT_BLEND_WEIGHT,
        }
    }
}

impl BlendWeights {
    pub fn new(skills: f64, geo: f64, regression: f64) -> Result<Self, ModelError> {
        let weights = Self {
            skills,
            geo,
            regression,
        };
        weights.validate()?;
        Ok(weights)
    }

    /// All three weights set to the same value, without validation.
    pub const fn uniform(value: f64) -> Self {
        Self {
            skills: value,
            geo: value,
            regression: value,
        }
    }

    /// Reject weights that are non-finite or outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), ModelError> {
        for (name, value) in self.entries() {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ModelError::InvalidWeight { name, value });
            }
        }
        Ok(())
    }

    /// Copy with every weight clamped into `[0, 1]`; NaN becomes 0.
    #[must_use]
    pub fn clamped(&self) -> Self {
        Self {
            skills: clamp_unit(self.skills),
            geo: clamp_unit(self.geo),
            regression: clamp_unit(self.regression),
        }
    }

    fn entries(&self) -> [(&'static str, f64); 3] {
        [
            ("skills", self.skills),
            ("geo", self.geo),
            ("regression", self.regression),
        ]
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
