//! Low/high salary pairs and the arithmetic the engine applies to them.

use serde::{Deserialize, Serialize};

/// A `(low, high)` salary pair in currency units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SalaryRange {
    pub low: f64,
    pub high: f64,
}

impl SalaryRange {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Midpoint of the range.
    pub fn mid(&self) -> f64 {
        (self.low + self.high) / 2.0
    }

    /// Multiply both bounds by the same factor.
    #[must_use]
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            low: self.low * factor,
            high: self.high * factor,
        }
    }

    /// Linear interpolation toward `other`: `(1 - w) * self + w * other`.
    #[must_use]
    pub fn lerp(&self, other: &SalaryRange, weight: f64) -> Self {
        Self {
            low: lerp(self.low, other.low, weight),
            high: lerp(self.high, other.high, weight),
        }
    }

    /// True when `0 <= low <= high` and both bounds are finite.
    pub fn is_well_formed(&self) -> bool {
        self.low.is_finite() && self.high.is_finite() && self.low >= 0.0 && self.low <= self.high
    }
}

fn lerp(x: f64, y: f64, w: f64) -> f64 {
    (1.0 - w) * x + w * y
}
