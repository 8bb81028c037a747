//! Data model for salary range projection.
//!
//! Holds the request and breakdown types shared by the lookup tables, the
//! normalizer and the prediction engine.

pub mod error;
pub mod ids;
pub mod input;
pub mod prediction;
pub mod range;
pub mod signals;
pub mod weights;

pub use error::{ModelError, Result};
pub use ids::{LevelKey, RoleKey, SkillKey};
pub use input::PredictionInput;
pub use prediction::{Candidates, PredictionBreakdown};
pub use range::SalaryRange;
pub use signals::ExtractedSignals;
pub use weights::{BlendWeights, DEFAULT_BLEND_WEIGHT};
