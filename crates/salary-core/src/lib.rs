//! Salary range projection engine.
//!
//! A request is normalized (role and level aliases, description signals),
//! its baseline is grown and inflated to the target year, five candidate
//! estimates are built from the skills, geographic and regression
//! multipliers, and the candidates are blended into the final range.

pub mod blend;
pub mod candidates;
pub mod engine;
pub mod factors;

pub use blend::{Blended, blend};
pub use candidates::{Multipliers, generate_candidates};
pub use engine::{PredictionEngine, ResolvedRequest, Source, resolved_baseline};
