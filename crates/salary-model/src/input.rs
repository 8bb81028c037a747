//! Prediction request as supplied by a caller.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One salary projection request.
///
/// Role and level are free text; the normalizer maps them onto canonical
/// table keys. Skills are an unordered set of tokens, and an optional job
/// description can enrich the request with extracted signals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionInput {
    pub role: String,
    pub level: String,
    pub years_experience: f64,
    /// Location code such as `CA`, `NY` or `REMOTE`.
    pub location: String,
    #[serde(default)]
    pub skills: BTreeSet<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl PredictionInput {
    pub fn new(
        role: impl Into<String>,
        level: impl Into<String>,
        years_experience: f64,
        location: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            level: level.into(),
            years_experience,
            location: location.into(),
            skills: BTreeSet::new(),
            description: None,
        }
    }

    #[must_use]
    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = if description.trim().is_empty() {
            None
        } else {
            Some(description)
        };
        self
    }

    /// Years of experience with negative and non-finite values read as zero.
    pub fn effective_years(&self) -> f64 {
        if self.years_experience.is_finite() && self.years_experience > 0.0 {
            self.years_experience
        } else {
            0.0
        }
    }
}
