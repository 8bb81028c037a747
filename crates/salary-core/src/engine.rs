//! End-to-end prediction: resolve, look up, adjust, blend.

use std::collections::BTreeSet;

use salary_map::{InputNormalizer, MatchMethod, SignalExtractor};
use salary_model::{
    BlendWeights, ExtractedSignals, LevelKey, PredictionBreakdown, PredictionInput, RoleKey,
    SalaryRange, SkillKey,
};
use salary_standards::SalaryTables;
use tracing::{debug, warn};

use crate::blend::blend;
use crate::candidates::{Multipliers, generate_candidates};
use crate::factors::{
    apply_growth, apply_inflation, geo_multiplier, regression_multiplier, skills_multiplier,
};

/// Where a resolved role or level came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Detected in the job description.
    Description,
    /// Taken from the explicit request field.
    Request(MatchMethod),
}

/// Canonical view of a request after normalization and extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRequest {
    pub role: RoleKey,
    pub role_source: Source,
    pub level: LevelKey,
    pub level_source: Source,
    pub skills: BTreeSet<SkillKey>,
    pub signals: ExtractedSignals,
}

/// Projects salary ranges from immutable tables and fixed blend weights.
///
/// The engine owns everything it needs, performs no I/O, and never fails:
/// unknown roles, levels, skills and locations fall back to table defaults.
#[derive(Debug, Clone)]
pub struct PredictionEngine {
    tables: SalaryTables,
    weights: BlendWeights,
    normalizer: InputNormalizer,
    extractor: SignalExtractor,
}

impl Default for PredictionEngine {
    fn default() -> Self {
        Self::new(SalaryTables::builtin(), BlendWeights::default())
    }
}

impl PredictionEngine {
    pub fn new(tables: SalaryTables, weights: BlendWeights) -> Self {
        let normalizer = InputNormalizer::new(&tables);
        let extractor = SignalExtractor::new(&tables);
        Self {
            tables,
            weights,
            normalizer,
            extractor,
        }
    }

    pub fn tables(&self) -> &SalaryTables {
        &self.tables
    }

    pub fn weights(&self) -> &BlendWeights {
        &self.weights
    }

    pub fn normalizer(&self) -> &InputNormalizer {
        &self.normalizer
    }

    pub fn extractor(&self) -> &SignalExtractor {
        &self.extractor
    }

    /// Normalize the request and merge in description signals.
    ///
    /// Roles and levels found in the description override the explicit
    /// fields; description skills are added to the explicit ones.
    pub fn resolve(&self, input: &PredictionInput) -> ResolvedRequest {
        let signals = input
            .description
            .as_deref()
            .map(|text| self.extractor.extract(text))
            .unwrap_or_default();

        let (role, role_source) = match &signals.role {
            Some(role) => (role.clone(), Source::Description),
            None => {
                let resolved = self.normalizer.resolve_role(&input.role);
                if resolved.method.is_fallback() {
                    warn!(
                        role = %input.role,
                        default = %resolved.key,
                        "unrecognized role, using default"
                    );
                }
                (resolved.key, Source::Request(resolved.method))
            }
        };

        let (mut level, mut level_source) = match &signals.level {
            Some(level) => (level.clone(), Source::Description),
            None => {
                let resolved = self.normalizer.resolve_level(&input.level);
                if resolved.method.is_fallback() {
                    warn!(
                        level = %input.level,
                        default = %resolved.key,
                        "unrecognized level, using default"
                    );
                }
                (resolved.key, Source::Request(resolved.method))
            }
        };

        if self.tables.baseline(&role, &level).is_none() {
            warn!(%role, %level, "no baseline for level, using default level");
            level = self.tables.default_level().clone();
            level_source = Source::Request(MatchMethod::Fallback);
        }

        let mut skills: BTreeSet<SkillKey> = input
            .skills
            .iter()
            .filter_map(|raw| SkillKey::new(raw.as_str()).ok())
            .collect();
        skills.extend(signals.skills.iter().cloned());

        ResolvedRequest {
            role,
            role_source,
            level,
            level_source,
            skills,
            signals,
        }
    }

    pub fn predict(&self, input: &PredictionInput) -> PredictionBreakdown {
        self.predict_resolved(input, self.resolve(input))
    }

    /// Finish a prediction from a request already produced by [`Self::resolve`].
    ///
    /// Years of experience and location are still read from `input`.
    pub fn predict_resolved(
        &self,
        input: &PredictionInput,
        request: ResolvedRequest,
    ) -> PredictionBreakdown {
        let tables = &self.tables;
        if !tables.is_known_location(&input.location) {
            warn!(
                location = %input.location,
                multiplier = tables.default_location_multiplier(),
                "unrecognized location, using default multiplier"
            );
        }

        let baseline = resolved_baseline(tables, &request.role, &request.level);
        let grown = apply_growth(baseline, tables, &request.role);
        let inflated = apply_inflation(grown, tables);

        let multipliers = Multipliers {
            skills: skills_multiplier(tables, &request.skills),
            geo: geo_multiplier(tables, &input.location),
            regression: regression_multiplier(
                tables,
                &request.role,
                &request.level,
                input.effective_years(),
            ),
        };
        let candidates = generate_candidates(inflated, multipliers);
        let blended = blend(&candidates, &self.weights);

        debug!(
            role = %request.role,
            level = %request.level,
            skills = multipliers.skills,
            geo = multipliers.geo,
            regression = multipliers.regression,
            final_mid = blended.mid,
            "prediction complete"
        );

        PredictionBreakdown {
            role: request.role,
            level: request.level,
            skills: request.skills,
            baseline_low: baseline.low,
            baseline_high: baseline.high,
            growth_low: grown.low,
            growth_high: grown.high,
            inflation_low: inflated.low,
            inflation_high: inflated.high,
            skills_multiplier: multipliers.skills,
            geo_multiplier: multipliers.geo,
            regression_multiplier: multipliers.regression,
            candidates,
            final_low: blended.low,
            final_mid: blended.mid,
            final_high: blended.high,
        }
    }

    pub fn predict_many(&self, inputs: &[PredictionInput]) -> Vec<PredictionBreakdown> {
        inputs.iter().map(|input| self.predict(input)).collect()
    }
}

/// Baseline for a role and level with the same fallbacks the engine uses.
pub fn resolved_baseline(tables: &SalaryTables, role: &RoleKey, level: &LevelKey) -> SalaryRange {
    tables
        .baseline(role, level)
        .or_else(|| tables.baseline(role, tables.default_level()))
        .unwrap_or_default()
}
