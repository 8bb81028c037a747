//! Best-effort role, level and skill detection in job descriptions.

use std::collections::BTreeSet;

use regex::Regex;
use salary_model::{ExtractedSignals, LevelKey, RoleKey, SkillKey};
use salary_standards::SalaryTables;
use tracing::{debug, warn};

use crate::utils::{normalize_text, phrase_priority, prioritized};

#[derive(Debug, Clone)]
struct LevelPattern {
    phrase: String,
    regex: Regex,
    level: LevelKey,
}

#[derive(Debug, Clone)]
struct SkillPattern {
    spaced: String,
    raw: String,
    skill: SkillKey,
}

/// Scans free text for signals the caller did not supply explicitly.
///
/// Role aliases match as plain substrings, level aliases only at word
/// boundaries (`lead` must not fire on `leadership`), and skills match on
/// either their spaced or underscored spelling. Alias lists are scanned
/// longest phrase first so that `cloud security engineer` beats
/// `security engineer`.
#[derive(Debug, Clone)]
pub struct SignalExtractor {
    roles: Vec<(String, RoleKey)>,
    levels: Vec<LevelPattern>,
    skills: Vec<SkillPattern>,
    certifications: Vec<(String, SkillKey)>,
}

impl SignalExtractor {
    pub fn new(tables: &SalaryTables) -> Self {
        let mut levels: Vec<LevelPattern> = tables
            .level_aliases()
            .iter()
            .filter_map(|(phrase, level)| {
                let pattern = format!(r"\b{}\b", regex::escape(phrase));
                match Regex::new(&pattern) {
                    Ok(regex) => Some(LevelPattern {
                        phrase: phrase.clone(),
                        regex,
                        level: level.clone(),
                    }),
                    Err(error) => {
                        warn!(%phrase, %error, "skipping level alias that does not compile");
                        None
                    }
                }
            })
            .collect();
        levels.sort_by(|a, b| phrase_priority(&a.phrase, &b.phrase));

        let skills = tables
            .skill_premiums()
            .keys()
            .map(|skill| SkillPattern {
                spaced: skill.as_str().replace('_', " "),
                raw: skill.as_str().to_string(),
                skill: skill.clone(),
            })
            .collect();

        Self {
            roles: prioritized(tables.role_aliases()),
            levels,
            skills,
            certifications: prioritized(tables.certification_aliases()),
        }
    }

    /// Extract signals from `text`; empty input yields empty signals.
    pub fn extract(&self, text: &str) -> ExtractedSignals {
        let text = normalize_text(text);
        if text.is_empty() {
            return ExtractedSignals::default();
        }

        let signals = ExtractedSignals {
            role: self.detect_role(&text),
            level: self.detect_level(&text),
            skills: self.detect_skills(&text),
        };
        debug!(
            role = ?signals.role.as_ref().map(RoleKey::as_str),
            level = ?signals.level.as_ref().map(LevelKey::as_str),
            skills = signals.skills.len(),
            "extracted description signals"
        );
        signals
    }

    fn detect_role(&self, text: &str) -> Option<RoleKey> {
        self.roles
            .iter()
            .find(|(phrase, _)| text.contains(phrase.as_str()))
            .map(|(_, role)| role.clone())
    }

    fn detect_level(&self, text: &str) -> Option<LevelKey> {
        self.levels
            .iter()
            .find(|pattern| pattern.regex.is_match(text))
            .map(|pattern| pattern.level.clone())
    }

    fn detect_skills(&self, text: &str) -> BTreeSet<SkillKey> {
        let mut found: BTreeSet<SkillKey> = self
            .skills
            .iter()
            .filter(|pattern| text.contains(&pattern.spaced) || text.contains(&pattern.raw))
            .map(|pattern| pattern.skill.clone())
            .collect();
        found.extend(
            self.certifications
                .iter()
                .filter(|(phrase, _)| text.contains(phrase.as_str()))
                .map(|(_, skill)| skill.clone()),
        );
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> SignalExtractor {
        SignalExtractor::new(&SalaryTables::builtin())
    }

    #[test]
    fn empty_text_yields_nothing() {
        assert!(extractor().extract("").is_empty());
        assert!(extractor().extract("   \n ").is_empty());
    }

    #[test]
    fn lead_does_not_match_leadership() {
        let signals = extractor().extract("Strong leadership skills required.");
        assert_eq!(signals.level, None);
        let signals = extractor().extract("Team Lead, threat hunter");
        assert_eq!(signals.level.as_ref().map(LevelKey::as_str), Some("senior"));
        assert_eq!(signals.role.as_ref().map(RoleKey::as_str), Some("threat_hunter"));
    }

    #[test]
    fn hyphenated_level_prefers_longest_phrase() {
        let signals = extractor().extract("Hiring a mid-level appsec engineer");
        assert_eq!(signals.level.as_ref().map(LevelKey::as_str), Some("mid"));
        assert_eq!(signals.role.as_ref().map(RoleKey::as_str), Some("appsec_engineer"));
    }

    #[test]
    fn cloud_role_beats_generic_security_engineer() {
        let text = "Senior Cloud Security Engineer - AWS, Kubernetes, Terraform, CNAPP, CCSP.";
        let signals = extractor().extract(text);
        assert_eq!(
            signals.role.as_ref().map(RoleKey::as_str),
            Some("cloud_security_engineer")
        );
        assert_eq!(signals.level.as_ref().map(LevelKey::as_str), Some("senior"));
        let skills: Vec<&str> = signals.skills.iter().map(SkillKey::as_str).collect();
        assert_eq!(skills, vec!["ccsp", "cnapp", "kubernetes", "terraform"]);
    }

    #[test]
    fn spaced_and_underscored_skills_match() {
        let signals = extractor().extract("zero trust rollout and secure_sdlc ownership");
        assert!(signals.skills.contains(&SkillKey::from_static("zero_trust")));
        assert!(signals.skills.contains(&SkillKey::from_static("secure_sdlc")));
    }

    #[test]
    fn security_plus_aliases_fold_to_one_skill() {
        for text in ["Security+ certified", "holds Security Plus"] {
            let signals = extractor().extract(text);
            assert!(
                signals.skills.contains(&SkillKey::from_static("security_plus")),
                "{text}"
            );
        }
    }
}
