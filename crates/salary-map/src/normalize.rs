//! Free-text role and level to canonical table keys.
//!
//! Both resolvers are total: anything that matches nothing falls back to the
//! table defaults, and the [`MatchMethod`] records how the key was found.

use std::collections::BTreeSet;

use rapidfuzz::distance::jaro_winkler;
use salary_model::{LevelKey, RoleKey};
use salary_standards::SalaryTables;
use serde::Serialize;
use tracing::debug;

use crate::utils::{canonical_form, normalize_text, prioritized};

/// Minimum Jaro-Winkler similarity for a role suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.80;

/// How a free-text value was mapped onto a canonical key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    /// The whole input equals an alias phrase.
    Exact,
    /// An alias phrase occurs inside the input.
    Contains,
    /// The input already spells a table key.
    CanonicalKey,
    /// Nothing matched; the table default was used.
    Fallback,
}

impl MatchMethod {
    pub fn is_fallback(self) -> bool {
        matches!(self, Self::Fallback)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolved<K> {
    pub key: K,
    pub method: MatchMethod,
}

/// Closest alias to an unrecognised role string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleSuggestion {
    pub phrase: String,
    pub role: RoleKey,
    pub similarity: f64,
}

/// Maps role and level strings onto keys present in the baseline table.
#[derive(Debug, Clone)]
pub struct InputNormalizer {
    role_aliases: Vec<(String, RoleKey)>,
    level_aliases: Vec<(String, LevelKey)>,
    roles: BTreeSet<RoleKey>,
    levels: BTreeSet<LevelKey>,
    default_role: RoleKey,
    default_level: LevelKey,
}

impl InputNormalizer {
    pub fn new(tables: &SalaryTables) -> Self {
        let roles: BTreeSet<RoleKey> = tables.role_keys().cloned().collect();
        let levels: BTreeSet<LevelKey> = roles
            .iter()
            .flat_map(|role| tables.levels_for(role).map(|(level, _)| level.clone()))
            .collect();
        Self {
            role_aliases: prioritized(tables.role_aliases()),
            level_aliases: prioritized(tables.level_aliases()),
            roles,
            levels,
            default_role: tables.default_role().clone(),
            default_level: tables.default_level().clone(),
        }
    }

    pub fn normalize_role(&self, raw: &str) -> RoleKey {
        self.resolve_role(raw).key
    }

    pub fn normalize_level(&self, raw: &str) -> LevelKey {
        self.resolve_level(raw).key
    }

    pub fn resolve_role(&self, raw: &str) -> Resolved<RoleKey> {
        let resolved = resolve(
            raw,
            &self.role_aliases,
            |candidate| {
                RoleKey::new(candidate)
                    .ok()
                    .filter(|key| self.roles.contains(key))
            },
            &self.default_role,
        );
        debug!(method = ?resolved.method, role = %resolved.key, "resolved role");
        resolved
    }

    pub fn resolve_level(&self, raw: &str) -> Resolved<LevelKey> {
        let resolved = resolve(
            raw,
            &self.level_aliases,
            |candidate| {
                LevelKey::new(candidate)
                    .ok()
                    .filter(|key| self.levels.contains(key))
            },
            &self.default_level,
        );
        debug!(method = ?resolved.method, level = %resolved.key, "resolved level");
        resolved
    }

    /// Closest known role phrase, for diagnostics only.
    ///
    /// Compares against alias phrases and the spelled-out table keys and
    /// returns the best match at or above the similarity threshold.
    pub fn suggest_role(&self, raw: &str) -> Option<RoleSuggestion> {
        let needle = normalize_text(raw);
        if needle.is_empty() {
            return None;
        }
        let key_phrases = self
            .roles
            .iter()
            .map(|role| (role.as_str().replace('_', " "), role));
        self.role_aliases
            .iter()
            .map(|(phrase, role)| (phrase.clone(), role))
            .chain(key_phrases)
            .map(|(phrase, role)| {
                let similarity = jaro_winkler::similarity(needle.chars(), phrase.chars());
                (phrase, role, similarity)
            })
            .filter(|(_, _, similarity)| *similarity >= SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.2.total_cmp(&b.2).then_with(|| b.0.cmp(&a.0)))
            .map(|(phrase, role, similarity)| RoleSuggestion {
                phrase,
                role: role.clone(),
                similarity,
            })
    }
}

fn resolve<K: Clone>(
    raw: &str,
    aliases: &[(String, K)],
    canonical: impl Fn(&str) -> Option<K>,
    default: &K,
) -> Resolved<K> {
    let text = normalize_text(raw);

    if let Some((_, key)) = aliases.iter().find(|(phrase, _)| *phrase == text) {
        return Resolved {
            key: key.clone(),
            method: MatchMethod::Exact,
        };
    }

    if !text.is_empty()
        && let Some((_, key)) = aliases
            .iter()
            .find(|(phrase, _)| text.contains(phrase.as_str()))
    {
        return Resolved {
            key: key.clone(),
            method: MatchMethod::Contains,
        };
    }

    if let Some(key) = canonical(&canonical_form(raw)) {
        return Resolved {
            key,
            method: MatchMethod::CanonicalKey,
        };
    }

    Resolved {
        key: default.clone(),
        method: MatchMethod::Fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> InputNormalizer {
        InputNormalizer::new(&SalaryTables::builtin())
    }

    #[test]
    fn exact_alias_wins() {
        let resolved = normalizer().resolve_role("  Cloud Security Engineer ");
        assert_eq!(resolved.key.as_str(), "cloud_security_engineer");
        assert_eq!(resolved.method, MatchMethod::Exact);
    }

    #[test]
    fn longest_contained_alias_wins() {
        let resolved = normalizer().resolve_role("Senior Cloud Security Engineer (remote)");
        assert_eq!(resolved.key.as_str(), "cloud_security_engineer");
        assert_eq!(resolved.method, MatchMethod::Contains);
    }

    #[test]
    fn canonical_key_is_accepted() {
        let normalizer = normalizer();
        let resolved = normalizer.resolve_role("threat_hunter");
        assert_eq!(resolved.key.as_str(), "threat_hunter");
        assert_eq!(resolved.method, MatchMethod::CanonicalKey);
        assert_eq!(
            normalizer.normalize_role("Incident Response DFIR").as_str(),
            "incident_response_dfir"
        );
    }

    #[test]
    fn unknown_role_falls_back_to_default() {
        let resolved = normalizer().resolve_role("Chief Cat Herder");
        assert_eq!(resolved.key.as_str(), "cybersecurity_engineer");
        assert!(resolved.method.is_fallback());
        assert_eq!(normalizer().normalize_role("").as_str(), "cybersecurity_engineer");
    }

    #[test]
    fn level_aliases_and_fallback() {
        let normalizer = normalizer();
        assert_eq!(normalizer.normalize_level("Principal").as_str(), "senior");
        assert_eq!(normalizer.normalize_level("Entry-Level").as_str(), "entry");
        assert_eq!(normalizer.normalize_level("intermediate").as_str(), "mid");
        assert_eq!(normalizer.normalize_level("wizard").as_str(), "mid");
        assert_eq!(normalizer.resolve_level("").method, MatchMethod::Fallback);
    }

    #[test]
    fn suggestion_for_typo() {
        let suggestion = normalizer().suggest_role("penetraton tester").unwrap();
        assert_eq!(suggestion.role.as_str(), "penetration_tester");
        assert!(suggestion.similarity >= SUGGESTION_THRESHOLD);
        assert!(normalizer().suggest_role("").is_none());
    }
}
