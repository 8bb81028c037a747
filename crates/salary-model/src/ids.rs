#![deny(unsafe_code)]

//! Canonical keys used to index the lookup tables.
//!
//! Role and level keys are lowercase identifiers such as `soc_analyst` or
//! `senior`. Skill keys are additionally folded so that `Zero Trust`,
//! `zero-trust` and `zero_trust` all name the same premium entry.

use std::fmt;

use crate::ModelError;

/// Canonical role identifier (e.g. `cloud_security_engineer`).
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct RoleKey(String);

impl RoleKey {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidRoleKey(value));
        }
        Ok(Self(trimmed.to_lowercase()))
    }

    /// Build a key from a literal that is already canonical.
    pub fn from_static(value: &'static str) -> Self {
        debug_assert!(!value.trim().is_empty());
        Self(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RoleKey {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RoleKey> for String {
    fn from(key: RoleKey) -> Self {
        key.0
    }
}

/// Canonical seniority identifier (e.g. `entry`, `mid`, `senior`).
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct LevelKey(String);

impl LevelKey {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidLevelKey(value));
        }
        Ok(Self(trimmed.to_lowercase()))
    }

    /// Build a key from a literal that is already canonical.
    pub fn from_static(value: &'static str) -> Self {
        debug_assert!(!value.trim().is_empty());
        Self(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LevelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for LevelKey {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LevelKey> for String {
    fn from(key: LevelKey) -> Self {
        key.0
    }
}

/// Canonical skill or certification token (e.g. `aws_security`, `cissp`).
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct SkillKey(String);

impl SkillKey {
    /// Fold a free-form token into a skill key.
    ///
    /// Lowercases, trims, and joins words separated by whitespace or `-`
    /// with `_`.
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let folded = fold_skill_token(&value);
        if folded.is_empty() {
            return Err(ModelError::InvalidSkillKey(value));
        }
        Ok(Self(folded))
    }

    /// Build a key from a literal that is already canonical.
    pub fn from_static(value: &'static str) -> Self {
        debug_assert!(!value.trim().is_empty());
        Self(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SkillKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for SkillKey {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SkillKey> for String {
    fn from(key: SkillKey) -> Self {
        key.0
    }
}

fn fold_skill_token(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split(|ch: char| ch.is_whitespace() || ch == '-' || ch == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_key_trims_and_lowercases() {
        let key = RoleKey::new("  SOC_Analyst ").unwrap();
        assert_eq!(key.as_str(), "soc_analyst");
    }

    #[test]
    fn empty_keys_are_rejected() {
        assert!(RoleKey::new("   ").is_err());
        assert!(LevelKey::new("").is_err());
        assert!(SkillKey::new(" - _ ").is_err());
    }

    #[test]
    fn skill_key_folds_separators() {
        assert_eq!(SkillKey::new("Zero Trust").unwrap().as_str(), "zero_trust");
        assert_eq!(SkillKey::new("zero-trust").unwrap().as_str(), "zero_trust");
        assert_eq!(SkillKey::new("zero__trust").unwrap().as_str(), "zero_trust");
        assert_eq!(SkillKey::new("SIEM").unwrap().as_str(), "siem");
    }

    #[test]
    fn keys_deserialize_through_validation() {
        let key: RoleKey = serde_json::from_str("\"Threat_Hunter\"").unwrap();
        assert_eq!(key.as_str(), "threat_hunter");
        assert!(serde_json::from_str::<LevelKey>("\"  \"").is_err());
    }
}
