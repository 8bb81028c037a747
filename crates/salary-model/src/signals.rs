//! Signals recovered from an unstructured job description.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{LevelKey, RoleKey, SkillKey};

/// Best-effort extraction result.
///
/// Absence is represented by `None` or an empty set, never by an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedSignals {
    pub role: Option<RoleKey>,
    pub level: Option<LevelKey>,
    pub skills: BTreeSet<SkillKey>,
}

impl ExtractedSignals {
    pub fn is_empty(&self) -> bool {
        self.role.is_none() && self.level.is_none() && self.skills.is_empty()
    }
}
