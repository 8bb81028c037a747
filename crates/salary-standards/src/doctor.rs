#![deny(unsafe_code)]

use crate::manifest::{ManifestFile, Pins};
use crate::registry::VerifySummary;

#[derive(Debug, Clone, serde::Serialize)]
pub struct DoctorReport {
    pub schema: String,
    pub schema_version: u32,
    pub guide: String,
    pub pins: Pins,
    pub files: Vec<ManifestFile>,
    pub counts: DoctorCounts,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct DoctorCounts {
    pub files: usize,
    pub roles: usize,
    pub baselines: usize,
    pub locations: usize,
    pub skills: usize,
    pub role_aliases: usize,
    pub level_aliases: usize,
    pub certification_aliases: usize,
}

impl DoctorReport {
    pub fn from_verify_summary(summary: &VerifySummary, files: Vec<ManifestFile>) -> Self {
        Self {
            schema: "salary-guide.standards-doctor".to_string(),
            schema_version: 1,
            guide: summary.guide.clone(),
            pins: summary.manifest_pins.clone(),
            files,
            counts: DoctorCounts {
                files: summary.file_count,
                roles: summary.role_count,
                baselines: summary.baseline_count,
                locations: summary.location_count,
                skills: summary.skill_count,
                role_aliases: summary.role_alias_count,
                level_aliases: summary.level_alias_count,
                certification_aliases: summary.certification_alias_count,
            },
        }
    }
}
