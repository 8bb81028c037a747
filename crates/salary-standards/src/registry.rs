#![deny(unsafe_code)]

//! Verification and loading of an on-disk standards directory.
//!
//! A directory holds `manifest.toml` plus exactly the files it lists. Each
//! file fills one [`TableRole`] and is pinned by sha256; anything on disk
//! that the manifest does not name is rejected.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info};

use crate::error::StandardsError;
use crate::hash::sha256_hex;
use crate::loaders::{
    AliasesFile, FactorsFile, load_aliases_toml, load_factors_toml, parse_baselines_csv,
};
use crate::manifest::{MANIFEST_SCHEMA, MANIFEST_SCHEMA_VERSION, Manifest, ManifestFile, Pins};
use crate::tables::SalaryTables;

const MANIFEST_FILE: &str = "manifest.toml";

/// The part of the lookup tables a manifest file provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TableRole {
    Baselines,
    Factors,
    Aliases,
}

impl TableRole {
    pub const ALL: [TableRole; 3] = [TableRole::Baselines, TableRole::Factors, TableRole::Aliases];

    pub fn as_str(self) -> &'static str {
        match self {
            TableRole::Baselines => "baselines",
            TableRole::Factors => "factors",
            TableRole::Aliases => "aliases",
        }
    }

    /// File kind the manifest must declare for this role.
    pub fn kind(self) -> &'static str {
        match self {
            TableRole::Baselines => "csv",
            TableRole::Factors | TableRole::Aliases => "toml",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.as_str() == value)
    }
}

impl fmt::Display for TableRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counts reported after a successful load.
#[derive(Debug, Clone, serde::Serialize)]
pub struct VerifySummary {
    pub standards_dir: PathBuf,
    pub manifest_pins: Pins,
    pub guide: String,
    pub file_count: usize,
    pub role_count: usize,
    pub baseline_count: usize,
    pub location_count: usize,
    pub skill_count: usize,
    pub role_alias_count: usize,
    pub level_alias_count: usize,
    pub certification_alias_count: usize,
}

impl VerifySummary {
    fn new(standards_dir: &Path, pins: &Pins, file_count: usize, tables: &SalaryTables) -> Self {
        Self {
            standards_dir: standards_dir.to_path_buf(),
            manifest_pins: pins.clone(),
            guide: tables.guide().to_string(),
            file_count,
            role_count: tables.role_keys().count(),
            baseline_count: tables.baseline_count(),
            location_count: tables.locations().len(),
            skill_count: tables.skill_premiums().len(),
            role_alias_count: tables.role_aliases().len(),
            level_alias_count: tables.level_aliases().len(),
            certification_alias_count: tables.certification_aliases().len(),
        }
    }
}

/// A verified standards directory and the tables loaded from it.
#[derive(Debug, Clone)]
pub struct StandardsRegistry {
    pub manifest: Manifest,
    /// Manifest entries sorted by path.
    pub files: Vec<ManifestFile>,
    pub tables: SalaryTables,
}

impl StandardsRegistry {
    pub fn verify_and_load(standards_dir: &Path) -> Result<(Self, VerifySummary), StandardsError> {
        let manifest = read_manifest(&standards_dir.join(MANIFEST_FILE))?;
        let by_role = index_files(&manifest)?;
        reject_unlisted_files(standards_dir, &manifest)?;

        for (role, file) in &by_role {
            verify_pin(standards_dir, file)?;
            debug!(%role, path = %file.path, "verified standards file");
        }

        let path_of = |role: TableRole| {
            by_role
                .get(&role)
                .map(|file| standards_dir.join(&file.path))
                .ok_or_else(|| StandardsError::MissingRole {
                    role: role.to_string(),
                })
        };
        let tables = assemble_tables(
            &path_of(TableRole::Baselines)?,
            load_factors_toml(&path_of(TableRole::Factors)?)?,
            load_aliases_toml(&path_of(TableRole::Aliases)?)?,
        )?;

        let mut files = manifest.files.clone();
        files.sort_by(|a, b| a.path.cmp(&b.path));
        let summary = VerifySummary::new(standards_dir, &manifest.pins, files.len(), &tables);
        info!(
            dir = %standards_dir.display(),
            guide = %summary.guide,
            roles = summary.role_count,
            baselines = summary.baseline_count,
            "loaded salary standards"
        );

        Ok((
            Self {
                manifest,
                files,
                tables,
            },
            summary,
        ))
    }

    pub fn into_tables(self) -> SalaryTables {
        self.tables
    }
}

fn assemble_tables(
    baselines_path: &Path,
    factors: FactorsFile,
    aliases: AliasesFile,
) -> Result<SalaryTables, StandardsError> {
    let mut builder = SalaryTables::builder(factors.defaults.role, factors.defaults.level)
        .guide(factors.guide.name)
        .projection(factors.projection)
        .default_growth_rate(factors.growth.default)
        .inflation_multiplier(factors.inflation.multiplier)
        .default_location_multiplier(factors.locations.default)
        .skills_policy(factors.skills.policy)
        .regression(factors.regression.into());

    for row in parse_baselines_csv(baselines_path)? {
        builder = builder.baseline(row.role, row.level, row.range);
    }
    for (role, rate) in factors.growth.roles {
        builder = builder.growth_rate(role, rate);
    }
    for (code, multiplier) in &factors.locations.codes {
        builder = builder.location(code, *multiplier);
    }
    for (skill, premium) in factors.skills.premiums {
        builder = builder.skill_premium(skill, premium);
    }
    for (phrase, role) in aliases.roles {
        builder = builder.role_alias(&phrase, role);
    }
    for (phrase, level) in aliases.levels {
        builder = builder.level_alias(&phrase, level);
    }
    for (phrase, skill) in aliases.certifications {
        builder = builder.certification_alias(&phrase, skill);
    }

    builder.build()
}

fn read_manifest(path: &Path) -> Result<Manifest, StandardsError> {
    let contents = fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
    let manifest: Manifest = toml::from_str(&contents).map_err(|e| StandardsError::Toml {
        path: path.to_path_buf(),
        source: e,
    })?;

    let header = &manifest.manifest;
    if header.schema != MANIFEST_SCHEMA {
        return Err(invalid_manifest(format!("unsupported schema: {}", header.schema)));
    }
    if header.schema_version != MANIFEST_SCHEMA_VERSION {
        return Err(invalid_manifest(format!(
            "unsupported schema_version: {}",
            header.schema_version
        )));
    }
    Ok(manifest)
}

/// Map every manifest entry to its role; each role must appear exactly once.
fn index_files(manifest: &Manifest) -> Result<BTreeMap<TableRole, &ManifestFile>, StandardsError> {
    let mut by_role = BTreeMap::new();
    for file in &manifest.files {
        let role = TableRole::parse(&file.role).ok_or_else(|| {
            invalid_manifest(format!("unknown role '{}' for {}", file.role, file.path))
        })?;
        if file.kind != role.kind() {
            return Err(invalid_manifest(format!(
                "{} must be a {} file, manifest says '{}'",
                file.path,
                role.kind(),
                file.kind
            )));
        }
        check_sha(file)?;
        check_relative(&file.path)?;
        if by_role.insert(role, file).is_some() {
            return Err(StandardsError::DuplicateRole {
                role: role.to_string(),
            });
        }
    }

    if let Some(missing) = TableRole::ALL.into_iter().find(|role| !by_role.contains_key(role)) {
        return Err(StandardsError::MissingRole {
            role: missing.to_string(),
        });
    }
    Ok(by_role)
}

fn reject_unlisted_files(standards_dir: &Path, manifest: &Manifest) -> Result<(), StandardsError> {
    let listed: BTreeSet<PathBuf> = manifest
        .files
        .iter()
        .map(|file| without_cur_dir(Path::new(&file.path)))
        .collect();

    let unlisted = files_under(standards_dir)?
        .into_iter()
        .find(|rel| rel != Path::new(MANIFEST_FILE) && !listed.contains(&without_cur_dir(rel)));
    match unlisted {
        Some(rel) => Err(StandardsError::UnexpectedFile {
            path: standards_dir.join(rel),
        }),
        None => Ok(()),
    }
}

fn verify_pin(standards_dir: &Path, file: &ManifestFile) -> Result<(), StandardsError> {
    let path = standards_dir.join(&file.path);
    let bytes = fs::read(&path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => StandardsError::MissingFile { path: path.clone() },
        _ => StandardsError::io(&path, e),
    })?;

    let actual = sha256_hex(&bytes);
    let expected = file.sha256.to_ascii_lowercase();
    if actual == expected {
        Ok(())
    } else {
        Err(StandardsError::Sha256Mismatch {
            path,
            expected,
            actual,
        })
    }
}

fn check_sha(file: &ManifestFile) -> Result<(), StandardsError> {
    if file.sha256.len() == 64 && file.sha256.chars().all(|c| c.is_ascii_hexdigit()) {
        return Ok(());
    }
    Err(StandardsError::InvalidSha256 {
        path: PathBuf::from(&file.path),
        message: "sha256 must be 64 hex characters".to_string(),
    })
}

fn check_relative(path: &str) -> Result<(), StandardsError> {
    let message = if path.contains('\\') {
        "manifest path must use '/' separators"
    } else if Path::new(path).is_absolute() {
        "manifest path must be relative"
    } else if Path::new(path)
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        "manifest path must stay inside the standards directory"
    } else {
        return Ok(());
    };
    Err(StandardsError::InvalidPath {
        path: PathBuf::from(path),
        message: message.to_string(),
    })
}

/// Every regular file below `root`, relative to it.
fn files_under(root: &Path) -> Result<BTreeSet<PathBuf>, StandardsError> {
    let mut pending = vec![root.to_path_buf()];
    let mut found = BTreeSet::new();

    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir).map_err(|e| StandardsError::io(&dir, e))? {
            let path = entry.map_err(|e| StandardsError::io(&dir, e))?.path();
            if path.is_dir() {
                pending.push(path);
            } else if path.is_file()
                && let Ok(rel) = path.strip_prefix(root)
            {
                found.insert(rel.to_path_buf());
            }
        }
    }
    Ok(found)
}

fn without_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

fn invalid_manifest(message: String) -> StandardsError {
    StandardsError::InvalidManifest { message }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &str, sha256: &str) -> ManifestFile {
        ManifestFile {
            path: path.to_string(),
            sha256: sha256.to_string(),
            kind: "csv".to_string(),
            role: "baselines".to_string(),
            notes: None,
        }
    }

    #[test]
    fn sha_must_be_hex_of_right_length() {
        assert!(check_sha(&entry("x.csv", &"a".repeat(64))).is_ok());
        assert!(check_sha(&entry("x.csv", &"a".repeat(63))).is_err());
        assert!(check_sha(&entry("x.csv", &"g".repeat(64))).is_err());
    }

    #[test]
    fn manifest_paths_stay_inside_root() {
        assert!(check_relative("tables/baselines.csv").is_ok());
        assert!(check_relative("../secrets.toml").is_err());
        assert!(check_relative("/etc/passwd").is_err());
        assert!(check_relative("tables\\baselines.csv").is_err());
    }

    #[test]
    fn current_dir_components_are_ignored() {
        assert_eq!(
            without_cur_dir(Path::new("./tables/./factors.toml")),
            PathBuf::from("tables/factors.toml")
        );
    }

    #[test]
    fn roles_declare_their_file_kind() {
        assert_eq!(TableRole::parse("baselines"), Some(TableRole::Baselines));
        assert_eq!(TableRole::parse("synonyms"), None);
        assert_eq!(TableRole::Baselines.kind(), "csv");
        assert_eq!(TableRole::Aliases.kind(), "toml");
    }
}
