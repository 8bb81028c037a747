use std::fs;
use std::path::{Path, PathBuf};

use salary_standards::hash::sha256_hex;
use salary_standards::{DoctorReport, SalaryTables, StandardsError, StandardsRegistry};

fn shipped_standards() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../standards")
}

/// Copy the shipped standards into a scratch directory so tests can tamper
/// with individual files.
fn scratch_copy() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let src = shipped_standards();
    fs::create_dir_all(dir.path().join("tables")).unwrap();
    for rel in [
        "manifest.toml",
        "tables/aliases.toml",
        "tables/baselines.csv",
        "tables/factors.toml",
    ] {
        fs::copy(src.join(rel), dir.path().join(rel)).unwrap();
    }
    dir
}

/// Overwrite a table file and re-pin its hash in the manifest.
fn rewrite_pinned(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    let old_sha = sha256_hex(&fs::read(&path).unwrap());
    fs::write(&path, contents).unwrap();
    let new_sha = sha256_hex(contents.as_bytes());
    let manifest_path = root.join("manifest.toml");
    let manifest = fs::read_to_string(&manifest_path).unwrap();
    assert!(manifest.contains(&old_sha));
    fs::write(&manifest_path, manifest.replace(&old_sha, &new_sha)).unwrap();
}

#[test]
fn shipped_standards_match_builtin_tables() {
    let (registry, summary) = StandardsRegistry::verify_and_load(&shipped_standards())
        .expect("shipped standards should verify");
    assert_eq!(summary.file_count, 3);
    assert_eq!(summary.role_count, 11);
    assert_eq!(registry.tables, SalaryTables::builtin());
}

#[test]
fn sha_mismatch_is_rejected() {
    let dir = scratch_copy();
    let path = dir.path().join("tables/baselines.csv");
    let mut contents = fs::read_to_string(&path).unwrap();
    contents.push_str("grc_analyst,principal,150000,200000\n");
    fs::write(&path, contents).unwrap();

    let err = StandardsRegistry::verify_and_load(dir.path()).unwrap_err();
    assert!(matches!(err, StandardsError::Sha256Mismatch { .. }), "{err}");
}

#[test]
fn alias_to_unknown_role_is_rejected() {
    let dir = scratch_copy();
    let aliases = fs::read_to_string(dir.path().join("tables/aliases.toml")).unwrap();
    let aliases = aliases.replace(
        "\"red team\" = \"penetration_tester\"",
        "\"red team\" = \"red_teamer\"",
    );
    rewrite_pinned(dir.path(), "tables/aliases.toml", &aliases);

    let err = StandardsRegistry::verify_and_load(dir.path()).unwrap_err();
    match err {
        StandardsError::InvalidTable { message } => assert!(message.contains("red_teamer")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn inverted_baseline_is_rejected() {
    let dir = scratch_copy();
    let baselines = fs::read_to_string(dir.path().join("tables/baselines.csv")).unwrap();
    let baselines = baselines.replace(
        "soc_analyst,entry,70000,95000",
        "soc_analyst,entry,95000,70000",
    );
    rewrite_pinned(dir.path(), "tables/baselines.csv", &baselines);

    let err = StandardsRegistry::verify_and_load(dir.path()).unwrap_err();
    assert!(err.to_string().contains("soc_analyst/entry"), "{err}");
}

#[test]
fn unexpected_file_is_rejected() {
    let dir = scratch_copy();
    fs::write(dir.path().join("tables/notes.txt"), "scratch").unwrap();

    let err = StandardsRegistry::verify_and_load(dir.path()).unwrap_err();
    assert!(matches!(err, StandardsError::UnexpectedFile { .. }), "{err}");
}

#[test]
fn unknown_manifest_role_is_rejected() {
    let dir = scratch_copy();
    let manifest_path = dir.path().join("manifest.toml");
    let manifest = fs::read_to_string(&manifest_path).unwrap();
    let manifest = manifest.replace("role = \"aliases\"", "role = \"synonyms\"");
    fs::write(&manifest_path, manifest).unwrap();

    let err = StandardsRegistry::verify_and_load(dir.path()).unwrap_err();
    match err {
        StandardsError::InvalidManifest { message } => assert!(message.contains("synonyms")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_manifest_role_is_rejected() {
    let dir = scratch_copy();
    let manifest_path = dir.path().join("manifest.toml");
    let manifest = fs::read_to_string(&manifest_path).unwrap();
    let kept: Vec<&str> = manifest
        .split("[[files]]")
        .filter(|block| !block.contains("role = \"aliases\""))
        .collect();
    fs::write(&manifest_path, kept.join("[[files]]")).unwrap();
    fs::remove_file(dir.path().join("tables/aliases.toml")).unwrap();

    let err = StandardsRegistry::verify_and_load(dir.path()).unwrap_err();
    match err {
        StandardsError::MissingRole { role } => assert_eq!(role, "aliases"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn wrong_file_kind_is_rejected() {
    let dir = scratch_copy();
    let manifest_path = dir.path().join("manifest.toml");
    let manifest = fs::read_to_string(&manifest_path).unwrap();
    fs::write(&manifest_path, manifest.replace("kind = \"csv\"", "kind = \"toml\"")).unwrap();

    let err = StandardsRegistry::verify_and_load(dir.path()).unwrap_err();
    assert!(matches!(err, StandardsError::InvalidManifest { .. }), "{err}");
}

#[test]
fn doctor_report_counts_are_stable() {
    let (registry, summary) = StandardsRegistry::verify_and_load(&shipped_standards()).unwrap();
    let report = DoctorReport::from_verify_summary(&summary, registry.files.clone());

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["schema"], "salary-guide.standards-doctor");
    assert_eq!(value["pins"]["guide"], "cybersecurity-2026");

    insta::assert_json_snapshot!(report.counts, @r#"
    {
      "files": 3,
      "roles": 11,
      "baselines": 33,
      "locations": 16,
      "skills": 31,
      "role_aliases": 17,
      "level_aliases": 10,
      "certification_aliases": 8
    }
    "#);
}
