//! Pipeline modes: load the dataset once, then check or transform and write.
//!
//! ```text
//! characters.json ──▶ load ──┬──▶ check ids
//!                            └──▶ sort ──▶ project ──▶ render ──▶ write
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use roster::{run_mode, Mode, PipelineConfig};
//!
//! let report = run_mode(Mode::Aliases, &PipelineConfig::from_env())?;
//! println!("wrote {:?}", report.written);
//! # Ok::<(), roster::PipelineError>(())
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::aliases::collect_aliases;
use super::projector::{project_dataset, DenyList};
use super::sorter::sort_by_tier;
use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::logs::{log_error, log_info, log_success, log_success_indent, log_warning};
use crate::models::{Dataset, Shape};
use crate::parser::load_dataset;
use crate::render::{render_alias_list, render_text, to_json_string, write_atomic};
use crate::validation::{check_identities, CompletenessPolicy, IdCheck};

/// One kind of pipeline invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Report duplicate ids and the maximum id
    CheckIds,
    /// Sorted, reduced JSON
    Trim,
    /// Sorted, anonymized text
    Text,
    /// Sorted alias list
    Aliases,
    /// Check ids, then produce every artifact
    All,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::CheckIds => "check-ids",
            Mode::Trim => "trim",
            Mode::Text => "text",
            Mode::Aliases => "aliases",
            Mode::All => "all",
        };
        f.write_str(name)
    }
}

/// Summary of a finished mode.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeReport {
    pub mode: Mode,
    pub shape: Shape,
    /// Entries in the source, placeholders included
    pub entries: usize,
    /// Object-valued entries
    pub records: usize,
    /// Identity outcome (`check-ids` and `all`)
    pub id_check: Option<IdCheck>,
    /// Aliases written (`aliases` and `all`)
    pub alias_count: Option<usize>,
    /// Artifacts written, in order
    pub written: Vec<PathBuf>,
}

impl ModeReport {
    fn new(mode: Mode, dataset: &Dataset) -> Self {
        Self {
            mode,
            shape: dataset.shape(),
            entries: dataset.len(),
            records: dataset.records().count(),
            id_check: None,
            alias_count: None,
            written: Vec::new(),
        }
    }
}

/// Run one mode end to end against the configured paths.
pub fn run_mode(mode: Mode, config: &PipelineConfig) -> PipelineResult<ModeReport> {
    config.validate()?;

    log_info(format!("📖 Reading {}", config.source.display()));
    let dataset = load_dataset(&config.source)?;
    log_success(format!(
        "Loaded {} entries ({}-shaped, {} records)",
        dataset.len(),
        dataset.shape(),
        dataset.records().count()
    ));

    run_on_dataset(mode, dataset, config)
}

/// Run one mode on an already-loaded dataset.
pub fn run_on_dataset(
    mode: Mode,
    dataset: Dataset,
    config: &PipelineConfig,
) -> PipelineResult<ModeReport> {
    let mut report = ModeReport::new(mode, &dataset);

    if matches!(mode, Mode::CheckIds | Mode::All) {
        report.id_check = Some(check_ids(&dataset, &config.completeness)?);
        if mode == Mode::CheckIds {
            return Ok(report);
        }
    }

    log_info("🔢 Sorting by tier...");
    let sorted = sort_by_tier(dataset);
    let tierless = sorted
        .records()
        .filter(|r| r.tier().is_absent())
        .count();
    if tierless > 0 {
        log_warning(format!("{} records have no tier and were placed last", tierless));
    }

    if matches!(mode, Mode::Trim | Mode::All) {
        let trimmed = reduced_json(sorted.clone());
        write_artifact(&config.trimmed_json, &to_json_string(&trimmed)?, &mut report)?;
    }

    if matches!(mode, Mode::Text | Mode::All) {
        let anonymized = anonymized_text(sorted.clone());
        write_artifact(&config.text, &render_text(&anonymized), &mut report)?;
    }

    if matches!(mode, Mode::Aliases | Mode::All) {
        let aliases = collect_aliases(&sorted);
        report.alias_count = Some(aliases.len());
        log_success(format!("{} aliases extracted", aliases.len()));
        write_artifact(&config.aliases, &render_alias_list(&aliases), &mut report)?;
    }

    log_success(format!("✨ {} done", mode));
    Ok(report)
}

/// Identity check that fails on duplicates.
///
/// # Errors
/// [`PipelineError::DuplicateIdentity`] with every duplicated value and the
/// maximum id among complete records.
pub fn check_ids(dataset: &Dataset, policy: &CompletenessPolicy) -> PipelineResult<IdCheck> {
    log_info("🔎 Checking for duplicate IDs...");
    let check = check_identities(dataset, policy);
    match check {
        IdCheck::Success { .. } => {
            log_success(check.to_string());
            Ok(check)
        }
        IdCheck::DuplicatesFound { duplicates, max_id } => {
            log_error(format!("{} duplicated ID value(s)", duplicates.len()));
            Err(PipelineError::DuplicateIdentity { duplicates, max_id })
        }
    }
}

/// Sorted dataset reduced for JSON round-tripping (`id` and `tier` kept).
pub fn reduced_json(sorted: Dataset) -> Dataset {
    project_dataset(sorted, &DenyList::reduced_json())
}

/// Sorted dataset stripped down for the text rendering.
pub fn anonymized_text(sorted: Dataset) -> Dataset {
    project_dataset(sorted, &DenyList::anonymized_text())
}

fn write_artifact(path: &Path, contents: &str, report: &mut ModeReport) -> PipelineResult<()> {
    write_atomic(path, contents)?;
    log_success_indent(format!("💾 Written to: {}", path.display()), 1);
    report.written.push(path.to_path_buf());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadError;
    use crate::models::Identity;
    use serde_json::{json, Value};
    use std::fs;

    fn setup(source: &Value) -> (tempfile::TempDir, PipelineConfig) {
        crate::logs::set_quiet(true);
        let dir = tempfile::tempdir().unwrap();
        let source_path = dir.path().join("characters.json");
        fs::write(&source_path, serde_json::to_string(source).unwrap()).unwrap();
        let config = PipelineConfig::default()
            .with_source(source_path)
            .with_output_dir(dir.path().join("out"));
        (dir, config)
    }

    fn scenario() -> Value {
        json!([
            {"id": 1, "name": "A", "tier": 2, "shortName": "X & Y"},
            {"id": 2, "name": "B", "tier": 1}
        ])
    }

    #[test]
    fn test_end_to_end_scenario() {
        let (_dir, config) = setup(&scenario());

        let report = run_mode(Mode::All, &config).unwrap();
        assert_eq!(report.written.len(), 3);
        assert_eq!(report.alias_count, Some(2));
        assert_eq!(
            report.id_check,
            Some(IdCheck::Success { max_id: Some(Identity::Number(2)) })
        );

        let trimmed: Value =
            serde_json::from_str(&fs::read_to_string(&config.trimmed_json).unwrap()).unwrap();
        assert_eq!(
            trimmed,
            json!([
                {"id": 2, "name": "B", "tier": 1},
                {"id": 1, "name": "A", "tier": 2}
            ])
        );

        let aliases = fs::read_to_string(&config.aliases).unwrap();
        assert_eq!(aliases, "X\nY");

        let text = fs::read_to_string(&config.text).unwrap();
        assert!(text.starts_with("Name: B"));
        assert_eq!(text, "Name: B\n\nName: A\n");
    }

    #[test]
    fn test_text_mode_strips_bookkeeping_fields() {
        let (_dir, config) = setup(&json!([
            {"id": 3, "tier": 1, "name": "Momo", "img": "m.png", "funFact": "spoons"}
        ]));

        run_mode(Mode::Text, &config).unwrap();
        let text = fs::read_to_string(&config.text).unwrap();
        assert_eq!(text, "Name: Momo\nFun Fact: spoons\n");
        assert!(!config.trimmed_json.exists());
        assert!(!config.aliases.exists());
    }

    #[test]
    fn test_trim_keeps_mapping_shape() {
        let (_dir, config) = setup(&json!({
            "riri": {"id": 2, "tier": 5, "img": "r.png"},
            "momo": {"id": 1, "tier": 1, "moe": 9}
        }));

        run_mode(Mode::Trim, &config).unwrap();
        let out: Value =
            serde_json::from_str(&fs::read_to_string(&config.trimmed_json).unwrap()).unwrap();
        let keys: Vec<&String> = out.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["momo", "riri"]);
        assert_eq!(out["riri"], json!({"id": 2, "tier": 5}));
    }

    #[test]
    fn test_duplicates_abort_all_before_writing() {
        let (_dir, config) = setup(&json!([
            {"id": 1, "name": "A"},
            {"id": 2, "name": "B"},
            {"id": 2, "name": "C"},
            {"id": 3, "name": "D"},
            {"id": null, "name": "E"}
        ]));

        let err = run_mode(Mode::All, &config).unwrap_err();
        match err {
            PipelineError::DuplicateIdentity { duplicates, max_id } => {
                assert_eq!(duplicates, vec![Identity::Number(2)]);
                assert_eq!(max_id, Some(Identity::Number(3)));
            }
            other => panic!("unexpected error: {}", other),
        }
        assert!(!config.text.exists());
        assert!(!config.trimmed_json.exists());
    }

    #[test]
    fn test_check_ids_writes_nothing() {
        let (_dir, config) = setup(&scenario());
        let report = run_mode(Mode::CheckIds, &config).unwrap();
        assert!(report.written.is_empty());
        assert_eq!(report.records, 2);
        assert!(!config.text.exists());
    }

    #[test]
    fn test_missing_source() {
        crate::logs::set_quiet(true);
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig::default()
            .with_source(dir.path().join("nope.json"))
            .with_output_dir(dir.path());

        let err = run_mode(Mode::Trim, &config).unwrap_err();
        assert!(matches!(err, PipelineError::Load(LoadError::SourceNotFound(_))));
    }

    #[test]
    fn test_malformed_source() {
        crate::logs::set_quiet(true);
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("characters.json");
        fs::write(&source, "{not json").unwrap();
        let config = PipelineConfig::default()
            .with_source(source)
            .with_output_dir(dir.path().join("out"));

        let err = run_mode(Mode::Aliases, &config).unwrap_err();
        assert!(matches!(err, PipelineError::Load(LoadError::MalformedSource(_))));
        assert!(!config.aliases.exists());
    }

    #[test]
    fn test_report_serializes_mode_and_shape() {
        let (_dir, config) = setup(&scenario());
        let report = run_mode(Mode::Aliases, &config).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["mode"], "aliases");
        assert_eq!(json["shape"], "list");
        assert_eq!(json["aliasCount"], 2);
    }
}
