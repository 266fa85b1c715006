//! Pipeline configuration.
//!
//! Paths are fixed per mode; the defaults match the layout of the roster
//! site repository. `ROSTER_SOURCE` and `ROSTER_OUTPUT_DIR` (optionally from
//! a `.env` file) and CLI flags can override them.

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, PipelineResult};
use crate::validation::CompletenessPolicy;

/// Overrides the source dataset path.
pub const SOURCE_ENV: &str = "ROSTER_SOURCE";

/// Overrides the directory every output is written to.
pub const OUTPUT_DIR_ENV: &str = "ROSTER_OUTPUT_DIR";

const DEFAULT_SOURCE: &str = "src/assets/data/characters.json";
const DEFAULT_TRIMMED_JSON: &str = "characters.trimmed.json";
const DEFAULT_TEXT: &str = "characters.txt";
const DEFAULT_ALIASES: &str = "shortnames.csv";

/// Where each mode reads and writes, plus the identity check policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PipelineConfig {
    /// Source dataset
    pub source: PathBuf,

    /// Reduced JSON output (`trim`)
    pub trimmed_json: PathBuf,

    /// Text output (`text`)
    pub text: PathBuf,

    /// Alias list output (`aliases`)
    pub aliases: PathBuf,

    /// Which records take part in the identity check
    pub completeness: CompletenessPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from(DEFAULT_SOURCE),
            trimmed_json: PathBuf::from(DEFAULT_TRIMMED_JSON),
            text: PathBuf::from(DEFAULT_TEXT),
            aliases: PathBuf::from(DEFAULT_ALIASES),
            completeness: CompletenessPolicy::default(),
        }
    }
}

impl PipelineConfig {
    /// Defaults with overrides from the environment (and `.env`, if present).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::default().with_env_lookup(|key| env::var(key).ok())
    }

    /// Apply `ROSTER_SOURCE` / `ROSTER_OUTPUT_DIR` as resolved by `lookup`.
    pub fn with_env_lookup(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(source) = lookup(SOURCE_ENV).filter(|s| !s.is_empty()) {
            self.source = PathBuf::from(source);
        }
        if let Some(dir) = lookup(OUTPUT_DIR_ENV).filter(|s| !s.is_empty()) {
            self = self.with_output_dir(dir);
        }
        self
    }

    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = source.into();
        self
    }

    /// Move every output into `dir`, keeping the file names.
    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        self.trimmed_json = rebase(&self.trimmed_json, dir);
        self.text = rebase(&self.text, dir);
        self.aliases = rebase(&self.aliases, dir);
        self
    }

    pub fn with_completeness(mut self, policy: CompletenessPolicy) -> Self {
        self.completeness = policy;
        self
    }

    /// Reject configurations where one output would clobber another, or
    /// where a non-JSON output would replace the source.
    pub fn validate(&self) -> PipelineResult<()> {
        let outputs = [&self.trimmed_json, &self.text, &self.aliases];
        for (i, a) in outputs.iter().enumerate() {
            if outputs[i + 1..].contains(a) {
                return Err(PipelineError::Config(format!(
                    "output {} is used for more than one artifact",
                    a.display()
                )));
            }
        }
        for output in [&self.text, &self.aliases] {
            if *output == self.source {
                return Err(PipelineError::Config(format!(
                    "output {} would overwrite the source dataset",
                    output.display()
                )));
            }
        }
        Ok(())
    }
}

fn rebase(path: &Path, dir: &Path) -> PathBuf {
    match path.file_name() {
        Some(name) => dir.join(name),
        None => dir.to_path_buf(),
    }
}
