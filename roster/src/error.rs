//! Error types for the roster normalization pipeline.
//!
//! - [`LoadError`] - reading and shape-checking the source dataset
//! - [`RenderError`] - serializing and writing output artifacts
//! - [`PipelineError`] - top-level errors returned by a pipeline mode
//!
//! Lower-level errors convert into [`PipelineError`] via `From`, so `?` works
//! across module boundaries.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::Identity;

// =============================================================================
// Loading Errors
// =============================================================================

/// Errors while loading the source dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The configured source path does not exist.
    #[error("Source not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// The content is not JSON, or not a list/mapping of records.
    #[error("Malformed source: {0}")]
    MalformedSource(String),

    /// Any other read failure.
    #[error("Failed to read source: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Rendering Errors
// =============================================================================

/// Errors while serializing or writing an output artifact.
#[derive(Debug, Error)]
pub enum RenderError {
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing the destination failed.
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline errors.
///
/// Every variant is terminal for the invocation that produced it.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Loading error.
    #[error("{0}")]
    Load(#[from] LoadError),

    /// Rendering error.
    #[error("{0}")]
    Render(#[from] RenderError),

    /// Complete records share an identity value.
    #[error("Duplicate IDs found: {}", join_identities(.duplicates))]
    DuplicateIdentity {
        duplicates: Vec<Identity>,
        max_id: Option<Identity>,
    },

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

fn join_identities(ids: &[Identity]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        let load_err = LoadError::SourceNotFound(PathBuf::from("missing.json"));
        let pipeline_err: PipelineError = load_err.into();
        assert!(pipeline_err.to_string().contains("missing.json"));

        let load_err = LoadError::MalformedSource("expected value".into());
        let pipeline_err: PipelineError = load_err.into();
        assert!(pipeline_err.to_string().contains("expected value"));
    }

    #[test]
    fn test_duplicate_identity_format() {
        let err = PipelineError::DuplicateIdentity {
            duplicates: vec![Identity::Number(2), Identity::Text("abc".into())],
            max_id: Some(Identity::Number(3)),
        };
        assert_eq!(err.to_string(), "Duplicate IDs found: 2, abc");
    }

    #[test]
    fn test_render_io_error_names_path() {
        let err = RenderError::Io {
            path: PathBuf::from("out/characters.txt"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("out/characters.txt"));
        assert!(msg.contains("denied"));
    }
}
