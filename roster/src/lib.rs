//! # Roster - character dataset maintenance
//!
//! Offline tools that keep the character roster JSON dataset healthy and
//! derive the lighter artifacts the site ships.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌──────────────┐
//! │ characters  │────▶│   Loader    │────▶│ Sort + Trim │────▶│ JSON / text  │
//! │   .json     │     │ (list/map)  │     │ (denylists) │     │ / alias list │
//! └─────────────┘     └──────┬──────┘     └─────────────┘     └──────────────┘
//!                            │
//!                            ▼
//!                     ┌─────────────┐
//!                     │  ID check   │
//!                     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use roster::{collect_aliases, parse_dataset, sort_by_tier};
//!
//! let dataset = parse_dataset(r#"[
//!     {"id": 1, "name": "A", "tier": 2, "shortName": "X & Y"},
//!     {"id": 2, "name": "B", "tier": 1, "shortName": "Z"}
//! ]"#).unwrap();
//!
//! let sorted = sort_by_tier(dataset);
//! assert_eq!(collect_aliases(&sorted), vec!["Z", "X", "Y"]);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Record, Dataset, Identity, TierKey
//! - [`parser`] - Dataset loading
//! - [`validation`] - Shape and identity checks
//! - [`transform`] - Sorting, projection, aliases and pipeline modes
//! - [`render`] - Output renderers and atomic writes
//! - [`config`] - Paths and policies
//! - [`logs`] - Pipeline log sink

// Core modules
pub mod config;
pub mod error;
pub mod logs;
pub mod models;

// Loading
pub mod parser;

// Validation
pub mod validation;

// Transformation
pub mod transform;

// Output
pub mod render;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    LoadError, LoadResult, PipelineError, PipelineResult, RenderError, RenderResult,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{Dataset, Entry, EntryKey, Identity, Record, Shape, TierKey};

// =============================================================================
// Re-exports - Loading and validation
// =============================================================================

pub use parser::{load_dataset, parse_dataset};
pub use validation::{
    check_identities, is_valid_dataset_shape, validate_dataset_shape, CompletenessPolicy, IdCheck,
};

// =============================================================================
// Re-exports - Transformation
// =============================================================================

pub use transform::{
    anonymized_text, check_ids, collect_aliases, extract_aliases, project, project_dataset,
    reduced_json, run_mode, run_on_dataset, sort_by_tier, DenyList, Mode, ModeReport,
};

// =============================================================================
// Re-exports - Rendering and configuration
// =============================================================================

pub use config::PipelineConfig;
pub use render::{format_key, render_alias_list, render_text, to_json_string, write_atomic};
