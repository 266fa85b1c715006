//! Transformation module.
//!
//! - Sorter: stable tier ordering
//! - Projector: named denylists of attributes to strip
//! - Aliases: short-name extraction
//! - Pipeline: the modes tying load, transform and render together

pub mod aliases;
pub mod pipeline;
pub mod projector;
pub mod sorter;

pub use aliases::{collect_aliases, extract_aliases};
pub use pipeline::*;
pub use projector::{project, project_dataset, DenyList};
pub use sorter::sort_by_tier;
