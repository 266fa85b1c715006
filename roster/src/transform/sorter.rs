//! Deterministic tier ordering.

use crate::models::{Dataset, Entry};

/// Order entries by ascending `tier`.
///
/// Entries without a tier (including placeholders) go last. The sort is
/// stable, so ties keep their input order and sorting twice changes nothing.
/// Mapping datasets stay mappings with their keys reordered.
pub fn sort_by_tier(dataset: Dataset) -> Dataset {
    dataset.reorder_by_key(Entry::tier)
}
