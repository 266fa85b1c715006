//! Field projection: strip a named denylist of attributes from every record.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::{Dataset, Record};

/// Presentation-only attributes dropped from every reduced output.
const PRESENTATION_FIELDS: &[&str] = &[
    "img",
    "shortName",
    "generation",
    "serious",
    "chaos",
    "musicEnjoyer",
    "moe",
    "emotion",
    "link",
    "alternatives",
];

/// Bookkeeping attributes additionally dropped from anonymized text.
const BOOKKEEPING_FIELDS: &[&str] = &["id", "tier"];

/// A named set of attribute names to remove.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenyList {
    pub name: String,
    pub fields: Vec<String>,
}

impl DenyList {
    pub fn new<I, S>(name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Keeps `id` and `tier` so the reduced JSON can be loaded again.
    pub fn reduced_json() -> Self {
        Self::new("reduced-json", PRESENTATION_FIELDS.iter().copied())
    }

    /// Also strips `id` and `tier` for the human-readable text.
    pub fn anonymized_text() -> Self {
        Self::new(
            "anonymized-text",
            PRESENTATION_FIELDS
                .iter()
                .chain(BOOKKEEPING_FIELDS)
                .copied(),
        )
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }
}

/// Remove every denylisted attribute from `record`, keeping the order of
/// the rest. Absent attributes are ignored.
pub fn project(mut record: Record, denylist: &DenyList) -> Record {
    let deny: HashSet<&str> = denylist.fields.iter().map(String::as_str).collect();
    record.retain(|key| !deny.contains(key));
    record
}

/// Project every record of the dataset. Shape, keys and order are kept.
pub fn project_dataset(dataset: Dataset, denylist: &DenyList) -> Dataset {
    dataset.map_records(|record| project(record, denylist))
}
