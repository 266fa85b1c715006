//! Short-name (alias) extraction.
//!
//! A record may pack several aliases into one short name, e.g.
//! `"Riri & Ruru"` for a duo.

use serde_json::Value;

use crate::models::{Dataset, Record};

/// Accepted spellings of the short-name attribute, in lookup order.
pub const SHORT_NAME_FIELDS: &[&str] = &["shortName", "shortname", "short_name"];

/// Separator between packed aliases.
pub const ALIAS_SEPARATOR: char = '&';

/// The short name of a record as text.
///
/// Takes the first spelling holding a non-empty value; `null`, `""` and
/// `false` fall through to the next spelling.
pub fn short_name(record: &Record) -> Option<String> {
    SHORT_NAME_FIELDS
        .iter()
        .filter_map(|field| record.get(field))
        .find_map(|value| match value {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        })
}

/// Aliases of one record, in split order.
pub fn extract_aliases(record: &Record) -> Vec<String> {
    match short_name(record) {
        Some(short) if short.contains(ALIAS_SEPARATOR) => short
            .split(ALIAS_SEPARATOR)
            .map(|part| part.trim().to_string())
            .collect(),
        Some(short) => vec![short],
        None => Vec::new(),
    }
}

/// Aliases of every record, in dataset order.
pub fn collect_aliases(dataset: &Dataset) -> Vec<String> {
    dataset.records().flat_map(extract_aliases).collect()
}
