//! Duplicate identity detection.
//!
//! Only *complete* records take part. Which records count as complete is a
//! [`CompletenessPolicy`]; the default treats any record holding a `null`
//! attribute as an unfinished placeholder and leaves it out of both the
//! duplicate scan and the maximum id.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{Dataset, Identity, Record};

/// Decides whether a record takes part in the identity check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "fields", rename_all = "snake_case")]
pub enum CompletenessPolicy {
    /// Complete when no attribute is `null`.
    NoNullAttributes,
    /// Complete when every listed attribute is present and not `null`.
    RequireNonNull(Vec<String>),
}

impl Default for CompletenessPolicy {
    fn default() -> Self {
        CompletenessPolicy::NoNullAttributes
    }
}

impl CompletenessPolicy {
    pub fn is_complete(&self, record: &Record) -> bool {
        match self {
            CompletenessPolicy::NoNullAttributes => !record.has_null_attribute(),
            CompletenessPolicy::RequireNonNull(fields) => fields
                .iter()
                .all(|f| record.get(f).is_some_and(|v| !v.is_null())),
        }
    }
}

/// Outcome of the identity check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IdCheck {
    /// Every id is unique. `max_id` is `None` when no record carries one.
    Success { max_id: Option<Identity> },
    /// Some ids repeat; each repeated value is listed once, in the order its
    /// first repeat was seen.
    DuplicatesFound {
        duplicates: Vec<Identity>,
        max_id: Option<Identity>,
    },
}

impl IdCheck {
    pub fn is_success(&self) -> bool {
        matches!(self, IdCheck::Success { .. })
    }

    pub fn max_id(&self) -> Option<&Identity> {
        match self {
            IdCheck::Success { max_id } | IdCheck::DuplicatesFound { max_id, .. } => {
                max_id.as_ref()
            }
        }
    }
}

impl fmt::Display for IdCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let max = match self.max_id() {
            Some(id) => id.to_string(),
            None => "N/A".to_string(),
        };
        match self {
            IdCheck::Success { .. } => {
                write!(f, "No duplicate IDs found. Max ID used: {}", max)
            }
            IdCheck::DuplicatesFound { duplicates, .. } => {
                let ids: Vec<String> = duplicates.iter().map(ToString::to_string).collect();
                write!(f, "Duplicate IDs found: {}", ids.join(", "))
            }
        }
    }
}

/// Scan the dataset for repeated ids among complete records.
///
/// Never mutates the dataset. Placeholder entries, incomplete records and
/// records without an id are skipped.
pub fn check_identities(dataset: &Dataset, policy: &CompletenessPolicy) -> IdCheck {
    let ids: Vec<Identity> = dataset
        .records()
        .filter(|r| policy.is_complete(r))
        .filter_map(Record::id)
        .collect();

    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();
    for id in &ids {
        if !seen.insert(id) && reported.insert(id) {
            duplicates.push(id.clone());
        }
    }

    let max_id = ids.iter().max().cloned();

    if duplicates.is_empty() {
        IdCheck::Success { max_id }
    } else {
        IdCheck::DuplicatesFound { duplicates, max_id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dataset(value: serde_json::Value) -> Dataset {
        Dataset::from_json(value).unwrap()
    }

    #[test]
    fn test_reports_each_duplicate_once() {
        let data = dataset(json!([
            {"id": 1, "name": "A"},
            {"id": 2, "name": "B"},
            {"id": 2, "name": "C"},
            {"id": 3, "name": "D"},
            {"id": null, "name": "E"},
            {"id": 2, "name": "F"}
        ]));

        let check = check_identities(&data, &CompletenessPolicy::default());
        assert_eq!(
            check,
            IdCheck::DuplicatesFound {
                duplicates: vec![Identity::Number(2)],
                max_id: Some(Identity::Number(3)),
            }
        );
    }

    #[test]
    fn test_null_attribute_excludes_record() {
        // id 9 would be both the max and a duplicate, but its record is incomplete
        let data = dataset(json!([
            {"id": 1, "name": "A"},
            {"id": 9, "name": "B", "img": null},
            {"id": 9, "name": "C"}
        ]));

        let check = check_identities(&data, &CompletenessPolicy::default());
        assert_eq!(check, IdCheck::Success { max_id: Some(Identity::Number(9)) });

        let data = dataset(json!([
            {"id": 1, "name": "A"},
            {"id": 5, "name": "B", "img": null}
        ]));
        let check = check_identities(&data, &CompletenessPolicy::default());
        assert_eq!(check.max_id(), Some(&Identity::Number(1)));
    }

    #[test]
    fn test_placeholders_and_missing_ids_are_skipped() {
        let data = dataset(json!([null, {"name": "A"}, {"id": 4}]));
        let check = check_identities(&data, &CompletenessPolicy::default());
        assert_eq!(check, IdCheck::Success { max_id: Some(Identity::Number(4)) });
    }

    #[test]
    fn test_no_ids_reports_na() {
        let data = dataset(json!([{"name": "A"}]));
        let check = check_identities(&data, &CompletenessPolicy::default());
        assert_eq!(check, IdCheck::Success { max_id: None });
        assert!(check.to_string().ends_with("Max ID used: N/A"));
    }

    #[test]
    fn test_mapping_shaped_dataset() {
        let data = dataset(json!({
            "momo": {"id": "c1"},
            "riri": {"id": "c2"},
            "ruru": {"id": "c1"}
        }));
        let check = check_identities(&data, &CompletenessPolicy::default());
        assert!(!check.is_success());
        assert_eq!(check.to_string(), "Duplicate IDs found: c1");
    }

    #[test]
    fn test_require_non_null_policy() {
        let data = dataset(json!([
            {"id": 1, "name": "A", "img": null},
            {"id": 1, "name": "B", "img": null},
            {"id": 2, "name": null}
        ]));
        let policy = CompletenessPolicy::RequireNonNull(vec!["id".into(), "name".into()]);

        let check = check_identities(&data, &policy);
        assert_eq!(
            check,
            IdCheck::DuplicatesFound {
                duplicates: vec![Identity::Number(1)],
                max_id: Some(Identity::Number(1)),
            }
        );
    }

    #[test]
    fn test_check_does_not_mutate() {
        let data = dataset(json!([{"id": 1}, {"id": 1}, null]));
        let before = data.clone();
        let _ = check_identities(&data, &CompletenessPolicy::default());
        assert_eq!(data, before);
    }

    #[test]
    fn test_policy_serde_form() {
        let policy: CompletenessPolicy =
            serde_json::from_value(json!({"kind": "require_non_null", "fields": ["id"]})).unwrap();
        assert_eq!(policy, CompletenessPolicy::RequireNonNull(vec!["id".into()]));

        let policy: CompletenessPolicy =
            serde_json::from_value(json!({"kind": "no_null_attributes"})).unwrap();
        assert_eq!(policy, CompletenessPolicy::NoNullAttributes);
    }
}
