//! Human-readable text output.
//!
//! ```text
//! Name: Momo
//! Pronouns: she/her
//! Fun Fact: collects spoons
//!
//! Name: Riri
//! ...
//! ```

use serde_json::Value;

use crate::models::{is_name_key, Dataset, Record};

/// Turn a camelCase key into spaced title case: `musicEnjoyer` becomes
/// `Music Enjoyer`.
///
/// A space goes before every uppercase letter past the first character,
/// then every alphabetic run is capitalized and the rest of it lower-cased.
pub fn format_key(key: &str) -> String {
    let mut spaced = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_uppercase() {
            spaced.push(' ');
        }
        spaced.push(c);
    }

    let mut out = String::with_capacity(spaced.len());
    let mut in_word = false;
    for c in spaced.trim().chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Render an attribute value for the text output.
///
/// Strings as-is; arrays as their rendered elements joined by `, `; objects
/// as compact JSON; everything else in JSON form.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(format_value)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

/// Lines for one record: the name first, then every other attribute in order.
pub fn render_record(record: &Record) -> Vec<String> {
    let names = record
        .iter()
        .filter(|(k, _)| is_name_key(k))
        .map(|(_, v)| format!("Name: {}", format_value(v)));
    let others = record
        .iter()
        .filter(|(k, _)| !is_name_key(k))
        .map(|(k, v)| format!("{}: {}", format_key(k), format_value(v)));
    names.chain(others).collect()
}

/// Render every record, each followed by one blank line.
pub fn render_text(dataset: &Dataset) -> String {
    let mut lines = Vec::new();
    for record in dataset.records() {
        lines.extend(render_record(record));
        lines.push(String::new());
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_format_key_camel_case() {
        assert_eq!(format_key("musicEnjoyer"), "Music Enjoyer");
        assert_eq!(format_key("funFact"), "Fun Fact");
        assert_eq!(format_key("retirementReason"), "Retirement Reason");
        assert_eq!(format_key("pronouns"), "Pronouns");
    }

    #[test]
    fn test_format_key_edge_cases() {
        assert_eq!(format_key("Type"), "Type");
        assert_eq!(format_key("ID"), "I D");
        assert_eq!(format_key("short_name"), "Short_Name");
        assert_eq!(format_key("top3picks"), "Top3Picks");
        assert_eq!(format_key(""), "");
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&json!("she/her")), "she/her");
        assert_eq!(format_value(&json!(3)), "3");
        assert_eq!(format_value(&json!(true)), "true");
        assert_eq!(format_value(&json!(null)), "null");
        assert_eq!(format_value(&json!(["tea", "cats"])), "tea, cats");
        assert_eq!(format_value(&json!({"a": 1})), "{\"a\":1}");
    }

    #[test]
    fn test_name_goes_first_in_any_case() {
        let r = record(json!({"pronouns": "she/her", "NaMe": "Momo", "funFact": "spoons"}));
        assert_eq!(
            render_record(&r),
            vec!["Name: Momo", "Pronouns: she/her", "Fun Fact: spoons"]
        );
    }

    #[test]
    fn test_record_without_name() {
        let r = record(json!({"bestFor": "naps"}));
        assert_eq!(render_record(&r), vec!["Best For: naps"]);
    }

    #[test]
    fn test_records_separated_by_one_blank_line() {
        let data = Dataset::from_json(json!([
            {"name": "B", "type": "cat"},
            null,
            {"name": "A"}
        ]))
        .unwrap();

        assert_eq!(render_text(&data), "Name: B\nType: cat\n\nName: A\n");
    }

    #[test]
    fn test_mapping_dataset_uses_same_formatting() {
        let data = Dataset::from_json(json!({"k": {"musicEnjoyer": "yes", "name": "K"}})).unwrap();
        assert_eq!(render_text(&data), "Name: K\nMusic Enjoyer: yes\n");
    }

    #[test]
    fn test_empty_dataset_renders_nothing() {
        let data = Dataset::from_json(json!([])).unwrap();
        assert_eq!(render_text(&data), "");
    }
}
