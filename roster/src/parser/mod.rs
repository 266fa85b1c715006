//! Dataset loader.
//!
//! Reads the roster JSON document and turns it into a [`Dataset`], keeping
//! whichever shape (list or mapping) the file uses.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde_json::Value;

use crate::error::{LoadError, LoadResult};
use crate::models::Dataset;
use crate::validation::validate_dataset_shape;

/// Load the dataset stored at `path`.
///
/// # Errors
/// - [`LoadError::SourceNotFound`] if nothing exists at `path`
/// - [`LoadError::MalformedSource`] if the content is not UTF-8 JSON shaped as
///   a list or mapping of records
/// - [`LoadError::Io`] for any other read failure
pub fn load_dataset<P: AsRef<Path>>(path: P) -> LoadResult<Dataset> {
    let path = path.as_ref();
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(LoadError::SourceNotFound(path.to_path_buf()))
        }
        Err(e) if e.kind() == ErrorKind::InvalidData => {
            return Err(LoadError::MalformedSource(format!(
                "{} is not valid UTF-8",
                path.display()
            )))
        }
        Err(e) => return Err(e.into()),
    };

    parse_dataset(&content)
}

/// Parse a dataset from JSON text.
///
/// # Example
/// ```
/// use roster::parse_dataset;
///
/// let dataset = parse_dataset(r#"[{"id": 1, "name": "Momo"}]"#).unwrap();
/// assert_eq!(dataset.len(), 1);
/// ```
pub fn parse_dataset(content: &str) -> LoadResult<Dataset> {
    // Editors on Windows like to prepend a byte-order mark
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let value: Value = serde_json::from_str(content)
        .map_err(|e| LoadError::MalformedSource(format!("Invalid JSON: {}", e)))?;

    validate_dataset_shape(&value).map_err(|errors| {
        LoadError::MalformedSource(format!(
            "not a list or mapping of records: {}",
            errors.join("; ")
        ))
    })?;

    Dataset::from_json(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Shape;
    use std::io::Write;

    #[test]
    fn test_parse_list() {
        let dataset = parse_dataset(r#"[{"id": 1, "name": "A"}, null, {"id": 2}]"#).unwrap();
        assert_eq!(dataset.shape(), Shape::List);
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.records().count(), 2);
    }

    #[test]
    fn test_parse_mapping() {
        let dataset = parse_dataset(r#"{"momo": {"id": 1}, "riri": {"id": 2}}"#).unwrap();
        assert_eq!(dataset.shape(), Shape::Mapping);
        assert_eq!(dataset.records().count(), 2);
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let err = parse_dataset("[{\"id\": 1,").unwrap_err();
        assert!(matches!(err, LoadError::MalformedSource(_)));
        assert!(err.to_string().contains("Invalid JSON"));
    }

    #[test]
    fn test_wrong_shape_is_malformed() {
        for doc in ["42", "\"characters\"", "[1, 2]", r#"{"a": "b"}"#] {
            let err = parse_dataset(doc).unwrap_err();
            assert!(
                matches!(err, LoadError::MalformedSource(_)),
                "{} should be rejected",
                doc
            );
        }
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let dataset = parse_dataset("\u{feff}[{\"id\": 1}]").unwrap();
        assert_eq!(dataset.len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("characters.json");
        let err = load_dataset(&path).unwrap_err();
        match err {
            LoadError::SourceNotFound(p) => assert_eq!(p, path),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_load_from_disk_preserves_non_ascii() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id": 1, "name": "Zoë 夢"}}]"#).unwrap();

        let dataset = load_dataset(file.path()).unwrap();
        let record = dataset.records().next().unwrap();
        assert_eq!(record.get("name").unwrap(), "Zoë 夢");
    }

    #[test]
    fn test_non_utf8_file_is_malformed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0x5b, 0xff, 0xfe, 0x5d]).unwrap();

        let err = load_dataset(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::MalformedSource(_)));
    }
}
