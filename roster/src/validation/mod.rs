//! Dataset validation.
//!
//! Two independent read-only checks:
//!
//! - shape: the source document must be a list or mapping of records
//!   (JSON Schema Draft 7, schema embedded from `schemas/characters.json`)
//! - identity: complete records must not share an `id` (see [`identity`])

pub mod identity;

use serde_json::Value;

pub use identity::{check_identities, CompletenessPolicy, IdCheck};

/// Validate a JSON value against a JSON schema.
///
/// # Returns
/// * `Ok(())` if valid
/// * `Err(Vec<String>)` with every violation otherwise
pub fn validate(schema: &Value, data: &Value) -> Result<(), Vec<String>> {
    let validator = jsonschema::draft7::new(schema)
        .map_err(|e| vec![format!("Invalid schema: {}", e)])?;

    let errors: Vec<String> = validator
        .iter_errors(data)
        .map(|e| e.to_string())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn dataset_schema() -> Result<Value, Vec<String>> {
    serde_json::from_str(include_str!("../../schemas/characters.json"))
        .map_err(|e| vec![format!("Invalid embedded schema: {}", e)])
}

/// Check that a document is a list or mapping whose entries are records
/// (objects) or `null` placeholders.
pub fn validate_dataset_shape(data: &Value) -> Result<(), Vec<String>> {
    let schema = dataset_schema()?;
    validate(&schema, data)
}

/// Quick check of the dataset shape.
pub fn is_valid_dataset_shape(data: &Value) -> bool {
    validate_dataset_shape(data).is_ok()
}
