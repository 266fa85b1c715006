//! Reduced JSON output.

use crate::error::RenderResult;
use crate::models::Dataset;

/// Pretty-print the dataset in its loaded shape.
///
/// Two-space indentation, non-ASCII text written as-is, trailing newline.
pub fn to_json_string(dataset: &Dataset) -> RenderResult<String> {
    let mut out = serde_json::to_string_pretty(dataset)?;
    out.push('\n');
    Ok(out)
}
