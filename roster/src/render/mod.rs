//! Output renderers and the artifact writer.
//!
//! - [`json`] - reduced JSON, same shape as the source
//! - [`text`] - one `Key: value` line per attribute, blank line per record
//! - [`aliases`] - one alias per line
//!
//! Renderers are pure; [`write_atomic`] is the only place that touches disk.

pub mod aliases;
pub mod json;
pub mod text;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{RenderError, RenderResult};

pub use aliases::render_alias_list;
pub use json::to_json_string;
pub use text::{format_key, format_value, render_text};

/// Replace the contents of `path` in one step.
///
/// The content goes to a hidden sibling file which is then renamed over the
/// destination, so readers see either the old artifact or the new one.
/// Missing parent directories are created.
pub fn write_atomic(path: &Path, contents: &str) -> RenderResult<()> {
    let io_err = |source: std::io::Error| RenderError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let tmp_path = temp_sibling(path);
    fs::write(&tmp_path, contents).map_err(io_err)?;
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(io_err(e));
    }

    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    path.with_file_name(format!(".{}.tmp", name))
}
