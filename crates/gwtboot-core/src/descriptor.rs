//! In-place edits of GWT module descriptors

use crate::error::{io_err, Result};
use regex::Regex;
use std::path::Path;

const CLOSING_TAG: &str = "</module>";

/// Outcome of [`ensure_source_path`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    Inserted,
    Unchanged,
    MissingClosingTag,
}

/// Insert `<source path="{path}" />` before the closing tag unless already declared
///
/// Returns the new text, or `None` when no edit is needed or possible.
pub fn insert_source_path(content: &str, path: &str) -> (PatchOutcome, Option<String>) {
    let declared = Regex::new(&format!(
        r#"<source\s+path=["']{}["']\s*/>"#,
        regex::escape(path)
    ));
    if declared.is_ok_and(|re| re.is_match(content)) {
        return (PatchOutcome::Unchanged, None);
    }

    let Some(insert_at) = content.rfind(CLOSING_TAG) else {
        return (PatchOutcome::MissingClosingTag, None);
    };

    let (before, after) = content.split_at(insert_at);
    let patched = format!("{}\n    <source path=\"{}\" />\n\n{}", before, path, after);
    (PatchOutcome::Inserted, Some(patched))
}

/// File-level wrapper around [`insert_source_path`]
pub fn ensure_source_path(descriptor: &Path, path: &str) -> Result<PatchOutcome> {
    let content = std::fs::read_to_string(descriptor).map_err(io_err(descriptor))?;
    let (outcome, patched) = insert_source_path(&content, path);
    if let Some(patched) = patched {
        std::fs::write(descriptor, patched).map_err(io_err(descriptor))?;
        tracing::debug!("added source path '{}' to {}", path, descriptor.display());
    }
    Ok(outcome)
}
