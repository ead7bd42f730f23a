//! Loading and filtering of the `doc.json` symbol dump.

use crate::model::DocEntry;
use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Read the dump from disk. See [`parse`].
pub fn load(path: &Path) -> Result<Vec<DocEntry>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read symbol dump {}", path.display()))?;
    parse(&content).with_context(|| format!("invalid symbol dump {}", path.display()))
}

/// Parse a dump document. The document itself must be a JSON array;
/// records that do not fit the entry shape are skipped with a warning.
pub fn parse(content: &str) -> Result<Vec<DocEntry>> {
    let records: Vec<Value> =
        serde_json::from_str(content).context("expected a JSON array of symbols")?;

    let total = records.len();
    let entries: Vec<DocEntry> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value::<DocEntry>(record) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(index, error = %e, "skipping malformed symbol record");
                None
            }
        })
        .collect();

    debug!(total, loaded = entries.len(), "parsed symbol dump");
    Ok(entries)
}

/// Keep only entries with a declaration in one of the allow-listed files.
pub fn retain_allowed(entries: &mut Vec<DocEntry>, allowed_files: &[String]) {
    entries.retain(|entry| is_defined_in_any(entry, allowed_files));
}

fn is_defined_in_any(entry: &DocEntry, allowed_files: &[String]) -> bool {
    entry.defines.iter().any(|define| {
        define.file.as_deref().is_some_and(|file| {
            allowed_files
                .iter()
                .any(|allowed| file.ends_with(allowed.as_str()))
        })
    })
}
