//! The persisted store: one pretty-printed JSON array of people in a file.
//!
//! Reads are tolerant. A missing file, unparseable JSON, or a top-level
//! value that is not an array all load as an empty store. Writes replace
//! the whole file.

use crate::person::PersonRecord;
use serde_json::Value;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while writing the store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// File-backed store of person records.
///
/// Earlier entries are kept as raw JSON values so they are rewritten exactly
/// as read, key order and number text included.
#[derive(Debug, Clone)]
pub struct PersonStore {
    path: PathBuf,
}

impl PersonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current entries, or an empty list if the file is absent or unusable.
    pub fn load(&self) -> Vec<Value> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "store unreadable, starting empty");
                return Vec::new();
            }
        };
        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Array(entries)) => entries,
            Ok(_) => {
                tracing::debug!(path = %self.path.display(), "store is not a JSON array, starting empty");
                Vec::new()
            }
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "store is not valid JSON, starting empty");
                Vec::new()
            }
        }
    }

    /// Replace the file with `entries`, pretty-printed.
    ///
    /// Written to a sibling temp file first, then renamed over the target.
    pub fn save(&self, entries: &[Value]) -> StoreResult<()> {
        let text = serde_json::to_string_pretty(entries)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(text.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    /// Put `batch` ahead of the existing entries and rewrite the file.
    ///
    /// Returns the new total.
    pub fn prepend_and_save(&self, batch: &[PersonRecord]) -> StoreResult<usize> {
        let existing = self.load();
        let mut entries = Vec::with_capacity(batch.len() + existing.len());
        for record in batch {
            entries.push(serde_json::to_value(record)?);
        }
        entries.extend(existing);

        self.save(&entries)?;
        Ok(entries.len())
    }
}
