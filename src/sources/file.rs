//! Snapshot-directory source: dictionaries and revision history on disk.
//!
//! Layout of a snapshot directory:
//!
//! - `current.csv` — the currently active dictionary
//! - `<revision id>.csv` — one file per historical revision
//! - `revisions.json` — raw approval rows + production metadata
//! - `users.json` — user directory for identity lookups
//!
//! Dictionary CSV format: a header row of attribute names, then one row per
//! field with the field name in the first column (the field name is also
//! the first attribute of its own record, as the host system exports it).

use crate::dictionary::{Dictionary, FieldRecord};
use crate::identity::JsonUserDirectory;
use crate::sources::traits::{DictionarySource, ProjectHistory, RevisionHandle};
use log::debug;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unknown revision: {id}")]
    UnknownRevision { id: String },
    #[error("Snapshot has no header row: {path}")]
    EmptySnapshot { path: String },
}

/// A [`DictionarySource`] reading snapshots from a directory.
pub struct SnapshotDirSource {
    root: PathBuf,
}

impl SnapshotDirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The user directory stored alongside the snapshots. Missing file
    /// means every identity resolves to Unknown.
    pub fn user_directory(&self) -> JsonUserDirectory {
        JsonUserDirectory::load(&self.root.join("users.json"))
    }

    fn snapshot_path(&self, revision: &RevisionHandle) -> PathBuf {
        match revision {
            RevisionHandle::Current => self.root.join("current.csv"),
            RevisionHandle::Id(id) => self.root.join(format!("{id}.csv")),
        }
    }
}

impl DictionarySource for SnapshotDirSource {
    type Error = SourceError;

    fn fetch_dictionary(&self, revision: &RevisionHandle) -> Result<Dictionary, SourceError> {
        let path = self.snapshot_path(revision);
        if !path.exists() {
            return Err(SourceError::UnknownRevision {
                id: revision.to_string(),
            });
        }
        let dictionary = read_dictionary_csv(&path)?;
        debug!(
            "loaded {} fields for revision {revision} from {}",
            dictionary.len(),
            path.display()
        );
        Ok(dictionary)
    }

    fn history(&self) -> Result<ProjectHistory, SourceError> {
        let path = self.root.join("revisions.json");
        if !path.exists() {
            debug!("no revisions.json in {}", self.root.display());
            return Ok(ProjectHistory::default());
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Parse a dictionary snapshot CSV into an ordered [`Dictionary`].
///
/// Rows shorter than the header are padded with empty values; extra
/// trailing cells are dropped. Duplicate field names keep the last row,
/// matching the host system's import behaviour.
pub fn read_dictionary_csv(path: &Path) -> Result<Dictionary, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut records = reader.records();
    let headers: Vec<String> = match records.next() {
        Some(row) => row?.iter().map(str::to_owned).collect(),
        None => {
            return Err(SourceError::EmptySnapshot {
                path: path.display().to_string(),
            })
        }
    };

    let mut dictionary = Dictionary::new();
    for row in records {
        let row = row?;
        let Some(field_name) = row.get(0) else {
            continue;
        };
        if field_name.is_empty() {
            continue;
        }

        let record: FieldRecord = headers
            .iter()
            .enumerate()
            .map(|(index, header)| (header.clone(), row.get(index).unwrap_or("").to_owned()))
            .collect();
        dictionary.insert(field_name, record);
    }

    Ok(dictionary)
}
