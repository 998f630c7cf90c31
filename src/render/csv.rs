//! CSV export of a change set.
//!
//! One row per change entry, tag-stripped, with three synthetic columns
//! appended: a change-status label, the newline-joined list of changed
//! attribute names, and the newline-joined `"<attribute>: <old value>"`
//! pairs. The detail columns are filled only for modified fields.
//!
//! Unlike the table views, an empty value exports as the empty string,
//! not "n/a" — spreadsheet consumers want real blanks.

use super::ExportError;
use crate::dictionary::strip_tags;
use crate::diff::{ChangeEntry, ChangeSet, ChangeStatus};
use std::path::Path;

const STATUS_ADDED: &str = "New field";
const STATUS_DELETED: &str = "Deleted field";
const STATUS_MODIFIED: &str = "Field with changes";

const DETAIL_HEADERS: [&str; 3] = ["Change status", "Changed attributes", "Previous values"];

/// Render a change set as CSV text.
pub fn render_csv(changes: &ChangeSet, headers: &[String]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header_row: Vec<&str> = headers.iter().map(String::as_str).collect();
    header_row.extend(DETAIL_HEADERS);
    writer.write_record(&header_row)?;

    for entry in changes {
        writer.write_record(entry_row(entry, headers.len()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Write the CSV export to a file.
pub fn write_csv(path: &Path, changes: &ChangeSet, headers: &[String]) -> Result<(), ExportError> {
    if changes.is_empty() {
        return Err(ExportError::NoChanges);
    }
    let content = render_csv(changes, headers)?;
    std::fs::write(path, content)?;
    Ok(())
}

fn entry_row(entry: &ChangeEntry, width: usize) -> Vec<String> {
    let mut row: Vec<String> = Vec::with_capacity(width + DETAIL_HEADERS.len());

    match entry.status {
        ChangeStatus::Added | ChangeStatus::Deleted => {
            for index in 0..width {
                let value = entry
                    .record
                    .as_ref()
                    .and_then(|record| record.value_at(index))
                    .map(strip_tags)
                    .unwrap_or_default();
                row.push(value);
            }
            let label = if entry.status == ChangeStatus::Added {
                STATUS_ADDED
            } else {
                STATUS_DELETED
            };
            row.push(label.to_owned());
            row.push(String::new());
            row.push(String::new());
        }
        ChangeStatus::Modified => {
            for attr in &entry.attributes {
                row.push(attr.new_display.clone());
            }
            // Positional padding when the record is narrower than the schema
            while row.len() < width {
                row.push(String::new());
            }
            row.push(STATUS_MODIFIED.to_owned());

            let changed: Vec<&str> = entry
                .attributes
                .iter()
                .filter(|attr| attr.changed)
                .map(|attr| attr.name.as_str())
                .collect();
            row.push(changed.join("\n"));

            let previous: Vec<String> = entry
                .attributes
                .iter()
                .filter(|attr| attr.changed)
                .map(|attr| format!("{}: {}", attr.name, attr.old_display))
                .collect();
            row.push(previous.join("\n"));
        }
    }

    row
}
