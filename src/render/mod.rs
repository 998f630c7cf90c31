//! Presentation layers over the diff result.
//!
//! Every renderer consumes the same three inputs — a [`crate::diff::ChangeSet`],
//! a [`crate::diff::Summary`], and the newer dictionary's attribute headers —
//! and produces one artifact. No renderer re-runs any comparison: the
//! engine already carries raw values, stripped display values, and changed
//! flags on each entry.

pub mod csv;
pub mod html;
pub mod xlsx;

use thiserror::Error;

/// Placeholder for an empty value in table views (HTML, XLSX).
pub const NO_VALUE_TABLE: &str = "n/a";
/// Placeholder for an empty side of a changed cell.
pub const NO_VALUE_CHANGED: &str = "(no value)";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),
    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("The data dictionaries are identical; nothing to export")]
    NoChanges,
}
