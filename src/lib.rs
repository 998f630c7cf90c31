//! Dictdiff library - comparing revisions of a data dictionary.
//!
//! This crate provides:
//! - Ordered field/attribute data model and markup stripping (`dictionary`)
//! - The record-set diff engine and summary statistics (`diff`)
//! - Dictionary retrieval and revision history collaborators (`sources`)
//! - User-id to display-name resolution with per-request caching (`identity`)
//! - HTML, XLSX, and CSV renderings of a comparison (`render`)
//!
//! Feature flags:
//! - `cli`: Command-line interface

// Core modules (always compiled)
pub mod dictionary;
pub mod diff;
pub mod error;
pub mod identity;
pub mod render;
pub mod sources;

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;

// Re-export commonly used types
pub use dictionary::{Dictionary, FieldRecord};
pub use diff::{diff, summarize, ChangeEntry, ChangeSet, ChangeStatus, Summary};
pub use sources::{DictionarySource, RevisionHandle};
