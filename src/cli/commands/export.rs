use crate::cli::ExportKind;
use crate::diff::{diff, summarize};
use crate::render::{csv, xlsx};
use crate::sources::{DictionarySource, RevisionHandle, SnapshotDirSource};
use std::path::Path;

pub fn run(
    dir: &Path,
    older: &str,
    newer: &str,
    out: &Path,
    kind: ExportKind,
) -> Result<(), String> {
    let source = SnapshotDirSource::new(dir);
    let older_dict = source
        .fetch_dictionary(&RevisionHandle::parse(older))
        .map_err(|e| e.to_string())?;
    let newer_dict = source
        .fetch_dictionary(&RevisionHandle::parse(newer))
        .map_err(|e| e.to_string())?;

    let changes = diff(&newer_dict, &older_dict);
    let summary = summarize(&changes, &newer_dict, &older_dict);
    let headers = newer_dict.headers();

    match kind {
        ExportKind::Xlsx => {
            xlsx::write_workbook(out, &changes, &summary, &headers).map_err(|e| e.to_string())?;
        }
        ExportKind::Csv => {
            csv::write_csv(out, &changes, &headers).map_err(|e| e.to_string())?;
        }
    }

    println!("Wrote {}", out.display());
    Ok(())
}
