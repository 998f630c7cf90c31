use crate::diff::{diff, summarize};
use crate::render::html;
use crate::sources::{DictionarySource, RevisionHandle, SnapshotDirSource};
use std::path::Path;

pub fn run(dir: &Path, older: &str, newer: &str, out: &Path) -> Result<(), String> {
    let source = SnapshotDirSource::new(dir);
    let older_dict = source
        .fetch_dictionary(&RevisionHandle::parse(older))
        .map_err(|e| e.to_string())?;
    let newer_dict = source
        .fetch_dictionary(&RevisionHandle::parse(newer))
        .map_err(|e| e.to_string())?;

    let changes = diff(&newer_dict, &older_dict);
    let summary = summarize(&changes, &newer_dict, &older_dict);
    let fragment = html::render_comparison(&changes, &summary, &newer_dict.headers());

    std::fs::write(out, fragment).map_err(|e| e.to_string())?;
    println!("Wrote {}", out.display());
    Ok(())
}
