use crate::cli::OutputFormat;
use crate::diff::{diff, summarize, ChangeStatus};
use crate::sources::{DictionarySource, RevisionHandle, SnapshotDirSource};
use colored::Colorize;
use std::path::Path;

pub fn run(dir: &Path, older: &str, newer: &str, format: OutputFormat) -> Result<(), String> {
    let source = SnapshotDirSource::new(dir);
    let older_dict = source
        .fetch_dictionary(&RevisionHandle::parse(older))
        .map_err(|e| e.to_string())?;
    let newer_dict = source
        .fetch_dictionary(&RevisionHandle::parse(newer))
        .map_err(|e| e.to_string())?;

    let changes = diff(&newer_dict, &older_dict);
    let summary = summarize(&changes, &newer_dict, &older_dict);

    if format == OutputFormat::Json {
        let output = serde_json::json!({
            "older": older,
            "newer": newer,
            "summary": summary,
            "changes": changes,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).expect("failed to serialize JSON output")
        );
        return Ok(());
    }

    println!("{}", format!("Comparing {older} to {newer}").bold());
    println!();
    println!("{}", format!("Fields added: {}", summary.fields_added).green());
    println!(
        "{}",
        format!("Fields deleted: {}", summary.fields_deleted).red()
    );
    println!("Fields modified: {}", summary.fields_modified);
    println!("Total fields BEFORE changes: {}", summary.total_fields_before);
    println!("Total fields AFTER changes: {}", summary.total_fields_after);
    println!();

    if changes.is_empty() {
        println!("The data dictionaries are identical");
        return Ok(());
    }

    for entry in &changes {
        match entry.status {
            ChangeStatus::Added => {
                println!("{}", format!("+ {}", entry.field_name).green());
            }
            ChangeStatus::Deleted => {
                println!("{}", format!("- {}", entry.field_name).red());
            }
            ChangeStatus::Modified => {
                println!("{}", format!("~ {}", entry.field_name).yellow());
                for attr in entry.attributes.iter().filter(|attr| attr.changed) {
                    println!(
                        "    {}: {} -> {}",
                        attr.name.cyan(),
                        display(&attr.old_display).dimmed(),
                        display(&attr.new_display)
                    );
                }
            }
        }
    }

    Ok(())
}

fn display(value: &str) -> &str {
    if value.is_empty() {
        "(no value)"
    } else {
        value
    }
}
