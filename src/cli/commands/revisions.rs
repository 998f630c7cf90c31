use crate::cli::OutputFormat;
use crate::identity::IdentityResolver;
use crate::sources::{build_revision_log, DictionarySource, SnapshotDirSource};
use colored::Colorize;
use std::path::Path;

pub fn run(dir: &Path, format: OutputFormat) -> Result<(), String> {
    let source = SnapshotDirSource::new(dir);
    let history = source.history().map_err(|e| e.to_string())?;
    let mut resolver = IdentityResolver::new(source.user_directory());
    let log = build_revision_log(&history, &mut resolver);

    if format == OutputFormat::Json {
        println!(
            "{}",
            serde_json::to_string_pretty(&log).expect("failed to serialize JSON output")
        );
        return Ok(());
    }

    if log.is_empty() {
        println!("No production revisions found.");
        return Ok(());
    }
    if log.len() < 2 {
        println!(
            "There must be at least two revisions of the data dictionary to run a comparison."
        );
    }

    println!("{}", "Project Revision History".bold());
    println!();
    for (index, revision) in log.iter().enumerate() {
        println!("{} [{}]", revision.label.bold(), revision.id);
        println!("  Approved: {}", revision.ts_approved);
        if index == log.len() - 1 {
            println!("  Moved to production by {}", revision.approver);
        } else if revision.automatic_approval {
            println!("  Requested by {}", revision.requester);
            println!("  Approved automatically");
        } else {
            println!("  Requested by {}", revision.requester);
            println!("  Approved by {}", revision.approver);
        }
        println!();
    }

    Ok(())
}
