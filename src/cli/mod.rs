pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "dictdiff")]
#[command(author, version, about = "Compare data dictionary revisions", long_about = None)]
pub struct Cli {
    /// Snapshot directory (defaults to current directory)
    #[arg(short, long, global = true, default_value = ".")]
    pub dir: PathBuf,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportKind {
    #[default]
    Xlsx,
    Csv,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the project's revision history
    Revisions,

    /// Compare two revisions and print the change set
    Compare {
        /// Older revision ("current" or a revision id)
        older: String,

        /// Newer revision ("current" or a revision id)
        newer: String,
    },

    /// Export the comparison as a spreadsheet workbook or CSV file
    Export {
        /// Older revision ("current" or a revision id)
        older: String,

        /// Newer revision ("current" or a revision id)
        newer: String,

        /// Output file path
        #[arg(short, long)]
        out: PathBuf,

        /// Export format
        #[arg(short, long, default_value = "xlsx")]
        kind: ExportKind,
    },

    /// Write the comparison as an HTML fragment
    Html {
        /// Older revision ("current" or a revision id)
        older: String,

        /// Newer revision ("current" or a revision id)
        newer: String,

        /// Output file path
        #[arg(short, long)]
        out: PathBuf,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Revisions => commands::revisions::run(&cli.dir, cli.format),
        Commands::Compare { older, newer } => {
            commands::compare::run(&cli.dir, &older, &newer, cli.format)
        }
        Commands::Export {
            older,
            newer,
            out,
            kind,
        } => commands::export::run(&cli.dir, &older, &newer, &out, kind),
        Commands::Html { older, newer, out } => commands::html::run(&cli.dir, &older, &newer, &out),
    }
}
