//! dictdiff binary - compare data dictionary revisions from the shell.

use clap::Parser;
use dictdiff::cli::{run, Cli};

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
