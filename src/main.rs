use clap::Parser;
use std::process;
use tidyshelf::cli::{Cli, run_cli};

fn main() {
    let cli = Cli::parse();

    if !cli.path.exists() || !cli.path.is_dir() {
        eprintln!("Provided path does not exist or is not a directory");
        process::exit(1);
    }

    if let Err(e) = run_cli(&cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
