//! Command-line interface module for tidyshelf.
//!
//! Defines the argument surface and orchestrates a full run: open the run
//! log, load and compile the category mapping, walk the target directory,
//! and preview or perform the moves.

use clap::Parser;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::category::{CategoryMap, DEFAULT_CATEGORY};
use crate::config::{CategoryConfig, DEFAULT_CONFIG_FILE};
use crate::organizer::{OrganizeError, Organizer, RunLog};
use crate::output::OutputFormatter;

/// Organize files into category/year/month folders by extension and
/// modification date.
#[derive(Debug, Parser)]
#[command(name = "tidyshelf", version, about)]
pub struct Cli {
    /// Directory to organize
    pub path: PathBuf,

    /// Preview moves without changing any files
    #[arg(long)]
    pub dry_run: bool,

    /// Organize files in subdirectories as well
    #[arg(long)]
    pub recursive: bool,

    /// Path to the category mapping file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
}

/// Runs a full organization pass with the given arguments.
///
/// This is the main entry point for CLI operations; `main` only parses
/// arguments, validates the target directory, and reports the error.
///
/// # Examples
///
/// ```no_run
/// use std::path::PathBuf;
/// use tidyshelf::cli::{Cli, run_cli};
///
/// let cli = Cli {
///     path: PathBuf::from("/path/to/directory"),
///     dry_run: true,
///     recursive: false,
///     config: PathBuf::from("config.json"),
/// };
/// match run_cli(&cli) {
///     Ok(()) => println!("Operation completed successfully"),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run_cli(cli: &Cli) -> Result<(), String> {
    organize_directory(&cli.path, &cli.config, cli.dry_run, cli.recursive)
}

fn log_err(e: OrganizeError) -> String {
    format!("Error writing run log: {}", e)
}

/// Organizes the contents of `base_path` into category/year/month folders.
///
/// The run log is opened first so that startup is recorded, but the
/// configuration is loaded and validated before any file is touched: a
/// missing or invalid mapping aborts the whole run.
fn organize_directory(
    base_path: &Path,
    config_path: &Path,
    dry_run: bool,
    recursive: bool,
) -> Result<(), String> {
    if dry_run {
        OutputFormatter::info(&format!(
            "DRY RUN: Analyzing contents of: {}",
            base_path.display()
        ));
    } else {
        OutputFormatter::info(&format!("Organizing contents of: {}", base_path.display()));
    }

    let mut log = RunLog::open(base_path).map_err(log_err)?;
    log.info(&format!(
        "starting file organization for: {}",
        base_path.display()
    ))
    .map_err(log_err)?;

    let config = CategoryConfig::load(config_path)
        .map_err(|e| format!("Error loading configuration: {}", e))?;
    let categories = config.compile();

    if recursive {
        warn_if_already_organized(base_path, &categories);
    }

    let organizer = Organizer::new(base_path, &categories, dry_run);
    let files = organizer
        .collect_files(base_path, recursive)
        .map_err(|e| format!("Error scanning directory: {}", e))?;

    if files.is_empty() {
        OutputFormatter::plain("No files found to organize.");
        log.info("file organization complete.").map_err(log_err)?;
        return Ok(());
    }

    let mut category_counts: HashMap<String, usize> = HashMap::new();

    if dry_run {
        for file in &files {
            let placement = organizer.place(file).map_err(|e| format!("Error: {}", e))?;
            let line = format!(
                "{} --> {}",
                placement.source.display(),
                placement.destination.display()
            );
            OutputFormatter::dry_run_notice(&line);
            log.info(&format!("[DRY-RUN] {}", line)).map_err(log_err)?;
            *category_counts.entry(placement.category).or_insert(0) += 1;
        }
    } else {
        let pb = OutputFormatter::create_progress_bar(files.len() as u64);
        for file in &files {
            let placement = organizer.place(file).map_err(|e| format!("Error: {}", e))?;
            let line = format!(
                "Moved: {} --> {}",
                placement.source.display(),
                placement.destination.display()
            );
            pb.println(&line);
            log.info(&line).map_err(log_err)?;
            *category_counts.entry(placement.category).or_insert(0) += 1;
            pb.inc(1);
        }
        pb.finish_and_clear();
    }

    OutputFormatter::summary_table(&category_counts, files.len());

    log.info("file organization complete.").map_err(log_err)?;
    if dry_run {
        OutputFormatter::success("Dry run complete. No files were modified.");
    } else {
        OutputFormatter::success("Organization complete!");
    }

    Ok(())
}

/// Re-running with `--recursive` over a tree a previous run organized
/// descends into the category folders and reclassifies their contents.
/// Warn once instead of doing that silently.
fn warn_if_already_organized(base_path: &Path, categories: &CategoryMap) {
    let Ok(entries) = fs::read_dir(base_path) else {
        return;
    };

    for entry in entries.flatten() {
        if let Ok(file_type) = entry.file_type()
            && file_type.is_dir()
        {
            let name = entry.file_name().to_string_lossy().to_string();
            if name == DEFAULT_CATEGORY || categories.category_names().any(|c| c == name) {
                OutputFormatter::warning(&format!(
                    "'{}' looks like a category folder from a previous run; --recursive will reorganize its contents",
                    name
                ));
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from(["tidyshelf", "/tmp/some-dir", "--dry-run", "--recursive"])
            .expect("Arguments should parse");

        assert_eq!(cli.path, PathBuf::from("/tmp/some-dir"));
        assert!(cli.dry_run);
        assert!(cli.recursive);
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_FILE));
    }

    #[test]
    fn test_cli_requires_path() {
        let result = Cli::try_parse_from(["tidyshelf"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_accepts_config_override() {
        let cli = Cli::try_parse_from(["tidyshelf", "/tmp/d", "--config", "custom.json"])
            .expect("Arguments should parse");
        assert_eq!(cli.config, PathBuf::from("custom.json"));
        assert!(!cli.dry_run);
        assert!(!cli.recursive);
    }
}
