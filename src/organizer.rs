/// Tree walking and file placement.
///
/// This module walks a target directory (optionally recursively), computes a
/// `category/year/month` destination for every file from its extension and
/// modification time, resolves filename collisions with a numeric suffix, and
/// either previews or performs the moves. Each decision is appended to a
/// timestamped run log kept inside the target directory.
use chrono::{DateTime, Datelike, Local};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::category::CategoryMap;

/// A single planned or performed file move.
#[derive(Debug, Clone)]
pub struct Placement {
    /// Where the file was found.
    pub source: PathBuf,
    /// Where the file was (or would be) moved, collision suffix included.
    pub destination: PathBuf,
    /// The category the file resolved to.
    pub category: String,
}

/// Errors that can occur during organization.
#[derive(Debug)]
pub enum OrganizeError {
    /// A directory could not be read during traversal.
    ReadDirFailed {
        path: PathBuf,
        source: io::Error,
    },
    /// A file's modification time could not be determined.
    MetadataUnavailable {
        path: PathBuf,
        source: io::Error,
    },
    /// Failed to create a destination directory.
    DirectoryCreationFailed {
        path: PathBuf,
        source: io::Error,
    },
    /// Failed to move a file to its destination.
    FileMoveFailed {
        source_path: PathBuf,
        destination: PathBuf,
        source: io::Error,
    },
    /// Failed to open or append to the run log.
    LogWriteFailed { source: io::Error },
}

impl std::fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReadDirFailed { path, source } => {
                write!(f, "Failed to read directory {}: {}", path.display(), source)
            }
            Self::MetadataUnavailable { path, source } => {
                write!(
                    f,
                    "Failed to read metadata for {}: {}",
                    path.display(),
                    source
                )
            }
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::FileMoveFailed {
                source_path,
                destination,
                source,
            } => {
                write!(
                    f,
                    "Failed to move {} to {}: {}",
                    source_path.display(),
                    destination.display(),
                    source
                )
            }
            Self::LogWriteFailed { source } => {
                write!(f, "Failed to write run log: {}", source)
            }
        }
    }
}

impl std::error::Error for OrganizeError {}

/// Result type for organization operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// Append-style text log written inside the target directory.
///
/// Records startup, one line per move or dry-run decision, and completion.
/// The log is opened at startup even under dry-run; opening it is the only
/// filesystem write a dry run performs.
pub struct RunLog {
    file: File,
}

impl RunLog {
    /// Name of the log file, created directly under the target directory.
    pub const FILE_NAME: &'static str = "tidyshelf.log";

    /// Opens the log inside `base_path`, creating it if needed.
    pub fn open(base_path: &Path) -> OrganizeResult<Self> {
        let file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(base_path.join(Self::FILE_NAME))
            .map_err(|e| OrganizeError::LogWriteFailed { source: e })?;
        Ok(Self { file })
    }

    /// Appends one timestamped INFO line.
    pub fn info(&mut self, message: &str) -> OrganizeResult<()> {
        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        writeln!(self.file, "{} - INFO - {}", stamp, message)
            .map_err(|e| OrganizeError::LogWriteFailed { source: e })
    }
}

/// Walks directories and places files into `category/year/month` folders.
///
/// The destination root is fixed at construction: files found in nested
/// subdirectories still land under the top-level target directory. The
/// category mapping is borrowed immutably, so the same map can drive
/// several organizers in tests.
pub struct Organizer<'a> {
    root: PathBuf,
    categories: &'a CategoryMap,
    dry_run: bool,
}

impl<'a> Organizer<'a> {
    pub fn new(root: &Path, categories: &'a CategoryMap, dry_run: bool) -> Self {
        Self {
            root: root.to_path_buf(),
            categories,
            dry_run,
        }
    }

    /// Collects every file to organize under `dir`, descending into
    /// subdirectories when `recursive` is set.
    ///
    /// Entries are snapshotted before any file is acted on, so category
    /// directories created later in the same run are never re-walked.
    /// The run's own log file is left where it is.
    pub fn collect_files(&self, dir: &Path, recursive: bool) -> OrganizeResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        self.collect_into(dir, recursive, &mut files)?;
        Ok(files)
    }

    fn collect_into(
        &self,
        dir: &Path,
        recursive: bool,
        files: &mut Vec<PathBuf>,
    ) -> OrganizeResult<()> {
        let entries = fs::read_dir(dir).map_err(|e| OrganizeError::ReadDirFailed {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| OrganizeError::ReadDirFailed {
                path: dir.to_path_buf(),
                source: e,
            })?;
            paths.push(entry.path());
        }
        paths.sort();

        for path in paths {
            if path.is_file() {
                if path.file_name().is_some_and(|name| name == RunLog::FILE_NAME) {
                    continue;
                }
                files.push(path);
            } else if path.is_dir() && recursive {
                self.collect_into(&path, recursive, files)?;
            }
        }

        Ok(())
    }

    /// Places one file: resolves its category, computes the
    /// `root/category/year/month` destination from its modification time,
    /// resolves name collisions, and moves it. Under dry-run nothing is
    /// created or moved; the returned [`Placement`] describes what would
    /// have happened.
    pub fn place(&self, file_path: &Path) -> OrganizeResult<Placement> {
        let ext = dot_extension(file_path);
        let category = self.categories.resolve(&ext).to_string();

        let modified = modified_time(file_path)?;
        let dest_dir = self
            .root
            .join(&category)
            .join(modified.year().to_string())
            .join(format!("{:02}", modified.month()));

        if !self.dry_run {
            fs::create_dir_all(&dest_dir).map_err(|e| OrganizeError::DirectoryCreationFailed {
                path: dest_dir.clone(),
                source: e,
            })?;
        }

        let destination = resolve_collision(&dest_dir, file_path)?;

        if !self.dry_run {
            fs::rename(file_path, &destination).map_err(|e| OrganizeError::FileMoveFailed {
                source_path: file_path.to_path_buf(),
                destination: destination.clone(),
                source: e,
            })?;
        }

        Ok(Placement {
            source: file_path.to_path_buf(),
            destination,
            category,
        })
    }
}

/// Returns the file's extension with its leading dot (e.g. `.txt`), or an
/// empty string for extensionless files. Dotfiles like `.bashrc` count as
/// extensionless.
pub(crate) fn dot_extension(path: &Path) -> String {
    match path.extension() {
        Some(ext) => format!(".{}", ext.to_string_lossy()),
        None => String::new(),
    }
}

/// Reads the file's last-modified time as local time.
fn modified_time(path: &Path) -> OrganizeResult<DateTime<Local>> {
    let metadata = fs::metadata(path).map_err(|e| OrganizeError::MetadataUnavailable {
        path: path.to_path_buf(),
        source: e,
    })?;
    let modified = metadata
        .modified()
        .map_err(|e| OrganizeError::MetadataUnavailable {
            path: path.to_path_buf(),
            source: e,
        })?;
    Ok(modified.into())
}

/// Picks a collision-free destination path inside `dest_dir` for the file,
/// appending `_1`, `_2`, … to the stem until the candidate does not exist.
fn resolve_collision(dest_dir: &Path, file_path: &Path) -> OrganizeResult<PathBuf> {
    let file_name = file_path
        .file_name()
        .ok_or_else(|| OrganizeError::FileMoveFailed {
            source_path: file_path.to_path_buf(),
            destination: dest_dir.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "file has no name component"),
        })?;

    let mut candidate = dest_dir.join(file_name);
    if !candidate.exists() {
        return Ok(candidate);
    }

    let stem = file_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = dot_extension(file_path);

    let mut counter = 1;
    while candidate.exists() {
        candidate = dest_dir.join(format!("{}_{}{}", stem, counter, ext));
        counter += 1;
    }

    Ok(candidate)
}
