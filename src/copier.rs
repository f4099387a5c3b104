//! Recursive copy of a template folder.
use std::io;
use std::path::Path;

use globset::GlobSet;
use log::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::ioutils::{copy_file, create_dir_all, is_same_path};
use crate::operation::FileOperation;

/// Counts of a folder copy.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CopyReport {
    pub files: usize,
    pub directories: usize,
    pub overwritten: usize,
    pub ignored: usize,
}

/// Plans the copy of every entry under `source` into `destination`.
///
/// Entries matching `ignore` produce an `Ignore` operation and their
/// children are not visited.
pub fn plan_copy(
    source: &Path,
    destination: &Path,
    ignore: &GlobSet,
) -> Result<Vec<FileOperation>> {
    if !source.is_dir() {
        return Err(Error::InputFileMissing { path: source.display().to_string() });
    }

    let mut operations = Vec::new();
    let mut walker = WalkDir::new(source).sort_by_file_name().into_iter();

    while let Some(entry) = walker.next() {
        let entry = entry?;
        let relative = entry.path().strip_prefix(source).map_err(|e| {
            Error::filesystem(entry.path(), io::Error::new(io::ErrorKind::InvalidInput, e))
        })?;

        if relative.as_os_str().is_empty() {
            operations.push(FileOperation::CreateDirectory {
                target: destination.to_path_buf(),
                target_exists: destination.is_dir(),
            });
            continue;
        }

        if ignore.is_match(relative) {
            if entry.file_type().is_dir() {
                walker.skip_current_dir();
            }
            operations.push(FileOperation::Ignore { source: entry.path().to_path_buf() });
            continue;
        }

        let target = destination.join(relative);
        let operation = if entry.file_type().is_dir() {
            FileOperation::CreateDirectory { target_exists: target.is_dir(), target }
        } else {
            FileOperation::Copy {
                source: entry.path().to_path_buf(),
                target_exists: target.exists(),
                target,
            }
        };
        operations.push(operation);
    }

    Ok(operations)
}

/// Executes a copy plan, overwriting existing files.
///
/// A copy whose target resolves to its own source is skipped.
pub fn apply_copy(operations: &[FileOperation]) -> Result<CopyReport> {
    let mut report = CopyReport::default();

    for operation in operations {
        match operation {
            FileOperation::CreateDirectory { target, target_exists } => {
                if !target_exists {
                    create_dir_all(target)?;
                    info!("{}", operation.get_message(true, false));
                }
                report.directories += 1;
            }
            FileOperation::Copy { source, target, target_exists } => {
                if *target_exists && is_same_path(source, target) {
                    warn!("Skipping '{}': target is the source file", source.display());
                    report.ignored += 1;
                    continue;
                }
                copy_file(source, target)?;
                info!("{}", operation.get_message(true, false));
                report.files += 1;
                if *target_exists {
                    report.overwritten += 1;
                }
            }
            FileOperation::Ignore { .. } => {
                debug!("{}", operation.get_message(true, false));
                report.ignored += 1;
            }
            FileOperation::Write { .. } => {
                debug!("Skipping unexpected write operation {:?}", operation);
            }
        }
    }

    Ok(report)
}

/// Copies `source` into `destination` recursively.
///
/// # Errors
/// * `Error::InputFileMissing` if `source` is not a directory
/// * `Error::CopyOntoItself` if `destination` is `source`
/// * `Error::FilesystemFailure` if a directory or file cannot be written
pub fn copy_folder(source: &Path, destination: &Path, ignore: &GlobSet) -> Result<CopyReport> {
    if is_same_path(source, destination) {
        return Err(Error::CopyOntoItself { path: source.display().to_string() });
    }
    let operations = plan_copy(source, destination, ignore)?;
    let report = apply_copy(&operations)?;
    debug!(
        "Copied folder from {} to {}: {:?}",
        source.display(),
        destination.display(),
        report
    );
    Ok(report)
}
