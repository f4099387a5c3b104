use std::path::PathBuf;

/// A single filesystem change planned by one of the commands.
#[derive(Debug, Clone, PartialEq)]
pub enum FileOperation {
    CreateDirectory { target: PathBuf, target_exists: bool },
    Copy { source: PathBuf, target: PathBuf, target_exists: bool },
    Write { target: PathBuf, target_exists: bool },
    Ignore { source: PathBuf },
}

impl FileOperation {
    pub fn target_exists(&self) -> bool {
        match self {
            FileOperation::CreateDirectory { target_exists, .. }
            | FileOperation::Copy { target_exists, .. }
            | FileOperation::Write { target_exists, .. } => *target_exists,
            FileOperation::Ignore { .. } => false,
        }
    }

    /// Gets a message describing the operation and its status.
    ///
    /// # Arguments
    /// * `overwrite` - Whether an existing target gets replaced
    /// * `dry_run` - Whether this is a dry run (no actual file operations)
    pub fn get_message(&self, overwrite: bool, dry_run: bool) -> String {
        let prefix = if dry_run { "[DRY RUN] " } else { "" };

        match self {
            FileOperation::CreateDirectory { target, target_exists } => {
                if *target_exists {
                    format!(
                        "{}Skipping directory creation '{}' (already exists)",
                        prefix,
                        target.display()
                    )
                } else {
                    format!("{}Creating directory '{}'", prefix, target.display())
                }
            }

            FileOperation::Copy { source, target, target_exists } => {
                if !*target_exists {
                    format!("{}Copying '{}' to '{}'", prefix, source.display(), target.display())
                } else if overwrite {
                    format!(
                        "{}Copying '{}' to '{}' (overwriting existing file)",
                        prefix,
                        source.display(),
                        target.display()
                    )
                } else {
                    format!(
                        "{}Skipping copy of '{}' to '{}' (target already exists)",
                        prefix,
                        source.display(),
                        target.display()
                    )
                }
            }

            FileOperation::Write { target, target_exists } => {
                if !*target_exists {
                    format!("{}Writing to '{}'", prefix, target.display())
                } else if overwrite {
                    format!(
                        "{}Writing to '{}' (overwriting existing file)",
                        prefix,
                        target.display()
                    )
                } else {
                    format!(
                        "{}Skipping write to '{}' (target already exists)",
                        prefix,
                        target.display()
                    )
                }
            }

            FileOperation::Ignore { source } => {
                format!("{}Ignoring '{}' (matches ignore pattern)", prefix, source.display())
            }
        }
    }
}
