//! Error handling for fastsetup.
//! Defines the error type and result alias used throughout the crate.

use std::io;
use thiserror::Error;

/// Errors that can occur while running a scaffolding command.
///
/// Some variants are reported per item and never abort a batch
/// (`MalformedSpecLine`, `UnknownRegistryReference`, `TargetAlreadyExists`).
/// The rest propagate to the caller.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    #[error("Filesystem failure at '{path}': {source}.")]
    FilesystemFailure {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Input file not found: '{path}'.")]
    InputFileMissing { path: String },

    #[error("Invalid line {line}: '{content}' ({reason}).")]
    MalformedSpecLine { line: usize, content: String, reason: String },

    #[error("Line {line}: registry '{registry}' not defined.")]
    UnknownRegistryReference { line: usize, registry: String },

    #[error("Malformed manifest document: {0}.")]
    MalformedManifestDocument(String),

    #[error("Cannot copy '{path}' onto itself.")]
    CopyOntoItself { path: String },

    #[error("Target already exists: '{path}'.")]
    TargetAlreadyExists { path: String },

    #[error("No templates found in: {dirs}.")]
    NoTemplatesFound { dirs: String },

    #[error("No valid entries found in '{path}'.")]
    NoEntries { path: String },

    #[error("Configuration error: {0}.")]
    ConfigError(String),

    #[error("Template error: {0}.")]
    TemplateError(String),

    #[error("Failed to parse JSON. Original error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to parse YAML. Original error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to build ignore patterns. Original error: {0}")]
    GlobSetParseError(#[from] globset::Error),

    #[error("Failed to walk directory. Original error: {0}")]
    WalkDirError(#[from] walkdir::Error),

    #[error("Prompt failed. Original error: {0}")]
    PromptError(#[from] dialoguer::Error),
}

impl Error {
    /// Wraps an io error with the path that caused it.
    pub fn filesystem<P: AsRef<std::path::Path>>(path: P, source: io::Error) -> Self {
        Error::FilesystemFailure { path: path.as_ref().display().to_string(), source }
    }
}

/// Convenience type alias for Results with `Error` as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(1);
}
