//! fastsetup provides one-shot scaffolding commands for Unity projects:
//! folder structures from outlines, package manifest merges, scripts from
//! templates and template folder copies.

/// Command-line interface module for the fastsetup application
pub mod cli;

/// Subcommand implementations
pub mod commands;

/// Project configuration (fastsetup.json, fastsetup.yml, fastsetup.yaml)
pub mod config;

pub mod constants;

/// Recursive template folder copy
pub mod copier;

/// Error types and handling for the fastsetup application
pub mod error;

/// Ignore patterns for template folder copies
pub mod ignore;

/// A set of helpers for working with the file system.
pub mod ioutils;

pub mod logger;

/// Package manifest document
pub mod manifest;

pub mod operation;

/// Folder structures from indented outlines
pub mod outline;

/// Package spec parsing and manifest merge
pub mod packages;

/// User input and interaction handling
pub mod prompt;

/// Placeholder rendering for script templates
pub mod renderer;

/// Script generation from templates
pub mod scripts;
