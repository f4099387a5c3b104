//! Command-line interface implementation for fastsetup.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, Args as ClapArgs, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments structure for fastsetup.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "fastsetup: one-shot scaffolding for Unity projects",
    long_about = None
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Unity project directory that outputs are written to
    #[arg(short = 'C', long, value_name = "DIR", default_value = ".", global = true)]
    pub project_dir: PathBuf,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a folder structure from an indented outline file
    Folders(FoldersArgs),
    /// Merge packages and scoped registries from a spec file into the manifest
    Packages(PackagesArgs),
    /// Replace the manifest with a validated JSON document
    OverwriteManifest(OverwriteManifestArgs),
    /// Generate scripts from a template for every path in a list file
    Scripts(ScriptsArgs),
    /// Copy a folder of script templates into the project
    CopyTemplates(CopyTemplatesArgs),
}

#[derive(ClapArgs, Debug)]
pub struct FoldersArgs {
    /// Outline file, two spaces per nesting level
    #[arg(value_name = "OUTLINE")]
    pub outline: PathBuf,

    /// Print the planned folders without creating them
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(ClapArgs, Debug)]
pub struct PackagesArgs {
    /// Package spec file
    #[arg(value_name = "SPEC")]
    pub spec: PathBuf,

    /// Print the merged manifest instead of writing it
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(ClapArgs, Debug)]
pub struct OverwriteManifestArgs {
    /// Replacement manifest, or "-" to read it from stdin
    #[arg(value_name = "DOCUMENT")]
    pub document: String,

    /// Replace the manifest without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(ClapArgs, Debug)]
pub struct ScriptsArgs {
    /// File listing one script path per line
    #[arg(value_name = "LIST")]
    pub list: PathBuf,

    /// Template name; asks interactively when omitted
    #[arg(short, long)]
    pub template: Option<String>,

    /// Directory with the templates bundled with the editor
    #[arg(long, value_name = "DIR")]
    pub editor_templates: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
pub struct CopyTemplatesArgs {
    /// Folder to copy into the script templates directory
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if matches!(
                e.kind(),
                ErrorKind::MissingRequiredArgument
                    | ErrorKind::MissingSubcommand
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}

/// Maps the verbose flag to a log level.
pub fn get_log_level_from_verbose(verbose: bool) -> log::LevelFilter {
    if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    }
}
