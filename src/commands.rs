//! One function per subcommand, wiring the core transformations to the
//! project directory, its configuration and the user.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::config::Config;
use crate::copier::{copy_folder, CopyReport};
use crate::error::{Error, Result};
use crate::ignore::build_ignore_set;
use crate::ioutils::{read_from, read_lines, read_text, resolve, write_file};
use crate::manifest::{overwrite_manifest, validate_manifest_document, Manifest};
use crate::outline::{self, FolderReport};
use crate::packages::{merge, MergeOutcome};
use crate::prompt::Prompter;
use crate::renderer::TemplateRenderer;
use crate::scripts::{
    discover_templates, find_template, generate_scripts, read_script_list, GenerationReport,
    ScriptTarget,
};

/// Everything a command needs besides its own arguments.
pub struct Context<'a> {
    pub project_dir: PathBuf,
    pub config: Config,
    pub prompt: &'a dyn Prompter,
}

impl<'a> Context<'a> {
    pub fn new<P: Into<PathBuf>>(project_dir: P, config: Config, prompt: &'a dyn Prompter) -> Self {
        Self { project_dir: project_dir.into(), config, prompt }
    }

    /// Resolves a configured path against the project directory.
    pub fn project_path<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        resolve(&self.project_dir, path)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.project_path(&self.config.manifest_path)
    }
}

/// Creates the folders described by the outline at `outline_path`.
pub fn create_folders(ctx: &Context, outline_path: &Path, dry_run: bool) -> Result<FolderReport> {
    let lines = read_lines(outline_path)?;
    let paths = outline::build(&lines, &ctx.config.assets_dir);
    if paths.is_empty() {
        return Err(Error::NoEntries { path: outline_path.display().to_string() });
    }

    let operations = outline::plan(&paths, &ctx.project_dir);
    if dry_run {
        let mut report = FolderReport::default();
        for operation in &operations {
            println!("{}", operation.get_message(false, true));
            if operation.target_exists() {
                report.existing += 1;
            } else {
                report.created += 1;
            }
        }
        return Ok(report);
    }

    outline::apply(&operations)
}

/// Merges the package spec at `spec_path` into the project manifest.
///
/// With `dry_run` the merged manifest is printed instead of written.
pub fn import_packages(ctx: &Context, spec_path: &Path, dry_run: bool) -> Result<MergeOutcome> {
    let lines = read_lines(spec_path)?;
    let manifest_path = ctx.manifest_path();
    let manifest: Manifest = read_text(&manifest_path)?.parse()?;

    let outcome = merge(&lines, manifest);
    let merged = outcome.manifest.to_pretty_string()?;

    if dry_run {
        println!("{}", merged);
    } else {
        write_file(&merged, &manifest_path)?;
        info!("Updated manifest '{}'", manifest_path.display());
    }

    Ok(outcome)
}

/// Replaces the manifest with the document at `source` (`-` reads stdin).
///
/// Returns `false` when the user declined.
pub fn replace_manifest(ctx: &Context, source: &str, skip_confirm: bool) -> Result<bool> {
    let document = if source == "-" {
        read_from(std::io::stdin())?
    } else {
        read_text(source)?
    };

    validate_manifest_document(&document)?;

    let manifest_path = ctx.manifest_path();
    let confirmed = ctx.prompt.confirm(
        skip_confirm || !manifest_path.exists(),
        format!("Replace '{}'?", manifest_path.display()),
    )?;
    if !confirmed {
        warn!("Left '{}' unchanged", manifest_path.display());
        return Ok(false);
    }

    overwrite_manifest(&document, &manifest_path)?;
    Ok(true)
}

/// Generates one script per line of the list at `list_path`.
///
/// Returns `None` when the user cancelled the template selection.
pub fn generate_from_list(
    ctx: &Context,
    renderer: &dyn TemplateRenderer,
    list_path: &Path,
    template_name: Option<&str>,
    editor_templates_dir: Option<&Path>,
) -> Result<Option<GenerationReport>> {
    let project_templates = ctx.project_path(&ctx.config.script_templates_dir);
    let editor_templates = editor_templates_dir
        .map(Path::to_path_buf)
        .or_else(|| ctx.config.editor_templates_dir.clone());

    let templates = discover_templates(&project_templates, editor_templates.as_deref())?;
    if templates.is_empty() {
        let mut dirs = vec![project_templates.display().to_string()];
        dirs.extend(editor_templates.iter().map(|d| d.display().to_string()));
        return Err(Error::NoTemplatesFound { dirs: dirs.join(", ") });
    }

    let template = match template_name {
        Some(name) => find_template(&templates, name).ok_or_else(|| {
            Error::TemplateError(format!("no template named '{}'", name))
        })?,
        None => {
            let names: Vec<String> = templates.iter().map(|t| t.name.clone()).collect();
            match ctx.prompt.select("Choose a template for the scripts", &names)? {
                Some(index) => &templates[index],
                None => {
                    info!("Template selection cancelled");
                    return Ok(None);
                }
            }
        }
    };
    debug!("Using template '{}'", template.path.display());

    let template_content = read_text(&template.path)?;
    let paths = read_script_list(read_lines(list_path)?);
    if paths.is_empty() {
        return Err(Error::NoEntries { path: list_path.display().to_string() });
    }

    let targets: Vec<ScriptTarget> = paths
        .iter()
        .map(|p| ScriptTarget::new(p, &ctx.config.assets_dir, &ctx.config.script_extension))
        .collect();

    Ok(Some(generate_scripts(renderer, &template_content, &targets, &ctx.project_dir)))
}

/// Copies a template folder into the project's script templates directory.
pub fn copy_templates(ctx: &Context, source: &Path) -> Result<CopyReport> {
    let destination = ctx.project_path(&ctx.config.script_templates_dir);
    let ignore = build_ignore_set(&ctx.config.ignore)?;
    copy_folder(source, &destination, &ignore)
}
