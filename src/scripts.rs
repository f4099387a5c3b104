//! Script generation from text templates.
//!
//! A script list names one file per line, e.g. `_Project/Scripts/UI/MainMenu`.
//! Each path is placed under the assets folder, gets the script extension
//! and is rendered from the chosen template with these placeholders:
//!
//! - `#SCRIPTNAME#`, `#NAME#`: the file name without extension
//! - `#NAMESPACE#`: the folders between the assets folder and the file,
//!   joined with `.` (`_Project.Scripts.UI`)
//! - `#NOTRIM#`: removed

use std::path::{Path, PathBuf};

use globset::Glob;
use log::{debug, error, info, warn};
use serde_json::json;
use walkdir::WalkDir;

use crate::constants::TEMPLATE_GLOB;
use crate::error::{Error, Result};
use crate::ioutils::write_file;
use crate::operation::FileOperation;
use crate::renderer::TemplateRenderer;

/// A template file available for generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptTemplate {
    /// File name without its final extension
    pub name: String,
    pub path: PathBuf,
}

impl ScriptTemplate {
    fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_stem()?.to_str()?.to_string();
        Some(Self { name, path: path.to_path_buf() })
    }
}

/// Lists `*.txt` templates.
///
/// `project_dir` is searched recursively, `editor_dir` (the templates shipped
/// with the editor) only at its top level. Missing directories are skipped.
pub fn discover_templates(
    project_dir: &Path,
    editor_dir: Option<&Path>,
) -> Result<Vec<ScriptTemplate>> {
    let matcher = Glob::new(TEMPLATE_GLOB)?.compile_matcher();
    let mut templates = Vec::new();

    let mut sources = vec![(project_dir, usize::MAX)];
    if let Some(editor_dir) = editor_dir {
        sources.push((editor_dir, 1));
    }

    for (dir, max_depth) in sources {
        if !dir.is_dir() {
            debug!("Template directory '{}' does not exist", dir.display());
            continue;
        }
        for entry in WalkDir::new(dir).max_depth(max_depth).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() || !matcher.is_match(entry.file_name()) {
                continue;
            }
            if let Some(template) = ScriptTemplate::from_path(entry.path()) {
                debug!("Found template '{}'", template.path.display());
                templates.push(template);
            }
        }
    }

    Ok(templates)
}

/// Finds a template by name, falling back to the full file name.
pub fn find_template<'a>(
    templates: &'a [ScriptTemplate],
    name: &str,
) -> Option<&'a ScriptTemplate> {
    templates.iter().find(|t| t.name == name).or_else(|| {
        templates
            .iter()
            .find(|t| t.path.file_name().and_then(|n| n.to_str()) == Some(name))
    })
}

/// Keeps the non-blank, non-comment lines of a script list, trimmed.
pub fn read_script_list<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .map(|line| line.as_ref().trim().to_string())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
}

/// Normalizes a listed path: forward slashes, rooted at `assets_dir`,
/// ending with `extension`.
pub fn normalize_script_path(raw: &str, assets_dir: &str, extension: &str) -> String {
    let mut path = raw.replace('\\', "/");
    let prefix = format!("{}/", assets_dir);
    if !path.starts_with(&prefix) {
        path = format!("{}{}", prefix, path);
    }
    if !path.ends_with(extension) {
        path.push_str(extension);
    }
    path
}

/// Derives a namespace by dropping the first and last path segments.
///
/// `Assets/_Project/Scripts/UI/MainMenu.cs` becomes `_Project.Scripts.UI`.
pub fn extract_namespace(path: &str) -> String {
    let parts: Vec<&str> = path.split('/').collect();
    parts
        .iter()
        .skip(1)
        .take(parts.len().saturating_sub(2))
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(".")
}

/// One script to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptTarget {
    /// Path relative to the project directory
    pub relative_path: String,
    pub name: String,
    pub namespace: String,
}

impl ScriptTarget {
    pub fn new(raw: &str, assets_dir: &str, extension: &str) -> Self {
        let relative_path = normalize_script_path(raw, assets_dir, extension);
        let name = relative_path
            .rsplit('/')
            .next()
            .map(|file| file.strip_suffix(extension).unwrap_or(file))
            .unwrap_or_default()
            .to_string();
        let namespace = extract_namespace(&relative_path);
        Self { relative_path, name, namespace }
    }

    /// Values for the template placeholders.
    pub fn context(&self) -> serde_json::Value {
        json!({
            "SCRIPTNAME": self.name,
            "NAME": self.name,
            "NOTRIM": "",
            "NAMESPACE": self.namespace,
        })
    }
}

/// Per-path outcome counts of a generation run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub created: usize,
    pub skipped: usize,
    pub failed: usize,
    pub total: usize,
}

impl GenerationReport {
    pub fn summary(&self) -> String {
        format!("{} script(s) created successfully out of {} paths.", self.created, self.total)
    }
}

/// Renders `template` once per target and writes the files under
/// `project_dir`.
///
/// Existing files are never overwritten. A failing path is logged and
/// counted without stopping the batch.
pub fn generate_scripts(
    renderer: &dyn TemplateRenderer,
    template: &str,
    targets: &[ScriptTarget],
    project_dir: &Path,
) -> GenerationReport {
    let mut report = GenerationReport { total: targets.len(), ..Default::default() };

    for target in targets {
        match generate_script(renderer, template, target, project_dir) {
            Ok(operation) => {
                info!("{}", operation.get_message(false, false));
                report.created += 1;
            }
            Err(e @ Error::TargetAlreadyExists { .. }) => {
                warn!("{}", e);
                report.skipped += 1;
            }
            Err(e) => {
                error!("Failed to create script '{}': {}", target.relative_path, e);
                report.failed += 1;
            }
        }
    }

    report
}

fn generate_script(
    renderer: &dyn TemplateRenderer,
    template: &str,
    target: &ScriptTarget,
    project_dir: &Path,
) -> Result<FileOperation> {
    let full_path = project_dir.join(&target.relative_path);
    if full_path.exists() {
        return Err(Error::TargetAlreadyExists { path: target.relative_path.clone() });
    }

    let content = renderer.render(template, &target.context())?;
    write_file(&content, &full_path)?;
    Ok(FileOperation::Write { target: PathBuf::from(&target.relative_path), target_exists: false })
}
