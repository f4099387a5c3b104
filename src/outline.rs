//! Folder hierarchies from indented text outlines.
//!
//! An outline lists one folder per line. Nesting is expressed with two spaces
//! per level (tabs count as four spaces) and an optional leading `-` marker:
//!
//! ```text
//! Core
//!   Scripts
//!   Art
//! UI
//!   - Prefabs
//! ```
//!
//! Indentation is only ever compared with the previous line, so an outline
//! that starts indented behaves as if it started at column zero.

use std::collections::HashSet;
use std::path::Path;

use log::{debug, error, info};

use crate::constants::{SPACES_PER_LEVEL, TAB_WIDTH};
use crate::error::Result;
use crate::ioutils::create_dir_all;
use crate::operation::FileOperation;

/// A single folder line of an outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
    pub indent: usize,
    pub name: String,
}

/// Outcome of applying a folder plan.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FolderReport {
    pub created: usize,
    pub existing: usize,
    pub failed: usize,
}

/// Parses one raw outline line.
///
/// Returns `None` for blank lines, `#` comments and lines that hold nothing
/// but markers.
pub fn parse_entry(raw_line: &str) -> Option<OutlineEntry> {
    let line = raw_line.replace('\t', &" ".repeat(TAB_WIDTH));
    let content = line.trim();
    if content.is_empty() || content.starts_with('#') {
        return None;
    }

    let leading_spaces = line.chars().take_while(|c| *c == ' ').count();
    let name = line.trim_start_matches(|c: char| c == '-' || c == ' ').trim();
    if name.is_empty() {
        return None;
    }

    Some(OutlineEntry { indent: leading_spaces / SPACES_PER_LEVEL, name: name.to_string() })
}

/// Turns outline lines into the ordered list of folder paths they describe.
///
/// Every path is rooted at `root` and a parent is always emitted before
/// its children.
pub fn build<I, S>(lines: I, root: &str) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut stack: Vec<String> = Vec::new();
    let mut previous_indent: isize = -1;
    let mut paths = Vec::new();

    for entry in lines.into_iter().filter_map(|line| parse_entry(line.as_ref())) {
        let indent = entry.indent as isize;

        // Close every scope at or below the new line's depth.
        while indent <= previous_indent && !stack.is_empty() {
            stack.pop();
            previous_indent -= 1;
        }

        let parent = stack.last().map(String::as_str).unwrap_or(root);
        let path = format!("{}/{}", parent, entry.name);
        debug!("Outline entry '{}' (indent {}) -> '{}'", entry.name, entry.indent, path);

        paths.push(path.clone());
        stack.push(path);
        previous_indent = indent;
    }

    paths
}

/// Plans one directory creation per path, resolved against `project_dir`.
///
/// A path is marked as existing when the directory is already on disk or
/// an earlier operation of the same plan creates it.
pub fn plan<S: AsRef<str>>(paths: &[S], project_dir: &Path) -> Vec<FileOperation> {
    let mut planned = HashSet::new();
    paths
        .iter()
        .map(|path| {
            let target = project_dir.join(path.as_ref());
            let target_exists = target.is_dir() || !planned.insert(target.clone());
            FileOperation::CreateDirectory { target, target_exists }
        })
        .collect()
}

/// Creates every planned directory that does not exist yet, in order.
///
/// A failing directory is logged and counted; the remaining operations
/// still run.
pub fn apply(operations: &[FileOperation]) -> Result<FolderReport> {
    let mut report = FolderReport::default();

    for operation in operations {
        let FileOperation::CreateDirectory { target, target_exists } = operation else {
            debug!("Skipping non-directory operation {:?}", operation);
            continue;
        };

        if *target_exists {
            debug!("{}", operation.get_message(false, false));
            report.existing += 1;
            continue;
        }

        match create_dir_all(target) {
            Ok(()) => {
                info!("{}", operation.get_message(false, false));
                report.created += 1;
            }
            Err(e) => {
                error!("{}", e);
                report.failed += 1;
            }
        }
    }

    Ok(report)
}
