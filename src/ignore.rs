//! Ignore patterns for copying template folders.
//! Matching is done on paths relative to the folder being copied.

use crate::constants::DEFAULT_IGNORE_PATTERNS;
use crate::error::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;

/// Builds the ignore set from the default patterns plus `extra` ones.
///
/// Blank entries and `#` comments in `extra` are skipped.
///
/// # Errors
/// * `Error::GlobSetParseError` if a pattern is not a valid glob
pub fn build_ignore_set<S: AsRef<str>>(extra: &[S]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();

    let patterns = DEFAULT_IGNORE_PATTERNS
        .iter()
        .copied()
        .chain(extra.iter().map(|p| p.as_ref().trim()))
        .filter(|p| !p.is_empty() && !p.starts_with('#'));

    for pattern in patterns {
        debug!("Adding ignore pattern: {} to globset", pattern);
        builder.add(Glob::new(pattern)?);
    }

    Ok(builder.build()?)
}
