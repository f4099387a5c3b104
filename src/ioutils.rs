use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Resolves `path` against `base` unless it is already absolute.
pub fn resolve<P: AsRef<Path>, B: AsRef<Path>>(base: B, path: P) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.as_ref().join(path)
    }
}

const BOM: char = '\u{feff}';

/// Drops a leading UTF-8 byte order mark.
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix(BOM).unwrap_or(text)
}

/// Reads a whole text file, reporting a missing file as `InputFileMissing`.
/// A leading byte order mark is removed.
pub fn read_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::InputFileMissing { path: path.display().to_string() });
    }
    let mut text = std::fs::read_to_string(path).map_err(|e| Error::filesystem(path, e))?;
    if text.starts_with(BOM) {
        text.drain(..BOM.len_utf8());
    }
    Ok(text)
}

pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    Ok(read_text(path)?.lines().map(str::to_string).collect())
}

pub fn create_dir_all<P: AsRef<Path>>(dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();
    std::fs::create_dir_all(dest_path).map_err(|e| Error::filesystem(dest_path, e))
}

/// Writes `content` to `dest_path`, creating missing parent directories.
pub fn write_file<P: AsRef<Path>>(content: &str, dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();
    if let Some(parent) = dest_path.parent() {
        create_dir_all(parent)?;
    }
    std::fs::write(dest_path, content).map_err(|e| Error::filesystem(dest_path, e))
}

pub fn copy_file<P: AsRef<Path>>(source_path: P, dest_path: P) -> Result<()> {
    let source_path = source_path.as_ref();
    let dest_path = dest_path.as_ref();
    if let Some(parent) = dest_path.parent() {
        create_dir_all(parent)?;
    }
    std::fs::copy(source_path, dest_path)
        .map(|_| ())
        .map_err(|e| Error::filesystem(dest_path, e))
}

pub fn read_from(mut reader: impl std::io::Read) -> Result<String> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf).map_err(Error::IoError)?;
    Ok(strip_bom(&buf).to_string())
}

/// Whether both paths exist and resolve to the same filesystem entry.
pub fn is_same_path<A: AsRef<Path>, B: AsRef<Path>>(a: A, b: B) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
