//! Input path resolution.
//!
//! A file path resolves to itself. A directory resolves to the regular files
//! directly inside it whose extension is one of [`INTENTS_EXTENSIONS`].
//! Subdirectories are not descended into.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConvertError;

/// Recognized intents file extensions (case-sensitive).
pub const INTENTS_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// Resolve `path` into the ordered list of files to convert.
///
/// Directory entries are returned sorted by file name.
pub fn resolve(path: &Path) -> Result<Vec<PathBuf>, ConvertError> {
    let metadata = fs::metadata(path).map_err(|e| ConvertError::io(path, e))?;

    if !metadata.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let access = |source| ConvertError::Access {
        path: path.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(path).map_err(access)? {
        let entry = entry.map_err(access)?;
        let entry_path = entry.path();

        // DirEntry::file_type does not follow symlinks.
        let file_type = entry.file_type().map_err(access)?;
        if !file_type.is_file() {
            tracing::debug!(path = %entry_path.display(), "Skipping non-regular entry");
            continue;
        }
        if !has_intents_extension(&entry_path) {
            tracing::debug!(
                path = %entry_path.display(),
                "Skipping file without intents extension"
            );
            continue;
        }

        files.push(entry_path);
    }

    files.sort();
    Ok(files)
}

/// Check whether a path ends in a recognized intents extension.
pub fn has_intents_extension(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .map(|ext| INTENTS_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}
