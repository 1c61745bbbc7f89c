use crate::error::{Error, Result};
use glob::Pattern;
use std::path::Path;
use tracing::{debug, error};
use walkdir::WalkDir;

/// List the image file names directly inside `dir`, sorted ascending by byte order.
///
/// Subdirectories are skipped, as are names matching one of `ignore_globs`.
/// Invalid glob patterns are logged and ignored.
pub fn list_image_names(dir: &Path, ignore_globs: &[String]) -> Result<Vec<String>> {
    if !dir.exists() {
        return Err(Error::MissingDirectory(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(Error::NotADirectory(dir.to_path_buf()));
    }

    let ignore_patterns: Vec<Pattern> = ignore_globs
        .iter()
        .filter_map(|glob| match Pattern::new(glob) {
            Ok(p) => Some(p),
            Err(e) => {
                error!("Invalid glob pattern '{}': {}", glob, e);
                None
            }
        })
        .collect();

    let mut names = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
        let entry = entry?;
        let path = entry.path();

        if !entry.file_type().is_file() {
            debug!("Skipping non-file entry {}", path.display());
            continue;
        }

        let name = entry
            .file_name()
            .to_str()
            .ok_or_else(|| Error::NonUtf8FileName(path.to_path_buf()))?;

        if ignore_patterns.iter().any(|pattern| pattern.matches(name)) {
            debug!("Ignoring {}", name);
            continue;
        }

        names.push(name.to_string());
    }

    names.sort();
    Ok(names)
}
