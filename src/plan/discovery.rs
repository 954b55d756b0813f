use std::{
    fs,
    path::{Path, PathBuf},
};

use log::warn;
use walkdir::{DirEntry, WalkDir};

use crate::error::DiscoveryError;

/// Lists the config files directly inside `dir`, ordered byte-wise by file name.
///
/// Hidden entries are skipped; subdirectories are skipped with a warning.
pub fn discover(dir: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
    let metadata = fs::metadata(dir).map_err(|source| DiscoveryError::Unreadable {
        path: dir.to_path_buf(),
        source,
    })?;
    if !metadata.is_dir() {
        return Err(DiscoveryError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| DiscoveryError::Listing {
            path: dir.to_path_buf(),
            source,
        })?;
        if is_hidden(&entry) {
            continue;
        }
        if entry.file_type().is_dir() {
            warn!(
                "Skipping directory {} inside config directory",
                entry.path().display()
            );
            continue;
        }
        files.push(entry.into_path());
    }

    Ok(files)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}
