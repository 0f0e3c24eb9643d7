//! Recursive discovery of candidate icon files under a source root.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::PackError;
use crate::filter::IconFilter;

/// A qualifying icon file found under a source root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    /// Absolute (or root-joined) path to the file
    pub path: PathBuf,
    /// Path relative to the walked root, used to mirror layout at the destination
    pub relative: PathBuf,
}

/// Walk `root` and return every `.svg` file whose stem matches the filter,
/// sorted by relative path.
///
/// The extension check is exact and case-sensitive: `icon.SVG` does not
/// qualify. Symbolic-link files are candidates like regular files. A
/// missing root yields an empty set; the caller decides whether that is
/// meaningful. Unreadable entries are skipped, but a symlink-induced
/// traversal cycle aborts the scan.
pub fn scan_icons(
    root: &Path,
    filter: &IconFilter,
    follow_links: bool,
) -> Result<Vec<CandidateFile>, PackError> {
    if !root.is_dir() {
        return Ok(Vec::new());
    }

    let mut candidates = Vec::new();

    for entry in WalkDir::new(root).follow_links(follow_links) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.loop_ancestor().is_some() => {
                let path = e.path().unwrap_or(root).to_path_buf();
                return Err(PackError::LinkCycle { path });
            }
            Err(_) => continue,
        };

        if entry.file_type().is_dir() {
            continue;
        }

        let path = entry.path();
        if !path.extension().is_some_and(|ext| ext == "svg") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if !filter.matches(stem) {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path).to_path_buf();
        candidates.push(CandidateFile {
            path: path.to_path_buf(),
            relative,
        });
    }

    // Raw traversal order is filesystem-dependent; sorting keeps copy and
    // manifest order stable across runs.
    candidates.sort_by(|a, b| a.relative.cmp(&b.relative));

    Ok(candidates)
}
