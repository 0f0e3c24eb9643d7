//! Icon theme identity and source-root layout.
//!
//! A theme is a named, self-contained icon set: its icons live under
//! `<source_root>/<dir_name>`, build-time size variants under
//! `<build_root>/<dir_name>/generated`, and a single `index.theme`
//! descriptor sits at the top of the original directory.

use std::fmt;
use std::path::{Path, PathBuf};

/// Name of the per-theme descriptor file that must accompany every
/// packaged theme.
pub const DESCRIPTOR_FILE: &str = "index.theme";

/// One icon theme: the name it is packaged under and the directory
/// it is sourced from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Packaged name, becomes the destination subdirectory (e.g. "breeze-dark")
    pub name: String,
    /// Source subdirectory within the checkout (e.g. "icons-dark")
    pub dir_name: String,
}

impl Theme {
    pub fn new(name: &str, dir_name: &str) -> Self {
        Self {
            name: name.to_string(),
            dir_name: dir_name.to_string(),
        }
    }

    /// Parse a `name:dir` theme specifier from the command line.
    /// Returns None if either side is empty or the separator is missing.
    pub fn parse(spec: &str) -> Option<Self> {
        let (name, dir_name) = spec.split_once(':')?;
        if name.is_empty() || dir_name.is_empty() {
            return None;
        }
        Some(Self::new(name, dir_name))
    }

    /// Original checked-out icon directory for this theme
    pub fn source_dir(&self, source_root: &Path) -> PathBuf {
        source_root.join(&self.dir_name)
    }

    /// Directory of build-time generated size variants for this theme
    pub fn generated_dir(&self, build_root: &Path) -> PathBuf {
        build_root.join(&self.dir_name).join("generated")
    }

    /// Destination directory this theme is packaged into
    pub fn dest_dir(&self, destination_root: &Path) -> PathBuf {
        destination_root.join(&self.name)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The Breeze theme pair packaged by default, in collection order.
pub fn default_themes() -> Vec<Theme> {
    vec![
        Theme::new("breeze-light", "icons"),
        Theme::new("breeze-dark", "icons-dark"),
    ]
}
