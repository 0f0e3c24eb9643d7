use std::path::PathBuf;
use thiserror::Error;

/// Packaging error types
#[derive(Error, Debug)]
pub enum PackError {
    #[error("invalid filter pattern '{pattern}'")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("source root not found for theme '{theme}': {path}")]
    SourceUnavailable { theme: String, path: PathBuf },

    #[error("theme '{theme}' is incomplete: missing descriptor {path}")]
    ThemeIncomplete { theme: String, path: PathBuf },

    #[error("No space left on device for {path}")]
    DiskFull { path: PathBuf },

    #[error("Failed to copy {src} to {dst}")]
    CopyFailed {
        src: PathBuf,
        dst: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory: {path}")]
    CreateDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("symbolic link cycle detected at {path}")]
    LinkCycle { path: PathBuf },

    #[error("manifest entry {path} is not under destination root {root}")]
    ManifestPathOutsideRoot { path: PathBuf, root: PathBuf },

    #[error("failed to serialize manifest")]
    ManifestWrite {
        #[source]
        source: quick_xml::Error,
    },

    #[error("Collection cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
