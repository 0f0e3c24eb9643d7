//! Per-theme artifact collection: copy qualifying icons and the theme
//! descriptor into the destination tree.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

#[cfg(unix)]
use std::os::unix::fs::symlink;
#[cfg(windows)]
use std::os::windows::fs::symlink_file as symlink;

use crate::error::PackError;
use crate::filter::IconFilter;
use crate::progress::Reporter;
use crate::scanner::scan_icons;
use crate::theme::{Theme, DESCRIPTOR_FILE};

/// Collection policy knobs
#[derive(Debug, Clone, Copy)]
pub struct CollectOptions {
    /// Descend symlinked directories while scanning
    pub follow_links: bool,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self { follow_links: true }
    }
}

fn ensure_parent_dir(dst: &Path) -> Result<(), PackError> {
    let Some(parent) = dst.parent() else {
        return Ok(());
    };
    if parent.exists() {
        return Ok(());
    }
    fs::create_dir_all(parent).map_err(|e| {
        // ENOSPC = 28 on Unix
        if e.raw_os_error() == Some(28) {
            return PackError::DiskFull {
                path: parent.to_path_buf(),
            };
        }
        PackError::CreateDirFailed {
            path: parent.to_path_buf(),
            source: e,
        }
    })
}

/// Copy a single file from src to dst, preserving a symbolic link as a
/// link rather than dereferencing it. An existing destination is
/// replaced (last writer wins).
pub fn copy_entry(src: &Path, dst: &Path) -> Result<(), PackError> {
    ensure_parent_dir(dst)?;

    let copy_failed = |e: std::io::Error| {
        if e.raw_os_error() == Some(28) {
            return PackError::DiskFull {
                path: dst.to_path_buf(),
            };
        }
        PackError::CopyFailed {
            src: src.to_path_buf(),
            dst: dst.to_path_buf(),
            source: e,
        }
    };

    let src_meta = fs::symlink_metadata(src).map_err(copy_failed)?;

    // A stale link at the destination would otherwise redirect the write
    if let Ok(dst_meta) = fs::symlink_metadata(dst) {
        if dst_meta.file_type().is_symlink() {
            fs::remove_file(dst).map_err(copy_failed)?;
        }
    }

    if src_meta.file_type().is_symlink() {
        let target = fs::read_link(src).map_err(copy_failed)?;
        if dst.exists() {
            fs::remove_file(dst).map_err(copy_failed)?;
        }
        symlink(&target, dst).map_err(copy_failed)?;
    } else {
        fs::copy(src, dst).map_err(copy_failed)?;
    }

    Ok(())
}

/// Collect one theme: walk each source root in order, copy every
/// qualifying icon into `<destination_root>/<theme.name>/`, then copy the
/// theme descriptor from the first root.
///
/// Returns the copied destination paths in copy order. A path copied
/// from more than one root appears once, at the position of its first
/// copy, with the file content of the last root that supplied it
/// (generated variants override the original checkout). A missing
/// non-first root contributes zero icons; a missing first root is
/// `SourceUnavailable` and a first root without `index.theme` is
/// `ThemeIncomplete`, since every theme must be independently usable.
pub fn collect_theme(
    theme: &Theme,
    source_roots: &[PathBuf],
    destination_root: &Path,
    filter: &IconFilter,
    options: CollectOptions,
    shutdown: &AtomicBool,
    reporter: &mut dyn Reporter,
) -> Result<Vec<PathBuf>, PackError> {
    let dest_dir = theme.dest_dir(destination_root);

    let mut copied = Vec::new();
    let mut seen: HashSet<PathBuf> = HashSet::new();

    for root in source_roots {
        let candidates = scan_icons(root, filter, options.follow_links)?;

        reporter.start(candidates.len() as u64);
        for candidate in &candidates {
            if shutdown.load(Ordering::Relaxed) {
                return Err(PackError::Cancelled);
            }

            let dst = dest_dir.join(&candidate.relative);
            copy_entry(&candidate.path, &dst)?;
            if seen.insert(dst.clone()) {
                copied.push(dst);
            }
            reporter.advance(1);
        }
        reporter.finish();
    }

    let Some(original_root) = source_roots.first() else {
        return Err(PackError::SourceUnavailable {
            theme: theme.name.clone(),
            path: PathBuf::new(),
        });
    };
    if !original_root.is_dir() {
        return Err(PackError::SourceUnavailable {
            theme: theme.name.clone(),
            path: original_root.clone(),
        });
    }

    let descriptor_src = original_root.join(DESCRIPTOR_FILE);
    if fs::symlink_metadata(&descriptor_src).is_err() {
        return Err(PackError::ThemeIncomplete {
            theme: theme.name.clone(),
            path: descriptor_src,
        });
    }

    let descriptor_dst = dest_dir.join(DESCRIPTOR_FILE);
    copy_entry(&descriptor_src, &descriptor_dst)?;
    if seen.insert(descriptor_dst.clone()) {
        copied.push(descriptor_dst);
    }

    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::Silent;
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn theme_fixture() -> Theme {
        Theme::new("breeze-light", "icons")
    }

    fn collect(
        theme: &Theme,
        roots: &[PathBuf],
        dest: &Path,
        filter: &IconFilter,
    ) -> Result<Vec<PathBuf>, PackError> {
        let shutdown = AtomicBool::new(false);
        collect_theme(
            theme,
            roots,
            dest,
            filter,
            CollectOptions::default(),
            &shutdown,
            &mut Silent,
        )
    }

    fn relative_to<'a>(paths: &'a [PathBuf], root: &Path) -> Vec<&'a str> {
        paths
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_str().unwrap())
            .collect()
    }

    #[test]
    fn test_collect_copies_svg_and_descriptor() {
        // Scenario A: non-svg files are left behind
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("icons");
        write(&root.join("foo.svg"), "foo");
        write(&root.join("bar.svg"), "bar");
        write(&root.join("baz.png"), "png");
        write(&root.join(DESCRIPTOR_FILE), "[Icon Theme]");
        let dest = temp.path().join("out");

        let copied = collect(
            &theme_fixture(),
            &[root],
            &dest,
            &IconFilter::match_all(),
        )
        .unwrap();

        assert_eq!(
            relative_to(&copied, &dest),
            vec![
                "breeze-light/bar.svg",
                "breeze-light/foo.svg",
                "breeze-light/index.theme",
            ]
        );
        assert!(dest.join("breeze-light/foo.svg").is_file());
        assert!(!dest.join("breeze-light/baz.png").exists());
    }

    #[test]
    fn test_collect_applies_pattern() {
        // Scenario B
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("icons");
        write(&root.join("edit-copy.svg"), "a");
        write(&root.join("edit-cut.svg"), "b");
        write(&root.join("view-list.svg"), "c");
        write(&root.join(DESCRIPTOR_FILE), "[Icon Theme]");
        let dest = temp.path().join("out");

        let filter = IconFilter::new("edit-.*").unwrap();
        let copied = collect(&theme_fixture(), &[root], &dest, &filter).unwrap();

        assert_eq!(
            relative_to(&copied, &dest),
            vec![
                "breeze-light/edit-copy.svg",
                "breeze-light/edit-cut.svg",
                "breeze-light/index.theme",
            ]
        );
        assert!(!dest.join("breeze-light/view-list.svg").exists());
    }

    #[test]
    fn test_collect_later_root_wins_listed_once() {
        // Scenario C: generated variants override the original checkout
        let temp = TempDir::new().unwrap();
        let original = temp.path().join("icons");
        let generated = temp.path().join("generated");
        write(&original.join("app-x.svg"), "original");
        write(&original.join(DESCRIPTOR_FILE), "[Icon Theme]");
        write(&generated.join("app-x.svg"), "generated");
        let dest = temp.path().join("out");

        let copied = collect(
            &theme_fixture(),
            &[original, generated],
            &dest,
            &IconFilter::match_all(),
        )
        .unwrap();

        assert_eq!(
            relative_to(&copied, &dest),
            vec!["breeze-light/app-x.svg", "breeze-light/index.theme"]
        );
        let content = fs::read_to_string(dest.join("breeze-light/app-x.svg")).unwrap();
        assert_eq!(content, "generated");
    }

    #[test]
    fn test_collect_missing_descriptor_fails() {
        // Scenario D
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("icons");
        write(&root.join("foo.svg"), "foo");
        let dest = temp.path().join("out");

        let result = collect(&theme_fixture(), &[root], &dest, &IconFilter::match_all());
        assert!(matches!(result, Err(PackError::ThemeIncomplete { .. })));
    }

    #[test]
    fn test_collect_empty_root_descriptor_only() {
        // Scenario E
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("icons");
        fs::create_dir_all(&root).unwrap();
        write(&root.join(DESCRIPTOR_FILE), "[Icon Theme]");
        let dest = temp.path().join("out");

        let copied = collect(&theme_fixture(), &[root], &dest, &IconFilter::match_all()).unwrap();

        assert_eq!(relative_to(&copied, &dest), vec!["breeze-light/index.theme"]);
    }

    #[test]
    fn test_collect_missing_generated_root_is_soft() {
        let temp = TempDir::new().unwrap();
        let original = temp.path().join("icons");
        write(&original.join("foo.svg"), "foo");
        write(&original.join(DESCRIPTOR_FILE), "[Icon Theme]");
        let generated = temp.path().join("build/icons/generated"); // never created
        let dest = temp.path().join("out");

        let copied = collect(
            &theme_fixture(),
            &[original, generated],
            &dest,
            &IconFilter::match_all(),
        )
        .unwrap();

        assert_eq!(
            relative_to(&copied, &dest),
            vec!["breeze-light/foo.svg", "breeze-light/index.theme"]
        );
    }

    #[test]
    fn test_collect_missing_original_root_fails() {
        let temp = TempDir::new().unwrap();
        let original = temp.path().join("nowhere");
        let dest = temp.path().join("out");

        let result = collect(
            &theme_fixture(),
            &[original],
            &dest,
            &IconFilter::match_all(),
        );
        assert!(matches!(result, Err(PackError::SourceUnavailable { .. })));
    }

    #[test]
    fn test_collect_preserves_relative_layout() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("icons");
        write(&root.join("actions/22/edit-copy.svg"), "icon");
        write(&root.join(DESCRIPTOR_FILE), "[Icon Theme]");
        let dest = temp.path().join("out");

        collect(&theme_fixture(), &[root], &dest, &IconFilter::match_all()).unwrap();

        assert!(dest
            .join("breeze-light/actions/22/edit-copy.svg")
            .is_file());
    }

    #[test]
    fn test_collect_rerun_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("icons");
        write(&root.join("a.svg"), "a");
        write(&root.join("b.svg"), "b");
        write(&root.join(DESCRIPTOR_FILE), "[Icon Theme]");

        let dest1 = temp.path().join("out1");
        let dest2 = temp.path().join("out2");
        let first = collect(
            &theme_fixture(),
            &[root.clone()],
            &dest1,
            &IconFilter::match_all(),
        )
        .unwrap();
        let second = collect(&theme_fixture(), &[root], &dest2, &IconFilter::match_all()).unwrap();

        assert_eq!(relative_to(&first, &dest1), relative_to(&second, &dest2));
    }

    #[test]
    fn test_manifest_byte_identical_across_runs() {
        use crate::manifest::{build_manifest, DEFAULT_PREFIX};

        let temp = TempDir::new().unwrap();
        let root = temp.path().join("icons");
        write(&root.join("actions/edit-copy.svg"), "a");
        write(&root.join("apps/konsole.svg"), "b");
        write(&root.join(DESCRIPTOR_FILE), "[Icon Theme]");

        let dest1 = temp.path().join("out1");
        let dest2 = temp.path().join("out2");
        let first = collect(
            &theme_fixture(),
            &[root.clone()],
            &dest1,
            &IconFilter::match_all(),
        )
        .unwrap();
        let second = collect(&theme_fixture(), &[root], &dest2, &IconFilter::match_all()).unwrap();

        let manifest1 = build_manifest(&first, &dest1, DEFAULT_PREFIX).unwrap();
        let manifest2 = build_manifest(&second, &dest2, DEFAULT_PREFIX).unwrap();
        assert_eq!(manifest1, manifest2);
        // One manifest entry per copied artifact, in copy order
        assert_eq!(manifest1.matches("<file>").count(), first.len());
    }

    #[test]
    fn test_collect_cancelled() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("icons");
        write(&root.join("foo.svg"), "foo");
        write(&root.join(DESCRIPTOR_FILE), "[Icon Theme]");
        let dest = temp.path().join("out");

        let shutdown = AtomicBool::new(true);
        let result = collect_theme(
            &theme_fixture(),
            &[root],
            &dest,
            &IconFilter::match_all(),
            CollectOptions::default(),
            &shutdown,
            &mut Silent,
        );

        assert!(matches!(result, Err(PackError::Cancelled)));
    }

    #[cfg(unix)]
    #[test]
    fn test_collect_preserves_symlinks() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("icons");
        write(&root.join("real.svg"), "real");
        std::os::unix::fs::symlink("real.svg", root.join("alias.svg")).unwrap();
        write(&root.join(DESCRIPTOR_FILE), "[Icon Theme]");
        let dest = temp.path().join("out");

        collect(&theme_fixture(), &[root], &dest, &IconFilter::match_all()).unwrap();

        let copied_link = dest.join("breeze-light/alias.svg");
        let meta = fs::symlink_metadata(&copied_link).unwrap();
        assert!(meta.file_type().is_symlink());
        assert_eq!(fs::read_link(&copied_link).unwrap(), PathBuf::from("real.svg"));
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_entry_replaces_stale_symlink() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src.svg");
        write(&src, "fresh");
        let dst = temp.path().join("dst.svg");
        std::os::unix::fs::symlink("elsewhere.svg", &dst).unwrap();

        copy_entry(&src, &dst).unwrap();

        let meta = fs::symlink_metadata(&dst).unwrap();
        assert!(!meta.file_type().is_symlink());
        assert_eq!(fs::read_to_string(&dst).unwrap(), "fresh");
    }
}
