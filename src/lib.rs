//! # QRC Icon Pack
//!
//! Packages Breeze-style icon themes into a redistributable bundle and
//! generates a Qt resource (QRC) manifest listing every packaged file.
//!
//! Collection is a full, fresh pass: each theme's source roots (the
//! original checkout, then build-time generated size variants) are walked
//! for `.svg` files whose filename stem matches a filter, copied into the
//! destination tree with symbolic links preserved, and finally listed in
//! a pretty-printed QRC manifest written once at the destination root.
//!
//! ## Usage
//!
//! ```ignore
//! use qrc_icon_pack::collector::collect_theme;
//! use qrc_icon_pack::manifest::build_manifest;
//!
//! let copied = collect_theme(&theme, &roots, &dest, &filter, options, &shutdown, &mut reporter)?;
//! let manifest = build_manifest(&copied, &dest, "/icons")?;
//! ```

/// Per-theme artifact collection and copying
pub mod collector;

/// CLI configuration and argument parsing
pub mod config;

/// Error types for collection and manifest generation
pub mod error;

/// Filename-stem filtering
pub mod filter;

/// QRC manifest rendering
pub mod manifest;

/// Progress reporting
pub mod progress;

/// Candidate icon discovery
pub mod scanner;

/// Icon theme types
pub mod theme;
