//! CLI configuration and runtime settings for icon packaging.

use clap::Parser;
use std::path::PathBuf;

use crate::collector::CollectOptions;
use crate::filter::{IconFilter, MATCH_ALL};
use crate::manifest::{DEFAULT_PREFIX, DEFAULT_QRC_NAME};
use crate::theme::{default_themes, Theme};

/// Package icon themes into a Qt resource bundle
#[derive(Parser, Debug)]
#[command(name = "qrc-icon-pack")]
#[command(version)]
#[command(about = "Packages icon themes into a Qt resource bundle with a generated QRC manifest")]
pub struct Cli {
    /// Checked-out icon source tree (contains one subdirectory per theme)
    pub source_root: PathBuf,

    /// Build tree containing generated size variants under <dir>/generated
    /// (defaults to the source root)
    #[arg(long)]
    pub build_root: Option<PathBuf>,

    /// Destination root for packaged themes and the manifest
    #[arg(short, long)]
    pub output: PathBuf,

    /// Filter expression matched against the whole icon filename stem
    #[arg(short, long, default_value = MATCH_ALL)]
    pub pattern: String,

    /// Themes to package as name:dir pairs (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub theme: Option<Vec<String>>,

    /// Resource prefix the manifest entries are grouped under
    #[arg(long, default_value = DEFAULT_PREFIX)]
    pub prefix: String,

    /// Manifest file name within the destination root
    #[arg(long, default_value = DEFAULT_QRC_NAME)]
    pub qrc_name: String,

    /// Do not descend symlinked directories while scanning
    #[arg(long)]
    pub no_follow_links: bool,

    /// Enable progress output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Runtime configuration parsed from CLI
#[derive(Debug, Clone)]
pub struct Config {
    /// Checked-out icon source tree
    pub source_root: PathBuf,
    /// Tree of build-time generated size variants
    pub build_root: PathBuf,
    /// Destination root
    pub destination_root: PathBuf,
    /// Compiled stem filter
    pub filter: IconFilter,
    /// Themes to package, in collection order
    pub themes: Vec<Theme>,
    /// Resource prefix for manifest entries
    pub prefix: String,
    /// Manifest file name
    pub qrc_name: String,
    /// Scan policy
    pub options: CollectOptions,
    /// Enable progress output
    pub verbose: bool,
}

impl Config {
    /// Create Config from CLI arguments. The filter pattern is compiled
    /// here so a bad expression fails before any filesystem work.
    pub fn from_cli(cli: Cli) -> anyhow::Result<Self> {
        let source_root = cli.source_root.canonicalize().unwrap_or(cli.source_root);
        let build_root = cli.build_root.unwrap_or_else(|| source_root.clone());

        let filter = IconFilter::new(&cli.pattern)?;

        let themes = match cli.theme {
            None => default_themes(),
            Some(specs) => {
                let mut themes = Vec::with_capacity(specs.len());
                for spec in &specs {
                    match Theme::parse(spec) {
                        Some(theme) => themes.push(theme),
                        None => anyhow::bail!("invalid theme spec '{spec}': expected name:dir"),
                    }
                }
                themes
            }
        };

        Ok(Config {
            source_root,
            build_root,
            destination_root: cli.output,
            filter,
            themes,
            prefix: cli.prefix,
            qrc_name: cli.qrc_name,
            options: CollectOptions {
                follow_links: !cli.no_follow_links,
            },
            verbose: cli.verbose,
        })
    }
}
