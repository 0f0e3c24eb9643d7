use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;

use qrc_icon_pack::collector::collect_theme;
use qrc_icon_pack::config::{Cli, Config};
use qrc_icon_pack::error::PackError;
use qrc_icon_pack::manifest::build_manifest;
use qrc_icon_pack::progress::{Progress, Reporter, Silent};

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::from_cli(cli)?;

    if !config.source_root.is_dir() {
        bail!("source root not found: {}", config.source_root.display());
    }

    // Setup Ctrl+C handler
    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_clone = shutdown.clone();
    ctrlc::set_handler(move || {
        shutdown_clone.store(true, Ordering::SeqCst);
    })
    .context("Failed to set Ctrl+C handler")?;

    // Whether the destination pre-dates this run decides cleanup on abort
    let dest_existed = config.destination_root.exists();

    let start = Instant::now();
    let mut entries: Vec<PathBuf> = Vec::new();
    let mut per_theme: Vec<(String, usize)> = Vec::new();

    let outcome = collect_all(&config, &shutdown, &mut entries, &mut per_theme);

    if let Err(e) = outcome {
        discard_aborted_destination(&config, dest_existed);
        if matches!(e, PackError::Cancelled) {
            eprintln!("\nCollection cancelled");
            return Ok(ExitCode::from(130));
        }
        return Err(e.into());
    }

    let duration = start.elapsed();
    println!(
        "Packaged {} files into {} in {:.2}s",
        entries.len(),
        config.destination_root.display(),
        duration.as_secs_f64()
    );
    for (name, count) in &per_theme {
        println!("  {name}: {count} files");
    }

    Ok(ExitCode::SUCCESS)
}

/// Collect every configured theme, then write the manifest once.
fn collect_all(
    config: &Config,
    shutdown: &AtomicBool,
    entries: &mut Vec<PathBuf>,
    per_theme: &mut Vec<(String, usize)>,
) -> Result<(), PackError> {
    for theme in &config.themes {
        if config.verbose {
            eprintln!("Copying {theme}...");
        }

        let roots = vec![
            theme.source_dir(&config.source_root),
            theme.generated_dir(&config.build_root),
        ];

        let mut reporter: Box<dyn Reporter> = if config.verbose {
            Box::new(Progress::new())
        } else {
            Box::new(Silent)
        };

        let copied = collect_theme(
            theme,
            &roots,
            &config.destination_root,
            &config.filter,
            config.options,
            shutdown,
            reporter.as_mut(),
        )?;

        per_theme.push((theme.name.clone(), copied.len()));
        entries.extend(copied);
    }

    let manifest = build_manifest(entries, &config.destination_root, &config.prefix)?;
    fs::write(config.destination_root.join(&config.qrc_name), manifest)?;

    Ok(())
}

/// A partial package must never look complete. Remove a destination tree
/// this run created; a pre-existing one is only warned about.
fn discard_aborted_destination(config: &Config, dest_existed: bool) {
    if dest_existed {
        eprintln!(
            "Warning: destination {} is incomplete",
            config.destination_root.display()
        );
        return;
    }
    if config.destination_root.exists() {
        if let Err(e) = fs::remove_dir_all(&config.destination_root) {
            eprintln!(
                "Warning: failed to remove incomplete destination {}: {e}",
                config.destination_root.display()
            );
        }
    }
}
