//! Configuration command handlers
//!
//! Handles the `configure` subcommand for setting dabu defaults.

use crate::config::Config;
use anyhow::Result;
use std::path::PathBuf;

/// Handle the configure command
///
/// # Arguments
/// * `output_dir` - Optional default extraction directory
/// * `exclude` - Exclusion patterns to add for `third-party`
/// * `show` - If true, show current configuration
pub fn handle(output_dir: Option<PathBuf>, exclude: Vec<String>, show: bool) -> Result<()> {
    let mut config = Config::load()?;

    if show {
        show_config(&config);
        return Ok(());
    }

    if output_dir.is_none() && exclude.is_empty() {
        show_usage();
        return Ok(());
    }

    apply(&mut config, output_dir, exclude);
    config.save()?;

    println!("Configuration updated");
    if let Ok(path) = Config::config_path() {
        println!("Config saved to: {}", path.display());
    }

    Ok(())
}

fn apply(config: &mut Config, output_dir: Option<PathBuf>, exclude: Vec<String>) {
    if let Some(dir) = output_dir {
        config.output_dir = Some(dir);
    }
    for pattern in exclude {
        if !config.exclude.contains(&pattern) {
            config.exclude.push(pattern);
        }
    }
}

/// Display current configuration
fn show_config(config: &Config) {
    match &config.output_dir {
        Some(dir) => println!("Output directory: {}", dir.display()),
        None => println!("Output directory: (next to the blob)"),
    }

    if config.exclude.is_empty() {
        println!("No extra exclusion patterns");
    } else {
        println!("Exclusion patterns:");
        for pattern in &config.exclude {
            println!("  {}", pattern);
        }
    }

    if let Ok(path) = Config::config_path() {
        println!("Config file: {}", path.display());
    }
}

fn show_usage() {
    println!("Usage: dabu configure --output-dir DIR");
    println!("   or: dabu configure --exclude PATTERN [--exclude PATTERN]...");
    println!("   or: dabu configure --show");
}
