//! Validate the configuration file.

use super::load_config;
use anyhow::{Context, Result};
use inkmark_core::callouts::resolve_config;
use std::path::Path;

pub fn check_config(config_path: Option<&Path>) -> Result<()> {
    let (config, path) = load_config(config_path)?;
    config.validate().context("Invalid configuration")?;

    let source = path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    println!("Configuration OK ({source})");
    println!("  syntax highlighting: {:?}", config.syntax_highlight);
    println!("  gfm: {}, smartypants: {}", config.gfm, config.smartypants);

    match config.callouts.options() {
        Some(options) => {
            let resolved = resolve_config(Some(options));
            let aliases: usize = resolved.aliases.values().map(Vec::len).sum();
            println!(
                "  callouts: {} theme, {} types, {} aliases",
                resolved.theme,
                resolved.callouts.len(),
                aliases
            );
        }
        None => println!("  callouts: disabled"),
    }

    Ok(())
}
