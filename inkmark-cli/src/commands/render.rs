//! Render command implementation.

use super::load_config;
use anyhow::{Context, Result};
use inkmark_core::config::CalloutsSetting;
use inkmark_core::{MarkdownProcessor, Theme};
use std::fs;
use std::path::{Path, PathBuf};

pub struct RenderCommandOptions {
    pub output: Option<PathBuf>,
    pub json: bool,
    pub theme: Option<Theme>,
}

/// Render one Markdown file to HTML (or JSON with metadata).
pub fn render_file(config_path: Option<&Path>, file: &Path, opts: RenderCommandOptions) -> Result<()> {
    let (mut config, _) = load_config(config_path)?;
    if let Some(theme) = opts.theme {
        match &mut config.callouts {
            CalloutsSetting::Enabled(options) => options.theme = Some(theme),
            CalloutsSetting::Disabled => {
                tracing::warn!(%theme, "Callouts are disabled in the configuration; ignoring --theme")
            }
        }
    }

    let processor = MarkdownProcessor::new(config).context("Invalid configuration")?;
    let source = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let result = processor.render_document(&source, file)?;

    tracing::debug!(
        headings = result.metadata.headings.len(),
        local_images = result.metadata.local_image_paths.len(),
        "Rendered {}",
        file.display()
    );

    let mut payload = if opts.json {
        serde_json::to_string_pretty(&result)?
    } else {
        result.html
    };
    if !payload.ends_with('\n') {
        payload.push('\n');
    }

    match opts.output {
        Some(output) => {
            if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).context("Failed to create output directory")?;
            }
            fs::write(&output, payload)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            tracing::info!("Wrote {}", output.display());
        }
        None => print!("{payload}"),
    }

    Ok(())
}
