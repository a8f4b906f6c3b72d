//! CLI command implementations.

pub mod check;
pub mod render;
pub mod themes;

pub use check::check_config;
pub use render::{render_file, RenderCommandOptions};
pub use themes::list_themes;

use anyhow::{Context, Result};
use inkmark_core::ProcessorConfig;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG: &str = "inkmark.yml";

/// Load the configuration named on the command line, or `inkmark.yml` from
/// the working directory when it exists, or the defaults.
pub fn load_config(path: Option<&Path>) -> Result<(ProcessorConfig, Option<PathBuf>)> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG);
            if !default.exists() {
                tracing::debug!("No {} found, using defaults", DEFAULT_CONFIG);
                return Ok((ProcessorConfig::default(), None));
            }
            default
        }
    };

    tracing::debug!("Loading config from {:?}", path);
    let config = ProcessorConfig::from_file(&path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    Ok((config, Some(path)))
}
