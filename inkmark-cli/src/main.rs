//! # inkmark CLI
//!
//! Command-line interface for the inkmark Markdown renderer.

mod commands;

use clap::{Parser, Subcommand};
use inkmark_core::Theme;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "inkmark")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (inkmark.yml is used when present)
    #[arg(long, global = true, env = "INKMARK_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a Markdown file to HTML
    Render {
        /// Markdown file to render
        file: PathBuf,

        /// Write the output here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit HTML and metadata as JSON
        #[arg(long)]
        json: bool,

        /// Callout theme, overriding the configuration
        #[arg(long)]
        theme: Option<Theme>,
    },

    /// List the callout types of a theme
    Themes {
        /// Theme to list (defaults to the configured one)
        #[arg(long)]
        theme: Option<Theme>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Load and validate the configuration file
    CheckConfig,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for rendered output
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Render {
            file,
            output,
            json,
            theme,
        } => {
            let opts = commands::RenderCommandOptions {
                output,
                json,
                theme,
            };
            commands::render_file(config_path, &file, opts)
        }
        Commands::Themes { theme, json } => commands::list_themes(config_path, theme, json),
        Commands::CheckConfig => commands::check_config(config_path),
    }
}
