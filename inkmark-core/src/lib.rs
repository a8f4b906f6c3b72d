//! # inkmark-core
//!
//! Core library for the inkmark Markdown renderer.
//!
//! This crate parses Markdown into a small element tree, runs a fixed chain of
//! tree transforms over it (callouts, heading ids and anchors, image
//! collection, syntax highlighting, subtext) and serializes the result to
//! HTML together with document metadata.

pub mod callouts;
pub mod config;
pub mod frontmatter;
pub mod markdown;
pub mod models;
pub mod pipeline;
pub mod slug;
pub mod tree;

pub use callouts::{CalloutTransformer, ResolvedConfig, Theme, UserOptions};
pub use config::{ConfigError, ProcessorConfig};
pub use frontmatter::{parse_frontmatter, FrontmatterMode, ParsedFrontmatter};
pub use markdown::{Highlighter, Transform};
pub use models::{DocumentData, MarkdownHeading, RenderMetadata, RenderResult};
pub use pipeline::{MarkdownProcessor, ProcessorBuilder, RenderError, RenderOptions};
pub use slug::{slugify, Slugger};
