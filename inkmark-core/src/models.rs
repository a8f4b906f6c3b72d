//! Render results and the per-document data collected while rendering.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// A heading found in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkdownHeading {
    pub depth: u8,
    pub slug: String,
    pub text: String,
}

/// Everything learned about a document besides its HTML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderMetadata {
    pub headings: Vec<MarkdownHeading>,

    /// Image sources relative to the document, decoded, in first-seen order.
    pub local_image_paths: Vec<String>,

    /// Remote image URLs allowed by the image configuration.
    pub remote_image_paths: Vec<String>,

    pub frontmatter: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderResult {
    pub html: String,
    pub metadata: RenderMetadata,
}

/// Mutable state shared by the transforms of a single render call.
#[derive(Debug, Clone, Default)]
pub struct DocumentData {
    /// Path of the source file, when rendering from disk.
    pub path: Option<PathBuf>,
    pub metadata: RenderMetadata,
}

impl DocumentData {
    pub fn new(path: Option<PathBuf>, frontmatter: Map<String, Value>) -> Self {
        Self {
            path,
            metadata: RenderMetadata {
                frontmatter,
                ..Default::default()
            },
        }
    }

    pub fn add_local_image(&mut self, src: &str) {
        push_unique(&mut self.metadata.local_image_paths, src);
    }

    pub fn add_remote_image(&mut self, src: &str) {
        push_unique(&mut self.metadata.remote_image_paths, src);
    }
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|existing| existing == value) {
        list.push(value.to_string());
    }
}
