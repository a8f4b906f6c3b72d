//! Markdown processing pipeline.
//!
//! Flow: Markdown → parse (pulldown-cmark) → tree → transforms → HTML
//!
//! Transforms run in a fixed order:
//! 1. subtext
//! 2. image collection
//! 3. syntax highlighting
//! 4. user transforms
//! 5. image rewriting
//! 6. heading ids
//! 7. heading autolinks
//! 8. callouts

use crate::callouts::CalloutTransformer;
use crate::config::{ConfigError, ProcessorConfig, SyntaxHighlight};
use crate::frontmatter::{parse_frontmatter, FrontmatterError, FrontmatterMode};
use crate::markdown::{
    parse_markdown, parser_options, AutolinkTransformer, ClassedHighlighter, HeadingIdTransformer,
    HighlightTransformer, Highlighter, ImageCollector, ImageRewriter, SubtextTransformer,
    SyntectHighlighter, Transform,
};
use crate::models::{DocumentData, RenderResult};
use crate::tree::to_html;
use pulldown_cmark::Options;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to parse Markdown file \"{}\":\n{}", .path.display(), .source)]
    Frontmatter {
        path: PathBuf,
        #[source]
        source: FrontmatterError,
    },
}

/// Per-call inputs besides the Markdown text.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub path: Option<PathBuf>,
    /// Frontmatter parsed by the caller, passed through to the metadata.
    pub frontmatter: Map<String, Value>,
}

/// Renders Markdown documents with a fixed set of transforms.
///
/// A processor is built once and shared; every render call starts from fresh
/// per-document state.
pub struct MarkdownProcessor {
    options: Options,
    transforms: Vec<Box<dyn Transform>>,
}

impl MarkdownProcessor {
    /// Processor for `config` with no user transforms.
    pub fn new(config: ProcessorConfig) -> Result<Self, ConfigError> {
        Self::builder(config).build()
    }

    pub fn builder(config: ProcessorConfig) -> ProcessorBuilder {
        ProcessorBuilder {
            config,
            transforms: Vec::new(),
            highlighter: None,
        }
    }

    /// Names of the transforms, in the order they run.
    pub fn transform_names(&self) -> Vec<&str> {
        self.transforms.iter().map(|t| t.name()).collect()
    }

    /// Render Markdown to HTML and collect document metadata.
    pub fn render(&self, content: &str, options: &RenderOptions) -> RenderResult {
        let mut root = parse_markdown(content, self.options);
        let mut data = DocumentData::new(options.path.clone(), options.frontmatter.clone());

        for transform in &self.transforms {
            tracing::debug!(transform = transform.name(), "Applying transform");
            transform.transform(&mut root, &mut data);
        }

        RenderResult {
            html: to_html(&root),
            metadata: data.metadata,
        }
    }

    /// Render a whole source file: frontmatter is parsed and cut out first.
    pub fn render_document(
        &self,
        source: &str,
        path: impl AsRef<Path>,
    ) -> Result<RenderResult, RenderError> {
        let path = path.as_ref();
        let parsed = parse_frontmatter(source, FrontmatterMode::Remove).map_err(|source| {
            RenderError::Frontmatter {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let options = RenderOptions {
            path: Some(path.to_path_buf()),
            frontmatter: parsed.frontmatter,
        };
        Ok(self.render(&parsed.content, &options))
    }
}

impl Default for MarkdownProcessor {
    fn default() -> Self {
        MarkdownProcessor::builder(ProcessorConfig::default()).assemble()
    }
}

/// Adds user transforms or a custom highlighter before building.
pub struct ProcessorBuilder {
    config: ProcessorConfig,
    transforms: Vec<Box<dyn Transform>>,
    highlighter: Option<Arc<dyn Highlighter>>,
}

impl ProcessorBuilder {
    /// Add a transform that runs after highlighting, before images are
    /// rewritten.
    pub fn transform(mut self, transform: impl Transform + 'static) -> Self {
        self.transforms.push(Box::new(transform));
        self
    }

    /// Use `highlighter` for code blocks, whatever `syntax_highlight` says.
    pub fn highlighter(mut self, highlighter: impl Highlighter + 'static) -> Self {
        self.highlighter = Some(Arc::new(highlighter));
        self
    }

    pub fn build(self) -> Result<MarkdownProcessor, ConfigError> {
        self.config.validate()?;
        Ok(self.assemble())
    }

    fn assemble(self) -> MarkdownProcessor {
        let ProcessorBuilder {
            config,
            transforms: user_transforms,
            highlighter,
        } = self;

        let mut transforms: Vec<Box<dyn Transform>> = Vec::new();
        if config.discord_subtext {
            transforms.push(Box::new(SubtextTransformer::new()));
        }
        transforms.push(Box::new(ImageCollector::new(config.image.clone())));

        let highlighter: Option<Arc<dyn Highlighter>> = match (highlighter, config.syntax_highlight) {
            (Some(custom), _) => Some(custom),
            (None, SyntaxHighlight::Syntect) => {
                Some(Arc::new(SyntectHighlighter::new(&config.highlight.theme)))
            }
            (None, SyntaxHighlight::Classed) => Some(Arc::new(ClassedHighlighter)),
            (None, SyntaxHighlight::None) => None,
        };
        if let Some(highlighter) = highlighter {
            transforms.push(Box::new(HighlightTransformer::new(
                highlighter,
                config.highlight.exclude_langs.clone(),
            )));
        }

        transforms.extend(user_transforms);
        transforms.push(Box::new(ImageRewriter::new()));
        transforms.push(Box::new(HeadingIdTransformer::new(config.heading_ids.compat)));
        if config.autolink {
            transforms.push(Box::new(AutolinkTransformer::new()));
        }
        if let Some(options) = config.callouts.options() {
            transforms.push(Box::new(CalloutTransformer::from_options(Some(options))));
        }

        MarkdownProcessor {
            options: parser_options(config.gfm, config.smartypants),
            transforms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CalloutsSetting;
    use crate::markdown::HighlightError;
    use inkmark_types::Root;

    fn plain_config() -> ProcessorConfig {
        ProcessorConfig {
            syntax_highlight: SyntaxHighlight::None,
            autolink: false,
            ..Default::default()
        }
    }

    #[test]
    fn processor_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MarkdownProcessor>();
    }

    #[test]
    fn transforms_run_in_order() {
        let processor = MarkdownProcessor::builder(ProcessorConfig::default())
            .transform(|_: &mut Root, _: &mut DocumentData| {})
            .build()
            .unwrap();
        assert_eq!(
            processor.transform_names(),
            vec![
                "subtext",
                "collect-images",
                "highlight",
                "custom",
                "images",
                "heading-ids",
                "autolink-headings",
                "callouts"
            ]
        );
    }

    #[test]
    fn switches_remove_transforms() {
        let config = ProcessorConfig {
            discord_subtext: false,
            callouts: CalloutsSetting::Disabled,
            ..plain_config()
        };
        let processor = MarkdownProcessor::new(config).unwrap();
        assert_eq!(
            processor.transform_names(),
            vec!["collect-images", "images", "heading-ids"]
        );
    }

    #[test]
    fn renders_headings_and_frontmatter() {
        let processor = MarkdownProcessor::new(plain_config()).unwrap();
        let options = RenderOptions {
            path: None,
            frontmatter: serde_json::json!({ "title": "Doc" }).as_object().unwrap().clone(),
        };
        let result = processor.render("# Hello\n\ntext", &options);
        assert_eq!(result.html, "<h1 id=\"hello\">Hello</h1>\n<p>text</p>");
        assert_eq!(result.metadata.headings[0].slug, "hello");
        assert_eq!(result.metadata.frontmatter["title"], "Doc");
    }

    #[test]
    fn user_transforms_see_highlighted_code() {
        let highlighter = |code: &str, lang: &str| -> Result<String, HighlightError> {
            Ok(format!("<pre class=\"hl-{lang}\">{code}</pre>"))
        };
        let saw_raw = |root: &mut Root, _: &mut DocumentData| {
            if root.children.iter().any(|n| matches!(n, inkmark_types::Node::Raw(_))) {
                root.children.push(inkmark_types::Node::text("seen"));
            }
        };
        let processor = MarkdownProcessor::builder(plain_config())
            .highlighter(highlighter)
            .transform(saw_raw)
            .build()
            .unwrap();
        let result = processor.render("```rust\nlet x;\n```", &RenderOptions::default());
        assert_eq!(result.html, "<pre class=\"hl-rust\">let x;</pre>seen");
    }

    #[test]
    fn render_document_strips_frontmatter() {
        let processor = MarkdownProcessor::new(plain_config()).unwrap();
        let result = processor
            .render_document("---\ntitle: Hi\n---\n# Body\n", "notes/a.md")
            .unwrap();
        assert_eq!(result.html, "<h1 id=\"body\">Body</h1>");
        assert_eq!(result.metadata.frontmatter["title"], "Hi");
    }

    #[test]
    fn render_document_reports_the_path() {
        let processor = MarkdownProcessor::default();
        let err = processor
            .render_document("---\ntitle: [oops\n---\n", "notes/bad.md")
            .unwrap_err();
        assert!(err
            .to_string()
            .starts_with("Failed to parse Markdown file \"notes/bad.md\":\n"));
    }

    #[test]
    fn invalid_callout_config_fails_to_build() {
        let config = ProcessorConfig::from_yaml_str("callouts:\n  aliases:\n    tip: [note]").unwrap();
        assert!(matches!(
            MarkdownProcessor::new(config),
            Err(ConfigError::AliasShadowsType { .. })
        ));
    }
}
