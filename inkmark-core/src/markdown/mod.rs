//! Markdown parsing and the tree transforms that run after it.

pub mod autolink;
pub mod headings;
pub mod highlight;
pub mod images;
pub mod subtext;

use crate::models::DocumentData;
use crate::tree::build_tree;
use inkmark_types::Root;
use pulldown_cmark::{Options, Parser};

pub use autolink::AutolinkTransformer;
pub use headings::HeadingIdTransformer;
pub use highlight::{
    ClassedHighlighter, HighlightError, HighlightTransformer, Highlighter, SyntectHighlighter,
};
pub use images::{ImageCollector, ImageRewriter, RemoteImagePolicy, RemotePattern};
pub use subtext::SubtextTransformer;

/// A whole-tree pass over a parsed document.
pub trait Transform: Send + Sync {
    fn name(&self) -> &str;

    fn transform(&self, root: &mut Root, data: &mut DocumentData);
}

impl<F> Transform for F
where
    F: Fn(&mut Root, &mut DocumentData) + Send + Sync,
{
    fn name(&self) -> &str {
        "custom"
    }

    fn transform(&self, root: &mut Root, data: &mut DocumentData) {
        self(root, data)
    }
}

/// Parser options for the given feature switches.
pub fn parser_options(gfm: bool, smartypants: bool) -> Options {
    let mut options = Options::empty();
    if gfm {
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
    }
    if smartypants {
        options.insert(Options::ENABLE_SMART_PUNCTUATION);
    }
    options.insert(Options::ENABLE_HEADING_ATTRIBUTES);
    // Note: ENABLE_GFM is NOT enabled - it would turn `> [!NOTE]` into
    // blockquote kinds before callouts get to see the marker text
    options
}

/// Parse Markdown into a document tree.
pub fn parse_markdown(markdown: &str, options: Options) -> Root {
    build_tree(Parser::new_ext(markdown, options))
}
