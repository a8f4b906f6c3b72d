//! Callouts (admonitions): blockquotes opening with a `[!TYPE]` marker are
//! rewritten into themed, optionally collapsible blocks.
//!
//! ```text
//! > [!tip]+ Did you know?
//! > Extra info.
//! ```
//!
//! becomes a `details` element holding a `summary` title (icon, title text,
//! fold chevron) and a content region with the remaining blocks. Blockquotes
//! that do not match are left exactly as they were.

pub mod config;
pub mod emit;
pub mod matcher;
pub mod split;
pub mod themes;

pub use config::{
    resolve_config, CalloutColor, CalloutEntry, CalloutTable, ResolvedConfig, TagNames,
    UserOptions,
};
pub use emit::{fold_icon_node, indicator_node, style_string};
pub use matcher::{expand_aliases, match_blockquote, match_callout, CalloutMatch, Collapse};
pub use split::{split_title, Split};
pub use themes::Theme;

use crate::markdown::Transform;
use crate::models::DocumentData;
use crate::tree::{walk, Visit, Visitor};
use inkmark_types::{Element, Node, PropertyValue, Root};
use matcher::is_newline_artifact;

/// Tree transform that rewrites callout blockquotes.
#[derive(Debug, Clone)]
pub struct CalloutTransformer {
    config: ResolvedConfig,
    callouts: CalloutTable,
}

impl Default for CalloutTransformer {
    fn default() -> Self {
        Self::new(ResolvedConfig::default())
    }
}

impl CalloutTransformer {
    pub fn new(config: ResolvedConfig) -> Self {
        let callouts = config.expanded_callouts();
        Self { config, callouts }
    }

    pub fn from_options(options: Option<&UserOptions>) -> Self {
        Self::new(resolve_config(options))
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// Rewrite `element` in place when it is a callout blockquote.
    ///
    /// Returns whether the element was rewritten. A `false` result leaves the
    /// element untouched.
    pub fn rewrite(&self, element: &mut Element) -> bool {
        match self.build(element) {
            Some(callout) => {
                *element = callout;
                true
            }
            None => false,
        }
    }

    fn build(&self, quote: &Element) -> Option<Element> {
        match_blockquote(quote, &self.callouts)?;

        let mut blocks = quote
            .children
            .iter()
            .filter(|child| !is_newline_artifact(child))
            .cloned();
        let Some(Node::Element(mut paragraph)) = blocks.next() else {
            return None;
        };
        let rest: Vec<Node> = blocks.collect();

        let split = split_title(&paragraph.children);
        let marker = split.title.first()?.as_text()?;
        let found = match_callout(marker, &self.callouts)?;
        let collapsible = found.collapse.is_collapsible();
        let tags = &self.config.tag_names;

        let mut title_children = split.title;
        if found.title.is_empty() {
            title_children.remove(0);
        } else {
            title_children[0] = Node::text(found.title.as_str());
        }

        let title_content = if title_children.is_empty() {
            let entry_title = self
                .callouts
                .get(&found.kind)
                .and_then(|entry| entry.title.clone())
                .unwrap_or_else(|| self.config.theme.fallback_title(&found.kind));
            Element::new(tags.title_inner.as_str())
                .with_class("callout-title-inner")
                .with_children(vec![Node::text(entry_title)])
        } else {
            paragraph.tag_name = tags.title_inner.clone();
            paragraph.properties.set("class", vec!["callout-title-inner".to_string()]);
            paragraph.children = title_children;
            paragraph
        };

        let mut title_region = Vec::with_capacity(3);
        if self.config.show_indicator {
            if let Some(icon) = indicator_node(&self.callouts, &found.kind, &tags.icon) {
                title_region.push(icon);
            }
        }
        title_region.push(Node::Element(title_content));
        if collapsible {
            title_region.push(fold_icon_node(&tags.icon));
        }

        let mut content = Vec::with_capacity(rest.len() + 1);
        if let Some(body) = split.body {
            content.push(Node::Element(Element::new("p").with_children(body)));
        }
        content.extend(rest);

        let title_tag = if collapsible {
            "summary"
        } else {
            tags.non_collapsible_title.as_str()
        };
        let content_tag = if collapsible {
            tags.collapsible_content.as_str()
        } else {
            tags.non_collapsible_content.as_str()
        };
        let container_tag = if collapsible {
            "details"
        } else {
            tags.non_collapsible_container.as_str()
        };

        let mut classes = vec!["callout".to_string()];
        if collapsible {
            classes.push("callout-collapsible".to_string());
        }
        let entry = self.callouts.get(&found.kind);

        let mut container = Element::new(container_tag);
        container.properties = quote.properties.clone();
        container.properties.set("dir", "auto");
        container.properties.set("class", PropertyValue::List(classes));
        container
            .properties
            .set("style", style_string(entry.and_then(|e| e.color.as_ref())));
        if found.collapse == Collapse::Open {
            container.properties.set("open", "open");
        }
        container.children = vec![
            Node::Element(
                Element::new(title_tag)
                    .with_class("callout-title")
                    .with_children(title_region),
            ),
            Node::Element(
                Element::new(content_tag)
                    .with_class("callout-content")
                    .with_children(content),
            ),
        ];

        tracing::debug!(kind = %found.kind, collapsible, "Rewrote callout");
        Some(container)
    }
}

struct CalloutVisitor<'a> {
    transformer: &'a CalloutTransformer,
    rewritten: usize,
}

impl Visitor for CalloutVisitor<'_> {
    fn visit_element(&mut self, element: &mut Element) -> Visit {
        if element.is("blockquote") && self.transformer.rewrite(element) {
            self.rewritten += 1;
        }
        Visit::Continue
    }
}

impl Transform for CalloutTransformer {
    fn name(&self) -> &str {
        "callouts"
    }

    fn transform(&self, root: &mut Root, _data: &mut DocumentData) {
        let mut visitor = CalloutVisitor {
            transformer: self,
            rewritten: 0,
        };
        walk(root, &mut visitor);
        if visitor.rewritten > 0 {
            tracing::debug!(count = visitor.rewritten, "Rendered callouts");
        }
    }
}
