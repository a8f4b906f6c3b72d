//! Heading ids and the heading outline.

use super::Transform;
use crate::models::{DocumentData, MarkdownHeading};
use crate::slug::Slugger;
use crate::tree::{text_content, walk, Visit};
use inkmark_types::{Element, Root};

/// Depth of a heading element (`h1`..`h6`).
pub fn heading_depth(element: &Element) -> Option<u8> {
    match element.tag_name.as_str() {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

/// Gives every heading an id and records the outline.
#[derive(Debug, Default, Clone)]
pub struct HeadingIdTransformer {
    /// Keep a trailing `-` on generated slugs.
    compat: bool,
}

impl HeadingIdTransformer {
    pub fn new(compat: bool) -> Self {
        Self { compat }
    }
}

impl Transform for HeadingIdTransformer {
    fn name(&self) -> &str {
        "heading-ids"
    }

    fn transform(&self, root: &mut Root, data: &mut DocumentData) {
        let mut slugger = Slugger::new();
        let headings = &mut data.metadata.headings;

        walk(root, &mut |element: &mut Element| {
            let Some(depth) = heading_depth(element) else {
                return Visit::Continue;
            };
            let text = text_content(element);

            let slug = match element.properties.get_str("id") {
                Some(id) => id.to_string(),
                None => {
                    let mut slug = slugger.slug(&text);
                    if !self.compat && slug.ends_with('-') {
                        slug.pop();
                    }
                    element.properties.set("id", slug.clone());
                    slug
                }
            };

            headings.push(MarkdownHeading { depth, slug, text });
            Visit::Skip
        });
    }
}
