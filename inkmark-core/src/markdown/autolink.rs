//! Anchor links next to headings.

use super::headings::heading_depth;
use super::Transform;
use crate::models::DocumentData;
use crate::tree::{text_content, walk, Visit};
use inkmark_types::{Element, Node, Root};

const LINK_ICON_PATH: &str = "M13.19 8.688a4.5 4.5 0 0 1 1.242 7.244l-4.5 4.5a4.5 4.5 0 0 1-6.364-6.364l1.757-1.757m13.35-.622 1.757-1.757a4.5 4.5 0 0 0-6.364-6.364l-4.5 4.5a4.5 4.5 0 0 0 1.242 7.244";

/// Wraps each heading that has an id together with a link to itself.
///
/// ```html
/// <div tabindex="-1" class="heading-wrapper level-h2">
///   <h2 id="setup">Setup</h2>
///   <a class="anchor-link" href="#setup">
///     <span aria-hidden="true" class="anchor-icon"><svg>...</svg></span>
///     <span class="sr-only">Read the “Setup” section</span>
///   </a>
/// </div>
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct AutolinkTransformer;

impl AutolinkTransformer {
    pub fn new() -> Self {
        Self
    }
}

fn link_icon() -> Node {
    let path = Element::new("path")
        .with_property("stroke-linecap", "round")
        .with_property("stroke-linejoin", "round")
        .with_property("d", LINK_ICON_PATH);
    let svg = Element::new("svg")
        .with_property("width", "16")
        .with_property("height", "16")
        .with_property("viewBox", "0 0 24 24")
        .with_property("fill", "none")
        .with_property("stroke", "currentColor")
        .with_property("stroke-width", "1.5")
        .with_children(vec![Node::Element(path)]);
    Node::Element(
        Element::new("span")
            .with_property("aria-hidden", "true")
            .with_class("anchor-icon")
            .with_children(vec![Node::Element(svg)]),
    )
}

fn wrap_heading(heading: &Element, id: &str) -> Node {
    let label = format!("Read the \u{201c}{}\u{201d} section", text_content(heading));
    let link = Element::new("a")
        .with_class("anchor-link")
        .with_property("href", format!("#{id}"))
        .with_children(vec![
            link_icon(),
            Node::Element(
                Element::new("span")
                    .with_class("sr-only")
                    .with_children(vec![Node::text(label)]),
            ),
        ]);

    Node::Element(
        Element::new("div")
            .with_property("tabindex", "-1")
            .with_property("class", vec![
                "heading-wrapper".to_string(),
                format!("level-{}", heading.tag_name),
            ])
            .with_children(vec![Node::Element(heading.clone()), Node::Element(link)]),
    )
}

impl Transform for AutolinkTransformer {
    fn name(&self) -> &str {
        "autolink-headings"
    }

    fn transform(&self, root: &mut Root, _data: &mut DocumentData) {
        walk(root, &mut |element: &mut Element| {
            if heading_depth(element).is_none() {
                return Visit::Continue;
            }
            match element.properties.get_str("id") {
                Some(id) => Visit::Replace(vec![wrap_heading(element, id)]),
                None => Visit::Skip,
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::html::to_html;

    #[test]
    fn wraps_headings_with_ids() {
        let heading = Element::new("h2")
            .with_property("id", "setup")
            .with_children(vec![Node::text("Setup")]);
        let mut root = Root::new(vec![Node::Element(heading)]);
        AutolinkTransformer::new().transform(&mut root, &mut DocumentData::default());

        let html = to_html(&root);
        assert!(html.starts_with(
            r##"<div tabindex="-1" class="heading-wrapper level-h2"><h2 id="setup">Setup</h2><a class="anchor-link" href="#setup"><span aria-hidden="true" class="anchor-icon"><svg width="16""##
        ));
        assert!(html.ends_with(
            "<span class=\"sr-only\">Read the \u{201c}Setup\u{201d} section</span></a></div>"
        ));
    }

    #[test]
    fn headings_without_ids_are_untouched() {
        let mut root = Root::new(vec![Node::Element(
            Element::new("h3").with_children(vec![Node::text("Plain")]),
        )]);
        let before = root.clone();
        AutolinkTransformer::new().transform(&mut root, &mut DocumentData::default());
        assert_eq!(root, before);
    }
}
