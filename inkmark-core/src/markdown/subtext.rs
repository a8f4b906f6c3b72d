//! Discord-style subtext: `-# text` renders as `<small>text</small>`.

use super::Transform;
use crate::models::DocumentData;
use crate::tree::{walk, Visit};
use inkmark_types::{Element, Node, Root};

const MARKER: &str = "-# ";

#[derive(Debug, Default, Clone, Copy)]
pub struct SubtextTransformer;

impl SubtextTransformer {
    pub fn new() -> Self {
        Self
    }
}

/// Split a text run that starts with the marker into the `small` element and
/// whatever follows the marker line.
fn subtext_nodes(value: &str) -> Option<Vec<Node>> {
    let rest = value.strip_prefix(MARKER)?;
    let (line, tail) = match rest.find('\n') {
        Some(end) => rest.split_at(end),
        None => (rest, ""),
    };

    let mut nodes = vec![Node::Element(
        Element::new("small").with_children(vec![Node::text(line)]),
    )];
    if !tail.is_empty() {
        nodes.push(Node::text(tail));
    }
    Some(nodes)
}

impl Transform for SubtextTransformer {
    fn name(&self) -> &str {
        "subtext"
    }

    fn transform(&self, root: &mut Root, _data: &mut DocumentData) {
        walk(root, &mut |element: &mut Element| {
            if element.is("pre") || element.is("code") || element.is("small") {
                return Visit::Skip;
            }
            let starts_subtext =
                |node: &Node| node.as_text().is_some_and(|text| text.starts_with(MARKER));
            if !element.children.iter().any(starts_subtext) {
                return Visit::Continue;
            }

            let children = std::mem::take(&mut element.children);
            for child in children {
                match child.as_text().and_then(subtext_nodes) {
                    Some(nodes) => element.children.extend(nodes),
                    None => element.children.push(child),
                }
            }
            Visit::Continue
        });
    }
}
