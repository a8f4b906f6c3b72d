//! Text content of subtrees.

use inkmark_types::{Element, Node};

/// Concatenated text of every text descendant.
pub fn text_content(element: &Element) -> String {
    let mut out = String::new();
    push_text(&element.children, &mut out);
    out
}

fn push_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(value) => out.push_str(value),
            Node::Element(el) => push_text(&el.children, out),
            Node::Raw(_) => {}
        }
    }
}

/// Capitalize the first character (`note` -> `Note`).
pub fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}
