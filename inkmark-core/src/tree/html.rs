//! HTML serialization of the document tree.

use html_escape::{encode_double_quoted_attribute, encode_text};
use inkmark_types::{Element, Node, PropertyValue, Root};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Serialize a whole document.
pub fn to_html(root: &Root) -> String {
    let mut out = String::with_capacity(1024);
    write_nodes(&root.children, &mut out);
    out
}

/// Serialize a single node and its subtree.
pub fn node_to_html(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

fn write_nodes(nodes: &[Node], out: &mut String) {
    for node in nodes {
        write_node(node, out);
    }
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Text(value) => out.push_str(&encode_text(value)),
        Node::Raw(html) => out.push_str(html),
        Node::Element(element) => write_element(element, out),
    }
}

fn write_element(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&element.tag_name);
    for (name, value) in element.properties.iter() {
        match value {
            PropertyValue::Bool(true) => {
                out.push(' ');
                out.push_str(name);
            }
            PropertyValue::Bool(false) => {}
            PropertyValue::String(s) => push_attribute(out, name, s),
            PropertyValue::List(items) => {
                if !items.is_empty() {
                    push_attribute(out, name, &items.join(" "));
                }
            }
        }
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&element.tag_name.as_str()) {
        return;
    }

    write_nodes(&element.children, out);
    out.push_str("</");
    out.push_str(&element.tag_name);
    out.push('>');
}

fn push_attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&encode_double_quoted_attribute(value));
    out.push('"');
}
