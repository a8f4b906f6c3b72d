//! Parse inline markup (indicator SVGs and similar snippets) into nodes.

use inkmark_types::{Element, Node};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FragmentError {
    #[error("invalid markup: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("invalid attribute: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    #[error("encoding error: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    #[error("unbalanced markup: expected </{expected}>, found </{found}>")]
    Mismatched { expected: String, found: String },

    #[error("unclosed element <{0}>")]
    Unclosed(String),
}

/// Parse a well-formed markup fragment into a list of nodes.
///
/// Whitespace-only text between elements is kept, comments and declarations
/// are dropped.
pub fn parse_fragment(markup: &str) -> Result<Vec<Node>, FragmentError> {
    let mut reader = Reader::from_str(markup);
    reader.config_mut().trim_text(false);

    let mut nodes: Vec<Node> = Vec::new();
    let mut stack: Vec<Element> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let element = start_element(&reader, &e)?;
                stack.push(element);
            }
            Event::Empty(e) => {
                let element = start_element(&reader, &e)?;
                push_node(&mut stack, &mut nodes, Node::Element(element));
            }
            Event::Text(e) => {
                let text = reader.decoder().decode(&e)?.into_owned();
                push_text(&mut stack, &mut nodes, &text);
            }
            Event::GeneralRef(e) => {
                let entity = reader.decoder().decode(&e)?.into_owned();
                push_text(&mut stack, &mut nodes, &decode_entity(&entity));
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e).into_owned();
                push_text(&mut stack, &mut nodes, &text);
            }
            Event::End(e) => {
                let found = reader.decoder().decode(e.name().as_ref())?.into_owned();
                let Some(element) = stack.pop() else {
                    return Err(FragmentError::Mismatched {
                        expected: String::new(),
                        found,
                    });
                };
                if element.tag_name != found {
                    return Err(FragmentError::Mismatched {
                        expected: element.tag_name,
                        found,
                    });
                }
                push_node(&mut stack, &mut nodes, Node::Element(element));
            }
            Event::Eof => break,
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(FragmentError::Unclosed(open.tag_name));
    }

    Ok(nodes)
}

fn start_element(reader: &Reader<&[u8]>, e: &BytesStart) -> Result<Element, FragmentError> {
    let tag_name = reader.decoder().decode(e.name().as_ref())?.into_owned();
    let mut element = Element::new(tag_name);
    for attr in e.attributes() {
        let attr = attr?;
        let key = reader.decoder().decode(attr.key.as_ref())?.into_owned();
        let value = attr.unescape_value()?.into_owned();
        element.properties.set(key, value);
    }
    Ok(element)
}

fn push_node(stack: &mut [Element], nodes: &mut Vec<Node>, node: Node) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => nodes.push(node),
    }
}

fn push_text(stack: &mut [Element], nodes: &mut Vec<Node>, text: &str) {
    let children = match stack.last_mut() {
        Some(parent) => &mut parent.children,
        None => nodes,
    };
    match children.last_mut() {
        Some(Node::Text(existing)) => existing.push_str(text),
        _ => children.push(Node::text(text)),
    }
}

fn decode_entity(entity: &str) -> String {
    match entity {
        "lt" => "<".to_string(),
        "gt" => ">".to_string(),
        "amp" => "&".to_string(),
        "apos" => "'".to_string(),
        "quot" => "\"".to_string(),
        "nbsp" => "\u{a0}".to_string(),
        s if s.starts_with('#') => {
            let code = if s.starts_with("#x") || s.starts_with("#X") {
                u32::from_str_radix(&s[2..], 16).ok()
            } else {
                s[1..].parse::<u32>().ok()
            };
            code.and_then(char::from_u32)
                .map_or_else(|| format!("&{entity};"), |c| c.to_string())
        }
        _ => format!("&{entity};"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::html::node_to_html;

    #[test]
    fn parses_svg_with_attributes_in_order() {
        let nodes = parse_fragment(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="1em" viewBox="0 0 24 24"><path d="m6 9 6 6 6-6"></path></svg>"#,
        )
        .unwrap();

        assert_eq!(nodes.len(), 1);
        let svg = nodes[0].as_element().unwrap();
        assert_eq!(svg.tag_name, "svg");
        let keys: Vec<&str> = svg.properties.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["xmlns", "width", "viewBox"]);
        assert!(svg.children[0].is_element("path"));
    }

    #[test]
    fn self_closing_elements_and_entities() {
        let nodes = parse_fragment("<g><circle r=\"1\"/>a &amp; b</g>").unwrap();
        insta::assert_snapshot!(node_to_html(&nodes[0]), @r#"<g><circle r="1"></circle>a &amp; b</g>"#);
    }

    #[test]
    fn rejects_unbalanced_markup() {
        assert!(matches!(
            parse_fragment("<svg><path></svg>"),
            Err(FragmentError::Mismatched { .. }) | Err(FragmentError::Xml(_))
        ));
        assert!(parse_fragment("<svg>").is_err());
    }

    #[test]
    fn plain_text_is_a_text_node() {
        let nodes = parse_fragment("★").unwrap();
        assert_eq!(nodes, vec![Node::text("★")]);
    }
}
