//! Splitting the first paragraph of a callout into title and body.

use inkmark_types::Node;

/// Inline content of the marker line and of whatever follows it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Split {
    pub title: Vec<Node>,
    /// `None` when the paragraph is a single line. A split always yields a
    /// body, possibly empty.
    pub body: Option<Vec<Node>>,
}

/// Split paragraph children at the first newline inside a text child.
///
/// A hard break ending the marker line (`br` right before the text holding
/// the newline) is dropped. Without any newline everything is title.
pub fn split_title(children: &[Node]) -> Split {
    let Some(mut boundary) = children
        .iter()
        .position(|child| matches!(child, Node::Text(value) if value.contains('\n')))
    else {
        return Split {
            title: children.to_vec(),
            body: None,
        };
    };

    let mut children = children.to_vec();
    if boundary > 0 && children[boundary - 1].is_element("br") {
        children.remove(boundary - 1);
        boundary -= 1;
    }

    let mut after = children.split_off(boundary);
    let mut title = children;
    let mut body = Vec::new();

    let rest = after.split_off(1);
    if let Some(Node::Text(value)) = after.pop() {
        let (prefix, suffix) = value.split_once('\n').unwrap_or((value.as_str(), ""));
        if !prefix.is_empty() {
            title.push(Node::text(prefix));
        }
        if !suffix.is_empty() {
            body.push(Node::text(suffix));
        }
    }
    body.extend(rest);

    Split {
        title,
        body: Some(body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkmark_types::Element;

    fn el(tag: &str, text: &str) -> Node {
        Node::Element(Element::new(tag).with_children(vec![Node::text(text)]))
    }

    #[test]
    fn splits_soft_break() {
        let split = split_title(&[Node::text("[!note] Title\nBody text")]);
        assert_eq!(split.title, vec![Node::text("[!note] Title")]);
        assert_eq!(split.body, Some(vec![Node::text("Body text")]));
    }

    #[test]
    fn no_newline_means_title_only() {
        let children = vec![Node::text("[!note] Title "), el("em", "here")];
        let split = split_title(&children);
        assert_eq!(split.title, children);
        assert_eq!(split.body, None);
    }

    #[test]
    fn drops_hard_break_after_title() {
        let split = split_title(&[
            Node::text("[!note] Title"),
            Node::Element(Element::new("br")),
            Node::text("\nBody"),
        ]);
        assert_eq!(split.title, vec![Node::text("[!note] Title")]);
        assert_eq!(split.body, Some(vec![Node::text("Body")]));
    }

    #[test]
    fn keeps_inline_elements_on_both_sides() {
        let split = split_title(&[
            Node::text("[!tip] "),
            el("strong", "Bold"),
            Node::text(" title\nbody "),
            el("code", "x"),
            Node::text(" end"),
        ]);
        assert_eq!(
            split.title,
            vec![Node::text("[!tip] "), el("strong", "Bold"), Node::text(" title")]
        );
        assert_eq!(
            split.body,
            Some(vec![Node::text("body "), el("code", "x"), Node::text(" end")])
        );
    }

    #[test]
    fn marker_only_line_has_empty_prefix() {
        let split = split_title(&[Node::text("[!warning]\nCareful\nagain")]);
        assert_eq!(split.title, vec![Node::text("[!warning]")]);
        assert_eq!(split.body, Some(vec![Node::text("Careful\nagain")]));
    }

    #[test]
    fn newline_only_suffix_still_yields_a_body() {
        let split = split_title(&[Node::text("[!note] T\n")]);
        assert_eq!(split.title, vec![Node::text("[!note] T")]);
        assert_eq!(split.body, Some(Vec::new()));
    }
}
