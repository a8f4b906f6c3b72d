//! Depth-first element visitor with in-place replacement.
//!
//! The walker keeps an explicit stack of cursors, each naming a sibling list
//! (by its index path from the root) and the next index to look at. Sibling
//! lists are re-resolved on every step, so a visitor may splice replacement
//! nodes into the tree without invalidating the traversal. Replacement nodes
//! are never visited themselves.

use inkmark_types::{Element, Node, Root};

/// What the walker should do after visiting an element.
#[derive(Debug)]
pub enum Visit {
    /// Descend into the element's (possibly rewritten) children.
    Continue,
    /// Leave the element's children alone.
    Skip,
    /// Replace the element with these nodes and move past them.
    Replace(Vec<Node>),
}

/// Element-level visitor driven by [`walk`].
pub trait Visitor {
    fn visit_element(&mut self, element: &mut Element) -> Visit;
}

impl<F> Visitor for F
where
    F: FnMut(&mut Element) -> Visit,
{
    fn visit_element(&mut self, element: &mut Element) -> Visit {
        self(element)
    }
}

struct Cursor {
    path: Vec<usize>,
    index: usize,
}

/// Visit every element of the tree once, in document order (pre-order).
pub fn walk<V: Visitor + ?Sized>(root: &mut Root, visitor: &mut V) {
    let mut stack = vec![Cursor {
        path: Vec::new(),
        index: 0,
    }];

    while let Some(Cursor { path, index }) = stack.pop() {
        let Some(siblings) = children_at_mut(&mut root.children, &path) else {
            continue;
        };
        let Some(node) = siblings.get_mut(index) else {
            continue;
        };
        let Node::Element(element) = node else {
            stack.push(Cursor {
                path,
                index: index + 1,
            });
            continue;
        };

        match visitor.visit_element(element) {
            Visit::Continue => {
                let has_children = !element.children.is_empty();
                stack.push(Cursor {
                    path: path.clone(),
                    index: index + 1,
                });
                if has_children {
                    let mut child_path = path;
                    child_path.push(index);
                    stack.push(Cursor {
                        path: child_path,
                        index: 0,
                    });
                }
            }
            Visit::Skip => stack.push(Cursor {
                path,
                index: index + 1,
            }),
            Visit::Replace(nodes) => {
                let count = nodes.len();
                siblings.splice(index..=index, nodes);
                stack.push(Cursor {
                    path,
                    index: index + count,
                });
            }
        }
    }
}

fn children_at_mut<'a>(mut children: &'a mut Vec<Node>, path: &[usize]) -> Option<&'a mut Vec<Node>> {
    for &index in path {
        children = match children.get_mut(index) {
            Some(Node::Element(element)) => &mut element.children,
            _ => return None,
        };
    }
    Some(children)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn el(tag: &str, children: Vec<Node>) -> Node {
        Node::Element(Element::new(tag).with_children(children))
    }

    #[test]
    fn visits_in_document_order() {
        let mut root = Root::new(vec![
            el("div", vec![el("p", vec![Node::text("a")]), el("span", vec![])]),
            el("hr", vec![]),
        ]);

        let mut seen = Vec::new();
        walk(&mut root, &mut |e: &mut Element| {
            seen.push(e.tag_name.clone());
            Visit::Continue
        });

        assert_eq!(seen, vec!["div", "p", "span", "hr"]);
    }

    #[test]
    fn skip_does_not_descend() {
        let mut root = Root::new(vec![el("pre", vec![el("code", vec![])]), el("p", vec![])]);

        let mut seen = Vec::new();
        walk(&mut root, &mut |e: &mut Element| {
            seen.push(e.tag_name.clone());
            if e.is("pre") {
                Visit::Skip
            } else {
                Visit::Continue
            }
        });

        assert_eq!(seen, vec!["pre", "p"]);
    }

    #[test]
    fn replacement_is_not_revisited() {
        let mut root = Root::new(vec![el("h1", vec![]), el("p", vec![])]);

        let mut visits = 0;
        walk(&mut root, &mut |e: &mut Element| {
            visits += 1;
            if e.is("h1") {
                let heading = e.clone();
                Visit::Replace(vec![el("div", vec![Node::Element(heading)]), el("a", vec![])])
            } else {
                Visit::Continue
            }
        });

        // h1, then p; the inserted div/a (and the h1 inside) are skipped
        assert_eq!(visits, 2);
        assert_eq!(root.children.len(), 3);
        assert!(root.children[0].is_element("div"));
        assert!(root.children[1].is_element("a"));
        assert!(root.children[2].is_element("p"));
    }

    #[test]
    fn descends_into_rewritten_children() {
        let mut root = Root::new(vec![el("blockquote", vec![el("p", vec![])])]);

        let mut seen = Vec::new();
        walk(&mut root, &mut |e: &mut Element| {
            seen.push(e.tag_name.clone());
            if e.is("blockquote") && !e.children.is_empty() {
                e.tag_name = "div".to_string();
                e.children = vec![el("section", vec![el("blockquote", vec![])])];
            }
            Visit::Continue
        });

        assert_eq!(seen, vec!["blockquote", "section", "blockquote"]);
    }

    #[test]
    fn empty_replacement_removes_node() {
        let mut root = Root::new(vec![el("br", vec![]), el("p", vec![])]);
        walk(&mut root, &mut |e: &mut Element| {
            if e.is("br") {
                Visit::Replace(Vec::new())
            } else {
                Visit::Continue
            }
        });
        assert_eq!(root.children.len(), 1);
        assert!(root.children[0].is_element("p"));
    }
}
