//! Recognition of the `[!TYPE]` callout marker.

use super::config::CalloutTable;
use inkmark_types::{Element, Node};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

fn marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*\[!(?P<kind>[A-Za-z0-9_]+)\](?P<collapse>[+-]?)[ \t]*(?P<title>.*)")
            .expect("valid regex")
    })
}

/// Collapse marker following the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collapse {
    /// No marker: a plain, always-open callout.
    None,
    /// `+`: collapsible, initially open.
    Open,
    /// `-`: collapsible, initially closed.
    Closed,
}

impl Collapse {
    pub fn is_collapsible(self) -> bool {
        !matches!(self, Collapse::None)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalloutMatch {
    /// Lowercased callout type.
    pub kind: String,
    pub collapse: Collapse,
    /// Rest of the marker line, possibly empty.
    pub title: String,
}

/// Add every alias as an extra key sharing its canonical entry.
///
/// Aliases of unknown types are skipped and existing keys are never
/// overwritten.
pub fn expand_aliases(
    table: &CalloutTable,
    aliases: &BTreeMap<String, Vec<String>>,
) -> CalloutTable {
    let mut expanded = table.clone();
    for (kind, names) in aliases {
        let Some(entry) = table.get(kind) else {
            continue;
        };
        for name in names {
            expanded
                .entry(name.clone())
                .or_insert_with(|| Arc::clone(entry));
        }
    }
    expanded
}

/// Parse the marker at the start of `text` and check its type against `table`.
pub fn match_callout(text: &str, table: &CalloutTable) -> Option<CalloutMatch> {
    let caps = marker_regex().captures(text)?;
    let kind = caps.name("kind")?.as_str().to_lowercase();
    if !table.contains_key(&kind) {
        return None;
    }

    let collapse = match caps.name("collapse").map(|m| m.as_str()) {
        Some("+") => Collapse::Open,
        Some("-") => Collapse::Closed,
        _ => Collapse::None,
    };
    let title = caps
        .name("title")
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();

    Some(CalloutMatch {
        kind,
        collapse,
        title,
    })
}

pub(crate) fn is_newline_artifact(node: &Node) -> bool {
    matches!(node, Node::Text(value) if value == "\n")
}

/// Check whether a blockquote opens with a known callout marker.
///
/// Only reads the element: `"\n"` artifacts between block children are
/// skipped, the first remaining child must be a paragraph whose first child
/// is text starting with the marker.
pub fn match_blockquote(element: &Element, table: &CalloutTable) -> Option<CalloutMatch> {
    if !element.is("blockquote") {
        return None;
    }
    let first = element
        .children
        .iter()
        .find(|child| !is_newline_artifact(child))?;
    let paragraph = first.as_element().filter(|el| el.is("p"))?;
    let text = paragraph.children.first()?.as_text()?;
    match_callout(text, table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callouts::config::CalloutEntry;
    use crate::callouts::themes::Theme;

    fn table() -> &'static CalloutTable {
        Theme::Obsidian.callouts()
    }

    #[test]
    fn type_is_case_insensitive() {
        for marker in ["[!NOTE]", "[!note]", "[!NoTe]"] {
            let m = match_callout(marker, table()).unwrap();
            assert_eq!(m.kind, "note");
            assert_eq!(m.collapse, Collapse::None);
            assert_eq!(m.title, "");
        }
    }

    #[test]
    fn collapse_markers_and_title() {
        let m = match_callout("[!tip]+ Did you know?", table()).unwrap();
        assert_eq!(m.collapse, Collapse::Open);
        assert_eq!(m.title, "Did you know?");

        let m = match_callout("  [!faq]-   Why", table()).unwrap();
        assert_eq!(m.collapse, Collapse::Closed);
        assert!(m.collapse.is_collapsible());
        assert_eq!(m.title, "Why");
    }

    #[test]
    fn title_stops_at_newline() {
        let m = match_callout("[!note] Title\nBody", table()).unwrap();
        assert_eq!(m.title, "Title");
    }

    #[test]
    fn rejects_unknown_or_misplaced_markers() {
        assert!(match_callout("[!notarealtype] X", table()).is_none());
        assert!(match_callout("see [!note]", table()).is_none());
        assert!(match_callout("[!no te]", table()).is_none());
        assert!(match_callout("[note]", table()).is_none());
    }

    #[test]
    fn aliases_share_the_canonical_entry() {
        let aliases = BTreeMap::from([
            ("tip".to_string(), vec!["tip2".to_string()]),
            ("nope".to_string(), vec!["ghost".to_string()]),
        ]);
        let expanded = expand_aliases(table(), &aliases);

        assert!(Arc::ptr_eq(&expanded["tip2"], &expanded["tip"]));
        assert!(Arc::ptr_eq(&expanded["tip"], &table()["tip"]));
        assert!(!expanded.contains_key("ghost"));
        assert!(!table().contains_key("tip2"));
        assert_eq!(match_callout("[!TIP2]", &expanded).unwrap().kind, "tip2");
    }

    #[test]
    fn aliases_never_replace_existing_keys() {
        let mut base = CalloutTable::new();
        base.insert("a".into(), Arc::new(CalloutEntry::default()));
        base.insert("b".into(), Arc::new(CalloutEntry::default()));
        let aliases = BTreeMap::from([("a".to_string(), vec!["b".to_string()])]);

        let expanded = expand_aliases(&base, &aliases);
        assert!(Arc::ptr_eq(&expanded["b"], &base["b"]));
    }

    #[test]
    fn blockquote_gates() {
        let p = |children: Vec<Node>| Node::Element(Element::new("p").with_children(children));
        let quote = |children: Vec<Node>| Element::new("blockquote").with_children(children);

        let ok = quote(vec![Node::text("\n"), p(vec![Node::text("[!note] Hi")]), Node::text("\n")]);
        assert_eq!(match_blockquote(&ok, table()).unwrap().title, "Hi");

        let not_quote = Element::new("div").with_children(ok.children.clone());
        assert!(match_blockquote(&not_quote, table()).is_none());

        assert!(match_blockquote(&quote(vec![Node::text("\n")]), table()).is_none());
        assert!(match_blockquote(&quote(vec![p(vec![])]), table()).is_none());

        let em_first = p(vec![Node::Element(
            Element::new("em").with_children(vec![Node::text("[!note]")]),
        )]);
        assert!(match_blockquote(&quote(vec![em_first]), table()).is_none());

        let heading_first = Node::Element(
            Element::new("h2").with_children(vec![Node::text("[!note]")]),
        );
        assert!(match_blockquote(&quote(vec![heading_first]), table()).is_none());
    }
}
