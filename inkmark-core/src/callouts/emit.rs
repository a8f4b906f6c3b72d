//! Style strings and icon subtrees for rendered callouts.

use super::config::{CalloutColor, CalloutTable};
use crate::tree::parse_fragment;
use inkmark_types::{Element, Node};

const FALLBACK_COLOR: &str = "#888";

const FOLD_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="1em" height="1em" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><path d="m6 9 6 6 6-6"></path></svg>"#;

/// CSS custom properties carrying the callout color.
pub fn style_string(color: Option<&CalloutColor>) -> String {
    let (light, dark) = match color {
        Some(CalloutColor::Pair(light, dark)) => (light.as_str(), dark.as_str()),
        Some(CalloutColor::Single(color)) => (color.as_str(), color.as_str()),
        None => (FALLBACK_COLOR, FALLBACK_COLOR),
    };
    format!("--callout-color-light: {light}; --callout-color-dark: {dark};")
}

/// The entry's indicator markup wrapped in an `icon_tag` element.
pub fn indicator_node(table: &CalloutTable, kind: &str, icon_tag: &str) -> Option<Node> {
    let markup = table.get(kind)?.indicator.as_deref()?;
    match parse_fragment(markup) {
        Ok(children) => Some(icon_wrapper(icon_tag, "callout-icon", children)),
        Err(err) => {
            tracing::warn!(kind, error = %err, "Skipping callout indicator that failed to parse");
            None
        }
    }
}

/// Chevron shown at the end of a collapsible callout title.
pub fn fold_icon_node(icon_tag: &str) -> Node {
    let children = parse_fragment(FOLD_ICON).unwrap_or_default();
    icon_wrapper(icon_tag, "callout-fold", children)
}

fn icon_wrapper(tag: &str, class: &str, children: Vec<Node>) -> Node {
    Node::Element(
        Element::new(tag)
            .with_class(class)
            .with_property("aria-hidden", "true")
            .with_children(children),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callouts::config::CalloutEntry;
    use crate::callouts::themes::Theme;
    use crate::tree::node_to_html;
    use std::sync::Arc;

    #[test]
    fn style_for_pair_single_and_missing() {
        let pair = CalloutColor::Pair("rgb(0, 191, 188)".into(), "rgb(83, 223, 221)".into());
        assert_eq!(
            style_string(Some(&pair)),
            "--callout-color-light: rgb(0, 191, 188); --callout-color-dark: rgb(83, 223, 221);"
        );
        assert_eq!(
            style_string(Some(&CalloutColor::Single("red".into()))),
            "--callout-color-light: red; --callout-color-dark: red;"
        );
        assert_eq!(
            style_string(None),
            "--callout-color-light: #888; --callout-color-dark: #888;"
        );
    }

    #[test]
    fn indicator_wraps_svg() {
        let node = indicator_node(Theme::Obsidian.callouts(), "note", "span").unwrap();
        let html = node_to_html(&node);
        assert!(html.starts_with(r#"<span class="callout-icon" aria-hidden="true"><svg "#));
        assert!(html.ends_with("</svg></span>"));
    }

    #[test]
    fn no_indicator_without_markup() {
        assert!(indicator_node(Theme::Vitepress.callouts(), "tip", "div").is_none());
        assert!(indicator_node(Theme::Obsidian.callouts(), "missing-type", "div").is_none());

        let mut table = CalloutTable::new();
        table.insert(
            "broken".into(),
            Arc::new(CalloutEntry {
                indicator: Some("<svg><path></svg>".into()),
                ..Default::default()
            }),
        );
        assert!(indicator_node(&table, "broken", "div").is_none());
    }

    #[test]
    fn fold_icon_markup() {
        insta::assert_snapshot!(
            node_to_html(&fold_icon_node("div")),
            @r#"<div class="callout-fold" aria-hidden="true"><svg xmlns="http://www.w3.org/2000/svg" width="1em" height="1em" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><path d="m6 9 6 6 6-6"></path></svg></div>"#
        );
    }
}
