//! End-to-end callout rendering through the full processor.

use inkmark_core::callouts::{resolve_config, UserOptions};
use inkmark_core::config::{CalloutsSetting, SyntaxHighlight};
use inkmark_core::{MarkdownProcessor, ProcessorConfig, RenderOptions};
use std::collections::BTreeMap;
use std::sync::Arc;

fn config() -> ProcessorConfig {
    ProcessorConfig {
        syntax_highlight: SyntaxHighlight::None,
        autolink: false,
        ..Default::default()
    }
}

fn render_with(config: ProcessorConfig, markdown: &str) -> String {
    MarkdownProcessor::new(config)
        .unwrap()
        .render(markdown, &RenderOptions::default())
        .html
}

fn render(markdown: &str) -> String {
    render_with(config(), markdown)
}

#[test]
fn plain_blockquotes_are_identical_with_and_without_callouts() {
    let markdown = "> Just a quote\n> over two lines\n\n> - a list\n> - [!note] not a marker";
    let without = render_with(
        ProcessorConfig {
            callouts: CalloutsSetting::Disabled,
            ..config()
        },
        markdown,
    );
    assert_eq!(render(markdown), without);
    assert!(without.starts_with("<blockquote>\n<p>Just a quote\nover two lines</p>\n</blockquote>"));
}

#[test]
fn aliases_share_the_canonical_entry() {
    let options = UserOptions {
        aliases: BTreeMap::from([("tip".to_string(), vec!["tip2".to_string()])]),
        ..Default::default()
    };
    let table = resolve_config(Some(&options)).expanded_callouts();
    assert!(Arc::ptr_eq(&table["tip2"], &table["tip"]));

    let html = render_with(
        ProcessorConfig {
            callouts: CalloutsSetting::Enabled(options),
            ..config()
        },
        "> [!TIP2] Aliased",
    );
    assert!(html.contains("rgb(0, 191, 188)"));
    assert!(html.contains(r#"<div class="callout-title-inner">Aliased</div>"#));
}

#[test]
fn type_matching_ignores_case() {
    for marker in ["[!NOTE]", "[!note]", "[!NoTe]"] {
        let html = render(&format!("> {marker}"));
        assert!(html.starts_with(r#"<div dir="auto" class="callout""#), "{marker}: {html}");
        assert!(html.contains(r#"<div class="callout-title-inner">Note</div>"#), "{marker}");
    }
}

#[test]
fn collapse_marker_decides_the_container() {
    let open = render("> [!note]+ Open");
    assert!(open.starts_with(r#"<details dir="auto" class="callout callout-collapsible""#));
    assert!(open.contains(r#" open="open">"#));
    assert!(open.contains(r#"<summary class="callout-title">"#));
    assert!(open.contains("callout-fold"));

    let closed = render("> [!note]- Closed");
    assert!(closed.starts_with("<details "));
    assert!(!closed.contains(" open="));
    assert!(closed.contains("callout-fold"));

    let plain = render("> [!note] Plain");
    assert!(plain.starts_with("<div "));
    assert!(!plain.contains("<summary"));
    assert!(!plain.contains("callout-fold"));
}

#[test]
fn title_and_body_are_split_at_the_line_break() {
    let html = render("> [!note] Title\n> Body text");
    assert!(html.contains(r#"<div class="callout-title-inner">Title</div>"#));
    assert!(html.ends_with(r#"<div class="callout-content"><p>Body text</p></div></div>"#));
    assert!(!html.contains("Title\n"));
}

#[test]
fn obsidian_tip_example() {
    let html = render("> [!tip] Did you know?\n> Extra info.");
    assert!(html.starts_with(
        r#"<div dir="auto" class="callout" style="--callout-color-light: rgb(0, 191, 188); --callout-color-dark: rgb(83, 223, 221);"><div class="callout-title"><div class="callout-icon" aria-hidden="true"><svg"#
    ));
    assert!(html.contains(r#"<div class="callout-title-inner">Did you know?</div></div>"#));
    assert!(html.ends_with(r#"<div class="callout-content"><p>Extra info.</p></div></div>"#));
}

#[test]
fn missing_title_uses_the_type_title() {
    let html = render("> [!warning]");
    assert!(html.contains(r#"<div class="callout-title-inner">Warning</div>"#));
    assert!(html.ends_with(r#"<div class="callout-content"></div></div>"#));
}

#[test]
fn unknown_types_stay_blockquotes() {
    assert_eq!(
        render("> [!notarealtype] X"),
        "<blockquote>\n<p>[!notarealtype] X</p>\n</blockquote>"
    );
}

#[test]
fn remaining_blocks_follow_the_body() {
    let html = render("> [!info] Heads up\n> first\n>\n> second\n>\n> - item");
    assert!(html.contains(
        r#"<div class="callout-content"><p>first</p><p>second</p><ul>"#
    ));
}

#[test]
fn headings_inside_callouts_get_ids() {
    let html = render("> [!example] Sample\n>\n> ## Inside");
    assert!(html.contains(r#"<h2 id="inside">Inside</h2>"#));
}

#[test]
fn github_theme() {
    let options = UserOptions {
        theme: Some(inkmark_core::Theme::Github),
        ..Default::default()
    };
    let html = render_with(
        ProcessorConfig {
            callouts: CalloutsSetting::Enabled(options),
            ..config()
        },
        "> [!CAUTION]\n> Careful.",
    );
    assert!(html.contains(r#"<div class="callout-title-inner">Caution</div>"#));
    assert!(html.contains("<p>Careful.</p>"));
}
