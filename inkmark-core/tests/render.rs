//! Whole-pipeline rendering with the default configuration.

use inkmark_core::config::SyntaxHighlight;
use inkmark_core::markdown::{HighlightError, RemoteImagePolicy};
use inkmark_core::{MarkdownHeading, MarkdownProcessor, ProcessorConfig, RenderOptions};

fn render_default(markdown: &str) -> inkmark_core::RenderResult {
    MarkdownProcessor::default().render(markdown, &RenderOptions::default())
}

#[test]
fn headings_get_ids_anchors_and_outline() {
    let result = render_default("# Getting Started\n\n## Install\n\n## Install");
    let html = &result.html;

    assert!(html.starts_with(
        r##"<div tabindex="-1" class="heading-wrapper level-h1"><h1 id="getting-started">Getting Started</h1><a class="anchor-link" href="#getting-started">"##
    ));
    assert!(html.contains(r#"<h2 id="install-1">Install</h2>"#));
    assert!(html.contains("Read the \u{201c}Install\u{201d} section"));
    assert_eq!(
        result.metadata.headings,
        vec![
            MarkdownHeading { depth: 1, slug: "getting-started".into(), text: "Getting Started".into() },
            MarkdownHeading { depth: 2, slug: "install".into(), text: "Install".into() },
            MarkdownHeading { depth: 2, slug: "install-1".into(), text: "Install".into() },
        ]
    );
}

#[test]
fn code_is_highlighted_with_syntect() {
    let html = render_default("```rust\nfn main() {}\n```").html;
    assert!(html.starts_with("<pre style=\""));
    assert!(html.contains("<span style=\""));
    assert!(!html.contains("language-rust"));
}

#[test]
fn classed_highlighting() {
    let config = ProcessorConfig {
        syntax_highlight: SyntaxHighlight::Classed,
        ..Default::default()
    };
    let html = MarkdownProcessor::new(config)
        .unwrap()
        .render("```js\nconst x = 1;\n```", &RenderOptions::default())
        .html;
    assert!(html.starts_with(r#"<pre class="language-js" data-language="js"><code class="language-js">"#));
}

#[test]
fn custom_highlighter_receives_code_and_language() {
    let processor = MarkdownProcessor::builder(ProcessorConfig::default())
        .highlighter(|code: &str, lang: &str| -> Result<String, HighlightError> {
            Ok(format!("<pre data-lang=\"{lang}\">{}</pre>", code.to_uppercase()))
        })
        .build()
        .unwrap();
    let html = processor.render("```py\nprint(1)\n```\n\n```\nplain\n```", &RenderOptions::default()).html;
    assert_eq!(
        html,
        "<pre data-lang=\"py\">PRINT(1)</pre>\n<pre data-lang=\"plaintext\">PLAIN</pre>"
    );
}

#[test]
fn images_are_collected_and_rewritten() {
    let config = ProcessorConfig {
        image: RemoteImagePolicy {
            domains: vec!["images.example.com".into()],
            remote_patterns: vec![],
        },
        ..Default::default()
    };
    let result = MarkdownProcessor::new(config).unwrap().render(
        "![Cat](./cat%20photo.png) ![Dog](https://images.example.com/dog.jpg) ![Bird](https://elsewhere.org/b.png) ![Root](/root.png)",
        &RenderOptions::default(),
    );

    assert_eq!(result.metadata.local_image_paths, vec!["./cat photo.png"]);
    assert_eq!(result.metadata.remote_image_paths, vec!["https://images.example.com/dog.jpg"]);
    assert!(result.html.contains("data-image=\"{"));
    assert!(result.html.contains(r#"<img src="https://elsewhere.org/b.png" alt="Bird">"#));
    assert!(result.html.contains(r#"<img src="/root.png" alt="Root">"#));
}

#[test]
fn subtext_and_smart_punctuation() {
    let html = render_default("-# \"fine\" print").html;
    assert_eq!(html, "<p><small>\u{201c}fine\u{201d} print</small></p>");
}

#[test]
fn frontmatter_from_documents_and_options() {
    let processor = MarkdownProcessor::default();
    let result = processor
        .render_document("---\ntitle: Hello\ntags: [a, b]\n---\nBody\n", "post.md")
        .unwrap();
    assert_eq!(result.html, "<p>Body</p>");
    assert_eq!(result.metadata.frontmatter["tags"], serde_json::json!(["a", "b"]));

    let options = RenderOptions {
        path: None,
        frontmatter: serde_json::from_str(r#"{"draft": true}"#).unwrap(),
    };
    let result = processor.render("Body", &options);
    assert_eq!(result.metadata.frontmatter["draft"], true);
}

#[test]
fn results_serialize_to_json() {
    let result = render_default("# Title");
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["metadata"]["headings"][0]["slug"], "title");
    assert!(json["html"].as_str().unwrap().contains("heading-wrapper"));
}

#[test]
fn processor_is_shared_across_threads() {
    let processor = std::sync::Arc::new(MarkdownProcessor::default());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let processor = processor.clone();
            std::thread::spawn(move || {
                processor
                    .render(&format!("> [!note] Thread {i}"), &RenderOptions::default())
                    .html
            })
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        let html = handle.join().unwrap();
        assert!(html.contains(&format!("Thread {i}")));
    }
}
