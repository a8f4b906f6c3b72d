//! Code syntax highlighting using syntect.

use crate::models::DocumentData;
use crate::tree::{text_content, walk, Visit};
use html_escape::encode_double_quoted_attribute;
use inkmark_types::{Element, Node, Root};
use std::sync::{Arc, OnceLock};
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{highlighted_html_for_string, ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;
use thiserror::Error;

use super::Transform;

pub const DEFAULT_THEME: &str = "InspiredGitHub";
const DEFAULT_LANGUAGE: &str = "plaintext";

static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
static THEME_SET: OnceLock<ThemeSet> = OnceLock::new();

fn syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn theme_set() -> &'static ThemeSet {
    THEME_SET.get_or_init(ThemeSet::load_defaults)
}

fn find_syntax<'a>(ss: &'a SyntaxSet, lang: &str) -> &'a SyntaxReference {
    ss.find_syntax_by_token(lang)
        .or_else(|| ss.find_syntax_by_extension(lang))
        .unwrap_or_else(|| ss.find_syntax_plain_text())
}

#[derive(Debug, Error)]
pub enum HighlightError {
    #[error("syntect failed: {0}")]
    Syntect(#[from] syntect::Error),

    #[error("{0}")]
    Backend(String),
}

/// Turns a code block into highlighted HTML.
///
/// The returned markup replaces the whole `pre` element.
pub trait Highlighter: Send + Sync {
    fn highlight(&self, code: &str, language: &str) -> Result<String, HighlightError>;
}

impl<F> Highlighter for F
where
    F: Fn(&str, &str) -> Result<String, HighlightError> + Send + Sync,
{
    fn highlight(&self, code: &str, language: &str) -> Result<String, HighlightError> {
        self(code, language)
    }
}

/// Inline-styled output using a syntect theme.
pub struct SyntectHighlighter {
    theme: &'static Theme,
}

impl SyntectHighlighter {
    /// Use the named theme, falling back to the default for unknown names.
    pub fn new(theme_name: &str) -> Self {
        let themes = &theme_set().themes;
        let theme = match themes.get(theme_name) {
            Some(theme) => theme,
            None => {
                tracing::warn!(
                    theme = theme_name,
                    fallback = DEFAULT_THEME,
                    "Unknown highlight theme"
                );
                themes
                    .get(DEFAULT_THEME)
                    .expect("syntect ships its default themes")
            }
        };
        Self { theme }
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new(DEFAULT_THEME)
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, code: &str, language: &str) -> Result<String, HighlightError> {
        let ss = syntax_set();
        let syntax = find_syntax(ss, language);
        Ok(highlighted_html_for_string(code, ss, syntax, self.theme)?)
    }
}

/// Class-based output (`<span class="...">`) for stylesheet-driven themes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClassedHighlighter;

impl Highlighter for ClassedHighlighter {
    fn highlight(&self, code: &str, language: &str) -> Result<String, HighlightError> {
        let ss = syntax_set();
        let syntax = find_syntax(ss, language);
        let mut generator = ClassedHTMLGenerator::new_with_class_style(syntax, ss, ClassStyle::Spaced);
        for line in LinesWithEndings::from(code) {
            generator.parse_html_for_line_which_includes_newline(line)?;
        }
        let class = format!("language-{}", encode_double_quoted_attribute(language));
        Ok(format!(
            r#"<pre class="{class}" data-language="{lang}"><code class="{class}">{body}</code></pre>"#,
            lang = encode_double_quoted_attribute(language),
            body = generator.finalize(),
        ))
    }
}

/// Transformer for syntax highlighting code blocks
pub struct HighlightTransformer {
    highlighter: Arc<dyn Highlighter>,
    exclude_langs: Vec<String>,
}

impl HighlightTransformer {
    pub fn new(highlighter: Arc<dyn Highlighter>, exclude_langs: Vec<String>) -> Self {
        Self {
            highlighter,
            exclude_langs,
        }
    }

    fn highlight_block(&self, pre: &Element) -> Visit {
        let Some(code) = code_child(pre) else {
            return Visit::Continue;
        };

        let language = code
            .properties
            .class_list()
            .into_iter()
            .find_map(|class| class.strip_prefix("language-"))
            .unwrap_or(DEFAULT_LANGUAGE)
            .to_string();
        if self.exclude_langs.iter().any(|lang| *lang == language) {
            return Visit::Skip;
        }

        let text = text_content(code);
        let source = text.strip_suffix('\n').unwrap_or(&text);
        match self.highlighter.highlight(source, &language) {
            Ok(html) => Visit::Replace(vec![Node::raw(html)]),
            Err(err) => {
                tracing::warn!(%language, error = %err, "Failed to highlight code block");
                Visit::Skip
            }
        }
    }
}

impl Default for HighlightTransformer {
    fn default() -> Self {
        Self::new(Arc::new(SyntectHighlighter::default()), vec!["math".to_string()])
    }
}

fn code_child(pre: &Element) -> Option<&Element> {
    let mut elements = pre.children.iter().filter_map(Node::as_element);
    let code = elements.next().filter(|el| el.is("code"))?;
    elements.next().is_none().then_some(code)
}

impl Transform for HighlightTransformer {
    fn name(&self) -> &str {
        "highlight"
    }

    fn transform(&self, root: &mut Root, _data: &mut DocumentData) {
        walk(root, &mut |element: &mut Element| {
            if element.is("pre") {
                self.highlight_block(element)
            } else {
                Visit::Continue
            }
        });
    }
}
