//! Frontmatter parsing from markdown files.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontmatterError {
    #[error("Invalid YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

static FRONTMATTER_REGEX: OnceLock<Regex> = OnceLock::new();

// `---` at the very start (after an optional BOM), or on its own line after
// leading blank lines.
fn frontmatter_regex() -> &'static Regex {
    FRONTMATTER_REGEX.get_or_init(|| {
        Regex::new(r"(?:^\x{FEFF}?|^\s*\n)---([\s\S]*?\n)---").expect("valid regex")
    })
}

/// What happens to the frontmatter block in the returned content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrontmatterMode {
    /// Keep the block.
    Preserve,
    /// Cut the block out.
    #[default]
    Remove,
    /// Blank out the block with spaces, keeping line/column offsets.
    EmptyWithSpaces,
    /// Keep only the block's line breaks, keeping line numbers.
    EmptyWithLines,
}

impl FromStr for FrontmatterMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "preserve" => Ok(Self::Preserve),
            "remove" => Ok(Self::Remove),
            "empty-with-spaces" => Ok(Self::EmptyWithSpaces),
            "empty-with-lines" => Ok(Self::EmptyWithLines),
            other => Err(format!("unknown frontmatter mode `{other}`")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedFrontmatter {
    pub frontmatter: Map<String, Value>,
    /// Text between the fences, including the newlines after the opening
    /// fence and before the closing one. Empty when there was no block.
    pub raw_frontmatter: String,
    pub content: String,
}

/// Extract the raw YAML between the `---` fences.
///
/// # Example
///
/// ```
/// use inkmark_core::frontmatter::extract_frontmatter;
///
/// assert_eq!(extract_frontmatter("---\nfoo: bar\n---\n# Hi"), Some("\nfoo: bar\n"));
/// assert_eq!(extract_frontmatter("text\n---\nfoo: bar\n---"), None);
/// ```
pub fn extract_frontmatter(code: &str) -> Option<&str> {
    frontmatter_regex()
        .captures(code)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}

/// Parse frontmatter from markdown content
///
/// YAML that is not a mapping (a bare scalar, a list, nothing at all)
/// yields an empty map.
pub fn parse_frontmatter(
    code: &str,
    mode: FrontmatterMode,
) -> Result<ParsedFrontmatter, FrontmatterError> {
    let Some(raw) = extract_frontmatter(code) else {
        return Ok(ParsedFrontmatter {
            content: code.to_string(),
            ..Default::default()
        });
    };

    let frontmatter = if raw.trim().is_empty() {
        Map::new()
    } else {
        match serde_yaml::from_str::<Value>(raw)? {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    };

    let block = format!("---{raw}---");
    let content = match mode {
        FrontmatterMode::Preserve => code.to_string(),
        FrontmatterMode::Remove => code.replacen(&block, "", 1),
        FrontmatterMode::EmptyWithSpaces => {
            let blanked: String = raw
                .chars()
                .map(|c| if c == '\r' || c == '\n' { c } else { ' ' })
                .collect();
            code.replacen(&block, &format!("   {blanked}   "), 1)
        }
        FrontmatterMode::EmptyWithLines => {
            let lines: String = raw.chars().filter(|c| *c == '\r' || *c == '\n').collect();
            code.replacen(&block, &lines, 1)
        }
    };

    Ok(ParsedFrontmatter {
        frontmatter,
        raw_frontmatter: raw.to_string(),
        content,
    })
}

/// Frontmatter must be a mapping to be attached to a render result.
pub fn is_frontmatter_valid(frontmatter: &Value) -> bool {
    frontmatter.is_object()
}
