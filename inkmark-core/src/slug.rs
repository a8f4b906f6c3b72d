//! Slug generation for heading ids.

use std::collections::HashMap;
use unicode_segmentation::UnicodeSegmentation;

/// Convert a heading text to a GitHub-style slug
///
/// Rules:
/// - Lowercase
/// - Each space becomes a hyphen (runs are not collapsed)
/// - Punctuation and symbols are removed; letters, digits, `-` and `_` stay
///
/// # Examples
///
/// ```
/// use inkmark_core::slugify;
///
/// assert_eq!(slugify("Hello World"), "hello-world");
/// assert_eq!(slugify("Rust & Safety"), "rust--safety");
/// assert_eq!(slugify("C++ Programming"), "c-programming");
/// ```
pub fn slugify(input: &str) -> String {
    input
        .to_lowercase()
        .graphemes(true)
        .filter_map(|g| {
            let c = g.chars().next()?;
            if c == ' ' {
                Some("-")
            } else if c.is_alphanumeric() || c == '-' || c == '_' {
                Some(g)
            } else {
                None
            }
        })
        .collect()
}

/// Hands out unique slugs within one document.
#[derive(Debug, Default, Clone)]
pub struct Slugger {
    occurrences: HashMap<String, usize>,
}

impl Slugger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slug for `value`, suffixed with `-1`, `-2`, ... when already taken.
    pub fn slug(&mut self, value: &str) -> String {
        let original = slugify(value);
        let mut result = original.clone();
        while self.occurrences.contains_key(&result) {
            let count = self.occurrences.entry(original.clone()).or_insert(0);
            *count += 1;
            result = format!("{original}-{count}");
        }
        self.occurrences.insert(result.clone(), 0);
        result
    }

    pub fn reset(&mut self) {
        self.occurrences.clear();
    }
}
