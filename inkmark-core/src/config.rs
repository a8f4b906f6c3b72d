//! Configuration parsing and management.

use crate::callouts::UserOptions;
use crate::markdown::highlight::DEFAULT_THEME;
use crate::markdown::RemoteImagePolicy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Alias `{alias}` shadows the callout type `{kind}`")]
    AliasShadowsType { alias: String, kind: String },
}

/// Main configuration struct matching the inkmark.yml schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessorConfig {
    #[serde(default)]
    pub syntax_highlight: SyntaxHighlight,

    #[serde(default)]
    pub highlight: HighlightConfig,

    /// Tables, strikethrough, task lists and footnotes.
    #[serde(default = "default_true")]
    pub gfm: bool,

    #[serde(default = "default_true")]
    pub smartypants: bool,

    #[serde(default)]
    pub heading_ids: HeadingIdsConfig,

    #[serde(default = "default_true")]
    pub autolink: bool,

    #[serde(default = "default_true")]
    pub discord_subtext: bool,

    #[serde(default)]
    pub callouts: CalloutsSetting,

    #[serde(default)]
    pub image: RemoteImagePolicy,
}

fn default_true() -> bool {
    true
}

/// Which highlighter renders fenced code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyntaxHighlight {
    /// Inline styles from a syntect theme.
    #[default]
    Syntect,
    /// Class-based spans, styled by a stylesheet.
    Classed,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightConfig {
    #[serde(default = "default_highlight_theme")]
    pub theme: String,

    #[serde(default = "default_exclude_langs")]
    pub exclude_langs: Vec<String>,
}

fn default_highlight_theme() -> String {
    DEFAULT_THEME.to_string()
}

fn default_exclude_langs() -> Vec<String> {
    vec!["math".to_string()]
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: default_highlight_theme(),
            exclude_langs: default_exclude_langs(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingIdsConfig {
    /// Keep the trailing `-` some slugs end with.
    #[serde(default)]
    pub compat: bool,
}

/// `callouts: false` turns callouts off; a mapping configures them.
///
/// The mapping is read leniently: malformed fields fall back to their
/// defaults instead of failing the whole file.
#[derive(Debug, Clone, PartialEq)]
pub enum CalloutsSetting {
    Disabled,
    Enabled(UserOptions),
}

impl Default for CalloutsSetting {
    fn default() -> Self {
        CalloutsSetting::Enabled(UserOptions::default())
    }
}

impl CalloutsSetting {
    pub fn options(&self) -> Option<&UserOptions> {
        match self {
            CalloutsSetting::Disabled => None,
            CalloutsSetting::Enabled(options) => Some(options),
        }
    }
}

impl<'de> Deserialize<'de> for CalloutsSetting {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_yaml::Value::deserialize(deserializer)?;
        Ok(match value {
            serde_yaml::Value::Bool(false) => CalloutsSetting::Disabled,
            other => CalloutsSetting::Enabled(UserOptions::from_value(&other)),
        })
    }
}

impl Serialize for CalloutsSetting {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CalloutsSetting::Disabled => serializer.serialize_bool(false),
            CalloutsSetting::Enabled(options) => options.serialize(serializer),
        }
    }
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            syntax_highlight: SyntaxHighlight::default(),
            highlight: HighlightConfig::default(),
            gfm: true,
            smartypants: true,
            heading_ids: HeadingIdsConfig::default(),
            autolink: true,
            discord_subtext: true,
            callouts: CalloutsSetting::default(),
            image: RemoteImagePolicy::default(),
        }
    }
}

impl ProcessorConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&contents)
    }

    /// Parse configuration from YAML text; an empty document means defaults.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Checks that cannot be expressed in the YAML shape alone.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.callouts.options() {
            Some(options) => options.validate(),
            None => Ok(()),
        }
    }
}
