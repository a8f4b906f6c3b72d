//! Callout configuration: user options and their resolution against a theme.

use super::matcher::expand_aliases;
use super::themes::Theme;
use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Callout definitions keyed by lowercase type name.
pub type CalloutTable = BTreeMap<String, Arc<CalloutEntry>>;

/// Accent color of a callout: one color, or a light/dark pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CalloutColor {
    Single(String),
    Pair(String, String),
}

/// Definition of one callout type.
///
/// Every field is optional so the same shape doubles as a patch over a
/// theme entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalloutEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// SVG (or other inline markup) shown before the title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indicator: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<CalloutColor>,
}

impl CalloutEntry {
    /// Fields set in `patch` win, everything else is kept.
    pub fn merged(&self, patch: &CalloutEntry) -> CalloutEntry {
        CalloutEntry {
            title: patch.title.clone().or_else(|| self.title.clone()),
            indicator: patch.indicator.clone().or_else(|| self.indicator.clone()),
            color: patch.color.clone().or_else(|| self.color.clone()),
        }
    }
}

/// Tag names used for the generated callout structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagNames {
    pub non_collapsible_container: String,
    pub non_collapsible_title: String,
    pub non_collapsible_content: String,
    pub collapsible_content: String,
    pub icon: String,
    pub title_inner: String,
}

impl Default for TagNames {
    fn default() -> Self {
        let div = || "div".to_string();
        Self {
            non_collapsible_container: div(),
            non_collapsible_title: div(),
            non_collapsible_content: div(),
            collapsible_content: div(),
            icon: div(),
            title_inner: div(),
        }
    }
}

/// Callout options as written by the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserOptions {
    pub theme: Option<Theme>,
    pub callouts: BTreeMap<String, CalloutEntry>,
    /// Canonical type name to the extra names it answers to.
    pub aliases: BTreeMap<String, Vec<String>>,
    pub show_indicator: Option<bool>,
    pub tag_names: Option<TagNames>,
}

impl UserOptions {
    /// Lenient ingestion from an untyped YAML value.
    ///
    /// Anything that does not have the expected shape is ignored and falls
    /// back to its default; this never fails.
    pub fn from_value(value: &Value) -> Self {
        let Some(map) = value.as_mapping() else {
            return Self::default();
        };

        let theme = map
            .get("theme")
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<Theme>().ok());

        let callouts = map
            .get("callouts")
            .and_then(Value::as_mapping)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|(kind, entry)| {
                        Some((kind.as_str()?.to_string(), entry_from_value(entry)?))
                    })
                    .collect()
            })
            .unwrap_or_default();

        let aliases = map
            .get("aliases")
            .and_then(Value::as_mapping)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|(kind, names)| {
                        let names = match names {
                            Value::String(name) => vec![name.clone()],
                            Value::Sequence(items) => items
                                .iter()
                                .filter_map(|v| v.as_str().map(str::to_string))
                                .collect(),
                            _ => return None,
                        };
                        Some((kind.as_str()?.to_string(), names))
                    })
                    .collect()
            })
            .unwrap_or_default();

        let show_indicator = map.get("show_indicator").and_then(Value::as_bool);

        let tag_names = map.get("tag_names").and_then(Value::as_mapping).map(|tags| {
            let mut names = TagNames::default();
            let slots: [(&str, &mut String); 6] = [
                ("non_collapsible_container", &mut names.non_collapsible_container),
                ("non_collapsible_title", &mut names.non_collapsible_title),
                ("non_collapsible_content", &mut names.non_collapsible_content),
                ("collapsible_content", &mut names.collapsible_content),
                ("icon", &mut names.icon),
                ("title_inner", &mut names.title_inner),
            ];
            for (key, slot) in slots {
                if let Some(tag) = tags.get(key).and_then(Value::as_str) {
                    if !tag.trim().is_empty() {
                        *slot = tag.trim().to_string();
                    }
                }
            }
            names
        });

        Self {
            theme,
            callouts,
            aliases,
            show_indicator,
            tag_names,
        }
    }

    /// Reject aliases that would shadow a callout type.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let theme = self.theme.unwrap_or_default();
        let kinds: BTreeSet<String> = theme
            .callouts()
            .keys()
            .cloned()
            .chain(self.callouts.keys().map(|k| k.to_lowercase()))
            .collect();

        for (kind, names) in &self.aliases {
            for name in names {
                let alias = name.to_lowercase();
                if kinds.contains(&alias) {
                    return Err(ConfigError::AliasShadowsType {
                        alias,
                        kind: kind.to_lowercase(),
                    });
                }
            }
        }
        Ok(())
    }
}

fn entry_from_value(value: &Value) -> Option<CalloutEntry> {
    let map = value.as_mapping()?;
    let text = |key: &str| map.get(key).and_then(Value::as_str).map(str::to_string);
    Some(CalloutEntry {
        title: text("title"),
        indicator: text("indicator"),
        color: map.get("color").and_then(color_from_value),
    })
}

fn color_from_value(value: &Value) -> Option<CalloutColor> {
    match value {
        Value::String(color) => Some(CalloutColor::Single(color.clone())),
        Value::Sequence(items) => match items.as_slice() {
            [Value::String(light), Value::String(dark)] => {
                Some(CalloutColor::Pair(light.clone(), dark.clone()))
            }
            _ => None,
        },
        _ => None,
    }
}

/// Fully resolved, immutable callout configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub theme: Theme,
    pub callouts: CalloutTable,
    pub aliases: BTreeMap<String, Vec<String>>,
    pub show_indicator: bool,
    pub tag_names: TagNames,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        resolve_config(None)
    }
}

impl ResolvedConfig {
    /// Callout table with every alias added as an extra key.
    pub fn expanded_callouts(&self) -> CalloutTable {
        expand_aliases(&self.callouts, &self.aliases)
    }
}

/// Merge user options over the selected theme.
pub fn resolve_config(options: Option<&UserOptions>) -> ResolvedConfig {
    let Some(options) = options else {
        let theme = Theme::default();
        return ResolvedConfig {
            theme,
            callouts: theme.callouts().clone(),
            aliases: BTreeMap::new(),
            show_indicator: true,
            tag_names: TagNames::default(),
        };
    };

    let theme = options.theme.unwrap_or_default();
    let mut callouts = theme.callouts().clone();
    for (kind, patch) in &options.callouts {
        let kind = kind.to_lowercase();
        let merged = match callouts.get(&kind) {
            Some(base) => base.merged(patch),
            None => patch.clone(),
        };
        callouts.insert(kind, Arc::new(merged));
    }

    let mut aliases: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (kind, names) in &options.aliases {
        let kind = kind.to_lowercase();
        for name in names {
            let alias = name.to_lowercase();
            if callouts.contains_key(&alias) {
                tracing::warn!(%alias, %kind, "Ignoring callout alias that shadows a callout type");
                continue;
            }
            let list = aliases.entry(kind.clone()).or_default();
            if !list.contains(&alias) {
                list.push(alias);
            }
        }
    }

    ResolvedConfig {
        theme,
        callouts,
        aliases,
        show_indicator: options.show_indicator.unwrap_or(true),
        tag_names: options.tag_names.clone().unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(src: &str) -> Value {
        serde_yaml::from_str(src).unwrap()
    }

    #[test]
    fn defaults_to_obsidian() {
        let config = resolve_config(None);
        assert_eq!(config.theme, Theme::Obsidian);
        assert!(config.show_indicator);
        assert_eq!(config.tag_names, TagNames::default());
        assert!(config.callouts.contains_key("bug"));
    }

    #[test]
    fn patch_keeps_unspecified_fields() {
        let options = UserOptions {
            callouts: BTreeMap::from([(
                "NOTE".to_string(),
                CalloutEntry {
                    title: Some("Heads up".into()),
                    ..Default::default()
                },
            )]),
            ..Default::default()
        };
        let config = resolve_config(Some(&options));

        let note = &config.callouts["note"];
        assert_eq!(note.title.as_deref(), Some("Heads up"));
        assert_eq!(note.indicator, Theme::Obsidian.callouts()["note"].indicator);
        assert_eq!(note.color, Theme::Obsidian.callouts()["note"].color);
        assert!(!config.callouts.contains_key("NOTE"));
    }

    #[test]
    fn user_only_types_are_inserted() {
        let options = UserOptions::from_value(&yaml(
            r#"
theme: github
callouts:
  Deprecated:
    title: Deprecated
    color: "rgb(1, 2, 3)"
"#,
        ));
        let config = resolve_config(Some(&options));
        assert_eq!(config.theme, Theme::Github);
        assert_eq!(config.callouts.len(), 6);
        assert_eq!(
            config.callouts["deprecated"].color,
            Some(CalloutColor::Single("rgb(1, 2, 3)".into()))
        );
    }

    #[test]
    fn lenient_ingestion_ignores_malformed_fields() {
        let options = UserOptions::from_value(&yaml(
            r#"
theme: solarized
show_indicator: "yes"
callouts:
  note: 42
  tip:
    color: [red]
    title: Pro tip
aliases:
  note: [memo, 7]
tag_names:
  icon: span
  title_inner: 3
"#,
        ));

        assert_eq!(options.theme, None);
        assert_eq!(options.show_indicator, None);
        assert!(!options.callouts.contains_key("note"));
        assert_eq!(options.callouts["tip"].color, None);
        assert_eq!(options.callouts["tip"].title.as_deref(), Some("Pro tip"));
        assert_eq!(options.aliases["note"], vec!["memo".to_string()]);

        let tags = options.tag_names.clone().unwrap();
        assert_eq!(tags.icon, "span");
        assert_eq!(tags.title_inner, "div");

        assert_eq!(UserOptions::from_value(&yaml("[1, 2]")), UserOptions::default());
    }

    #[test]
    fn validate_rejects_shadowing_aliases() {
        let options = UserOptions {
            aliases: BTreeMap::from([("note".to_string(), vec!["Tip".to_string()])]),
            ..Default::default()
        };
        assert!(matches!(
            options.validate(),
            Err(ConfigError::AliasShadowsType { alias, kind }) if alias == "tip" && kind == "note"
        ));

        let config = resolve_config(Some(&options));
        assert!(config.aliases.is_empty());
        assert!(Arc::ptr_eq(&config.callouts["tip"], &Theme::Obsidian.callouts()["tip"]));
    }

    #[test]
    fn alias_names_are_lowercased() {
        let options = UserOptions {
            aliases: BTreeMap::from([("Tip".to_string(), vec!["Tip2".to_string()])]),
            ..Default::default()
        };
        assert!(options.validate().is_ok());
        let config = resolve_config(Some(&options));
        assert_eq!(config.aliases["tip"], vec!["tip2".to_string()]);
    }
}
