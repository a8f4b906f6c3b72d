//! List callout types.

use super::load_config;
use anyhow::Result;
use inkmark_core::callouts::{resolve_config, CalloutColor};
use inkmark_core::Theme;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct CalloutSummary<'a> {
    kind: &'a str,
    title: Option<&'a str>,
    color: Option<&'a CalloutColor>,
    has_indicator: bool,
    aliases: &'a [String],
}

#[derive(Serialize)]
struct ThemeSummary<'a> {
    theme: Theme,
    callouts: Vec<CalloutSummary<'a>>,
}

/// Print the callout table the configuration resolves to, optionally with a
/// different base theme.
pub fn list_themes(config_path: Option<&Path>, theme: Option<Theme>, json: bool) -> Result<()> {
    let (config, _) = load_config(config_path)?;
    let mut options = config.callouts.options().cloned().unwrap_or_default();
    if theme.is_some() {
        options.theme = theme;
    }
    let resolved = resolve_config(Some(&options));

    let callouts = resolved
        .callouts
        .iter()
        .map(|(kind, entry)| CalloutSummary {
            kind,
            title: entry.title.as_deref(),
            color: entry.color.as_ref(),
            has_indicator: entry.indicator.is_some(),
            aliases: resolved.aliases.get(kind).map(Vec::as_slice).unwrap_or(&[]),
        })
        .collect();
    let summary = ThemeSummary {
        theme: resolved.theme,
        callouts,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let available: Vec<&str> = Theme::ALL.iter().map(|t| t.as_str()).collect();
    println!(
        "Theme: {} ({} callout types; available: {})",
        summary.theme,
        summary.callouts.len(),
        available.join(", ")
    );
    for callout in &summary.callouts {
        let title = callout
            .title
            .map(str::to_string)
            .unwrap_or_else(|| summary.theme.fallback_title(callout.kind));
        let color = match callout.color {
            Some(CalloutColor::Single(color)) => color.clone(),
            Some(CalloutColor::Pair(light, dark)) => format!("{light} / {dark}"),
            None => "-".to_string(),
        };
        print!("  {:<12} {:<12} {}", callout.kind, title, color);
        if !callout.aliases.is_empty() {
            print!("  (aliases: {})", callout.aliases.join(", "));
        }
        println!();
    }

    Ok(())
}
