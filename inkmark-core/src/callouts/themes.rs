//! Built-in callout themes.

use super::config::{CalloutColor, CalloutEntry, CalloutTable};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

/// Base callout table a configuration starts from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Github,
    #[default]
    Obsidian,
    Vitepress,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Github, Theme::Obsidian, Theme::Vitepress];

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Github => "github",
            Theme::Obsidian => "obsidian",
            Theme::Vitepress => "vitepress",
        }
    }

    /// Default callout table of this theme.
    pub fn callouts(self) -> &'static CalloutTable {
        static GITHUB: OnceLock<CalloutTable> = OnceLock::new();
        static OBSIDIAN: OnceLock<CalloutTable> = OnceLock::new();
        static VITEPRESS: OnceLock<CalloutTable> = OnceLock::new();

        match self {
            Theme::Github => GITHUB.get_or_init(github_callouts),
            Theme::Obsidian => OBSIDIAN.get_or_init(obsidian_callouts),
            Theme::Vitepress => VITEPRESS.get_or_init(vitepress_callouts),
        }
    }

    /// Title used when neither the markup nor the entry supplies one.
    pub fn fallback_title(self, kind: &str) -> String {
        match self {
            Theme::Github | Theme::Obsidian => crate::tree::capitalize(kind),
            Theme::Vitepress => kind.to_uppercase(),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "github" => Ok(Theme::Github),
            "obsidian" => Ok(Theme::Obsidian),
            "vitepress" => Ok(Theme::Vitepress),
            other => Err(format!(
                "unknown theme '{other}' (expected github, obsidian or vitepress)"
            )),
        }
    }
}

fn entry(title: &str, indicator: Option<&str>, color: Option<CalloutColor>) -> Arc<CalloutEntry> {
    Arc::new(CalloutEntry {
        title: Some(title.to_string()),
        indicator: indicator.map(str::to_string),
        color,
    })
}

fn pair(light: &str, dark: &str) -> Option<CalloutColor> {
    Some(CalloutColor::Pair(light.to_string(), dark.to_string()))
}

// GitHub alerts (octicons)

const OCTICON_INFO: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 16 16" width="16" height="16"><path fill="currentColor" d="M0 8a8 8 0 1 1 16 0A8 8 0 0 1 0 8Zm8-6.5a6.5 6.5 0 1 0 0 13 6.5 6.5 0 0 0 0-13ZM6.5 7.75A.75.75 0 0 1 7.25 7h1a.75.75 0 0 1 .75.75v2.75h.25a.75.75 0 0 1 0 1.5h-2a.75.75 0 0 1 0-1.5h.25v-2h-.25a.75.75 0 0 1-.75-.75ZM8 6a1 1 0 1 1 0-2 1 1 0 0 1 0 2Z"></path></svg>"#;
const OCTICON_LIGHT_BULB: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 16 16" width="16" height="16"><path fill="currentColor" d="M8 1.5c-2.363 0-4 1.69-4 3.75 0 .984.424 1.625.984 2.304l.214.253c.223.264.47.556.673.848.284.411.537.896.621 1.49a.75.75 0 0 1-1.484.211c-.04-.282-.163-.547-.37-.847a8.456 8.456 0 0 0-.542-.68c-.084-.1-.173-.205-.268-.32C3.201 7.75 2.5 6.766 2.5 5.25 2.5 2.31 4.863 0 8 0s5.5 2.31 5.5 5.25c0 1.516-.701 2.5-1.328 3.259-.095.115-.184.22-.268.319-.207.245-.383.453-.541.681-.208.3-.33.565-.37.847a.751.751 0 0 1-1.485-.212c.084-.593.337-1.078.621-1.489.203-.292.45-.584.673-.848.075-.088.147-.173.213-.253.561-.679.985-1.32.985-2.304 0-2.06-1.637-3.75-4-3.75ZM5.75 12h4.5a.75.75 0 0 1 0 1.5h-4.5a.75.75 0 0 1 0-1.5ZM6 15.25a.75.75 0 0 1 .75-.75h2.5a.75.75 0 0 1 0 1.5h-2.5a.75.75 0 0 1-.75-.75Z"></path></svg>"#;
const OCTICON_REPORT: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 16 16" width="16" height="16"><path fill="currentColor" d="M0 1.75C0 .784.784 0 1.75 0h12.5C15.216 0 16 .784 16 1.75v9.5A1.75 1.75 0 0 1 14.25 13H8.06l-2.573 2.573A1.458 1.458 0 0 1 3 14.543V13H1.75A1.75 1.75 0 0 1 0 11.25Zm1.75-.25a.25.25 0 0 0-.25.25v9.5c0 .138.112.25.25.25h2a.75.75 0 0 1 .75.75v2.19l2.72-2.72a.749.749 0 0 1 .53-.22h6.5a.25.25 0 0 0 .25-.25v-9.5a.25.25 0 0 0-.25-.25Zm7 2.25v2.5a.75.75 0 0 1-1.5 0v-2.5a.75.75 0 0 1 1.5 0ZM9 9a1 1 0 1 1-2 0 1 1 0 0 1 2 0Z"></path></svg>"#;
const OCTICON_ALERT: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 16 16" width="16" height="16"><path fill="currentColor" d="M6.457 1.047c.659-1.234 2.427-1.234 3.086 0l6.082 11.378A1.75 1.75 0 0 1 14.082 15H1.918a1.75 1.75 0 0 1-1.543-2.575Zm1.763.707a.25.25 0 0 0-.44 0L1.698 13.132a.25.25 0 0 0 .22.368h12.164a.25.25 0 0 0 .22-.368Zm.53 3.996v2.5a.75.75 0 0 1-1.5 0v-2.5a.75.75 0 0 1 1.5 0ZM9 11a1 1 0 1 1-2 0 1 1 0 0 1 2 0Z"></path></svg>"#;
const OCTICON_STOP: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 16 16" width="16" height="16"><path fill="currentColor" d="M4.47.22A.749.749 0 0 1 5 0h6c.199 0 .389.079.53.22l4.25 4.25c.141.14.22.331.22.53v6a.749.749 0 0 1-.22.53l-4.25 4.25A.749.749 0 0 1 11 16H5a.749.749 0 0 1-.53-.22L.22 11.53A.749.749 0 0 1 0 11V5c0-.199.079-.389.22-.53Zm.84 1.28L1.5 5.31v5.38l3.81 3.81h5.38l3.81-3.81V5.31L10.69 1.5ZM8 4a.75.75 0 0 1 .75.75v3.5a.75.75 0 0 1-1.5 0v-3.5A.75.75 0 0 1 8 4Zm0 8a1 1 0 1 1 0-2 1 1 0 0 1 0 2Z"></path></svg>"#;

fn github_callouts() -> CalloutTable {
    let mut table = CalloutTable::new();
    table.insert(
        "note".into(),
        entry("Note", Some(OCTICON_INFO), pair("rgb(9, 105, 218)", "rgb(47, 129, 247)")),
    );
    table.insert(
        "tip".into(),
        entry("Tip", Some(OCTICON_LIGHT_BULB), pair("rgb(26, 127, 55)", "rgb(63, 185, 80)")),
    );
    table.insert(
        "important".into(),
        entry("Important", Some(OCTICON_REPORT), pair("rgb(130, 80, 223)", "rgb(163, 113, 247)")),
    );
    table.insert(
        "warning".into(),
        entry("Warning", Some(OCTICON_ALERT), pair("rgb(154, 103, 0)", "rgb(210, 153, 34)")),
    );
    table.insert(
        "caution".into(),
        entry("Caution", Some(OCTICON_STOP), pair("rgb(209, 36, 47)", "rgb(248, 81, 73)")),
    );
    table
}

// Obsidian callouts (lucide icons)

const LUCIDE_PENCIL: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="1em" height="1em" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><line x1="18" y1="2" x2="22" y2="6"></line><path d="M7.5 20.5 19 9l-4-4L3.5 16.5 2 22z"></path></svg>"#;
const LUCIDE_CLIPBOARD: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="1em" height="1em" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><rect x="8" y="2" width="8" height="4" rx="1" ry="1"></rect><path d="M16 4h2a2 2 0 0 1 2 2v14a2 2 0 0 1-2 2H6a2 2 0 0 1-2-2V6a2 2 0 0 1 2-2h2"></path><path d="M12 11h4"></path><path d="M12 16h4"></path><path d="M8 11h.01"></path><path d="M8 16h.01"></path></svg>"#;
const LUCIDE_INFO: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="1em" height="1em" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><circle cx="12" cy="12" r="10"></circle><line x1="12" y1="16" x2="12" y2="12"></line><line x1="12" y1="8" x2="12.01" y2="8"></line></svg>"#;
const LUCIDE_CHECK_CIRCLE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="1em" height="1em" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><path d="M12 22c5.523 0 10-4.477 10-10S17.523 2 12 2 2 6.477 2 12s4.477 10 10 10z"></path><path d="m9 12 2 2 4-4"></path></svg>"#;
const LUCIDE_FLAME: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="1em" height="1em" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><path d="M8.5 14.5A2.5 2.5 0 0 0 11 12c0-1.38-.5-2-1-3-1.072-2.143-.224-4.054 2-6 .5 2.5 2 4.9 4 6.5 2 1.6 3 3.5 3 5.5a7 7 0 1 1-14 0c0-1.153.433-2.294 1-3a2.5 2.5 0 0 0 2.5 2.5z"></path></svg>"#;
const LUCIDE_CHECK: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="1em" height="1em" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><polyline points="20 6 9 17 4 12"></polyline></svg>"#;
const LUCIDE_HELP: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="1em" height="1em" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><circle cx="12" cy="12" r="10"></circle><path d="M9.09 9a3 3 0 0 1 5.83 1c0 2-3 3-3 3"></path><line x1="12" y1="17" x2="12.01" y2="17"></line></svg>"#;
const LUCIDE_TRIANGLE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="1em" height="1em" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><path d="m21.73 18-8-14a2 2 0 0 0-3.48 0l-8 14A2 2 0 0 0 4 21h16a2 2 0 0 0 1.73-3Z"></path><line x1="12" y1="9" x2="12" y2="13"></line><line x1="12" y1="17" x2="12.01" y2="17"></line></svg>"#;
const LUCIDE_X: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="1em" height="1em" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><line x1="18" y1="6" x2="6" y2="18"></line><line x1="6" y1="6" x2="18" y2="18"></line></svg>"#;
const LUCIDE_ZAP: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="1em" height="1em" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><polygon points="13 2 3 14 12 14 11 22 21 10 12 10 13 2"></polygon></svg>"#;
const LUCIDE_BUG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="1em" height="1em" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><rect width="8" height="14" x="8" y="6" rx="4"></rect><path d="m19 7-3 2"></path><path d="m5 7 3 2"></path><path d="m19 19-3-2"></path><path d="m5 19 3-2"></path><path d="M20 13h-4"></path><path d="M4 13h4"></path><path d="m10 4 1 2"></path><path d="m14 4-1 2"></path></svg>"#;
const LUCIDE_LIST: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="1em" height="1em" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><line x1="8" y1="6" x2="21" y2="6"></line><line x1="8" y1="12" x2="21" y2="12"></line><line x1="8" y1="18" x2="21" y2="18"></line><line x1="3" y1="6" x2="3.01" y2="6"></line><line x1="3" y1="12" x2="3.01" y2="12"></line><line x1="3" y1="18" x2="3.01" y2="18"></line></svg>"#;
const LUCIDE_QUOTE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="1em" height="1em" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><path d="M3 21c3 0 7-1 7-8V5c0-1.25-.756-2.017-2-2H4c-1.25 0-2 .75-2 1.972V11c0 1.25.75 2 2 2 1 0 1 0 1 1v1c0 1-1 2-2 2s-1 .008-1 1.031V20c0 1 0 1 1 1z"></path><path d="M15 21c3 0 7-1 7-8V5c0-1.25-.757-2.017-2-2h-4c-1.25 0-2 .75-2 1.972V11c0 1.25.75 2 2 2h.75c0 2.25.25 4-2.75 4v3c0 1 0 1 1 1z"></path></svg>"#;

const BLUE: (&str, &str) = ("rgb(8, 109, 221)", "rgb(2, 122, 255)");
const TEAL: (&str, &str) = ("rgb(0, 191, 188)", "rgb(83, 223, 221)");
const ORANGE: (&str, &str) = ("rgb(236, 117, 0)", "rgb(233, 151, 63)");
const GREEN: (&str, &str) = ("rgb(8, 185, 78)", "rgb(68, 207, 110)");
const RED: (&str, &str) = ("rgb(233, 49, 71)", "rgb(251, 70, 76)");
const PURPLE: (&str, &str) = ("rgb(120, 82, 238)", "rgb(168, 130, 255)");
const GRAY: &str = "rgb(158, 158, 158)";

fn obsidian_callouts() -> CalloutTable {
    let groups: &[(&[&str], &str, (&str, &str))] = &[
        (&["note"], LUCIDE_PENCIL, BLUE),
        (&["abstract", "summary", "tldr"], LUCIDE_CLIPBOARD, TEAL),
        (&["info"], LUCIDE_INFO, BLUE),
        (&["todo"], LUCIDE_CHECK_CIRCLE, BLUE),
        (&["tip", "hint", "important"], LUCIDE_FLAME, TEAL),
        (&["success", "check", "done"], LUCIDE_CHECK, GREEN),
        (&["question", "help", "faq"], LUCIDE_HELP, ORANGE),
        (&["warning", "attention", "caution"], LUCIDE_TRIANGLE, ORANGE),
        (&["failure", "missing", "fail"], LUCIDE_X, RED),
        (&["danger", "error"], LUCIDE_ZAP, RED),
        (&["bug"], LUCIDE_BUG, RED),
        (&["example"], LUCIDE_LIST, PURPLE),
    ];

    let mut table = CalloutTable::new();
    for (kinds, indicator, (light, dark)) in groups {
        for kind in *kinds {
            let title = crate::tree::capitalize(kind);
            table.insert(kind.to_string(), entry(&title, Some(*indicator), pair(light, dark)));
        }
    }
    for kind in ["quote", "cite"] {
        let title = crate::tree::capitalize(kind);
        let color = Some(CalloutColor::Single(GRAY.to_string()));
        table.insert(kind.to_string(), entry(&title, Some(LUCIDE_QUOTE), color));
    }
    table
}

// VitePress custom containers: plain uppercase titles, no icons.

fn vitepress_callouts() -> CalloutTable {
    [
        "info",
        "note",
        "tip",
        "important",
        "warning",
        "danger",
        "caution",
        "details",
    ]
    .into_iter()
    .map(|kind| (kind.to_string(), entry(&kind.to_uppercase(), None, None)))
    .collect()
}
