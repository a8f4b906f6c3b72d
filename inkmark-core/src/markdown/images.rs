//! Image collection and rewriting.
//!
//! The collect pass records which `img` sources belong to the document
//! (relative paths, or remote URLs the policy allows). The rewrite pass, run
//! after user transforms, folds the properties of those images into a single
//! `data-image` JSON property so a later stage can swap in optimized markup.

use super::Transform;
use crate::models::DocumentData;
use crate::tree::{walk, Visit};
use inkmark_types::{Element, PropertyValue, Root};
use percent_encoding::percent_decode_str;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Property holding the serialized image properties after rewriting.
pub const IMAGE_PROPERTY: &str = "data-image";

static URL_RE: OnceLock<Regex> = OnceLock::new();

fn url_regex() -> &'static Regex {
    URL_RE.get_or_init(|| {
        Regex::new(
            r"^(?P<scheme>[A-Za-z][A-Za-z0-9+.\-]*):(?://(?:[^@/?#]*@)?(?P<host>\[[^\]]*\]|[^:/?#]*)(?::(?P<port>[0-9]*))?)?(?P<path>[^?#]*)",
        )
        .expect("valid regex")
    })
}

/// The parts of an absolute URL that remote patterns look at.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ParsedUrl {
    protocol: String,
    hostname: String,
    port: String,
    pathname: String,
}

fn parse_url(src: &str) -> Option<ParsedUrl> {
    let caps = url_regex().captures(src.trim())?;
    let protocol = caps["scheme"].to_ascii_lowercase();
    let hostname = caps
        .name("host")
        .map(|m| m.as_str().to_ascii_lowercase())
        .unwrap_or_default();
    let mut port = caps.name("port").map(|m| m.as_str()).unwrap_or("").to_string();
    if matches!((protocol.as_str(), port.as_str()), ("http", "80") | ("https", "443")) {
        port.clear();
    }
    let mut pathname = caps["path"].to_string();
    if pathname.is_empty() && !hostname.is_empty() {
        pathname.push('/');
    }
    Some(ParsedUrl {
        protocol,
        hostname,
        port,
        pathname,
    })
}

/// Percent-decode an image source, keeping it as-is when it is not UTF-8.
pub fn decode_src(src: &str) -> String {
    percent_decode_str(src)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| src.to_string())
}

/// One allowed shape of remote image URL.
///
/// `hostname` may start with `*.` (exactly one extra subdomain) or `**.`
/// (any depth); `pathname` may end with `/*` (one more segment) or `/**`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemotePattern {
    pub protocol: Option<String>,
    pub hostname: Option<String>,
    #[serde(deserialize_with = "port_string")]
    pub port: Option<String>,
    pub pathname: Option<String>,
}

fn port_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Port {
        Number(u16),
        Text(String),
    }

    Ok(Option::<Port>::deserialize(deserializer)?.map(|port| match port {
        Port::Number(n) => n.to_string(),
        Port::Text(s) => s,
    }))
}

fn match_hostname(url: &ParsedUrl, hostname: &str, allow_wildcard: bool) -> bool {
    if hostname.is_empty() {
        return true;
    }
    if !allow_wildcard || !hostname.starts_with('*') {
        return hostname.eq_ignore_ascii_case(&url.hostname);
    }
    if let Some(domain) = hostname.strip_prefix("**.") {
        let suffix = &hostname[2..];
        return url.hostname != domain && url.hostname.ends_with(suffix);
    }
    if hostname.starts_with("*.") {
        let suffix = &hostname[1..];
        return url.hostname.strip_suffix(suffix).is_some_and(|sub| {
            sub.split('.').filter(|part| !part.is_empty()).count() == 1
        });
    }
    // Any other wildcard shape is compared as written.
    hostname.eq_ignore_ascii_case(&url.hostname)
}

fn match_pathname(url: &ParsedUrl, pathname: &str) -> bool {
    if pathname.is_empty() {
        return true;
    }
    if let Some(prefix) = pathname.strip_suffix("**") {
        return url.pathname != prefix.trim_end_matches('/') && url.pathname.starts_with(prefix);
    }
    if let Some(prefix) = pathname.strip_suffix('*') {
        return url.pathname.strip_prefix(prefix).is_some_and(|rest| {
            rest.split('/').filter(|part| !part.is_empty()).count() == 1
        });
    }
    pathname == url.pathname
}

impl RemotePattern {
    fn matches(&self, url: &ParsedUrl) -> bool {
        let protocol_ok = self
            .protocol
            .as_deref()
            .map_or(true, |p| p.trim_end_matches(':').eq_ignore_ascii_case(&url.protocol));
        let port_ok = self.port.as_deref().map_or(true, |p| p.is_empty() || p == url.port);
        protocol_ok
            && port_ok
            && match_hostname(url, self.hostname.as_deref().unwrap_or(""), true)
            && match_pathname(url, self.pathname.as_deref().unwrap_or(""))
    }
}

/// Which remote images are treated like document images.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteImagePolicy {
    /// Exact hostnames.
    pub domains: Vec<String>,
    pub remote_patterns: Vec<RemotePattern>,
}

impl RemoteImagePolicy {
    /// Whether `src` is an absolute URL this policy allows.
    pub fn allows(&self, src: &str) -> bool {
        let Some(url) = parse_url(src) else {
            return false;
        };
        self.domains
            .iter()
            .any(|domain| match_hostname(&url, domain, false))
            || self.remote_patterns.iter().any(|pattern| pattern.matches(&url))
    }
}

/// Kind of image source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    /// Relative to the document.
    Local,
    /// Absolute URL allowed by the policy.
    Remote,
}

/// Classify a decoded source; `None` for root-relative paths and URLs the
/// policy does not allow.
pub fn classify_src(src: &str, policy: &RemoteImagePolicy) -> Option<ImageSource> {
    if parse_url(src).is_some() {
        policy.allows(src).then_some(ImageSource::Remote)
    } else if !src.starts_with('/') {
        Some(ImageSource::Local)
    } else {
        None
    }
}

/// Records document images into the render metadata.
#[derive(Debug, Clone, Default)]
pub struct ImageCollector {
    policy: RemoteImagePolicy,
}

impl ImageCollector {
    pub fn new(policy: RemoteImagePolicy) -> Self {
        Self { policy }
    }
}

impl Transform for ImageCollector {
    fn name(&self) -> &str {
        "collect-images"
    }

    fn transform(&self, root: &mut Root, data: &mut DocumentData) {
        walk(root, &mut |element: &mut Element| {
            if !element.is("img") {
                return Visit::Continue;
            }
            let Some(src) = element.properties.get_str("src").filter(|s| !s.is_empty()) else {
                return Visit::Skip;
            };
            let src = decode_src(src);
            match classify_src(&src, &self.policy) {
                Some(ImageSource::Local) => data.add_local_image(&src),
                Some(ImageSource::Remote) => data.add_remote_image(&src),
                None => {}
            }
            Visit::Skip
        });
    }
}

/// Folds the properties of collected images into [`IMAGE_PROPERTY`].
#[derive(Debug, Clone, Default)]
pub struct ImageRewriter;

impl ImageRewriter {
    pub fn new() -> Self {
        Self
    }
}

fn property_json(value: &PropertyValue) -> Value {
    match value {
        PropertyValue::Bool(b) => Value::Bool(*b),
        PropertyValue::String(s) => Value::String(s.clone()),
        PropertyValue::List(items) => {
            Value::Array(items.iter().cloned().map(Value::String).collect())
        }
    }
}

impl Transform for ImageRewriter {
    fn name(&self) -> &str {
        "images"
    }

    fn transform(&self, root: &mut Root, data: &mut DocumentData) {
        let metadata = &data.metadata;
        let mut occurrences: HashMap<String, u64> = HashMap::new();

        walk(root, &mut |element: &mut Element| {
            if !element.is("img") {
                return Visit::Continue;
            }
            let Some(src) = element.properties.get_str("src") else {
                return Visit::Skip;
            };
            let src = decode_src(src);
            let remote = metadata.remote_image_paths.contains(&src);
            if !remote && !metadata.local_image_paths.contains(&src) {
                element.properties.set("src", src);
                return Visit::Skip;
            }

            let counter = occurrences.entry(src.clone()).or_insert(0);
            let index = *counter;
            *counter += 1;

            let mut props: Map<String, Value> = element
                .properties
                .iter()
                .map(|(name, value)| (name.to_string(), property_json(value)))
                .collect();
            props.insert("src".into(), Value::String(src));
            props.insert("index".into(), Value::from(index));
            if remote
                && !(element.properties.contains("width") && element.properties.contains("height"))
            {
                props.insert("inferSize".into(), Value::Bool(true));
            }

            element.properties = [(IMAGE_PROPERTY.to_string(), Value::Object(props).to_string())]
                .into_iter()
                .collect();
            Visit::Skip
        });
    }
}
