//! Keyword splitting and badge rendering
//!
//! Turns a raw `keywords` field into a sequence of clickable badge tokens,
//! one per keyword, each linking to a filtered ticket query.

use crate::color::{BadgeColor, ColorPolicy};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;

lazy_static! {
    /// A keyword list splits on runs of `;`, `,`, or whitespace
    static ref SEPARATORS: Regex = Regex::new(r"[;,\s]+").unwrap();
}

/// A field value as delivered by the host
///
/// The host's privacy layer may obfuscate a field; such values must not be
/// split into badges and pass through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Redacted(String),
    Absent,
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// The plain text content, if this value may be split into badges
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Base query merged into every badge href
///
/// Built once from the `ticketlink_query` option; each badge adds a
/// `keywords=~<word>` filter (prefix-match) on top of the base parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTemplate {
    query_path: String,
    base: BTreeMap<String, String>,
}

impl LinkTemplate {
    pub fn new(query_path: impl Into<String>, base: BTreeMap<String, String>) -> Self {
        Self {
            query_path: query_path.into(),
            base,
        }
    }

    /// Href for a query filtered to tickets whose keywords contain `keyword`
    pub fn keyword_href(&self, keyword: &str) -> String {
        let mut args = self.base.clone();
        args.insert("keywords".to_string(), format!("~{}", keyword));
        let query = serde_urlencoded::to_string(&args).unwrap_or_default();
        format!("{}?{}", self.query_path, query)
    }
}

impl Default for LinkTemplate {
    fn default() -> Self {
        Self::new("/query", BTreeMap::new())
    }
}

/// One styled, clickable keyword rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBadge {
    pub text: String,
    pub href: String,
    pub css_class: String,
    pub color: BadgeColor,
}

/// Output token: a badge, or the whitespace between badges
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BadgeToken {
    Badge(RenderedBadge),
    Space,
}

/// Renderer output
///
/// `Unchanged` is the escape hatch for absent or redacted values: the
/// caller must leave the original rendering untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Badges(Vec<BadgeToken>),
    Unchanged,
}

impl Rendered {
    /// Badge tokens, if any were produced
    pub fn badges(&self) -> Option<&[BadgeToken]> {
        match self {
            Rendered::Badges(tokens) if !tokens.is_empty() => Some(tokens),
            _ => None,
        }
    }
}

/// Split a raw keywords field and render one badge per keyword
///
/// Empty tokens from leading, trailing, or repeated separators are
/// skipped; each separator run becomes a single whitespace token so the
/// badge row keeps the original spacing rhythm.
pub fn render(
    raw: &FieldValue,
    link: &LinkTemplate,
    css_class: &str,
    colors: &dyn ColorPolicy,
) -> Rendered {
    let text = match raw.as_text() {
        Some(text) => text,
        None => return Rendered::Unchanged,
    };

    let mut tokens = Vec::new();
    let mut cursor = 0;
    for separator in SEPARATORS.find_iter(text) {
        let word = &text[cursor..separator.start()];
        if !word.is_empty() {
            tokens.push(BadgeToken::Badge(badge(word, link, css_class, colors)));
        }
        tokens.push(BadgeToken::Space);
        cursor = separator.end();
    }
    let tail = &text[cursor..];
    if !tail.is_empty() {
        tokens.push(BadgeToken::Badge(badge(tail, link, css_class, colors)));
    }

    Rendered::Badges(tokens)
}

fn badge(
    word: &str,
    link: &LinkTemplate,
    css_class: &str,
    colors: &dyn ColorPolicy,
) -> RenderedBadge {
    RenderedBadge {
        text: word.to_string(),
        href: link.keyword_href(word),
        css_class: css_class.to_string(),
        color: colors.color_of(word),
    }
}

/// Emit a badge token sequence as HTML anchor markup
pub fn to_html(tokens: &[BadgeToken]) -> String {
    let mut html = String::new();
    for token in tokens {
        match token {
            BadgeToken::Space => html.push(' '),
            BadgeToken::Badge(b) => {
                let style = match &b.color.font {
                    Some(font) => format!(
                        "background-color: {}; color: {}",
                        b.color.background, font
                    ),
                    None => format!("background-color: {}", b.color.background),
                };
                html.push_str(&format!(
                    r#"<a href="{}" class="{}" style="{}">{}</a>"#,
                    html_escape(&b.href),
                    html_escape(&b.css_class),
                    html_escape(&style),
                    html_escape(&b.text),
                ));
            }
        }
    }
    html
}

/// Escape HTML special characters
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
