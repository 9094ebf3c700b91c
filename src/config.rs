//! Plugin configuration
//!
//! A read-only snapshot loaded from TOML and passed into the filter per
//! request. Carries the base query for badge links and, for the labels
//! variant, per-keyword color overrides.

use crate::render::LinkTemplate;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Default base query: link badges to open tickets
pub const DEFAULT_TICKETLINK_QUERY: &str = "?status=!closed";

/// One configured color override
///
/// Accepts either a bare hex string or a `{ background, font }` table:
///
/// ```toml
/// [colors]
/// docs = "#0075ca"
/// bug = { background = "#d73a4a", font = "#ffffff" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OverrideEntry {
    Hex(String),
    Full {
        background: String,
        #[serde(default)]
        font: Option<String>,
    },
}

impl OverrideEntry {
    pub fn background(&self) -> &str {
        match self {
            OverrideEntry::Hex(hex) => hex,
            OverrideEntry::Full { background, .. } => background,
        }
    }

    pub fn font(&self) -> Option<&str> {
        match self {
            OverrideEntry::Hex(_) => None,
            OverrideEntry::Full { font, .. } => font.as_deref(),
        }
    }
}

/// Per-keyword color overrides, keyed by lowercased keyword
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ColorOverrides(BTreeMap<String, OverrideEntry>);

impl ColorOverrides {
    pub fn get(&self, keyword: &str) -> Option<&OverrideEntry> {
        self.0.get(&keyword.to_lowercase())
    }

    pub fn insert(&mut self, keyword: &str, entry: OverrideEntry) {
        self.0.insert(keyword.to_lowercase(), entry);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn normalized(self) -> Self {
        Self(
            self.0
                .into_iter()
                .map(|(key, entry)| (key.to_lowercase(), entry))
                .collect(),
        )
    }
}

/// Configuration snapshot for one filter invocation
#[derive(Debug, Clone, Deserialize)]
pub struct PluginConfig {
    /// Base query merged into every badge link
    #[serde(default = "default_ticketlink_query")]
    pub ticketlink_query: String,

    /// Label color overrides (labels variant only)
    #[serde(default)]
    pub colors: ColorOverrides,
}

fn default_ticketlink_query() -> String {
    DEFAULT_TICKETLINK_QUERY.to_string()
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            ticketlink_query: default_ticketlink_query(),
            colors: ColorOverrides::default(),
        }
    }
}

impl PluginConfig {
    /// Parse a configuration snapshot from TOML
    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        let mut config: PluginConfig = toml::from_str(contents)?;
        config.colors = config.colors.normalized();
        Ok(config)
    }

    /// Load from a TOML file, falling back to defaults if the file is
    /// missing or unreadable
    pub fn load(path: &Path) -> Self {
        if let Ok(contents) = std::fs::read_to_string(path) {
            if let Ok(config) = Self::from_toml(&contents) {
                return config;
            }
        }
        Self::default()
    }

    /// Parse the `ticketlink_query` option into a link template
    ///
    /// A leading `?` is tolerated, matching how hosts store the option.
    pub fn link_template(&self) -> LinkTemplate {
        let raw = self.ticketlink_query.trim_start_matches('?');
        let base: Vec<(String, String)> = serde_urlencoded::from_str(raw).unwrap_or_default();
        LinkTemplate::new("/query", base.into_iter().collect())
    }
}
