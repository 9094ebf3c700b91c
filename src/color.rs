//! Deterministic badge colors
//!
//! Every keyword gets a stable color: a hash of its UTF-8 bytes picks a
//! hue, and fixed saturation/lightness tables keep the palette readable.
//! The label variant can override individual keywords from configuration,
//! falling back to the hash color for everything else.

use crate::config::ColorOverrides;
use sha2::{Digest, Sha256};
use std::fmt;

/// Saturation options the hash selects from
const SATURATION: [f64; 3] = [0.35, 0.5, 0.65];

/// Lightness options the hash selects from
const LIGHTNESS: [f64; 3] = [0.35, 0.5, 0.65];

/// Font color used when an override entry doesn't specify one
pub const DEFAULT_FONT_COLOR: &str = "white";

/// An RGB color value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Format as a CSS hex color, e.g. `#3b82f6`
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hex())
    }
}

/// Background and optional font color for one badge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeColor {
    pub background: String,
    pub font: Option<String>,
}

/// Maps a keyword to its display color
pub trait ColorPolicy {
    fn color_of(&self, keyword: &str) -> BadgeColor;
}

/// Pure hash-derived coloring (the "badges" variant)
///
/// No configuration dependency; the stylesheet supplies the font color.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashPolicy;

impl ColorPolicy for HashPolicy {
    fn color_of(&self, keyword: &str) -> BadgeColor {
        BadgeColor {
            background: hash_color(keyword).hex(),
            font: None,
        }
    }
}

/// Configuration-backed coloring (the "labels" variant)
///
/// Looks up the lowercased keyword in the override table; absent entries
/// fall back to the hash color with a white font.
#[derive(Debug, Clone, Default)]
pub struct OverridePolicy {
    overrides: ColorOverrides,
}

impl OverridePolicy {
    pub fn new(overrides: ColorOverrides) -> Self {
        Self { overrides }
    }
}

impl ColorPolicy for OverridePolicy {
    fn color_of(&self, keyword: &str) -> BadgeColor {
        match self.overrides.get(keyword) {
            Some(entry) => BadgeColor {
                background: entry.background().to_string(),
                font: Some(
                    entry
                        .font()
                        .unwrap_or(DEFAULT_FONT_COLOR)
                        .to_string(),
                ),
            },
            None => BadgeColor {
                background: hash_color(keyword).hex(),
                font: Some(DEFAULT_FONT_COLOR.to_string()),
            },
        }
    }
}

/// Stable 64-bit hash of a keyword (SHA-256 truncated)
fn keyword_hash(keyword: &str) -> u64 {
    let digest = Sha256::digest(keyword.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

/// Derive a stable, visually distinct color from keyword text
///
/// Hue comes from the hash modulo 359; the remaining hash bits select
/// saturation and lightness from small fixed tables so nearby hues still
/// read as distinct badges.
pub fn hash_color(keyword: &str) -> Rgb {
    let mut hash = keyword_hash(keyword);
    let hue = (hash % 359) as f64;
    hash /= 360;
    let saturation = SATURATION[(hash % SATURATION.len() as u64) as usize];
    hash /= SATURATION.len() as u64;
    let lightness = LIGHTNESS[(hash % LIGHTNESS.len() as u64) as usize];
    hsl_to_rgb(hue, saturation, lightness)
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgb {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = h / 60.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r1, g1, b1) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    Rgb {
        r: ((r1 + m) * 255.0).round() as u8,
        g: ((g1 + m) * 255.0).round() as u8,
        b: ((b1 + m) * 255.0).round() as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PluginConfig;

    #[test]
    fn test_hex_format() {
        let color = Rgb { r: 59, g: 130, b: 246 };
        assert_eq!(color.hex(), "#3b82f6");
        assert_eq!(format!("{}", color), "#3b82f6");
    }

    #[test]
    fn test_hash_color_is_deterministic() {
        assert_eq!(hash_color("bug"), hash_color("bug"));
        assert_eq!(hash_color("ui-fix"), hash_color("ui-fix"));
    }

    #[test]
    fn test_hash_color_distinguishes_keywords() {
        assert_ne!(hash_color("bug"), hash_color("urgent"));
    }

    #[test]
    fn test_hash_color_is_case_sensitive() {
        // The hash policy colors the raw token; only overrides normalize case
        assert_ne!(hash_color("Bug"), hash_color("bug"));
    }

    #[test]
    fn test_hash_policy_has_no_font_override() {
        let color = HashPolicy.color_of("bug");
        assert_eq!(color.background, hash_color("bug").hex());
        assert!(color.font.is_none());
    }

    #[test]
    fn test_hsl_to_rgb_extremes() {
        assert_eq!(hsl_to_rgb(0.0, 0.0, 0.0), Rgb { r: 0, g: 0, b: 0 });
        assert_eq!(
            hsl_to_rgb(0.0, 0.0, 1.0),
            Rgb { r: 255, g: 255, b: 255 }
        );
        // Pure red
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), Rgb { r: 255, g: 0, b: 0 });
    }

    #[test]
    fn test_override_policy_uses_configured_color() {
        let config = PluginConfig::from_toml(
            r##"
[colors]
bug = { background = "#d73a4a", font = "#ffffff" }
docs = "#0075ca"
"##,
        )
        .unwrap();
        let policy = OverridePolicy::new(config.colors);

        let bug = policy.color_of("bug");
        assert_eq!(bug.background, "#d73a4a");
        assert_eq!(bug.font.as_deref(), Some("#ffffff"));

        // Bare hex entries default the font to white
        let docs = policy.color_of("docs");
        assert_eq!(docs.background, "#0075ca");
        assert_eq!(docs.font.as_deref(), Some("white"));
    }

    #[test]
    fn test_override_policy_lookup_is_lowercased() {
        let config = PluginConfig::from_toml("[colors]\nbug = \"#d73a4a\"\n").unwrap();
        let policy = OverridePolicy::new(config.colors);
        assert_eq!(policy.color_of("BUG").background, "#d73a4a");
        assert_eq!(policy.color_of("Bug").background, "#d73a4a");
    }

    #[test]
    fn test_override_policy_falls_back_to_hash() {
        let policy = OverridePolicy::default();
        let color = policy.color_of("urgent");
        assert_eq!(color.background, hash_color("urgent").hex());
        assert_eq!(color.font.as_deref(), Some("white"));
    }
}
