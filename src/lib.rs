//! Keyword badges - colored, clickable keywords for ticket pages
//!
//! Rewrites a ticket's free-text `keywords` field into badges, one per
//! keyword, each linking to a filtered ticket query. Works across three
//! page contexts: the single ticket view/edit form, tabular query
//! results, and grouped report results.
//!
//! # Variants
//!
//! | Variant | Color source |
//! |---------|--------------|
//! | `Badges` | deterministic hash of the keyword text |
//! | `Labels` | per-keyword configuration overrides, hash fallback |
//!
//! Both share one renderer; only the [`color::ColorPolicy`] and CSS class
//! stem differ.
//!
//! # Quick Start
//!
//! ```
//! use keyword_badges::color::HashPolicy;
//! use keyword_badges::config::PluginConfig;
//! use keyword_badges::render::{render, to_html, FieldValue};
//!
//! let link = PluginConfig::default().link_template();
//! let raw = FieldValue::text("bug, ui-fix");
//!
//! let rendered = render(&raw, &link, "keyword-badge ticket", &HashPolicy);
//! let html = to_html(rendered.badges().unwrap());
//! assert_eq!(html.matches("<a ").count(), 2);
//! assert!(html.contains("keywords=%7Ebug"));
//! ```
//!
//! The host framework drives the other direction: hand each response's
//! payload and markup stream to a [`filter::PageFilter`] and it patches
//! keyword fields in place, skipping anything redacted, missing, or not
//! one of the supported contexts.

pub mod color;
pub mod config;
pub mod document;
pub mod filter;
pub mod render;
pub mod serve;
pub mod store;

pub use color::{hash_color, BadgeColor, ColorPolicy, HashPolicy, OverridePolicy, Rgb};
pub use config::{ColorOverrides, OverrideEntry, PluginConfig, DEFAULT_TICKETLINK_QUERY};
pub use document::{Cell, CellPatch, Document, Locator, Node, PatchError};
pub use filter::{FieldDescriptor, PageData, PageFilter, Request, Row, RowGroup, Variant};
pub use render::{render, to_html, BadgeToken, FieldValue, LinkTemplate, Rendered, RenderedBadge};
pub use store::{MemoryStore, Ticket, TicketId, TicketStore};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_exports() {
        // Verify core items are re-exported from the crate root
        let _ = DEFAULT_TICKETLINK_QUERY;
        let _ = Variant::Badges.class_stem();
    }
}
