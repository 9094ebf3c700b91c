//! Request/response page filter
//!
//! Intercepts three page contexts and rewrites the keywords field into
//! badges: the single ticket view/edit form, tabular query results, and
//! grouped report results. Everything else passes through unchanged.
//!
//! The filter is stateless across requests: configuration, ticket store,
//! and the query capability flag are injected per invocation.

use crate::color::ColorPolicy;
use crate::config::PluginConfig;
use crate::document::{CellPatch, Document, Locator, Result};
use crate::render::{render, to_html, LinkTemplate};
use crate::store::{Ticket, TicketId, TicketStore};

/// The two plugin variants, differing in CSS class stem and stylesheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Hash-colored badges
    Badges,
    /// Configuration-colored labels
    Labels,
}

impl Variant {
    pub fn class_stem(self) -> &'static str {
        match self {
            Variant::Badges => "keyword-badge",
            Variant::Labels => "keyword-label",
        }
    }

    /// Stylesheet href registered on every filtered response
    pub fn stylesheet(self) -> &'static str {
        match self {
            Variant::Badges => "keyword_badges/css/keyword_badges.css",
            Variant::Labels => "keyword_labels/css/keyword_labels.css",
        }
    }

    /// Embedded stylesheet body (the static-asset provider surface)
    pub fn stylesheet_source(self) -> &'static str {
        match self {
            Variant::Badges => include_str!("../assets/keyword_badges.css"),
            Variant::Labels => include_str!("../assets/keyword_labels.css"),
        }
    }

    fn class_for(self, context: &str) -> String {
        format!("{} {}", self.class_stem(), context)
    }
}

/// The slice of the host request this filter needs
#[derive(Debug, Clone)]
pub struct Request {
    pub path: String,
}

impl Request {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// A field descriptor from the ticket view payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub rendered: Option<String>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rendered: None,
        }
    }
}

/// One row of a query listing; carries at least the ticket id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Row {
    pub id: TicketId,
}

/// One report group: a group key and its rows, in delivered order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowGroup {
    pub key: String,
    pub rows: Vec<Row>,
}

/// Response payload handed over by the host alongside the markup stream
#[derive(Debug, Clone, Default)]
pub struct PageData {
    pub ticket: Option<Ticket>,
    pub fields: Vec<FieldDescriptor>,
    pub tickets: Option<Vec<Row>>,
    pub row_groups: Option<Vec<RowGroup>>,
}

/// Rewrites keyword fields into badges across the three page contexts
pub struct PageFilter<'a> {
    link: LinkTemplate,
    colors: &'a dyn ColorPolicy,
    store: &'a dyn TicketStore,
    variant: Variant,
    /// Badges link into the query subsystem; with it disabled in the
    /// host, nothing is rewritten.
    query_enabled: bool,
}

impl<'a> PageFilter<'a> {
    pub fn new(
        config: &PluginConfig,
        colors: &'a dyn ColorPolicy,
        store: &'a dyn TicketStore,
        variant: Variant,
        query_enabled: bool,
    ) -> Self {
        Self {
            link: config.link_template(),
            colors,
            store,
            variant,
            query_enabled,
        }
    }

    /// Ticket view/edit context: replace the rendered keywords field
    ///
    /// Applies on `/ticket/*` and `/newticket` when the payload carries a
    /// ticket and a `keywords` field descriptor. Non-text (redacted or
    /// absent) values leave the field untouched.
    pub fn post_process(&self, request: &Request, data: &mut PageData) {
        let path = &request.path;
        if !(path.starts_with("/ticket/") || path.starts_with("/newticket")) {
            return;
        }
        if !self.query_enabled {
            return;
        }
        let keywords = match &data.ticket {
            Some(ticket) => ticket.keywords.clone(),
            None => return,
        };

        let class = self.variant.class_for("ticket");
        for field in &mut data.fields {
            if field.name == "keywords" {
                if let Some(tokens) =
                    render(&keywords, &self.link, &class, self.colors).badges()
                {
                    field.rendered = Some(to_html(tokens));
                }
                break;
            }
        }
    }

    /// Query/report context: patch listing summary cells with badges
    ///
    /// Always registers the variant stylesheet, whether or not any row was
    /// patched.
    pub fn filter_stream(
        &self,
        request: &Request,
        data: &PageData,
        document: &mut Document,
    ) -> Result<()> {
        let outcome = self.patch_listing(request, data, document);
        document.add_stylesheet(self.variant.stylesheet());
        outcome
    }

    fn patch_listing(
        &self,
        request: &Request,
        data: &PageData,
        document: &mut Document,
    ) -> Result<()> {
        let path = &request.path;
        if !(path.starts_with("/query") || path.starts_with("/report")) {
            return Ok(());
        }
        if !self.query_enabled {
            return Ok(());
        }

        // Rows flatten into a single ordered stream; report groups keep
        // their delivered group-then-row order.
        let (ids, context): (Vec<TicketId>, &str) = if let Some(rows) = &data.tickets {
            (rows.iter().map(|row| row.id).collect(), "query")
        } else if let Some(groups) = &data.row_groups {
            (
                groups
                    .iter()
                    .flat_map(|group| group.rows.iter().map(|row| row.id))
                    .collect(),
                "report",
            )
        } else {
            return Ok(());
        };

        let class = self.variant.class_for(context);
        let patches: Vec<CellPatch> = ids
            .into_iter()
            .map(|id| self.plan_row_patch(id, &class))
            .collect();

        document.apply_cell_patches(&Locator::ticket_listing(), patches)
    }

    /// One patch per listed row; unresolvable tickets keep their cell
    fn plan_row_patch(&self, id: TicketId, class: &str) -> CellPatch {
        let ticket = match self.store.ticket(id) {
            Some(ticket) => ticket,
            None => return CellPatch::Keep,
        };
        match render(&ticket.keywords, &self.link, class, self.colors).badges() {
            Some(tokens) => CellPatch::Append(format!("<span> </span>{}", to_html(tokens))),
            None => CellPatch::Keep,
        }
    }
}
