//! Markup stream model
//!
//! The host hands each response over as an ordered node stream. Rewrites
//! are planned up front (one patch per listing row, in row order) and
//! applied in a single pass over the cells a locator matches, so a skipped
//! row can never shift badges onto the wrong ticket.

use std::fmt;

/// Structural location expression: cells of a class under a table class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    pub table_class: String,
    pub cell_class: String,
}

impl Locator {
    /// The summary cell of the standard ticket listing table
    pub fn ticket_listing() -> Self {
        Self {
            table_class: "listing tickets".to_string(),
            cell_class: "summary".to_string(),
        }
    }

    fn matches(&self, cell: &Cell) -> bool {
        cell.table_class == self.table_class && cell.cell_class == self.cell_class
    }
}

/// A table cell node in the stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub table_class: String,
    pub cell_class: String,
    pub html: String,
}

/// One node of the response markup stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Cell(Cell),
}

impl Node {
    pub fn text(html: impl Into<String>) -> Self {
        Node::Text(html.into())
    }

    /// A summary cell under the ticket listing table
    pub fn summary_cell(html: impl Into<String>) -> Self {
        Node::Cell(Cell {
            table_class: "listing tickets".to_string(),
            cell_class: "summary".to_string(),
            html: html.into(),
        })
    }
}

/// Planned rewrite for one matched cell, in match order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellPatch {
    /// Append markup to the cell content
    Append(String),
    /// Consume the match but leave the cell unchanged
    Keep,
}

/// Error type for patching a document
#[derive(Debug)]
pub enum PatchError {
    /// The patch plan and the matched cells disagree in count
    RowCountMismatch { planned: usize, matched: usize },
}

impl fmt::Display for PatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchError::RowCountMismatch { planned, matched } => write!(
                f,
                "planned {} row patches but the document has {} matching cells",
                planned, matched
            ),
        }
    }
}

impl std::error::Error for PatchError {}

pub type Result<T> = std::result::Result<T, PatchError>;

/// An outgoing response: ordered markup nodes plus attached stylesheets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub nodes: Vec<Node>,
    stylesheets: Vec<String>,
}

impl Document {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self {
            nodes,
            stylesheets: Vec::new(),
        }
    }

    /// Stylesheets attached to this response, in attach order
    pub fn stylesheets(&self) -> &[String] {
        &self.stylesheets
    }

    /// Attach a stylesheet reference; repeated hrefs are ignored
    pub fn add_stylesheet(&mut self, href: &str) {
        if !self.stylesheets.iter().any(|s| s == href) {
            self.stylesheets.push(href.to_string());
        }
    }

    /// Apply `patches` to the cells matched by `locator`, in document order
    ///
    /// Each patch consumes exactly one matched cell. A count mismatch means
    /// the plan was built against a different table structure; nothing is
    /// modified in that case.
    pub fn apply_cell_patches(
        &mut self,
        locator: &Locator,
        patches: Vec<CellPatch>,
    ) -> Result<()> {
        let matched: Vec<usize> = self
            .nodes
            .iter()
            .enumerate()
            .filter_map(|(i, node)| match node {
                Node::Cell(cell) if locator.matches(cell) => Some(i),
                _ => None,
            })
            .collect();

        if matched.len() != patches.len() {
            return Err(PatchError::RowCountMismatch {
                planned: patches.len(),
                matched: matched.len(),
            });
        }

        for (index, patch) in matched.into_iter().zip(patches) {
            if let CellPatch::Append(html) = patch {
                if let Node::Cell(cell) = &mut self.nodes[index] {
                    cell.html.push_str(&html);
                }
            }
        }
        Ok(())
    }
}
