//! Preview server
//!
//! `keyword-badges serve` → renders sample ticket, query, and report
//! pages through the real filter so badge styling can be checked without
//! a host deployment. Demo harness only; the host framework serves the
//! real pages.

use crate::color::{ColorPolicy, HashPolicy, OverridePolicy};
use crate::config::PluginConfig;
use crate::document::{Document, Node};
use crate::filter::{FieldDescriptor, PageData, PageFilter, Request as PageRequest, Row, RowGroup, Variant};
use crate::render::FieldValue;
use crate::store::{MemoryStore, Ticket, TicketId};
use colored::Colorize;
use tiny_http::{Header, Method, Request, Response, Server};

/// Sample tickets shown on the preview pages
const SAMPLES: [(TicketId, &str, &str); 4] = [
    (11, "Crash when saving empty form", "bug, ui-fix  urgent"),
    (12, "Document the export endpoint", "docs"),
    (13, "Spike: evaluate cache backends", ""),
    (14, "Slow dashboard load", "perf, infra"),
];

/// Start the preview server
pub fn start(port: u16, variant: Variant, config: PluginConfig) -> std::io::Result<()> {
    let addr = format!("127.0.0.1:{}", port);
    let server = Server::http(&addr)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    eprintln!("\n{}", "🏷  keyword-badges preview".bold().green());
    eprintln!("   http://localhost:{}", port);
    eprintln!("   Press Ctrl+C to stop\n");

    let policy: Box<dyn ColorPolicy> = match variant {
        Variant::Badges => Box::new(HashPolicy),
        Variant::Labels => Box::new(OverridePolicy::new(config.colors.clone())),
    };
    let store = sample_store();

    for request in server.incoming_requests() {
        let filter = PageFilter::new(&config, policy.as_ref(), &store, variant, true);
        if let Err(e) = handle_request(request, &filter, variant) {
            eprintln!("Error: {}", e);
        }
    }

    Ok(())
}

fn sample_store() -> MemoryStore {
    let mut store = MemoryStore::new();
    for (id, _, keywords) in SAMPLES {
        store.add(id, keywords);
    }
    // A field the host's privacy layer obfuscated
    store.insert(Ticket::new(15, FieldValue::Redacted("…".to_string())));
    store
}

fn handle_request(
    request: Request,
    filter: &PageFilter<'_>,
    variant: Variant,
) -> std::io::Result<()> {
    let url = request.url().to_string();
    let path = url.split('?').next().unwrap_or("/");
    let method = request.method().clone();

    match (&method, path) {
        (&Method::Get, "/") => respond_html(request, index_page()),
        (&Method::Get, "/query") => respond_html(request, listing_page(filter, false)),
        (&Method::Get, "/report") => respond_html(request, listing_page(filter, true)),
        (&Method::Get, p) if p.starts_with("/ticket/") => {
            respond_html(request, ticket_page(filter))
        }
        (&Method::Get, p) if p == format!("/chrome/{}", variant.stylesheet()) => {
            let response = Response::from_string(variant.stylesheet_source())
                .with_header(Header::from_bytes(&b"Content-Type"[..], &b"text/css"[..]).unwrap());
            request.respond(response)
        }
        _ => {
            let response = Response::from_string("Not found").with_status_code(404);
            request.respond(response)
        }
    }
}

fn respond_html(request: Request, html: String) -> std::io::Result<()> {
    let response = Response::from_string(html)
        .with_header(Header::from_bytes(&b"Content-Type"[..], &b"text/html"[..]).unwrap());
    request.respond(response)
}

fn index_page() -> String {
    page(
        "keyword-badges preview",
        &[],
        r#"<ul>
<li><a href="/ticket/11">Single ticket view</a></li>
<li><a href="/query">Query results</a></li>
<li><a href="/report">Grouped report</a></li>
</ul>"#,
    )
}

/// Single ticket view: the keywords field rendered through post_process
fn ticket_page(filter: &PageFilter<'_>) -> String {
    let (id, summary, keywords) = SAMPLES[0];
    let mut data = PageData {
        ticket: Some(Ticket::new(id, FieldValue::text(keywords))),
        fields: vec![
            FieldDescriptor::new("summary"),
            FieldDescriptor::new("keywords"),
        ],
        ..PageData::default()
    };
    filter.post_process(&PageRequest::new(format!("/ticket/{}", id)), &mut data);

    let rendered = data
        .fields
        .iter()
        .find(|f| f.name == "keywords")
        .and_then(|f| f.rendered.clone())
        .unwrap_or_else(|| keywords.to_string());

    // The ticket view doesn't go through filter_stream, so attach the
    // stylesheet by hand for the preview.
    let stylesheets = [filter_stylesheet(filter)];
    page(
        &format!("#{}: {}", id, summary),
        &stylesheets,
        &format!(
            r#"<h1>#{} {}</h1>
<table class="properties">
<tr><th>Keywords</th><td>{}</td></tr>
</table>
<p><a href="/">Back</a></p>"#,
            id, summary, rendered
        ),
    )
}

/// Query or report listing patched through filter_stream
fn listing_page(filter: &PageFilter<'_>, grouped: bool) -> String {
    let rows: Vec<Row> = SAMPLES.iter().map(|(id, _, _)| Row { id: *id }).collect();
    let (path, data) = if grouped {
        let (first, rest) = rows.split_at(2);
        (
            "/report/1",
            PageData {
                row_groups: Some(vec![
                    RowGroup {
                        key: "milestone-1".to_string(),
                        rows: first.to_vec(),
                    },
                    RowGroup {
                        key: "milestone-2".to_string(),
                        rows: rest.to_vec(),
                    },
                ]),
                ..PageData::default()
            },
        )
    } else {
        (
            "/query",
            PageData {
                tickets: Some(rows),
                ..PageData::default()
            },
        )
    };

    let mut document = listing_document();
    let title = if grouped { "Report" } else { "Query results" };
    match filter.filter_stream(&PageRequest::new(path), &data, &mut document) {
        Ok(()) => {
            let stylesheets: Vec<String> = document.stylesheets().to_vec();
            page(title, &stylesheets, &document_to_html(&document))
        }
        Err(e) => page(title, &[], &format!("<p>Patch failed: {}</p>", e)),
    }
}

fn listing_document() -> Document {
    let mut nodes = vec![Node::text(
        "<table class=\"listing tickets\"><tbody>\n",
    )];
    for (id, summary, _) in SAMPLES {
        nodes.push(Node::text(format!(
            "<tr><td class=\"id\">#{}</td>",
            id
        )));
        nodes.push(Node::summary_cell(format!(
            "<a href=\"/ticket/{}\">{}</a>",
            id, summary
        )));
        nodes.push(Node::text("</tr>\n"));
    }
    nodes.push(Node::text("</tbody></table>"));
    Document::new(nodes)
}

/// Flatten a patched document back into markup
fn document_to_html(document: &Document) -> String {
    let mut html = String::new();
    for node in &document.nodes {
        match node {
            Node::Text(text) => html.push_str(text),
            Node::Cell(cell) => {
                html.push_str(&format!(
                    "<td class=\"{}\">{}</td>",
                    cell.cell_class, cell.html
                ));
            }
        }
    }
    html
}

fn filter_stylesheet(filter: &PageFilter<'_>) -> String {
    // Run an empty stream through the filter to pick up its stylesheet
    let mut document = Document::default();
    let _ = filter.filter_stream(&PageRequest::new("/"), &PageData::default(), &mut document);
    document
        .stylesheets()
        .first()
        .cloned()
        .unwrap_or_default()
}

fn page(title: &str, stylesheets: &[String], body: &str) -> String {
    let links: String = stylesheets
        .iter()
        .map(|href| format!("<link rel=\"stylesheet\" href=\"/chrome/{}\">\n", href))
        .collect();
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>{}</title>
{}<style>
body {{ font-family: sans-serif; margin: 2rem; color: #1d1d1f; }}
table.listing td, table.properties td, table.properties th {{ padding: 0.4rem 0.75rem; text-align: left; }}
table.listing tr:nth-child(odd) {{ background: #f5f5f7; }}
</style>
</head>
<body>
{}
</body>
</html>
"#,
        title, links, body
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preview_filter<'a>(
        store: &'a MemoryStore,
        config: &'a PluginConfig,
    ) -> PageFilter<'a> {
        PageFilter::new(config, &HashPolicy, store, Variant::Badges, true)
    }

    #[test]
    fn test_page_is_valid_html() {
        let html = page("t", &[], "<p>hi</p>");
        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("</html>"));
    }

    #[test]
    fn test_ticket_page_contains_badges() {
        let store = sample_store();
        let config = PluginConfig::default();
        let html = ticket_page(&preview_filter(&store, &config));
        assert!(html.contains("keyword-badge ticket"));
        assert!(html.contains(">bug</a>"));
    }

    #[test]
    fn test_query_page_patches_listing() {
        let store = sample_store();
        let config = PluginConfig::default();
        let html = listing_page(&preview_filter(&store, &config), false);
        assert!(html.contains("keyword-badge query"));
        assert!(html.contains("<link rel=\"stylesheet\""));
    }

    #[test]
    fn test_report_page_patches_listing() {
        let store = sample_store();
        let config = PluginConfig::default();
        let html = listing_page(&preview_filter(&store, &config), true);
        assert!(html.contains("keyword-badge report"));
    }
}
