use crate::api::DocumentSummary;

use super::format::format_uploaded_at;

pub const NO_DOCUMENTS: &str = "No documents found.";
pub const RULE_WIDTH: usize = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentListing {
    pub text: String,
    pub entries: usize,
    pub with_response: usize,
}

#[derive(Debug, Clone)]
pub struct ListingEntry<'a> {
    pub doc: &'a DocumentSummary,
    pub has_response: bool,
    pub detail: String,
}

impl<'a> ListingEntry<'a> {
    pub fn embedded(doc: &'a DocumentSummary) -> Self {
        let has_response = doc.status.is_completed() && doc.embedded_response().is_some();
        Self {
            doc,
            has_response,
            detail: if has_response {
                "   ✅ Grok response embedded\n".to_string()
            } else {
                String::new()
            },
        }
    }
}

pub fn rule(width: usize) -> String {
    "=".repeat(width)
}

fn render_header(count: usize) -> String {
    format!("Found {count} document(s)\n{}\n", rule(RULE_WIDTH))
}

fn render_entry(index: usize, doc: &DocumentSummary) -> String {
    format!(
        "\n{index}. Document: {}\n   ID: {}\n   Status: {}\n   Uploaded: {}\n",
        doc.display_name(),
        doc.id,
        doc.status,
        format_uploaded_at(&doc.uploaded_at),
    )
}

#[tracing::instrument(
    name = "report listing",
    skip(entries),
    fields(
        report.documents = entries.len(),
        report.with_response,
    )
)]
pub fn render_listing(entries: &[ListingEntry<'_>]) -> DocumentListing {
    if entries.is_empty() {
        return DocumentListing {
            text: format!("{NO_DOCUMENTS}\n"),
            entries: 0,
            with_response: 0,
        };
    }

    let mut text = render_header(entries.len());
    let mut with_response = 0;

    for (i, entry) in entries.iter().enumerate() {
        text.push_str(&render_entry(i + 1, entry.doc));
        text.push_str(&entry.detail);
        if entry.has_response {
            with_response += 1;
        }
    }

    tracing::Span::current().record("report.with_response", with_response);

    DocumentListing {
        text,
        entries: entries.len(),
        with_response,
    }
}
