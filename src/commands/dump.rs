use std::io::Write;
use std::path::PathBuf;

use super::ERROR_MARKER;
use crate::api::DocumentSource;
use crate::config::Config;
use crate::error::InspectResult;
use crate::report::listing::{NO_DOCUMENTS, RULE_WIDTH, rule};
use crate::report::persist::response_file_name;
use crate::report::{
    ListingEntry, RenderOptions, locate_response, persist, render_listing, render_response,
};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DumpOutcome {
    pub documents: usize,
    pub with_response: usize,
    pub saved: Vec<PathBuf>,
    pub errors: usize,
}

#[tracing::instrument(name = "command dump", skip_all)]
pub async fn run<W: Write>(
    source: &dyn DocumentSource,
    config: &Config,
    out: &mut W,
) -> InspectResult<DumpOutcome> {
    let documents = match source.list_documents().await {
        Ok(documents) => documents,
        Err(err) => {
            tracing::warn!(error = %err, "Could not fetch documents");
            writeln!(out, "{ERROR_MARKER} Error fetching documents: {err}")?;
            return Ok(DumpOutcome::default());
        }
    };

    if documents.is_empty() {
        writeln!(out, "{NO_DOCUMENTS}")?;
        return Ok(DumpOutcome::default());
    }

    let mut outcome = DumpOutcome {
        documents: documents.len(),
        ..Default::default()
    };
    let mut entries = Vec::with_capacity(documents.len());

    for doc in &documents {
        let mut entry = ListingEntry {
            doc,
            has_response: false,
            detail: String::new(),
        };

        let response = match locate_response(source, doc).await {
            Ok(response) => response,
            Err(err) => {
                outcome.errors += 1;
                tracing::warn!(document.id = %doc.id, error = %err, "Could not fetch Grok response");
                entry.detail = format!("   {ERROR_MARKER} Error accessing Grok response: {err}\n");
                entries.push(entry);
                continue;
            }
        };

        entry.detail = render_response(doc, response.as_ref(), &RenderOptions::DUMP);
        if let Some(response) = response {
            entry.has_response = true;
            if !response.content().is_empty() {
                let path = config.output_path(&response_file_name(&doc.id));
                match persist(&response, &path) {
                    Ok(()) => {
                        entry.detail.push_str(&format!("   Saved to: {}\n", path.display()));
                        outcome.saved.push(path);
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "Could not save response");
                        entry.detail.push_str(&format!("   {ERROR_MARKER} {err}\n"));
                    }
                }
            }
        }
        entries.push(entry);
    }

    let listing = render_listing(&entries);
    outcome.with_response = listing.with_response;
    write!(out, "{}", listing.text)?;

    writeln!(out, "\n{}", rule(RULE_WIDTH))?;
    writeln!(
        out,
        "SUMMARY: {} document(s) with full Grok responses available",
        outcome.with_response
    )?;

    if outcome.with_response > 0 {
        writeln!(out, "\nYou can now:")?;
        writeln!(out, "1. Read the JSON files saved above for complete responses")?;
        writeln!(out, "2. Run this tool again anytime to check all documents")?;
        writeln!(out, "3. Access raw response content for analysis")?;
    } else {
        writeln!(out, "\nNo Grok responses found. Upload and process documents first.")?;
    }

    Ok(outcome)
}
