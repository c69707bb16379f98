use std::io::Write;

use super::ERROR_MARKER;
use crate::api::DocumentSource;
use crate::error::InspectResult;
use crate::report::{RenderOptions, locate_response, render_response};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SummaryOutcome {
    pub documents: usize,
    pub with_response: usize,
    pub errors: usize,
}

#[tracing::instrument(name = "command summary", skip_all)]
pub async fn run<W: Write>(
    source: &dyn DocumentSource,
    out: &mut W,
) -> InspectResult<SummaryOutcome> {
    let documents = match source.list_documents().await {
        Ok(documents) => documents,
        Err(err) => {
            tracing::warn!(error = %err, "Could not fetch documents");
            writeln!(out, "{ERROR_MARKER} Error fetching documents: {err}")?;
            return Ok(SummaryOutcome::default());
        }
    };

    if documents.is_empty() {
        writeln!(out, "No documents found. Upload a PDF first.")?;
        return Ok(SummaryOutcome::default());
    }

    let mut outcome = SummaryOutcome {
        documents: documents.len(),
        ..Default::default()
    };
    writeln!(out, "Found {} document(s)", documents.len())?;

    for doc in &documents {
        writeln!(out, "\n📄 Document: {}", doc.display_name())?;
        writeln!(out, "   Status: {}", doc.status)?;

        match locate_response(source, doc).await {
            Ok(response) => {
                if response.is_some() {
                    outcome.with_response += 1;
                }
                write!(
                    out,
                    "{}",
                    render_response(doc, response.as_ref(), &RenderOptions::SUMMARY)
                )?;
            }
            Err(err) => {
                outcome.errors += 1;
                tracing::warn!(document.id = %doc.id, error = %err, "Could not fetch Grok response");
                writeln!(out, "   {ERROR_MARKER} Error accessing Grok response: {err}")?;
            }
        }
    }

    Ok(outcome)
}
