use std::io::Write;
use std::path::PathBuf;

use super::ERROR_MARKER;
use crate::api::DocumentSource;
use crate::config::Config;
use crate::error::InspectResult;
use crate::report::listing::{NO_DOCUMENTS, rule};
use crate::report::persist::LATEST_RESPONSE_FILE;
use crate::report::{RenderOptions, locate_response, persist, render_response};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LatestOutcome {
    pub document_id: Option<String>,
    pub found: bool,
    pub saved: Option<PathBuf>,
}

#[tracing::instrument(name = "command latest", skip_all)]
pub async fn run<W: Write>(
    source: &dyn DocumentSource,
    config: &Config,
    out: &mut W,
) -> InspectResult<LatestOutcome> {
    let documents = match source.list_documents().await {
        Ok(documents) => documents,
        Err(err) => {
            tracing::warn!(error = %err, "Could not fetch documents");
            writeln!(out, "{ERROR_MARKER} Error fetching documents: {err}")?;
            return Ok(LatestOutcome::default());
        }
    };

    let Some(doc) = documents.first() else {
        writeln!(out, "{NO_DOCUMENTS}")?;
        return Ok(LatestOutcome::default());
    };

    let mut outcome = LatestOutcome {
        document_id: Some(doc.id.clone()),
        ..Default::default()
    };
    writeln!(out, "Document: {}", doc.display_name())?;
    writeln!(out, "Status: {}", doc.status)?;
    writeln!(out, "ID: {}", doc.id)?;

    let located = match locate_response(source, doc).await {
        Ok(located) => located,
        Err(err) => {
            tracing::warn!(document.id = %doc.id, error = %err, "Could not fetch Grok response");
            writeln!(out, "{ERROR_MARKER} Error accessing Grok response: {err}")?;
            return Ok(outcome);
        }
    };

    writeln!(out, "{}", rule(50))?;
    let response = located.as_ref();
    write!(out, "{}", render_response(doc, response, &RenderOptions::LATEST))?;
    writeln!(out, "{}", rule(50))?;

    let Some(response) = response else {
        if doc.status.is_completed()
            && let Some(raw_data) = doc
                .property_data
                .as_ref()
                .and_then(|p| p.raw_extracted_data.as_ref())
        {
            writeln!(out, "Available keys: {}", raw_data.keys().join(", "))?;
        }
        return Ok(outcome);
    };
    outcome.found = true;
    writeln!(out, "\n🎯 SUCCESS: Full Grok response is accessible!")?;

    let path = config.output_path(LATEST_RESPONSE_FILE);
    match persist(response, &path) {
        Ok(()) => {
            writeln!(out, "Saved full response to '{}'", path.display())?;
            outcome.saved = Some(path);
        }
        Err(err) => {
            tracing::warn!(error = %err, "Could not save response");
            writeln!(out, "{ERROR_MARKER} {err}")?;
        }
    }

    Ok(outcome)
}
