use std::io::Write;
use std::path::PathBuf;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use super::ERROR_MARKER;
use super::selection::{SelectionEvent, ViewerState, is_affirmative, parse_selection};
use crate::api::{DocumentSource, DocumentSummary, GrokResponseEnvelope};
use crate::config::Config;
use crate::error::InspectResult;
use crate::report::format::format_uploaded_at;
use crate::report::listing::{NO_DOCUMENTS, rule};
use crate::report::persist::response_file_name;
use crate::report::{RenderOptions, persist, render_response};

const WIDE_RULE: usize = 80;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ViewerOutcome {
    pub candidates: usize,
    pub viewed: usize,
    pub saved: Vec<PathBuf>,
}

#[tracing::instrument(name = "command viewer", skip_all)]
pub async fn run<R, W>(
    source: &dyn DocumentSource,
    config: &Config,
    input: R,
    out: &mut W,
) -> InspectResult<ViewerOutcome>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "Real Estate Document Analyzer - Grok Response Viewer")?;
    writeln!(out, "{}", rule(60))?;

    let documents = match source.list_documents().await {
        Ok(documents) => documents,
        Err(err) => {
            tracing::warn!(error = %err, "Could not fetch documents");
            writeln!(out, "{ERROR_MARKER} Error fetching documents: {err}")?;
            Vec::new()
        }
    };

    let mut outcome = ViewerOutcome::default();
    if documents.is_empty() {
        writeln!(out, "{NO_DOCUMENTS}")?;
        return Ok(outcome);
    }

    let candidates: Vec<&DocumentSummary> = documents
        .iter()
        .filter(|doc| doc.status.is_completed())
        .collect();
    outcome.candidates = candidates.len();

    write!(out, "{}", render_candidates(&candidates))?;
    if candidates.is_empty() {
        return Ok(outcome);
    }

    let mut lines = input.lines();
    let mut state = ViewerState::AwaitingSelection;

    while state == ViewerState::AwaitingSelection {
        write!(
            out,
            "\nSelect document (1-{}) or 'q' to quit: ",
            candidates.len()
        )?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let event = parse_selection(&line, candidates.len());
        state = state.on_event(event);

        match event {
            SelectionEvent::Select(index) => {
                show_document(source, config, candidates[index], &mut lines, &mut *out, &mut outcome)
                    .await?;
            }
            SelectionEvent::Invalid(reason) => {
                tracing::debug!(input = %line.trim(), ?reason, "Rejected selection");
                writeln!(out, "Invalid selection.")?;
            }
            SelectionEvent::Quit => {}
        }
    }

    writeln!(out, "\nGoodbye!")?;
    Ok(outcome)
}

async fn show_document<R, W>(
    source: &dyn DocumentSource,
    config: &Config,
    doc: &DocumentSummary,
    lines: &mut Lines<R>,
    out: &mut W,
    outcome: &mut ViewerOutcome,
) -> InspectResult<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut envelope = match source.grok_response(&doc.id).await {
        Ok(envelope) => envelope,
        Err(err) => {
            tracing::warn!(document.id = %doc.id, error = %err, "Could not fetch Grok response");
            writeln!(out, "{ERROR_MARKER} Error fetching Grok response: {err}")?;
            writeln!(out, "Failed to retrieve Grok response.")?;
            return Ok(());
        }
    };
    envelope.fill_missing_response(doc.embedded_response());

    write!(out, "{}", render_detail(doc, &envelope))?;
    outcome.viewed += 1;

    if envelope.full_grok_response.is_none() {
        return Ok(());
    }

    write!(out, "\nSave full response to file? (y/n): ")?;
    out.flush()?;
    let answer = lines.next_line().await?.unwrap_or_default();
    if !is_affirmative(&answer) {
        return Ok(());
    }

    let path = config.output_path(&response_file_name(&doc.id));
    match persist(&envelope, &path) {
        Ok(()) => {
            writeln!(out, "Saved to {}", path.display())?;
            outcome.saved.push(path);
        }
        Err(err) => {
            tracing::warn!(error = %err, "Could not save response");
            writeln!(out, "{ERROR_MARKER} {err}")?;
        }
    }

    Ok(())
}

fn render_candidates(candidates: &[&DocumentSummary]) -> String {
    let mut out = format!(
        "{}\nAVAILABLE DOCUMENTS WITH GROK RESPONSES\n{}\n",
        rule(WIDE_RULE),
        rule(WIDE_RULE)
    );

    if candidates.is_empty() {
        out.push_str("No completed documents found.\n");
        out.push_str("Upload a PDF document to generate Grok analysis data.\n");
        return out;
    }

    for (i, doc) in candidates.iter().enumerate() {
        out.push_str(&format!(
            "{}. {}\n   Status: {}\n   Uploaded: {}\n\n",
            i + 1,
            doc.display_name(),
            doc.status,
            format_uploaded_at(&doc.uploaded_at)
        ));
    }
    out
}

fn render_detail(doc: &DocumentSummary, envelope: &GrokResponseEnvelope) -> String {
    let mut out = format!(
        "{}\nFULL GROK RESPONSE: {}\n{}\n",
        rule(WIDE_RULE),
        doc.display_name(),
        rule(WIDE_RULE)
    );
    out.push_str("📊 PROCESSING METRICS:\n");
    out.push_str(&render_response(
        doc,
        envelope.full_grok_response.as_ref(),
        &RenderOptions::DETAIL,
    ));
    out.push_str(&format!("{}\n", "-".repeat(WIDE_RULE)));
    out
}
