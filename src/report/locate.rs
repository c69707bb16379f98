use crate::api::{DocumentSource, DocumentSummary, GrokResponse};
use crate::error::InspectResult;

#[tracing::instrument(
    name = "report locate",
    skip(source, doc),
    fields(
        document.id = %doc.id,
        document.status = %doc.status,
        response.origin,
    )
)]
pub async fn locate_response(
    source: &dyn DocumentSource,
    doc: &DocumentSummary,
) -> InspectResult<Option<GrokResponse>> {
    if !doc.status.is_completed() {
        return Ok(None);
    }

    let span = tracing::Span::current();

    if let Some(response) = doc.embedded_response() {
        span.record("response.origin", "embedded");
        return Ok(Some(response.clone()));
    }

    let envelope = source.grok_response(&doc.id).await?;
    match envelope.full_grok_response {
        Some(response) => {
            span.record("response.origin", "detail_endpoint");
            Ok(Some(response))
        }
        None => {
            tracing::debug!("Detail endpoint returned no record");
            Ok(None)
        }
    }
}
