use serde::de::DeserializeOwned;

use super::{DocumentSource, DocumentSummary, GrokResponseEnvelope};
use crate::error::{InspectError, InspectResult};

/// Thin `reqwest` wrapper over the document analyzer API.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> InspectResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("grok-inspector/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(InspectError::ClientSetup)?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[tracing::instrument(
        name = "api get",
        skip(self),
        fields(
            http.url,
            http.response.status_code,
        )
    )]
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> InspectResult<T> {
        let url = format!("{}{}", self.base_url, path);

        let span = tracing::Span::current();
        span.record("http.url", url.as_str());

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| InspectError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        span.record("http.response.status_code", status.as_u16());

        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "Non-success response");
            return Err(InspectError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| InspectError::Transport {
                url: url.clone(),
                source,
            })?;

        serde_json::from_slice(&body).map_err(|source| InspectError::Parse { url, source })
    }
}

#[async_trait::async_trait]
impl DocumentSource for ApiClient {
    async fn list_documents(&self) -> InspectResult<Vec<DocumentSummary>> {
        let documents: Vec<DocumentSummary> = self.get_json("/api/documents").await?;
        tracing::info!(count = documents.len(), "Fetched document list");
        Ok(documents)
    }

    async fn grok_response(&self, document_id: &str) -> InspectResult<GrokResponseEnvelope> {
        let path = format!(
            "/api/documents/{}/grok-response",
            urlencoding::encode(document_id)
        );
        self.get_json(&path).await
    }
}
