pub mod client;
pub mod models;

pub use client::ApiClient;
pub use models::{
    DocumentClassification, DocumentStatus, DocumentSummary, GrokResponse, GrokResponseEnvelope,
};

use crate::error::InspectResult;

/// Where documents and their Grok responses come from.
#[async_trait::async_trait]
pub trait DocumentSource: Send + Sync {
    async fn list_documents(&self) -> InspectResult<Vec<DocumentSummary>>;

    async fn grok_response(&self, document_id: &str) -> InspectResult<GrokResponseEnvelope>;
}
