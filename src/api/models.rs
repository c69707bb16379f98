use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DocumentStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Failed,
    Other(String),
}

impl DocumentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            DocumentStatus::Pending => "pending",
            DocumentStatus::Processing => "processing",
            DocumentStatus::Completed => "completed",
            DocumentStatus::Failed => "failed",
            DocumentStatus::Other(status) => status,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, DocumentStatus::Completed)
    }
}

impl From<String> for DocumentStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "pending" => DocumentStatus::Pending,
            "processing" => DocumentStatus::Processing,
            "completed" => DocumentStatus::Completed,
            "failed" => DocumentStatus::Failed,
            _ => DocumentStatus::Other(status),
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Each wire type reads its typed fields from the object the server sent and
// serializes that object back untouched.
macro_rules! raw_backed {
    ($($ty:ty),+ $(,)?) => {$(
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                Value::deserialize(deserializer).map(Self::from)
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                self.raw.serialize(serializer)
            }
        }

        impl $ty {
            pub fn raw(&self) -> &Map<String, Value> {
                &self.raw
            }
        }
    )+};
}

raw_backed!(
    DocumentSummary,
    PropertyData,
    RawExtractedData,
    GrokResponse,
    ParsedResult,
    DocumentClassification,
    GrokResponseEnvelope,
);

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn get<T: DeserializeOwned>(raw: &Map<String, Value>, key: &str) -> Option<T> {
    raw.get(key)
        .filter(|value| !value.is_null())
        .and_then(|value| serde_json::from_value(value.clone()).ok())
}

fn nested<T: From<Value>>(raw: &Map<String, Value>, key: &str) -> Option<T> {
    raw.get(key).filter(|value| value.is_object()).cloned().map(T::from)
}

fn count(raw: &Map<String, Value>, key: &str) -> Option<u64> {
    let value = raw.get(key)?;
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|n| n.is_finite() && *n >= 0.0)
            .map(|n| n.round() as u64)
    })
}

fn identifier(raw: &Map<String, Value>, key: &str) -> String {
    match raw.get(key) {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => String::new(),
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentSummary {
    pub id: String,
    pub original_name: String,
    pub status: DocumentStatus,
    pub uploaded_at: String,
    pub property_data: Option<PropertyData>,
    raw: Map<String, Value>,
}

impl From<Value> for DocumentSummary {
    fn from(value: Value) -> Self {
        let raw = object(value);
        Self {
            id: identifier(&raw, "id"),
            original_name: get(&raw, "originalName").unwrap_or_default(),
            status: get::<String>(&raw, "status")
                .map(DocumentStatus::from)
                .unwrap_or_default(),
            uploaded_at: get(&raw, "uploadedAt").unwrap_or_default(),
            property_data: nested(&raw, "propertyData"),
            raw,
        }
    }
}

impl DocumentSummary {
    pub fn display_name(&self) -> &str {
        if self.original_name.is_empty() {
            "Unnamed document"
        } else {
            &self.original_name
        }
    }

    /// A record the server inlined into the summary, if any.
    pub fn embedded_response(&self) -> Option<&GrokResponse> {
        let property_data = self.property_data.as_ref()?;
        property_data
            .raw_extracted_data
            .as_ref()
            .and_then(|raw| raw.full_grok_response.as_ref())
            .or(property_data.full_grok_response.as_ref())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyData {
    pub full_grok_response: Option<GrokResponse>,
    pub raw_extracted_data: Option<RawExtractedData>,
    raw: Map<String, Value>,
}

impl From<Value> for PropertyData {
    fn from(value: Value) -> Self {
        let raw = object(value);
        Self {
            full_grok_response: nested(&raw, "fullGrokResponse"),
            raw_extracted_data: nested(&raw, "rawExtractedData"),
            raw,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawExtractedData {
    pub full_grok_response: Option<GrokResponse>,
    raw: Map<String, Value>,
}

impl From<Value> for RawExtractedData {
    fn from(value: Value) -> Self {
        let raw = object(value);
        Self {
            full_grok_response: nested(&raw, "fullGrokResponse"),
            raw,
        }
    }
}

impl RawExtractedData {
    pub fn keys(&self) -> Vec<&str> {
        self.raw.keys().map(String::as_str).collect()
    }
}

/// Metadata and output of one classification model call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GrokResponse {
    pub model: Option<String>,
    pub prompt_tokens: Option<u64>,
    pub completion_tokens: Option<u64>,
    pub total_tokens: Option<u64>,
    pub response_time_ms: Option<f64>,
    pub timestamp: Option<String>,
    pub full_response_content: Option<String>,
    pub parsed_result: Option<ParsedResult>,
    raw: Map<String, Value>,
}

impl From<Value> for GrokResponse {
    fn from(value: Value) -> Self {
        let raw = object(value);
        Self {
            model: get(&raw, "model"),
            prompt_tokens: count(&raw, "prompt_tokens"),
            completion_tokens: count(&raw, "completion_tokens"),
            total_tokens: count(&raw, "total_tokens"),
            response_time_ms: raw.get("response_time_ms").and_then(Value::as_f64),
            timestamp: get(&raw, "timestamp"),
            full_response_content: get(&raw, "full_response_content"),
            parsed_result: nested(&raw, "parsed_result"),
            raw,
        }
    }
}

impl GrokResponse {
    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or("Unknown")
    }

    pub fn timestamp(&self) -> &str {
        self.timestamp.as_deref().unwrap_or("N/A")
    }

    pub fn content(&self) -> &str {
        self.full_response_content.as_deref().unwrap_or("")
    }

    pub fn content_chars(&self) -> usize {
        self.content().chars().count()
    }

    pub fn classification(&self) -> Option<&DocumentClassification> {
        self.parsed_result
            .as_ref()?
            .document_classification
            .as_ref()
            .filter(|classification| !classification.raw.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedResult {
    pub document_classification: Option<DocumentClassification>,
    raw: Map<String, Value>,
}

impl From<Value> for ParsedResult {
    fn from(value: Value) -> Self {
        let raw = object(value);
        Self {
            document_classification: nested(&raw, "documentClassification"),
            raw,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentClassification {
    pub document_type: Option<String>,
    pub document_subtype: Option<String>,
    raw: Map<String, Value>,
}

impl From<Value> for DocumentClassification {
    fn from(value: Value) -> Self {
        let raw = object(value);
        Self {
            document_type: get(&raw, "documentType"),
            document_subtype: get(&raw, "documentSubtype"),
            raw,
        }
    }
}

impl DocumentClassification {
    pub fn document_type(&self) -> &str {
        self.document_type.as_deref().unwrap_or("N/A")
    }

    pub fn document_subtype(&self) -> &str {
        self.document_subtype.as_deref().unwrap_or("N/A")
    }
}

/// Body of `GET /api/documents/{id}/grok-response`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GrokResponseEnvelope {
    pub document: DocumentSummary,
    pub full_grok_response: Option<GrokResponse>,
    raw: Map<String, Value>,
}

impl From<Value> for GrokResponseEnvelope {
    fn from(value: Value) -> Self {
        let raw = object(value);
        Self {
            document: nested(&raw, "document").unwrap_or_default(),
            full_grok_response: nested(&raw, "fullGrokResponse"),
            raw,
        }
    }
}

impl GrokResponseEnvelope {
    pub fn new(document: DocumentSummary, full_grok_response: Option<GrokResponse>) -> Self {
        let mut raw = Map::new();
        raw.insert("document".to_string(), Value::Object(document.raw.clone()));
        raw.insert(
            "fullGrokResponse".to_string(),
            full_grok_response
                .as_ref()
                .map_or(Value::Null, |response| Value::Object(response.raw.clone())),
        );
        Self {
            document,
            full_grok_response,
            raw,
        }
    }

    pub fn fill_missing_response(&mut self, response: Option<&GrokResponse>) {
        let Some(response) = response else {
            return;
        };
        if self.full_grok_response.is_some() {
            return;
        }
        self.raw.insert(
            "fullGrokResponse".to_string(),
            Value::Object(response.raw.clone()),
        );
        self.full_grok_response = Some(response.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_summary_deserializes_camel_case() {
        let doc: DocumentSummary = serde_json::from_value(json!({
            "id": "3f2a9c1e-77aa-4c1b-9d1e-0a6b2c4d8e10",
            "originalName": "lease.pdf",
            "status": "completed",
            "uploadedAt": "2024-03-01T10:15:30Z",
            "fileSize": 48213
        }))
        .unwrap();

        assert_eq!(doc.original_name, "lease.pdf");
        assert_eq!(doc.status, DocumentStatus::Completed);
        assert_eq!(doc.uploaded_at, "2024-03-01T10:15:30Z");
        assert!(doc.property_data.is_none());
        assert_eq!(doc.raw()["fileSize"], 48213);
    }

    #[test]
    fn test_unknown_status_is_preserved() {
        let doc: DocumentSummary =
            serde_json::from_value(json!({"id": "a", "status": "archived"})).unwrap();
        assert_eq!(doc.status, DocumentStatus::Other("archived".to_string()));
        assert!(!doc.status.is_completed());

        let back = serde_json::to_value(&doc).unwrap();
        assert_eq!(back["status"], "archived");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let doc: DocumentSummary = serde_json::from_value(json!({"id": "a"})).unwrap();
        assert_eq!(doc.status, DocumentStatus::Pending);
        assert_eq!(doc.display_name(), "Unnamed document");

        let response = GrokResponse::default();
        assert_eq!(response.model(), "Unknown");
        assert_eq!(response.timestamp(), "N/A");
        assert_eq!(response.content(), "");
        assert!(response.classification().is_none());
    }

    #[test]
    fn test_one_malformed_document_keeps_the_rest() {
        let docs: Vec<DocumentSummary> = serde_json::from_value(json!([
            {"id": "a", "originalName": "lease.pdf", "status": "completed"},
            {
                "id": "b",
                "originalName": null,
                "status": 3,
                "uploadedAt": false,
                "propertyData": {
                    "rawExtractedData": {
                        "fullGrokResponse": {
                            "model": ["grok-2"],
                            "total_tokens": 1200.0,
                            "prompt_tokens": "many",
                            "response_time_ms": 8460.5,
                            "parsed_result": "unparseable"
                        }
                    }
                }
            },
            {"id": 42, "propertyData": "none"}
        ]))
        .unwrap();

        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0].display_name(), "lease.pdf");

        assert_eq!(docs[1].display_name(), "Unnamed document");
        assert_eq!(docs[1].status, DocumentStatus::Pending);
        assert_eq!(docs[1].uploaded_at, "");
        let response = docs[1].embedded_response().unwrap();
        assert_eq!(response.model(), "Unknown");
        assert_eq!(response.total_tokens, Some(1200));
        assert_eq!(response.prompt_tokens, None);
        assert_eq!(response.response_time_ms, Some(8460.5));
        assert!(response.parsed_result.is_none());
        assert!(response.classification().is_none());

        assert_eq!(docs[2].id, "42");
        assert!(docs[2].property_data.is_none());
    }

    #[test]
    fn test_embedded_response_prefers_raw_extracted_data() {
        let doc: DocumentSummary = serde_json::from_value(json!({
            "id": "a",
            "status": "completed",
            "propertyData": {
                "fullGrokResponse": {"model": "outer"},
                "rawExtractedData": {"fullGrokResponse": {"model": "inner"}}
            }
        }))
        .unwrap();
        assert_eq!(doc.embedded_response().unwrap().model(), "inner");
    }

    #[test]
    fn test_embedded_response_falls_back_to_property_data() {
        let doc: DocumentSummary = serde_json::from_value(json!({
            "id": "a",
            "propertyData": {
                "fullGrokResponse": {"model": "grok-2-vision"},
                "rawExtractedData": {"address": "12 Elm St", "fullGrokResponse": null}
            }
        }))
        .unwrap();
        assert_eq!(doc.embedded_response().unwrap().model(), "grok-2-vision");
        assert_eq!(
            doc.property_data
                .as_ref()
                .and_then(|p| p.raw_extracted_data.as_ref())
                .unwrap()
                .keys(),
            vec!["address", "fullGrokResponse"]
        );
    }

    #[test]
    fn test_empty_classification_is_absent() {
        let response = GrokResponse::from(json!({
            "parsed_result": {"documentClassification": {}}
        }));
        assert!(response.classification().is_none());

        let response = GrokResponse::from(json!({
            "parsed_result": {"documentClassification": {"documentType": "lease"}}
        }));
        let classification = response.classification().unwrap();
        assert_eq!(classification.document_type(), "lease");
        assert_eq!(classification.document_subtype(), "N/A");
    }

    #[test]
    fn test_envelope_without_record() {
        let envelope: GrokResponseEnvelope = serde_json::from_value(json!({
            "document": {"id": "a", "originalName": "deed.pdf", "status": "completed"},
            "fullGrokResponse": null
        }))
        .unwrap();
        assert_eq!(envelope.document.original_name, "deed.pdf");
        assert!(envelope.full_grok_response.is_none());
    }

    #[test]
    fn test_envelope_fill_missing_response() {
        let mut envelope = GrokResponseEnvelope::from(json!({
            "document": {"id": "a"},
            "fullGrokResponse": null,
            "source": "cache"
        }));
        let embedded = GrokResponse::from(json!({"model": "grok-2", "timestamp": null}));

        envelope.fill_missing_response(Some(&embedded));
        envelope.fill_missing_response(Some(&GrokResponse::from(json!({"model": "other"}))));

        assert_eq!(envelope.full_grok_response.as_ref().unwrap().model(), "grok-2");
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "document": {"id": "a"},
                "fullGrokResponse": {"model": "grok-2", "timestamp": null},
                "source": "cache"
            })
        );
    }

    #[test]
    fn test_grok_response_saves_what_was_received() {
        let raw = json!({
            "model": "grok-2",
            "total_tokens": 1234,
            "timestamp": null,
            "parsed_result": null,
            "finish_reason": "stop",
            "response_time_ms": 8460.5
        });
        let response: GrokResponse = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(response.raw()["finish_reason"], "stop");
        assert_eq!(response.timestamp(), "N/A");
        assert_eq!(serde_json::to_value(&response).unwrap(), raw);

        let text = serde_json::to_string(&response).unwrap();
        assert!(text.starts_with(r#"{"model":"grok-2","total_tokens":1234,"timestamp":null"#));
    }
}
