use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use super::format::short_id;
use crate::error::{InspectError, InspectResult};

pub const LATEST_RESPONSE_FILE: &str = "latest_grok_response.json";

pub fn response_file_name(document_id: &str) -> String {
    format!("grok_response_{}.json", short_id(document_id))
}

/// Writes `value` to `path` as pretty-printed JSON, replacing any existing file.
#[tracing::instrument(
    name = "report persist",
    skip(value, path),
    fields(file.path = %path.display(), file.bytes)
)]
pub fn persist<T: Serialize + ?Sized>(value: &T, path: &Path) -> InspectResult<()> {
    let payload = serde_json::to_vec_pretty(value).map_err(InspectError::Serialize)?;

    let write_err = |source: std::io::Error| InspectError::Persist {
        path: path.to_path_buf(),
        source,
    };

    {
        let mut file = File::create(path).map_err(write_err)?;
        file.write_all(&payload).map_err(write_err)?;
        file.flush().map_err(write_err)?;
    }

    tracing::Span::current().record("file.bytes", payload.len());
    tracing::info!("Saved response");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::GrokResponse;
    use crate::error::ErrorKind;
    use serde_json::{Value, json};

    fn sample_record() -> Value {
        json!({
            "model": "grok-2-vision-1212",
            "prompt_tokens": 3200,
            "completion_tokens": 1621,
            "total_tokens": 4821,
            "response_time_ms": 8460.5,
            "timestamp": null,
            "full_response_content": "{\"documentClassification\":{\"documentType\":\"lease\"}}",
            "parsed_result": {
                "documentClassification": {"documentType": "lease", "documentSubtype": null},
                "propertyDetails": {"address": "12 Elm St", "bedrooms": 3}
            },
            "finish_reason": "stop",
            "error": null
        })
    }

    #[test]
    fn test_response_file_name() {
        assert_eq!(
            response_file_name("3f2a9c1e-77aa-4c1b-9d1e-0a6b2c4d8e10"),
            "grok_response_3f2a9c1e.json"
        );
        assert_eq!(response_file_name("abc"), "grok_response_abc.json");
    }

    #[test]
    fn test_persist_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grok_response.json");
        let record = sample_record();
        let response: GrokResponse = serde_json::from_value(record.clone()).unwrap();

        persist(&response, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, serde_json::to_string_pretty(&record).unwrap());
        let reread: GrokResponse = serde_json::from_str(&written).unwrap();
        assert_eq!(reread, response);
    }

    #[test]
    fn test_persist_keeps_explicit_nulls() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nulls.json");
        let response: GrokResponse = serde_json::from_str(
            r#"{"model":"grok-2","parsed_result":null,"timestamp":null}"#,
        )
        .unwrap();

        persist(&response, &path).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "{\n  \"model\": \"grok-2\",\n  \"parsed_result\": null,\n  \"timestamp\": null\n}"
        );
    }

    #[test]
    fn test_persist_overwrites_existing_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "x".repeat(10_000)).unwrap();

        persist(&json!({"a": 1}), file.path()).unwrap();

        assert_eq!(std::fs::read_to_string(file.path()).unwrap(), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_persist_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("grok_response.json");

        let err = persist(&json!({"a": 1}), &path).unwrap_err();
        assert!(matches!(err, InspectError::Persist { .. }));
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(!path.exists());
    }
}
