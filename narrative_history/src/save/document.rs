//! Save documents - the versioned JSON form of a history or a checkpoint.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::history::{Checkpoint, StepHistory};

use super::{migrate, SaveError, SaveMode};

/// Current save document version.
pub const SAVE_VERSION: u32 = 1;

/// Summary of a save, readable without decoding the rest of the document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveMetadata {
    pub save_id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Number of checkpoints in the document.
    pub steps: usize,
    /// Label of the newest checkpoint.
    pub label: String,
}

impl SaveMetadata {
    fn describe(checkpoints: &[Checkpoint]) -> Self {
        Self {
            save_id: Uuid::new_v4(),
            created_at: Utc::now(),
            steps: checkpoints.len(),
            label: checkpoints
                .last()
                .map(|checkpoint| checkpoint.step.label.clone())
                .unwrap_or_default(),
        }
    }
}

/// The state a document carries.
#[derive(Debug, Clone, PartialEq)]
pub enum SavePayload {
    History(StepHistory),
    Checkpoint(Checkpoint),
}

/// A decoded save document.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveDocument {
    pub version: u32,
    pub metadata: SaveMetadata,
    pub payload: SavePayload,
}

#[derive(Serialize)]
struct DocumentOut<'a> {
    version: u32,
    metadata: &'a SaveMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    history: Option<&'a [Checkpoint]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    checkpoint: Option<&'a Checkpoint>,
}

#[derive(Deserialize)]
struct DocumentIn {
    #[serde(default)]
    metadata: SaveMetadata,
    #[serde(default)]
    history: Option<Vec<Checkpoint>>,
    #[serde(default)]
    checkpoint: Option<Checkpoint>,
}

#[derive(Deserialize)]
struct VersionHeader {
    #[serde(default)]
    version: Option<Value>,
}

#[derive(Deserialize)]
struct MetadataHeader {
    #[serde(default)]
    metadata: SaveMetadata,
}

impl SaveDocument {
    /// Document holding the whole history.
    pub fn full(history: &StepHistory) -> Self {
        Self {
            version: SAVE_VERSION,
            metadata: SaveMetadata::describe(history.as_slice()),
            payload: SavePayload::History(history.clone()),
        }
    }

    /// Document holding only the current checkpoint.
    pub fn quick(checkpoint: &Checkpoint) -> Self {
        Self {
            version: SAVE_VERSION,
            metadata: SaveMetadata::describe(std::slice::from_ref(checkpoint)),
            payload: SavePayload::Checkpoint(checkpoint.clone()),
        }
    }

    pub fn from_history(history: &StepHistory, mode: SaveMode) -> Self {
        match mode {
            SaveMode::Full => Self::full(history),
            SaveMode::Quick => Self::quick(history.current()),
        }
    }

    pub fn mode(&self) -> SaveMode {
        match self.payload {
            SavePayload::History(_) => SaveMode::Full,
            SavePayload::Checkpoint(_) => SaveMode::Quick,
        }
    }

    /// The newest checkpoint in the document.
    pub fn current(&self) -> &Checkpoint {
        match &self.payload {
            SavePayload::History(history) => history.current(),
            SavePayload::Checkpoint(checkpoint) => checkpoint,
        }
    }

    /// Encode to JSON text.
    pub fn to_json(&self, pretty: bool) -> Result<String, SaveError> {
        let (history, checkpoint) = match &self.payload {
            SavePayload::History(history) => (Some(history.as_slice()), None),
            SavePayload::Checkpoint(checkpoint) => (None, Some(checkpoint)),
        };
        let out = DocumentOut {
            version: self.version,
            metadata: &self.metadata,
            history,
            checkpoint,
        };
        let text = if pretty {
            serde_json::to_string_pretty(&out)?
        } else {
            serde_json::to_string(&out)?
        };
        debug!(mode = ?self.mode(), steps = self.metadata.steps, bytes = text.len(), "built save document");
        Ok(text)
    }

    /// Decode JSON text, upgrading older versions first.
    pub fn from_json(text: &str) -> Result<Self, SaveError> {
        let document: DocumentIn = decode_current(text)?;

        let payload = match (document.history, document.checkpoint) {
            (Some(checkpoints), None) => SavePayload::History(
                StepHistory::from_checkpoints(checkpoints)
                    .ok_or_else(|| SaveError::malformed("history", "history is empty"))?,
            ),
            (None, Some(checkpoint)) => SavePayload::Checkpoint(checkpoint),
            (Some(_), Some(_)) => {
                return Err(SaveError::malformed(
                    ".",
                    "document has both `history` and `checkpoint`",
                ))
            }
            (None, None) => {
                return Err(SaveError::malformed(
                    ".",
                    "document has neither `history` nor `checkpoint`",
                ))
            }
        };

        let document = Self {
            version: SAVE_VERSION,
            metadata: document.metadata,
            payload,
        };
        debug!(mode = ?document.mode(), steps = document.metadata.steps, "parsed save document");
        Ok(document)
    }
}

/// Serialize a history as a save document.
pub fn build_save_document(
    history: &StepHistory,
    mode: SaveMode,
    pretty: bool,
) -> Result<String, SaveError> {
    SaveDocument::from_history(history, mode).to_json(pretty)
}

/// Parse a save document.
pub fn parse_save_document(text: &str) -> Result<SaveDocument, SaveError> {
    SaveDocument::from_json(text)
}

/// Read a document's metadata without decoding its checkpoints.
pub fn peek_metadata(text: &str) -> Result<SaveMetadata, SaveError> {
    let header: MetadataHeader = decode_current(text)?;
    Ok(header.metadata)
}

/// Decode `T` from a document, migrating it first when it is older than
/// the current version.
fn decode_current<T: DeserializeOwned>(text: &str) -> Result<T, SaveError> {
    let found = read_version(text)?;
    let version = u32::try_from(found)
        .ok()
        .filter(|version| *version <= SAVE_VERSION)
        .ok_or(SaveError::SchemaVersion {
            found,
            supported: SAVE_VERSION,
        })?;

    if version == SAVE_VERSION {
        let mut deserializer = serde_json::Deserializer::from_str(text);
        return serde_path_to_error::deserialize(&mut deserializer).map_err(path_error);
    }

    let value: Value = serde_json::from_str(text)
        .map_err(|source| SaveError::malformed(".", source.to_string()))?;
    let value = migrate(value, version)?;
    serde_path_to_error::deserialize(value).map_err(path_error)
}

/// Read the `version` field. Integers too large for `u64` saturate, so they
/// still count as newer than anything supported.
fn read_version(text: &str) -> Result<u64, SaveError> {
    let header: VersionHeader = serde_json::from_str(text)
        .map_err(|source| SaveError::malformed(".", source.to_string()))?;

    let version = match header.version {
        Some(Value::Number(number)) => number.as_u64().or_else(|| {
            number
                .as_f64()
                .filter(|value| value.fract() == 0.0 && *value >= u64::MAX as f64)
                .map(|_| u64::MAX)
        }),
        Some(Value::String(text)) => {
            let digits = text.trim();
            if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                Some(digits.parse::<u64>().unwrap_or(u64::MAX))
            } else {
                None
            }
        }
        Some(_) => None,
        None => return Err(SaveError::malformed("version", "missing version")),
    };

    match version {
        Some(version) if version >= 1 => Ok(version),
        Some(version) => Err(SaveError::malformed(
            "version",
            format!("version {version} is not a valid save version"),
        )),
        None => Err(SaveError::malformed(
            "version",
            "expected a positive integer or numeric string",
        )),
    }
}

fn path_error<E: std::fmt::Display>(error: serde_path_to_error::Error<E>) -> SaveError {
    let path = error.path().to_string();
    let source = error.into_inner();
    SaveError::malformed(path, source.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{Dialogue, StepPointer};
    use canvas_memory::{CanvasSnapshot, ElementMemory};
    use serde_json::json;

    fn checkpoint(index: u32) -> Checkpoint {
        let mut canvas = CanvasSnapshot::new();
        canvas.insert(
            "bunny1",
            ElementMemory::new("CanvasSprite").with_position(index as f64 * 10.0, 0.0),
        );
        Checkpoint::new(StepPointer::new("start", index), canvas)
    }

    fn history() -> StepHistory {
        let mut history = StepHistory::new(checkpoint(0));
        history.record_step(checkpoint(1).with_dialogue(Dialogue::spoken("Alice", "Hi.")));
        history.record_step(checkpoint(2).with_variable("gold", 3i64));
        history
    }

    fn malformed_path(result: Result<SaveDocument, SaveError>) -> String {
        match result {
            Err(SaveError::Malformed { path, .. }) => path,
            other => panic!("expected a malformed document, got {other:?}"),
        }
    }

    #[test]
    fn test_full_document_round_trip() {
        let history = history();

        let text = build_save_document(&history, SaveMode::Full, false).unwrap();
        let document = parse_save_document(&text).unwrap();

        assert_eq!(document.version, SAVE_VERSION);
        assert_eq!(document.mode(), SaveMode::Full);
        assert_eq!(document.metadata.steps, 3);
        assert_eq!(document.metadata.label, "start");
        assert_eq!(document.payload, SavePayload::History(history));
    }

    #[test]
    fn test_quick_document_holds_current_only() {
        let history = history();

        let text = build_save_document(&history, SaveMode::Quick, true).unwrap();
        let json: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(json["version"], 1);
        assert!(json.get("history").is_none());
        assert_eq!(json["checkpoint"]["step"]["index"], 2);
        assert!(json["metadata"]["saveId"].is_string());
        assert!(json["metadata"]["createdAt"].is_string());

        let document = parse_save_document(&text).unwrap();
        assert_eq!(document.current(), history.current());
    }

    #[test]
    fn test_newer_version_is_rejected() {
        let text = json!({"version": 2, "checkpoint": checkpoint(0)}).to_string();

        let result = parse_save_document(&text);
        assert!(matches!(
            result,
            Err(SaveError::SchemaVersion { found: 2, supported: 1 })
        ));
    }

    #[test]
    fn test_huge_versions_are_newer_not_malformed() {
        let versions = [
            json!(5_000_000_000u64),
            json!("5000000000"),
            json!(u64::MAX),
            json!("123456789012345678901234567890"),
            json!(1e30),
        ];
        for version in versions {
            let text = json!({"version": version, "checkpoint": checkpoint(0)}).to_string();
            assert!(
                matches!(
                    parse_save_document(&text),
                    Err(SaveError::SchemaVersion { supported: 1, .. })
                ),
                "version {version} should be refused as too new"
            );
        }

        let text = json!({"version": "5000000000", "checkpoint": checkpoint(0)}).to_string();
        assert!(matches!(
            parse_save_document(&text),
            Err(SaveError::SchemaVersion { found: 5_000_000_000, .. })
        ));
    }

    #[test]
    fn test_version_may_be_a_numeric_string() {
        let text = json!({"version": "1", "checkpoint": checkpoint(0)}).to_string();
        assert!(parse_save_document(&text).is_ok());
    }

    #[test]
    fn test_invalid_versions_are_malformed() {
        for version in [json!(0), json!("abc"), json!(-1), json!(true)] {
            let text = json!({"version": version, "checkpoint": checkpoint(0)}).to_string();
            assert_eq!(malformed_path(parse_save_document(&text)), "version");
        }

        let text = json!({"checkpoint": checkpoint(0)}).to_string();
        assert_eq!(malformed_path(parse_save_document(&text)), "version");
    }

    #[test]
    fn test_payload_must_be_exactly_one() {
        let both = json!({"version": 1, "history": [checkpoint(0)], "checkpoint": checkpoint(0)});
        assert_eq!(malformed_path(parse_save_document(&both.to_string())), ".");

        let neither = json!({"version": 1});
        assert_eq!(malformed_path(parse_save_document(&neither.to_string())), ".");

        let empty = json!({"version": 1, "history": []});
        assert_eq!(malformed_path(parse_save_document(&empty.to_string())), "history");
    }

    #[test]
    fn test_malformed_field_reports_path() {
        let text = r#"{
            "version": 1,
            "history": [
                {"step": {"label": "start", "index": 0},
                 "canvas": {"bunny1": {"className": "CanvasSprite", "alpha": "opaque"}}}
            ]
        }"#;

        let path = malformed_path(parse_save_document(text));
        assert_eq!(path, "history[0].canvas.bunny1.alpha");
    }

    #[test]
    fn test_duplicate_canvas_ids_are_malformed() {
        let text = r#"{"version": 1, "checkpoint": {
            "step": {"label": "start", "index": 0},
            "canvas": {"a": {"className": "CanvasSprite"}, "a": {"className": "CanvasText"}}
        }}"#;

        let result = parse_save_document(text);
        assert!(matches!(result, Err(SaveError::Malformed { message, .. }) if message.contains("duplicate")));
    }

    #[test]
    fn test_not_json_is_malformed() {
        assert_eq!(malformed_path(parse_save_document("not json")), ".");
        assert_eq!(malformed_path(parse_save_document("42")), ".");
    }

    #[test]
    fn test_peek_metadata_skips_checkpoints() {
        let text = json!({
            "version": 1,
            "metadata": {
                "saveId": "67e55044-10b1-426f-9247-bb680e5fe0c8",
                "createdAt": "2024-05-01T12:00:00Z",
                "steps": 12,
                "label": "chapter_2"
            },
            "history": "not decoded"
        })
        .to_string();

        let metadata = peek_metadata(&text).unwrap();

        assert_eq!(metadata.steps, 12);
        assert_eq!(metadata.label, "chapter_2");
        assert_eq!(metadata.created_at.to_rfc3339(), "2024-05-01T12:00:00+00:00");
    }

    #[test]
    fn test_peek_metadata_checks_version() {
        let text = json!({"version": 7, "metadata": {}}).to_string();
        assert!(matches!(
            peek_metadata(&text),
            Err(SaveError::SchemaVersion { found: 7, .. })
        ));
    }
}
