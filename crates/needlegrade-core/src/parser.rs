//! Record and configuration parsing: JSONL record files and TOML config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{RecordError, Side};
use crate::model::{AnswerSet, GradingConfig};
use crate::traits::RecordSource;

/// One raw input record: a reference/response pair, not yet validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    pub standard: RecordField,
    pub response: RecordField,
}

/// One side of a record: either an inline JSON object or a JSON-encoded
/// string (the shape the collection layer stores in its `*_json` columns).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordField {
    Inline(serde_json::Map<String, serde_json::Value>),
    Encoded(String),
}

impl RecordField {
    /// Parse this side into an answer set, rejecting the record on
    /// malformed JSON, non-object shapes, or non-scalar values.
    pub fn parse(&self, side: Side) -> Result<AnswerSet, RecordError> {
        let value = match self {
            RecordField::Inline(map) => serde_json::Value::Object(map.clone()),
            RecordField::Encoded(raw) => {
                serde_json::from_str(raw).map_err(|e| RecordError::Parse {
                    side,
                    message: e.to_string(),
                })?
            }
        };
        AnswerSet::from_json(value, side)
    }
}

impl RawRecord {
    pub fn standard_set(&self) -> Result<AnswerSet, RecordError> {
        self.standard.parse(Side::Standard)
    }

    pub fn response_set(&self) -> Result<AnswerSet, RecordError> {
        self.response.parse(Side::Response)
    }
}

/// Parse one JSONL line into a raw record.
pub fn parse_record_line(line: &str, line_number: usize) -> Result<RawRecord, RecordError> {
    serde_json::from_str(line)
        .map_err(|e| RecordError::Malformed(format!("line {line_number}: {e}")))
}

/// Record source reading a JSONL file, one record per non-empty line.
pub struct JsonlSource {
    path: PathBuf,
    name: String,
}

impl JsonlSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }
}

#[async_trait]
impl RecordSource for JsonlSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<Vec<Result<RawRecord, RecordError>>> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read record file: {}", self.path.display()))?;

        Ok(content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| parse_record_line(line, idx + 1))
            .collect())
    }
}

/// Load the grading config from a TOML file, or defaults when no path is
/// given. A missing or unparsable file is a batch-level (fatal) error.
pub fn load_config(path: Option<&Path>) -> Result<GradingConfig> {
    let Some(path) = path else {
        return Ok(GradingConfig::default());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    let config: GradingConfig = toml::from_str(&content)
        .with_context(|| format!("failed to parse config TOML: {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Scalar;

    #[test]
    fn parse_inline_record() {
        let record = parse_record_line(
            r#"{"standard": {"0": "A"}, "response": {"0": "A", "1": 7}}"#,
            1,
        )
        .unwrap();
        let standard = record.standard_set().unwrap();
        let response = record.response_set().unwrap();
        assert_eq!(standard.get("0"), Some(&Scalar::Text("A".into())));
        assert_eq!(response.get("1"), Some(&Scalar::Int(7)));
    }

    #[test]
    fn parse_encoded_record() {
        let record = parse_record_line(
            r#"{"standard": "{\"0\": \"A\"}", "response": "{\"0\": \"B\"}"}"#,
            1,
        )
        .unwrap();
        assert_eq!(record.standard_set().unwrap().len(), 1);
        assert_eq!(
            record.response_set().unwrap().get("0"),
            Some(&Scalar::Text("B".into()))
        );
    }

    #[test]
    fn malformed_line_names_the_line_number() {
        let err = parse_record_line("not json", 17).unwrap_err();
        assert!(err.to_string().contains("line 17"));
    }

    #[test]
    fn encoded_garbage_fails_at_answer_set_parse() {
        let record =
            parse_record_line(r#"{"standard": "not json", "response": {}}"#, 1).unwrap();
        let err = record.standard_set().unwrap_err();
        assert!(matches!(
            err,
            RecordError::Parse {
                side: Side::Standard,
                ..
            }
        ));
    }

    #[test]
    fn encoded_non_object_is_rejected() {
        let record = parse_record_line(r#"{"standard": "[1, 2]", "response": {}}"#, 1).unwrap();
        assert!(record.standard_set().is_err());
    }

    #[tokio::test]
    async fn jsonl_source_reads_and_flags_bad_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.jsonl");
        std::fs::write(
            &path,
            concat!(
                r#"{"standard": {"0": "A"}, "response": {"0": "A"}}"#,
                "\n",
                "\n",
                "garbage\n",
                r#"{"standard": {"0": "B"}, "response": {}}"#,
                "\n",
            ),
        )
        .unwrap();

        let source = JsonlSource::new(&path);
        let records = source.fetch().await.unwrap();
        assert_eq!(records.len(), 3); // blank line skipped
        assert!(records[0].is_ok());
        assert!(records[1].is_err());
        assert!(records[2].is_ok());
    }

    #[tokio::test]
    async fn missing_record_file_is_fatal() {
        let source = JsonlSource::new("/nonexistent/records.jsonl");
        assert!(source.fetch().await.is_err());
    }

    #[test]
    fn load_config_defaults_without_path() {
        let config = load_config(None).unwrap();
        assert_eq!(config, GradingConfig::default());
    }

    #[test]
    fn load_config_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grading.toml");
        std::fs::write(&path, "sequence_length = 20\nallow_transposition = true\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.sequence_length, 20);
        assert!(config.allow_transposition);
        assert_eq!(config.parallelism, 4);
    }

    #[test]
    fn load_config_bad_toml_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grading.toml");
        std::fs::write(&path, "sequence_length = [not valid").unwrap();
        assert!(load_config(Some(&path)).is_err());
    }
}
