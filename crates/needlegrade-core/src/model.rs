//! Core data model: answer values, answer sets, and grading configuration.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{RecordError, Side};

/// A scalar answer value: a string or a number.
///
/// Numbers compare numerically across the integer/float split, so a response
/// of `7.0` matches a reference of `7`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Text(a), Scalar::Text(b)) => a == b,
            (Scalar::Int(a), Scalar::Int(b)) => a == b,
            (Scalar::Float(a), Scalar::Float(b)) => a == b,
            (Scalar::Int(a), Scalar::Float(b)) | (Scalar::Float(b), Scalar::Int(a)) => {
                *a as f64 == *b
            }
            _ => false,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => write!(f, "{s}"),
            Scalar::Int(n) => write!(f, "{n}"),
            Scalar::Float(n) => write!(f, "{n}"),
        }
    }
}

/// A mapping from position key to answer value for one test record.
///
/// Keys are unique strings, conventionally decimal integers over the test's
/// slot range; the mapping itself implies no ordering. Both the reference
/// (ground truth) and the parsed model response use this type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(pub BTreeMap<String, Scalar>);

impl AnswerSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Scalar> {
        self.0.get(key)
    }

    /// Build an answer set from a parsed JSON value.
    ///
    /// The value must be an object whose values are all scalars (string or
    /// number); anything else rejects the record.
    pub fn from_json(value: serde_json::Value, side: Side) -> Result<Self, RecordError> {
        if !value.is_object() {
            return Err(RecordError::Parse {
                side,
                message: "expected a JSON object".into(),
            });
        }
        serde_json::from_value(value).map_err(|e| RecordError::Parse {
            side,
            message: e.to_string(),
        })
    }

    /// Entries keyed by numeric position, ascending.
    ///
    /// Returns `Err` with a message naming the offending key if any key does
    /// not parse as a non-negative integer, or if two keys collapse to the
    /// same position (`"1"` and `"01"`); classification is only defined over
    /// numeric key space and must not silently drop an entry.
    pub fn numeric_entries(&self) -> Result<BTreeMap<u32, &Scalar>, String> {
        let mut entries = BTreeMap::new();
        for (key, value) in &self.0 {
            let position: u32 = key
                .parse()
                .map_err(|_| format!("key '{key}' is not a non-negative integer"))?;
            if entries.insert(position, value).is_some() {
                return Err(format!("key '{key}' duplicates position {position}"));
            }
        }
        Ok(entries)
    }
}

/// Grading configuration shared by scoring and classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingConfig {
    /// Slot count of the test the records came from. The hallucination right
    /// sentinel is `sequence_length + 1`.
    #[serde(default = "default_sequence_length")]
    pub sequence_length: u32,
    /// Enable the Damerau adjacent-transposition rule in edit distance.
    /// Off by default, matching the reference behavior being modeled.
    #[serde(default)]
    pub allow_transposition: bool,
    /// Maximum answer-set size; larger records are rejected rather than
    /// silently truncated, bounding the O(n*m) DP tables.
    #[serde(default = "default_max_sequence_len")]
    pub max_sequence_len: usize,
    /// Maximum concurrent records in the batch engine.
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,
}

fn default_sequence_length() -> u32 {
    40
}

fn default_max_sequence_len() -> usize {
    512
}

fn default_parallelism() -> usize {
    4
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            sequence_length: default_sequence_length(),
            allow_transposition: false,
            max_sequence_len: default_max_sequence_len(),
            parallelism: default_parallelism(),
        }
    }
}

impl GradingConfig {
    /// Sentinel interval bound for "after the last anchor".
    pub fn end_sentinel(&self) -> u32 {
        self.sequence_length + 1
    }

    /// Reject answer sets that exceed the configured maximum length.
    pub fn check_len(&self, set: &AnswerSet) -> Result<(), RecordError> {
        if set.len() > self.max_sequence_len {
            return Err(RecordError::Oversized {
                len: set.len(),
                max: self.max_sequence_len,
            });
        }
        Ok(())
    }
}
