//! Per-record edit-distance scoring with the key-level count breakdown.

use serde::{Deserialize, Serialize};

use crate::distance::{accuracy, edit_distance};
use crate::error::RecordError;
use crate::model::{AnswerSet, GradingConfig};
use crate::sequence::build_sequence;

/// Score breakdown for one (reference, response) record.
///
/// `accuracy` and `edit_distance` compare value sequences; the counts
/// compare key sets directly (`correct_count` is key-present-and-value-equal,
/// independent of order).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordScore {
    /// Percentage in [0, 100]: `(1 - distance/max_len) * 100`.
    pub accuracy: f64,
    /// Edit distance between the ordered value sequences.
    pub edit_distance: usize,
    /// Number of reference entries.
    pub total: usize,
    /// Number of response entries.
    pub answered_count: usize,
    /// Response keys present in the reference with an equal value.
    pub correct_count: usize,
    /// Reference keys absent from the response key set.
    pub missing_count: usize,
    /// Response keys absent from the reference key set.
    pub extra_count: usize,
    /// Answered, key known, value wrong.
    pub wrong_count: usize,
}

/// Grade one record.
///
/// An empty reference is a defined zero score, not an error: every response
/// entry counts as extra and the distance is the response length. Oversized
/// answer sets are rejected.
pub fn grade(
    standard: &AnswerSet,
    response: &AnswerSet,
    config: &GradingConfig,
) -> Result<RecordScore, RecordError> {
    config.check_len(standard)?;
    config.check_len(response)?;

    if standard.is_empty() {
        return Ok(RecordScore {
            accuracy: 0.0,
            edit_distance: response.len(),
            total: 0,
            answered_count: response.len(),
            correct_count: 0,
            missing_count: 0,
            extra_count: response.len(),
            wrong_count: 0,
        });
    }

    if response.is_empty() {
        return Ok(RecordScore {
            accuracy: 0.0,
            edit_distance: standard.len(),
            total: standard.len(),
            answered_count: 0,
            correct_count: 0,
            missing_count: standard.len(),
            extra_count: 0,
            wrong_count: 0,
        });
    }

    let (_, standard_values) = build_sequence(standard);
    let (_, response_values) = build_sequence(response);

    let distance = edit_distance(
        &standard_values,
        &response_values,
        config.allow_transposition,
    );

    let correct_count = response
        .0
        .iter()
        .filter(|&(key, value)| standard.get(key) == Some(value))
        .count();
    let missing_count = standard
        .0
        .keys()
        .filter(|key| response.get(key).is_none())
        .count();
    let extra_count = response
        .0
        .keys()
        .filter(|key| standard.get(key).is_none())
        .count();
    let wrong_count = response.len() - correct_count - extra_count;

    Ok(RecordScore {
        accuracy: accuracy(
            &standard_values,
            &response_values,
            config.allow_transposition,
        ),
        edit_distance: distance,
        total: standard.len(),
        answered_count: response.len(),
        correct_count,
        missing_count,
        extra_count,
        wrong_count,
    })
}
