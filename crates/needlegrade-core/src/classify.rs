//! Per-record error classification: Correct / Misorder / Missing plus
//! hallucination intervals.
//!
//! Each response entry is matched to the reference key carrying the same
//! value. The matched reference keys, taken in response order, are aligned
//! against the ascending reference keys by LCS; keys on the alignment are
//! anchors (Correct), matched keys off it are Misorder, never-matched
//! reference keys are Missing. Response entries whose value appears nowhere
//! in the reference are hallucinations, localized to the interval between
//! their nearest surrounding anchors.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::align::anchor_keys;
use crate::error::{RecordError, Side};
use crate::model::{AnswerSet, GradingConfig, Scalar};

/// Label of a single reference key. Every reference key gets exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionLabel {
    /// Value present and part of the maximal in-order-correct subsequence.
    Correct,
    /// Value present somewhere, but out of relative order.
    Misorder,
    /// Correct value never appears anywhere in the response.
    Missing,
}

/// Anchor interval bracketing a hallucination, in reference-key space.
///
/// `from = 0` means "before any anchor"; `to = sequence_length + 1` means
/// "after the last anchor".
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct AnchorInterval {
    pub from: u32,
    pub to: u32,
}

/// A response entry whose value does not exist in the reference at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HallucinationEvent {
    /// The response key the extraneous value was produced under.
    pub response_key: u32,
    /// Where in reference-key space the entry was inserted.
    pub interval: AnchorInterval,
}

/// Classification of one record. Labels partition the reference keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub labels: BTreeMap<u32, PositionLabel>,
    pub hallucinations: Vec<HallucinationEvent>,
}

impl Classification {
    pub fn count(&self, label: PositionLabel) -> usize {
        self.labels.values().filter(|&&l| l == label).count()
    }
}

fn numeric_entries<'a>(
    set: &'a AnswerSet,
    side: Side,
) -> Result<BTreeMap<u32, &'a Scalar>, RecordError> {
    set.numeric_entries()
        .map_err(|message| RecordError::Parse { side, message })
}

/// Classify a (reference, response) record.
///
/// Rejects records with non-numeric keys (frequency tables are keyed by
/// integer positions) or oversized answer sets. An empty reference makes
/// every response entry a hallucination bracketed by both sentinels.
pub fn classify(
    standard: &AnswerSet,
    response: &AnswerSet,
    config: &GradingConfig,
) -> Result<Classification, RecordError> {
    config.check_len(standard)?;
    config.check_len(response)?;

    let standard_entries = numeric_entries(standard, Side::Standard)?;
    let response_entries = numeric_entries(response, Side::Response)?;

    let standard_keys: Vec<u32> = standard_entries.keys().copied().collect();

    // Match each response entry (in response order) to the first not yet
    // consumed reference key holding the same value. Needle values are
    // conventionally distinct, so consumption only matters for degenerate
    // inputs with repeated values.
    let mut consumed: BTreeSet<u32> = BTreeSet::new();
    // (response_key, matched reference key or None)
    let mut matches: Vec<(u32, Option<u32>)> = Vec::with_capacity(response_entries.len());
    for (&response_key, value) in &response_entries {
        let matched = standard_entries
            .iter()
            .find(|&(k, v)| !consumed.contains(k) && v == value)
            .map(|(&k, _)| k);
        if let Some(k) = matched {
            consumed.insert(k);
        }
        matches.push((response_key, matched));
    }

    let correct_model_keys: Vec<u32> = matches.iter().filter_map(|&(_, m)| m).collect();
    let anchors: BTreeSet<u32> = anchor_keys(&standard_keys, &correct_model_keys)
        .into_iter()
        .collect();

    let mut labels = BTreeMap::new();
    for &key in &standard_keys {
        let label = if anchors.contains(&key) {
            PositionLabel::Correct
        } else if consumed.contains(&key) {
            PositionLabel::Misorder
        } else {
            PositionLabel::Missing
        };
        labels.insert(key, label);
    }

    let mut hallucinations = Vec::new();
    for (pos, &(response_key, matched)) in matches.iter().enumerate() {
        if matched.is_some() {
            continue;
        }
        let left = matches[..pos]
            .iter()
            .rev()
            .filter_map(|&(_, m)| m)
            .find(|k| anchors.contains(k));
        let right = matches[pos + 1..]
            .iter()
            .filter_map(|&(_, m)| m)
            .find(|k| anchors.contains(k));
        hallucinations.push(HallucinationEvent {
            response_key,
            interval: AnchorInterval {
                from: left.unwrap_or(0),
                to: right.unwrap_or_else(|| config.end_sentinel()),
            },
        });
    }

    Ok(Classification {
        labels,
        hallucinations,
    })
}
