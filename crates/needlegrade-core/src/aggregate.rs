//! Batch-level frequency aggregation over per-record classifications.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::classify::{AnchorInterval, Classification, PositionLabel};

/// One frequency row keyed by reference position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionRow {
    pub position: u32,
    pub frequency: u64,
    /// `frequency / total_records * 100`.
    pub probability: f64,
    pub total_records: u64,
}

/// One frequency row keyed by anchor interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalRow {
    pub from: u32,
    pub to: u32,
    pub frequency: u64,
    pub probability: f64,
    pub total_records: u64,
}

/// Running counts over many classified records.
///
/// A pure commutative reduction: record processing order never affects the
/// final counts, and partial aggregators from parallel workers merge by
/// plain count addition.
#[derive(Debug, Clone, Default)]
pub struct FrequencyAggregator {
    correct: BTreeMap<u32, u64>,
    misorder: BTreeMap<u32, u64>,
    missing: BTreeMap<u32, u64>,
    hallucination: BTreeMap<AnchorInterval, u64>,
    total_records: u64,
}

impl FrequencyAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one record's classification into the running counts.
    /// `total_records` advances once per call.
    pub fn record(&mut self, classification: &Classification) {
        for (&key, &label) in &classification.labels {
            let table = match label {
                PositionLabel::Correct => &mut self.correct,
                PositionLabel::Misorder => &mut self.misorder,
                PositionLabel::Missing => &mut self.missing,
            };
            *table.entry(key).or_insert(0) += 1;
        }
        for event in &classification.hallucinations {
            *self.hallucination.entry(event.interval).or_insert(0) += 1;
        }
        self.total_records += 1;
    }

    /// Combine another aggregator into this one (associative, commutative).
    pub fn merge(&mut self, other: FrequencyAggregator) {
        for (key, count) in other.correct {
            *self.correct.entry(key).or_insert(0) += count;
        }
        for (key, count) in other.misorder {
            *self.misorder.entry(key).or_insert(0) += count;
        }
        for (key, count) in other.missing {
            *self.missing.entry(key).or_insert(0) += count;
        }
        for (interval, count) in other.hallucination {
            *self.hallucination.entry(interval).or_insert(0) += count;
        }
        self.total_records += other.total_records;
    }

    pub fn total_records(&self) -> u64 {
        self.total_records
    }

    fn position_rows(&self, table: &BTreeMap<u32, u64>) -> Vec<PositionRow> {
        table
            .iter()
            .map(|(&position, &frequency)| PositionRow {
                position,
                frequency,
                probability: self.probability(frequency),
                total_records: self.total_records,
            })
            .collect()
    }

    fn probability(&self, frequency: u64) -> f64 {
        if self.total_records == 0 {
            0.0
        } else {
            frequency as f64 / self.total_records as f64 * 100.0
        }
    }

    pub fn correct_rows(&self) -> Vec<PositionRow> {
        self.position_rows(&self.correct)
    }

    pub fn misorder_rows(&self) -> Vec<PositionRow> {
        self.position_rows(&self.misorder)
    }

    pub fn missing_rows(&self) -> Vec<PositionRow> {
        self.position_rows(&self.missing)
    }

    pub fn hallucination_rows(&self) -> Vec<IntervalRow> {
        self.hallucination
            .iter()
            .map(|(interval, &frequency)| IntervalRow {
                from: interval.from,
                to: interval.to,
                frequency,
                probability: self.probability(frequency),
                total_records: self.total_records,
            })
            .collect()
    }
}
