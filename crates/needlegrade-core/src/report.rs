//! Batch report types with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregate::{FrequencyAggregator, IntervalRow, PositionRow};
use crate::model::GradingConfig;
use crate::statistics::AccuracyStats;

/// A complete graded batch: accuracy summary plus the frequency tables the
/// persistence and plotting layers consume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    /// Unique run identifier.
    pub id: Uuid,
    /// When the batch was graded.
    pub created_at: DateTime<Utc>,
    /// Where the records came from.
    pub source: String,
    /// Config the batch was graded with.
    pub config: GradingConfig,
    /// Records seen, including skipped ones.
    pub total_records: usize,
    /// Records graded and classified.
    pub graded_records: usize,
    /// Records rejected (parse failures, oversized).
    pub skipped_records: usize,
    /// Accuracy distribution over graded records.
    pub accuracy: AccuracyStats,
    /// Per-record accuracy scores, in no particular order.
    pub accuracies: Vec<f64>,
    /// Correct frequency per reference position.
    pub correct: Vec<PositionRow>,
    /// Misorder frequency per reference position.
    pub misorder: Vec<PositionRow>,
    /// Missing frequency per reference position.
    pub missing: Vec<PositionRow>,
    /// Hallucination frequency per anchor interval.
    pub hallucination: Vec<IntervalRow>,
    /// Wall-clock grading duration in milliseconds.
    pub duration_ms: u64,
}

impl BatchReport {
    /// Snapshot an aggregator into report tables.
    pub fn tables_from(aggregator: &FrequencyAggregator) -> ReportTables {
        ReportTables {
            correct: aggregator.correct_rows(),
            misorder: aggregator.misorder_rows(),
            missing: aggregator.missing_rows(),
            hallucination: aggregator.hallucination_rows(),
        }
    }

    /// Save the report as pretty JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: BatchReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}

/// The four frequency tables of one batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportTables {
    pub correct: Vec<PositionRow>,
    pub misorder: Vec<PositionRow>,
    pub missing: Vec<PositionRow>,
    pub hallucination: Vec<IntervalRow>,
}
