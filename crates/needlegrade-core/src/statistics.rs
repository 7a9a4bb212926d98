//! Batch accuracy summary statistics.

use serde::{Deserialize, Serialize};

/// Distribution summary of per-record accuracy over a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracyStats {
    pub record_count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
}

impl AccuracyStats {
    pub fn empty() -> Self {
        Self {
            record_count: 0,
            mean: 0.0,
            median: 0.0,
            min: 0.0,
            max: 0.0,
        }
    }
}

/// Summarize per-record accuracies. An empty batch yields all zeros.
pub fn accuracy_stats(accuracies: &[f64]) -> AccuracyStats {
    if accuracies.is_empty() {
        return AccuracyStats::empty();
    }

    let mut sorted = accuracies.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len();
    let median = if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    };

    AccuracyStats {
        record_count: n,
        mean: sorted.iter().sum::<f64>() / n as f64,
        median,
        min: sorted[0],
        max: sorted[n - 1],
    }
}
