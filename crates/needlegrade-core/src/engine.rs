//! Batch grading engine.
//!
//! Grading is pure and per-record independent, so records fan out across
//! tasks bounded by a semaphore and fold back into one aggregator; the
//! fold is commutative, so completion order is irrelevant.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::Semaphore;
use uuid::Uuid;

use crate::aggregate::FrequencyAggregator;
use crate::classify::{classify, Classification};
use crate::error::RecordError;
use crate::model::GradingConfig;
use crate::parser::RawRecord;
use crate::report::BatchReport;
use crate::score::{grade, RecordScore};
use crate::statistics::accuracy_stats;
use crate::traits::RecordSource;

/// Progress reporting trait.
pub trait ProgressReporter: Send + Sync {
    fn on_record_graded(&self, index: usize, score: &RecordScore);
    fn on_record_skipped(&self, index: usize, error: &str);
    fn on_batch_complete(&self, total: usize, graded: usize, skipped: usize, elapsed: Duration);
}

/// No-op progress reporter.
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn on_record_graded(&self, _: usize, _: &RecordScore) {}
    fn on_record_skipped(&self, _: usize, _: &str) {}
    fn on_batch_complete(&self, _: usize, _: usize, _: usize, _: Duration) {}
}

/// Grade and classify one raw record.
pub fn grade_record(
    config: &GradingConfig,
    record: &RawRecord,
) -> Result<(RecordScore, Classification), RecordError> {
    let standard = record.standard_set()?;
    let response = record.response_set()?;
    let score = grade(&standard, &response, config)?;
    let classification = classify(&standard, &response, config)?;
    Ok((score, classification))
}

/// The batch grading engine.
pub struct GradeEngine {
    config: GradingConfig,
}

impl GradeEngine {
    pub fn new(config: GradingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GradingConfig {
        &self.config
    }

    /// Grade every record the source yields and aggregate the results.
    ///
    /// Per-record failures are skipped with a warning and counted; only a
    /// source-level failure aborts the batch.
    pub async fn run(
        &self,
        source: &dyn RecordSource,
        progress: &dyn ProgressReporter,
    ) -> Result<BatchReport> {
        let start = Instant::now();
        let records = source.fetch().await?;
        let total = records.len();

        let semaphore = Arc::new(Semaphore::new(self.config.parallelism.max(1)));
        let mut futures = FuturesUnordered::new();
        let mut skipped = 0usize;

        for (index, item) in records.into_iter().enumerate() {
            match item {
                Err(e) => {
                    tracing::warn!("skipping record {index}: {e}");
                    progress.on_record_skipped(index, &e.to_string());
                    skipped += 1;
                }
                Ok(record) => {
                    let semaphore = Arc::clone(&semaphore);
                    let config = self.config.clone();
                    futures.push(async move {
                        let _permit = semaphore.acquire_owned().await.ok();
                        (index, grade_record(&config, &record))
                    });
                }
            }
        }

        let mut aggregator = FrequencyAggregator::new();
        let mut accuracies = Vec::new();

        while let Some((index, result)) = futures.next().await {
            match result {
                Ok((score, classification)) => {
                    progress.on_record_graded(index, &score);
                    aggregator.record(&classification);
                    accuracies.push(score.accuracy);
                }
                Err(e) => {
                    tracing::warn!("skipping record {index}: {e}");
                    progress.on_record_skipped(index, &e.to_string());
                    skipped += 1;
                }
            }
        }

        let elapsed = start.elapsed();
        let graded = accuracies.len();
        progress.on_batch_complete(total, graded, skipped, elapsed);

        let tables = BatchReport::tables_from(&aggregator);

        Ok(BatchReport {
            id: Uuid::new_v4(),
            created_at: chrono::Utc::now(),
            source: source.name().to_string(),
            config: self.config.clone(),
            total_records: total,
            graded_records: graded,
            skipped_records: skipped,
            accuracy: accuracy_stats(&accuracies),
            accuracies,
            correct: tables.correct,
            misorder: tables.misorder,
            missing: tables.missing,
            hallucination: tables.hallucination,
            duration_ms: elapsed.as_millis() as u64,
        })
    }
}
