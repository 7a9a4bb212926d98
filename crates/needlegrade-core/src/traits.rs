//! The record-source seam between the batch engine and its inputs.

use async_trait::async_trait;

use crate::error::RecordError;
use crate::parser::RawRecord;

/// An async supplier of raw grading records.
///
/// Per-record parse failures come back as `Err` items so the engine can
/// skip and count them without aborting the batch; a fetch-level `Err`
/// (unreadable file, broken connection) is fatal to the batch.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Human-readable source name for reports and logs.
    fn name(&self) -> &str;

    /// Fetch all records from this source.
    async fn fetch(&self) -> anyhow::Result<Vec<Result<RawRecord, RecordError>>>;
}
