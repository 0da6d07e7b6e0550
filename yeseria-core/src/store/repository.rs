use async_trait::async_trait;
use chrono::NaiveDateTime;
use thiserror::Error;

use crate::models::ProductionRecord;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store configuration error: {0}")]
    Configuration(String),

    #[error("I/O error on the backing store: {0}")]
    Io(String),

    #[error("Malformed log data: {0}")]
    Parse(String),
}

/// Storage seam for the `FINAL` production log.
///
/// The log is append-only from the form's point of view; the only
/// mutation is full removal of rows by key. Backends are free to rewrite
/// the whole table on every operation — volumes are small.
#[async_trait]
pub trait ProductionStore: Send + Sync {
    /// Appends a batch of records, preserving everything already logged.
    async fn append(&self, records: Vec<ProductionRecord>) -> Result<(), StoreError>;

    /// Removes every row whose timestamp equals `recorded_at`; when
    /// `operator_code` is given, only that operator's rows of the batch.
    /// Returns the number of rows removed.
    async fn delete_by_key(
        &self,
        recorded_at: NaiveDateTime,
        operator_code: Option<&str>,
    ) -> Result<usize, StoreError>;

    /// The full log, newest-first. A store that has never been written to
    /// yields an empty set, not an error.
    async fn query(&self) -> Result<Vec<ProductionRecord>, StoreError>;
}
