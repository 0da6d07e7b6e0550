//! Glue between the form, the reference workbook and the production log.
//!
//! Each public function here is one user-visible operation of the
//! terminal app. All of them run to completion before returning; there is
//! no background work.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use thiserror::Error;
use tracing::info;

use yeseria_core::models::{ProductionRecord, ReferenceData};
use yeseria_core::report::{ReportError, ReportFilter, ReportRow, ReportSummary};
use yeseria_core::store::factory::StoreRegistry;
use yeseria_core::submission::build_records;
use yeseria_core::validation::{existing_key, validate_submission};
use yeseria_core::{ProductionStore, StoreError, Submission, ValidationError};
use yeseria_data::ReferenceError;
use yeseria_db_csv::CsvWorkbookFactory;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("submission rejected: {0}")]
    Validation(#[from] ValidationError),

    #[error("reference data problem: {0}")]
    Reference(#[from] ReferenceError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Report(#[from] ReportError),
}

/// All storage backends this build knows about.
pub fn build_registry() -> StoreRegistry {
    let mut registry = StoreRegistry::new();
    registry.register(Box::new(CsvWorkbookFactory));
    registry
}

/// Validates a submission against the current log and appends its
/// records.
///
/// `now` anchors both the future-date rule and the batch timestamp: the
/// stored timestamp is the submitted date combined with the wall-clock
/// save time, so batches on the same day stay distinguishable.
pub async fn submit(
    store: &dyn ProductionStore,
    reference: &ReferenceData,
    submission: &Submission,
    now: NaiveDateTime,
) -> Result<Vec<ProductionRecord>, AppError> {
    let log = store.query().await?;
    let existing: HashSet<_> = log
        .iter()
        .map(|record| existing_key(&record.operator_code, record.day()))
        .collect();

    validate_submission(submission, reference, &existing, now.date())?;

    let recorded_at = submission.date.and_time(now.time());
    let records = build_records(submission, reference, recorded_at)?;
    store.append(records.clone()).await?;

    info!(
        mold = %submission.mold_code,
        operators = records.len(),
        %recorded_at,
        "submission saved"
    );
    Ok(records)
}

/// The full log, newest-first.
pub async fn list(store: &dyn ProductionStore) -> Result<Vec<ProductionRecord>, AppError> {
    Ok(store.query().await?)
}

/// Removes a saved batch by its exact timestamp, optionally narrowed to
/// one operator. Returns the number of rows removed.
pub async fn delete(
    store: &dyn ProductionStore,
    recorded_at: NaiveDateTime,
    operator_code: Option<&str>,
) -> Result<usize, AppError> {
    let removed = store.delete_by_key(recorded_at, operator_code).await?;
    info!(removed, %recorded_at, "batch delete");
    Ok(removed)
}

/// Filtered report rows plus their summary (`None` when nothing matched).
pub async fn report(
    store: &dyn ProductionStore,
    filter: &ReportFilter,
) -> Result<(Vec<ReportRow>, Option<ReportSummary>), AppError> {
    let log = store.query().await?;
    let rows = yeseria_core::report::build_report(&log, filter)?;
    let summary = yeseria_core::report::summarize(&rows);
    Ok((rows, summary))
}
