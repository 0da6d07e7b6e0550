//! Integration tests for the CSV-backed production log.

use chrono::{NaiveDate, NaiveDateTime};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tempfile::TempDir;
use yeseria_core::ProductionStore;
use yeseria_core::models::ProductionRecord;
use yeseria_db_csv::CsvWorkbookStore;

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 8, day)
        .unwrap()
        .and_hms_opt(hour, 30, 0)
        .unwrap()
}

fn record(recorded_at: NaiveDateTime, operator_code: &str) -> ProductionRecord {
    ProductionRecord {
        recorded_at,
        mold_code: "M1".to_string(),
        molds_per_operator: dec!(5),
        operator_code: operator_code.to_string(),
        operator_name: "MARIA PEREZ".to_string(),
        time_used_minutes: dec!(480.00),
        production_indicator_pct: dec!(100.0),
        defect_piece: Some("P1".to_string()),
        defect_part: Some("BASE".to_string()),
        defect_quantity: 5,
        defect_weight_kg: dec!(1.5),
        defect_time_minutes: dec!(10),
        defect_time_indicator_pct: dec!(2.08),
        rework_mold: None,
        rework_line: None,
        rework_time_minutes: 0,
        rework_indicator_pct: Decimal::ZERO,
    }
}

fn open_store(dir: &TempDir) -> CsvWorkbookStore {
    CsvWorkbookStore::open(dir.path()).expect("open store")
}

#[tokio::test]
async fn fresh_store_reads_as_empty_log() {
    let dir = TempDir::new().expect("temp dir");
    let store = open_store(&dir);

    let log = store.query().await.expect("query");

    assert!(log.is_empty());
}

#[tokio::test]
async fn append_round_trips_every_field() {
    let dir = TempDir::new().expect("temp dir");
    let store = open_store(&dir);
    let original = record(at(20, 10), "007");

    store.append(vec![original.clone()]).await.expect("append");
    let log = store.query().await.expect("query");

    assert_eq!(log, vec![original]);
}

#[tokio::test]
async fn append_preserves_earlier_batches() {
    let dir = TempDir::new().expect("temp dir");
    let store = open_store(&dir);

    store.append(vec![record(at(20, 10), "007")]).await.expect("first");
    store.append(vec![record(at(21, 11), "101")]).await.expect("second");

    let log = store.query().await.expect("query");
    assert_eq!(log.len(), 2);
}

#[tokio::test]
async fn query_is_newest_first_and_idempotent() {
    let dir = TempDir::new().expect("temp dir");
    let store = open_store(&dir);

    store
        .append(vec![
            record(at(20, 10), "007"),
            record(at(22, 9), "101"),
            record(at(21, 15), "205"),
        ])
        .await
        .expect("append");

    let first = store.query().await.expect("first query");
    let second = store.query().await.expect("second query");

    assert_eq!(first[0].operator_code, "101");
    assert_eq!(first[1].operator_code, "205");
    assert_eq!(first[2].operator_code, "007");
    assert_eq!(first, second);
}

#[tokio::test]
async fn reopening_the_workbook_sees_persisted_rows() {
    let dir = TempDir::new().expect("temp dir");

    open_store(&dir)
        .append(vec![record(at(20, 10), "007")])
        .await
        .expect("append");

    let log = open_store(&dir).query().await.expect("query after reopen");
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].operator_code, "007");
}

#[tokio::test]
async fn delete_by_timestamp_removes_the_whole_batch() {
    let dir = TempDir::new().expect("temp dir");
    let store = open_store(&dir);
    let batch_ts = at(20, 10);

    store
        .append(vec![
            record(batch_ts, "007"),
            record(batch_ts, "101"),
            record(at(21, 10), "205"),
        ])
        .await
        .expect("append");

    let removed = store.delete_by_key(batch_ts, None).await.expect("delete");

    assert_eq!(removed, 2);
    let log = store.query().await.expect("query");
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].operator_code, "205");
}

#[tokio::test]
async fn delete_can_target_one_operator_of_a_batch() {
    let dir = TempDir::new().expect("temp dir");
    let store = open_store(&dir);
    let batch_ts = at(20, 10);

    store
        .append(vec![record(batch_ts, "007"), record(batch_ts, "101")])
        .await
        .expect("append");

    // Operator key is matched after normalization.
    let removed = store
        .delete_by_key(batch_ts, Some(" 007 "))
        .await
        .expect("delete");

    assert_eq!(removed, 1);
    let log = store.query().await.expect("query");
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].operator_code, "101");
}

#[tokio::test]
async fn delete_with_no_match_removes_nothing() {
    let dir = TempDir::new().expect("temp dir");
    let store = open_store(&dir);

    store.append(vec![record(at(20, 10), "007")]).await.expect("append");

    let removed = store.delete_by_key(at(25, 10), None).await.expect("delete");

    assert_eq!(removed, 0);
    assert_eq!(store.query().await.expect("query").len(), 1);
}

#[tokio::test]
async fn optional_fields_survive_a_round_trip_when_empty() {
    let dir = TempDir::new().expect("temp dir");
    let store = open_store(&dir);
    let mut rec = record(at(20, 10), "007");
    rec.defect_piece = None;
    rec.defect_part = None;
    rec.defect_quantity = 0;
    rec.defect_weight_kg = Decimal::ZERO;
    rec.defect_time_minutes = Decimal::ZERO;
    rec.defect_time_indicator_pct = Decimal::ZERO;

    store.append(vec![rec.clone()]).await.expect("append");
    let log = store.query().await.expect("query");

    assert_eq!(log, vec![rec]);
}
