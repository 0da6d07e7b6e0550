//! CSV workbook backend for the production log.
//!
//! The `FINAL` sheet lives as `FINAL.csv` inside the workbook directory,
//! next to the reference sheets. Every mutation rewrites the whole sheet;
//! the log is small enough that this stays cheap and keeps the on-disk
//! file readable by spreadsheet tools.

pub mod factory;
pub mod workbook;

pub use factory::CsvWorkbookFactory;
pub use workbook::CsvWorkbookStore;
