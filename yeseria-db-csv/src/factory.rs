use std::path::Path;

use async_trait::async_trait;

use yeseria_core::store::factory::{StoreConfig, StoreFactory};
use yeseria_core::{ProductionStore, StoreError};

use crate::workbook::CsvWorkbookStore;

/// [`StoreFactory`] for the CSV workbook backend.
///
/// Register this with a [`yeseria_core::store::factory::StoreRegistry`] to
/// make the `"csv"` backend available:
///
/// ```rust,no_run
/// use yeseria_core::store::factory::StoreRegistry;
/// use yeseria_db_csv::CsvWorkbookFactory;
///
/// let mut registry = StoreRegistry::new();
/// registry.register(Box::new(CsvWorkbookFactory));
/// ```
pub struct CsvWorkbookFactory;

#[async_trait]
impl StoreFactory for CsvWorkbookFactory {
    fn backend_name(&self) -> &'static str {
        "csv"
    }

    /// Opens the workbook directory named by `config.workbook_path`,
    /// creating it if it does not exist.
    async fn create(&self, config: &StoreConfig) -> Result<Box<dyn ProductionStore>, StoreError> {
        let store = CsvWorkbookStore::open(Path::new(&config.workbook_path))?;
        Ok(Box::new(store))
    }
}

#[cfg(test)]
mod tests {
    use yeseria_core::store::factory::StoreConfig;

    use super::*;

    #[test]
    fn backend_name_is_csv() {
        assert_eq!(CsvWorkbookFactory.backend_name(), "csv");
    }

    #[tokio::test]
    async fn creates_store_in_fresh_directory() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = StoreConfig {
            backend: "csv".to_string(),
            workbook_path: dir.path().join("wb").display().to_string(),
        };

        let result = CsvWorkbookFactory.create(&config).await;
        assert!(result.is_ok(), "failed to open workbook store: {:#?}", result.err());

        let store = result.unwrap();
        let log = store.query().await.expect("query fresh store");
        assert!(log.is_empty());
    }
}
