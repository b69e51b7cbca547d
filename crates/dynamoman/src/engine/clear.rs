use async_trait::async_trait;
use dynamoman_core::schema::KeySchema;
use dynamoman_core::storage::{Page, TableStore};
use tracing::{debug, info};

use super::report::TransferReport;
use super::resolver::resolve_key_schema;
use super::scanner::{scan, PageHandler, ScanControl};
use crate::error::{EngineError, Result};

struct Eraser<'a, S: ?Sized> {
    store: &'a S,
    table: &'a str,
    schema: &'a KeySchema,
    report: TransferReport,
}

#[async_trait]
impl<'a, S> PageHandler for Eraser<'a, S>
where
    S: TableStore + ?Sized,
{
    async fn on_page(&mut self, page: &Page) -> Result<ScanControl> {
        self.report.pages += 1;

        for item in &page.items {
            let key = self
                .schema
                .project(item)
                .map_err(|source| EngineError::MissingKeyAttribute {
                    table: self.table.to_string(),
                    source,
                })?;
            self.store.delete_item(self.table, key).await?;
            self.report.items += 1;
        }

        debug!(table = self.table, deleted = self.report.items, "Cleared page");
        Ok(ScanControl::Continue)
    }
}

/// Deletes every item of `table`, one at a time in scan order.
///
/// The first failed delete ends the operation; items already deleted stay
/// deleted.
pub async fn clear<S>(store: &S, table: &str) -> Result<TransferReport>
where
    S: TableStore + ?Sized,
{
    let schema = resolve_key_schema(store, table).await?;
    info!(table, "Clearing table");

    let mut eraser = Eraser {
        store,
        table,
        schema: &schema,
        report: TransferReport::new(table),
    };
    scan(store, table, &mut eraser).await?;

    let report = eraser.report;
    info!(table, deleted = report.items, "Table cleared");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fixtures::{item, store_with};
    use crate::store::memory::MemoryStore;
    use dynamoman_core::storage::StoreError;

    #[tokio::test]
    async fn test_clear_deletes_across_pages() {
        let store = store_with("orders-dev", 7, 3).await;

        let report = clear(&store, "orders-dev").await.unwrap();

        assert_eq!(report.items, 7);
        assert!(store.items("orders-dev").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let store = store_with("orders-dev", 2, 10).await;

        clear(&store, "orders-dev").await.unwrap();
        let again = clear(&store, "orders-dev").await.unwrap();

        assert_eq!(again.items, 0);
        assert!(store.items("orders-dev").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_composite_key_items_are_deleted() {
        let store = MemoryStore::new();
        store
            .create_table("events-dev", KeySchema::partition("id").with_sort_key("thumbnail"))
            .await;
        store
            .insert("events-dev", [item("1", "a"), item("1", "b")])
            .await
            .unwrap();

        let report = clear(&store, "events-dev").await.unwrap();

        assert_eq!(report.items, 2);
        assert!(store.items("events-dev").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_prior_deletes() {
        let store = store_with("orders-dev", 5, 10).await;
        store.fail_writes_after("orders-dev", 2).await;

        let result = clear(&store, "orders-dev").await;

        assert!(matches!(
            result,
            Err(EngineError::Store(StoreError::DeleteFailed { .. }))
        ));
        assert_eq!(store.items("orders-dev").await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_missing_table() {
        let store = MemoryStore::new();
        let result = clear(&store, "ghost").await;
        assert!(matches!(
            result,
            Err(EngineError::Store(StoreError::TableNotFound { .. }))
        ));
    }
}
