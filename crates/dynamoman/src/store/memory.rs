//! In-memory table store implementation.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dynamoman_core::item::Item;
use dynamoman_core::schema::KeySchema;
use dynamoman_core::storage::{Page, Result, StoreError, TableStore};
use tokio::sync::RwLock;

/// Default number of items per scan page.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// In-memory table store for testing.
///
/// Items are ordered by their encoded primary key. A scan page hands back a
/// cursor whenever it is full, so a table whose size is a multiple of the
/// page size ends with an empty page, as DynamoDB can.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    tables: Arc<RwLock<BTreeMap<String, MemoryTable>>>,
    faults: Arc<RwLock<Faults>>,
    page_size: usize,
    scan_requests: Arc<AtomicUsize>,
}

#[derive(Debug)]
struct MemoryTable {
    schema: KeySchema,
    items: BTreeMap<String, Item>,
}

/// Remaining successful calls per table before a failure is injected.
#[derive(Debug, Default)]
struct Faults {
    scans: HashMap<String, usize>,
    writes: HashMap<String, usize>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(BTreeMap::new())),
            faults: Arc::new(RwLock::new(Faults::default())),
            page_size: DEFAULT_PAGE_SIZE,
            scan_requests: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Sets the number of items per scan page (at least one).
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Creates an empty table, replacing any table with the same name.
    pub async fn create_table(&self, table: &str, schema: KeySchema) {
        self.tables.write().await.insert(
            table.to_string(),
            MemoryTable {
                schema,
                items: BTreeMap::new(),
            },
        );
    }

    /// Puts every item into `table`.
    pub async fn insert(&self, table: &str, items: impl IntoIterator<Item = Item>) -> Result<()> {
        for item in items {
            self.put_item(table, item).await?;
        }
        Ok(())
    }

    /// All items of `table` in key order.
    pub async fn items(&self, table: &str) -> Result<Vec<Item>> {
        let tables = self.tables.read().await;
        let table = lookup(&tables, table)?;
        Ok(table.items.values().cloned().collect())
    }

    /// Makes scans of `table` fail after `pages` successful pages.
    pub async fn fail_scans_after(&self, table: &str, pages: usize) {
        self.faults
            .write()
            .await
            .scans
            .insert(table.to_string(), pages);
    }

    /// Makes puts and deletes on `table` fail after `writes` successful ones.
    pub async fn fail_writes_after(&self, table: &str, writes: usize) {
        self.faults
            .write()
            .await
            .writes
            .insert(table.to_string(), writes);
    }

    /// Number of scan requests served so far.
    pub fn scan_requests(&self) -> usize {
        self.scan_requests.load(Ordering::SeqCst)
    }

    async fn take_budget(&self, table: &str, scans: bool) -> bool {
        let mut faults = self.faults.write().await;
        let budgets = if scans {
            &mut faults.scans
        } else {
            &mut faults.writes
        };
        match budgets.get_mut(table) {
            Some(0) => false,
            Some(remaining) => {
                *remaining -= 1;
                true
            }
            None => true,
        }
    }
}

fn lookup<'a>(tables: &'a BTreeMap<String, MemoryTable>, table: &str) -> Result<&'a MemoryTable> {
    tables.get(table).ok_or_else(|| StoreError::TableNotFound {
        table: table.to_string(),
    })
}

fn lookup_mut<'a>(
    tables: &'a mut BTreeMap<String, MemoryTable>,
    table: &str,
) -> Result<&'a mut MemoryTable> {
    tables.get_mut(table).ok_or_else(|| StoreError::TableNotFound {
        table: table.to_string(),
    })
}

/// Encodes the key attributes of `item` in schema order.
fn encode_key(schema: &KeySchema, item: &Item) -> std::result::Result<String, String> {
    let key = schema.project(item).map_err(|e| e.to_string())?;
    let values: Vec<_> = schema
        .attribute_names()
        .into_iter()
        .filter_map(|name| key.get(name))
        .collect();
    serde_json::to_string(&values).map_err(|e| e.to_string())
}

#[async_trait]
impl TableStore for MemoryStore {
    async fn list_tables(&self) -> Result<Vec<String>> {
        Ok(self.tables.read().await.keys().cloned().collect())
    }

    async fn describe_key_schema(&self, table: &str) -> Result<KeySchema> {
        let tables = self.tables.read().await;
        Ok(lookup(&tables, table)?.schema.clone())
    }

    async fn scan_page(&self, table: &str, exclusive_start_key: Option<Item>) -> Result<Page> {
        self.scan_requests.fetch_add(1, Ordering::SeqCst);

        if !self.take_budget(table, true).await {
            return Err(StoreError::ScanFailed {
                table: table.to_string(),
                reason: "injected scan failure".to_string(),
            });
        }

        let tables = self.tables.read().await;
        let memory_table = lookup(&tables, table)?;

        let lower = match &exclusive_start_key {
            Some(key) => Bound::Excluded(encode_key(&memory_table.schema, key).map_err(
                |reason| StoreError::ScanFailed {
                    table: table.to_string(),
                    reason,
                },
            )?),
            None => Bound::Unbounded,
        };

        let items: Vec<Item> = memory_table
            .items
            .range((lower, Bound::Unbounded))
            .take(self.page_size)
            .map(|(_, item)| item.clone())
            .collect();

        let last_evaluated_key = if items.len() == self.page_size {
            items
                .last()
                .and_then(|item| memory_table.schema.project(item).ok())
        } else {
            None
        };

        Ok(Page::new(items, last_evaluated_key))
    }

    async fn put_item(&self, table: &str, item: Item) -> Result<()> {
        let failed = |reason: String| StoreError::PutFailed {
            table: table.to_string(),
            reason,
        };

        if !self.take_budget(table, false).await {
            return Err(failed("injected write failure".to_string()));
        }

        let mut tables = self.tables.write().await;
        let memory_table = lookup_mut(&mut tables, table)?;
        let key = encode_key(&memory_table.schema, &item).map_err(failed)?;
        memory_table.items.insert(key, item);
        Ok(())
    }

    async fn delete_item(&self, table: &str, key: Item) -> Result<()> {
        let failed = |reason: String| StoreError::DeleteFailed {
            table: table.to_string(),
            reason,
        };

        if !self.take_budget(table, false).await {
            return Err(failed("injected write failure".to_string()));
        }

        let mut tables = self.tables.write().await;
        let memory_table = lookup_mut(&mut tables, table)?;
        if key.len() != memory_table.schema.attribute_names().len() {
            return Err(failed(
                "the provided key does not match the key schema".to_string(),
            ));
        }
        let encoded = encode_key(&memory_table.schema, &key).map_err(failed)?;
        memory_table.items.remove(&encoded);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynamoman_core::item::AttributeValue;

    fn item(pk: &str, sk: &str, data: &str) -> Item {
        [
            ("PK".to_string(), AttributeValue::S(pk.to_string())),
            ("SK".to_string(), AttributeValue::S(sk.to_string())),
            ("data".to_string(), AttributeValue::S(data.to_string())),
        ]
        .into_iter()
        .collect()
    }

    async fn store_with_items(page_size: usize, count: usize) -> MemoryStore {
        let store = MemoryStore::new().with_page_size(page_size);
        store
            .create_table("orders", KeySchema::partition("PK").with_sort_key("SK"))
            .await;
        store
            .insert(
                "orders",
                (0..count).map(|i| item(&format!("p{i:02}"), "s", "x")),
            )
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_list_tables_sorted() {
        let store = MemoryStore::new();
        store.create_table("b", KeySchema::partition("id")).await;
        store.create_table("a", KeySchema::partition("id")).await;

        assert_eq!(store.list_tables().await.unwrap(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_describe_missing_table() {
        let store = MemoryStore::new();
        let result = store.describe_key_schema("missing").await;
        assert!(matches!(result, Err(StoreError::TableNotFound { .. })));
    }

    #[tokio::test]
    async fn test_put_replaces_item_with_same_key() {
        let store = store_with_items(10, 0).await;
        store.put_item("orders", item("p", "s", "old")).await.unwrap();
        store.put_item("orders", item("p", "s", "new")).await.unwrap();

        let items = store.items("orders").await.unwrap();
        assert_eq!(items, vec![item("p", "s", "new")]);
    }

    #[tokio::test]
    async fn test_put_without_key_attribute_fails() {
        let store = store_with_items(10, 0).await;
        let mut keyless = item("p", "s", "x");
        keyless.remove("SK");

        let result = store.put_item("orders", keyless).await;
        assert!(matches!(result, Err(StoreError::PutFailed { .. })));
    }

    #[tokio::test]
    async fn test_scan_pages_until_cursor_is_exhausted() {
        let store = store_with_items(2, 5).await;

        let first = store.scan_page("orders", None).await.unwrap();
        assert_eq!(first.len(), 2);
        let second = store
            .scan_page("orders", first.last_evaluated_key.clone())
            .await
            .unwrap();
        assert_eq!(second.len(), 2);
        let third = store
            .scan_page("orders", second.last_evaluated_key.clone())
            .await
            .unwrap();
        assert_eq!(third.len(), 1);
        assert!(third.is_last());
        assert_eq!(store.scan_requests(), 3);
    }

    #[tokio::test]
    async fn test_full_last_page_is_followed_by_empty_page() {
        let store = store_with_items(2, 2).await;

        let first = store.scan_page("orders", None).await.unwrap();
        assert!(!first.is_last());
        let second = store
            .scan_page("orders", first.last_evaluated_key)
            .await
            .unwrap();
        assert!(second.is_empty());
        assert!(second.is_last());
    }

    #[tokio::test]
    async fn test_delete_requires_exact_key() {
        let store = store_with_items(10, 1).await;
        let full_item = item("p00", "s", "x");

        let result = store.delete_item("orders", full_item.clone()).await;
        assert!(matches!(result, Err(StoreError::DeleteFailed { .. })));

        let key = KeySchema::partition("PK")
            .with_sort_key("SK")
            .project(&full_item)
            .unwrap();
        store.delete_item("orders", key.clone()).await.unwrap();
        assert!(store.items("orders").await.unwrap().is_empty());

        // Deleting an absent key is not an error.
        store.delete_item("orders", key).await.unwrap();
    }

    #[tokio::test]
    async fn test_injected_failures() {
        let store = store_with_items(1, 3).await;
        store.fail_scans_after("orders", 1).await;
        store.fail_writes_after("orders", 0).await;

        let first = store.scan_page("orders", None).await.unwrap();
        let second = store.scan_page("orders", first.last_evaluated_key).await;
        assert!(matches!(second, Err(StoreError::ScanFailed { .. })));

        let put = store.put_item("orders", item("q", "s", "x")).await;
        assert!(matches!(put, Err(StoreError::PutFailed { .. })));
    }
}
