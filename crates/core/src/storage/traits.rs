use async_trait::async_trait;

use crate::item::Item;
use crate::schema::KeySchema;

use super::{Page, Result};

/// Request/response access to a remote table store.
///
/// Each call is one round trip; callers await it before issuing the next.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Lists every table name visible to the account or endpoint.
    async fn list_tables(&self) -> Result<Vec<String>>;

    /// Describes the primary key schema of a table.
    async fn describe_key_schema(&self, table: &str) -> Result<KeySchema>;

    /// Fetches one scan page, resuming after `exclusive_start_key` if given.
    async fn scan_page(&self, table: &str, exclusive_start_key: Option<Item>) -> Result<Page>;

    /// Creates the item, or fully replaces the item with the same key.
    async fn put_item(&self, table: &str, item: Item) -> Result<()>;

    /// Deletes the item addressed by `key`, which holds only key attributes.
    async fn delete_item(&self, table: &str, key: Item) -> Result<()>;
}
