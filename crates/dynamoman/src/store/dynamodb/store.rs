//! DynamoDB table store implementation.

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use dynamoman_core::item::Item;
use dynamoman_core::schema::KeySchema;
use dynamoman_core::storage::{Page, Result, StoreError, TableStore};

use super::client::create_client;
use super::conversions::{item_from_sdk, item_to_sdk, key_schema_from_sdk};
use super::error::{
    map_delete_item_error, map_describe_table_error, map_list_tables_error, map_put_item_error,
    map_scan_error,
};
use crate::config::AwsConfig;

/// Table store backed by a DynamoDB client.
///
/// The client is created once and shared by every operation of the run.
#[derive(Debug, Clone)]
pub struct DynamoDbStore {
    client: Client,
}

impl DynamoDbStore {
    /// Creates a store from an existing client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Creates a store for the configured endpoint.
    pub async fn connect(config: &AwsConfig) -> Self {
        Self::new(create_client(config).await)
    }
}

#[async_trait]
impl TableStore for DynamoDbStore {
    async fn list_tables(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut start = None;

        loop {
            let output = self
                .client
                .list_tables()
                .set_exclusive_start_table_name(start.take())
                .send()
                .await
                .map_err(map_list_tables_error)?;

            names.extend(output.table_names.unwrap_or_default());

            match output.last_evaluated_table_name {
                Some(last) => start = Some(last),
                None => break,
            }
        }

        Ok(names)
    }

    async fn describe_key_schema(&self, table: &str) -> Result<KeySchema> {
        let output = self
            .client
            .describe_table()
            .table_name(table)
            .send()
            .await
            .map_err(|e| map_describe_table_error(e, table))?;

        let description = output.table.ok_or_else(|| StoreError::SchemaUnavailable {
            table: table.to_string(),
            reason: "response has no table description".to_string(),
        })?;

        key_schema_from_sdk(table, description.key_schema())
    }

    async fn scan_page(&self, table: &str, exclusive_start_key: Option<Item>) -> Result<Page> {
        let output = self
            .client
            .scan()
            .table_name(table)
            .set_exclusive_start_key(exclusive_start_key.map(item_to_sdk))
            .send()
            .await
            .map_err(|e| map_scan_error(e, table))?;

        let unreadable = |e: super::error::UnknownAttributeValue| StoreError::ScanFailed {
            table: table.to_string(),
            reason: e.to_string(),
        };

        let items = output
            .items
            .unwrap_or_default()
            .into_iter()
            .map(item_from_sdk)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(unreadable)?;

        let last_evaluated_key = output
            .last_evaluated_key
            .map(item_from_sdk)
            .transpose()
            .map_err(unreadable)?;

        Ok(Page::new(items, last_evaluated_key))
    }

    async fn put_item(&self, table: &str, item: Item) -> Result<()> {
        self.client
            .put_item()
            .table_name(table)
            .set_item(Some(item_to_sdk(item)))
            .send()
            .await
            .map_err(|e| map_put_item_error(e, table))?;

        Ok(())
    }

    async fn delete_item(&self, table: &str, key: Item) -> Result<()> {
        self.client
            .delete_item()
            .table_name(table)
            .set_key(Some(item_to_sdk(key)))
            .send()
            .await
            .map_err(|e| map_delete_item_error(e, table))?;

        Ok(())
    }
}
