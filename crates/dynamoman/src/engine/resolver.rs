use dynamoman_core::schema::KeySchema;
use dynamoman_core::storage::TableStore;
use tracing::debug;

use crate::error::Result;

/// Fetches the primary key definition of `table`.
///
/// Called once per operation; the schema is never cached across tables.
pub async fn resolve_key_schema<S>(store: &S, table: &str) -> Result<KeySchema>
where
    S: TableStore + ?Sized,
{
    let schema = store.describe_key_schema(table).await?;
    debug!(table, key = ?schema.attribute_names(), "Resolved key schema");
    Ok(schema)
}
