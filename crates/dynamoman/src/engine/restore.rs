use dynamoman_core::policy::Step;
use dynamoman_core::snapshot::decode;
use dynamoman_core::storage::TableStore;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{info, warn};

use super::report::TransferReport;
use super::resolver::resolve_key_schema;
use crate::config::EngineOptions;
use crate::error::{EngineError, Result};

/// Loads a snapshot from `source` into `table`.
///
/// Items are upserted one at a time with their full content, in snapshot
/// order. Under the skip policy a snapshot that cannot be decoded restores
/// nothing and is not an error.
pub async fn restore<S, R>(
    store: &S,
    table: &str,
    source: &mut R,
    options: &EngineOptions,
) -> Result<TransferReport>
where
    S: TableStore + ?Sized,
    R: AsyncRead + Unpin + Send,
{
    let schema = resolve_key_schema(store, table).await?;
    info!(table, format = %options.format, "Restoring table");

    let mut bytes = Vec::new();
    source
        .read_to_end(&mut bytes)
        .await
        .map_err(|e| EngineError::io(table, e))?;

    let mut report = TransferReport::new(table);

    let decoded = options
        .on_decode_error
        .resolve(decode(options.format, &bytes))
        .map_err(|source| EngineError::Snapshot {
            table: table.to_string(),
            source,
        })?;

    let items = match decoded {
        Step::Done(items) => items,
        Step::Skipped { reason } => {
            warn!(table, %reason, "Snapshot could not be decoded, restoring no items");
            report.skipped.push(reason);
            Vec::new()
        }
    };

    for item in items {
        if let Err(e) = schema.project(&item) {
            warn!(table, error = %e, "Restoring item without a complete key");
        }
        store.put_item(table, item).await?;
        report.items += 1;
    }

    info!(table, restored = report.items, "Restore finished");
    Ok(report)
}
