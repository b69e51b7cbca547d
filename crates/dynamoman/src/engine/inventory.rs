use dynamoman_core::stage::filter_by_stage_suffix;
use dynamoman_core::storage::TableStore;
use tracing::debug;

use crate::error::Result;

/// Names of every table visible to the store.
pub async fn list_tables<S>(store: &S) -> Result<Vec<String>>
where
    S: TableStore + ?Sized,
{
    let names = store.list_tables().await?;
    debug!(count = names.len(), "Listed tables");
    Ok(names)
}

/// Tables processed by backup-all and restore-all.
///
/// With a stage, only tables whose name ends with it are kept.
pub async fn tables_for_sweep<S>(store: &S, stage: Option<&str>) -> Result<Vec<String>>
where
    S: TableStore + ?Sized,
{
    let names = list_tables(store).await?;
    Ok(match stage {
        Some(stage) => filter_by_stage_suffix(&names, stage),
        None => names,
    })
}
