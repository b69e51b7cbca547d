use async_trait::async_trait;
use dynamoman_core::item::Item;
use dynamoman_core::policy::Step;
use dynamoman_core::snapshot::{encode_page, SnapshotError, SnapshotFormat};
use dynamoman_core::storage::{Page, TableStore};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{info, warn};

use super::report::TransferReport;
use super::scanner::{scan, PageHandler, ScanControl};
use crate::config::EngineOptions;
use crate::error::{EngineError, Result};

/// Turns one page of items into snapshot bytes.
type PageEncoder = fn(SnapshotFormat, &[Item]) -> std::result::Result<Vec<u8>, SnapshotError>;

struct BackupWriter<'a, W> {
    table: &'a str,
    sink: &'a mut W,
    options: &'a EngineOptions,
    encode: PageEncoder,
    report: TransferReport,
}

#[async_trait]
impl<'a, W> PageHandler for BackupWriter<'a, W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn on_page(&mut self, page: &Page) -> Result<ScanControl> {
        self.report.pages += 1;

        let encoded = self
            .options
            .on_encode_error
            .resolve((self.encode)(self.options.format, &page.items))
            .map_err(|source| EngineError::Snapshot {
                table: self.table.to_string(),
                source,
            })?;

        match encoded {
            Step::Done(bytes) => {
                self.sink
                    .write_all(&bytes)
                    .await
                    .map_err(|e| EngineError::io(self.table, e))?;
                self.report.items += page.len();
            }
            Step::Skipped { reason } => {
                warn!(
                    table = self.table,
                    page = self.report.pages,
                    %reason,
                    "Skipping page that could not be encoded"
                );
                self.report.skipped.push(reason);
            }
        }

        Ok(ScanControl::Continue)
    }
}

/// Writes every item of `table` to `sink` in the configured snapshot format.
///
/// Pages are encoded and written as they arrive. In the fragments format each
/// page becomes its own JSON array, so a table spanning several pages yields
/// concatenated arrays.
pub async fn backup<S, W>(
    store: &S,
    table: &str,
    sink: &mut W,
    options: &EngineOptions,
) -> Result<TransferReport>
where
    S: TableStore + ?Sized,
    W: AsyncWrite + Unpin + Send,
{
    backup_with(store, table, sink, options, encode_page).await
}

async fn backup_with<S, W>(
    store: &S,
    table: &str,
    sink: &mut W,
    options: &EngineOptions,
    encode: PageEncoder,
) -> Result<TransferReport>
where
    S: TableStore + ?Sized,
    W: AsyncWrite + Unpin + Send,
{
    info!(table, format = %options.format, "Backing up table");

    let mut writer = BackupWriter {
        table,
        sink,
        options,
        encode,
        report: TransferReport::new(table),
    };
    scan(store, table, &mut writer).await?;

    writer
        .sink
        .flush()
        .await
        .map_err(|e| EngineError::io(table, e))?;

    let report = writer.report;
    info!(
        table,
        items = report.items,
        pages = report.pages,
        skipped = report.skipped.len(),
        "Backup finished"
    );
    Ok(report)
}
