//! Sequential paginated scanning.

use async_trait::async_trait;
use dynamoman_core::storage::{Page, TableStore};
use tracing::debug;

use crate::error::Result;

/// Whether a scan should fetch the next page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanControl {
    Continue,
    Stop,
}

/// Totals of a finished scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub pages: usize,
    pub items: usize,
    /// Whether the handler ended the scan before the last page.
    pub stopped: bool,
}

/// Receives the pages of a scan, in order.
#[async_trait]
pub trait PageHandler: Send {
    async fn on_page(&mut self, page: &Page) -> Result<ScanControl>;
}

/// Scans every page of `table`, handing each one to `handler`.
///
/// The next page is requested only after the handler returned for the
/// previous one. The scan ends on the first page without a cursor, when the
/// handler returns [`ScanControl::Stop`], or on the first error.
pub async fn scan<S, H>(store: &S, table: &str, handler: &mut H) -> Result<ScanSummary>
where
    S: TableStore + ?Sized,
    H: PageHandler + ?Sized,
{
    let mut summary = ScanSummary::default();
    let mut cursor = None;

    loop {
        let page = store.scan_page(table, cursor.take()).await?;
        summary.pages += 1;
        summary.items += page.len();
        debug!(table, page = summary.pages, items = page.len(), "Scanned page");

        if handler.on_page(&page).await? == ScanControl::Stop {
            summary.stopped = true;
            break;
        }

        match page.last_evaluated_key {
            Some(key) => cursor = Some(key),
            None => break,
        }
    }

    Ok(summary)
}
