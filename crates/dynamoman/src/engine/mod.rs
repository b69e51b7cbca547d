//! Table operations.
//!
//! Every operation takes the store by reference and runs strictly
//! sequentially: one store request is in flight at a time.

mod backup;
mod clear;
mod copy;
mod inventory;
mod report;
mod resolver;
mod restore;
mod scanner;

pub use backup::backup;
pub use clear::clear;
pub use copy::{copy_stage, copy_table};
pub use inventory::{list_tables, tables_for_sweep};
pub use report::TransferReport;
pub use resolver::resolve_key_schema;
pub use restore::restore;
pub use scanner::{scan, PageHandler, ScanControl, ScanSummary};
