//! Runs the selected action against a table store.

use std::io::IsTerminal;

use dialoguer::Confirm;
use dynamoman_core::storage::TableStore;
use tokio::fs::File;
use tokio::io::BufWriter;
use tracing::warn;

use crate::cli::{Action, Global};
use crate::config::Config;
use crate::engine::{self, TransferReport};
use crate::error::{EngineError, Result};
use crate::prelude::*;

/// Main entry point for an action.
pub async fn run<S>(store: &S, action: Action, config: &Config, global: &Global) -> Result<()>
where
    S: TableStore + ?Sized,
{
    match action {
        Action::ListTables => display_tables(store).await,
        Action::Clear(table) => run_clear(store, &table, config, global).await,
        Action::Backup(table) => {
            let report = backup_file(store, &table, config).await?;
            print_report(global, "Backed up", &report);
            Ok(())
        }
        Action::Restore(table) => {
            let report = restore_file(store, &table, config).await?;
            print_report(global, "Restored", &report);
            Ok(())
        }
        Action::BackupAll => run_backup_all(store, config, global).await,
        Action::RestoreAll => run_restore_all(store, config, global).await,
        Action::CopyStage { from, to } => run_copy_stage(store, &from, &to, config, global).await,
    }
}

async fn display_tables<S>(store: &S) -> Result<()>
where
    S: TableStore + ?Sized,
{
    let names = engine::list_tables(store).await?;
    aprintln!("{}", format_listing(&names));
    Ok(())
}

/// `Tables:`, a blank line, then one name per line.
fn format_listing(names: &[String]) -> String {
    let mut listing = String::from("Tables:\n");
    for name in names {
        listing.push('\n');
        listing.push_str(name);
    }
    listing
}

/// Prompts only when asked to and when someone can answer.
fn needs_confirmation(force: bool, interactive: bool) -> bool {
    !force && interactive
}

async fn run_clear<S>(store: &S, table: &str, config: &Config, global: &Global) -> Result<()>
where
    S: TableStore + ?Sized,
{
    if !global.is_silent() {
        aprintln!("{} {}", p_b("Target:"), config.aws.target_display());
        aprintln!("{} {}", p_b("Table:"), table);
        aprintln!();
    }

    let interactive = std::io::stdin().is_terminal();
    if !config.force && !interactive {
        warn!(table, "stdin is not a terminal, clearing without confirmation");
    }

    if needs_confirmation(config.force, interactive) {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete every item of '{}'? ALL DATA WILL BE LOST",
                table
            ))
            .default(false)
            .interact()
            .map_err(|e| EngineError::Prompt(e.to_string()))?;

        if !confirmed {
            return Err(EngineError::UserCancelled);
        }
    }

    let report = engine::clear(store, table).await?;
    print_report(global, "Cleared", &report);
    Ok(())
}

async fn run_backup_all<S>(store: &S, config: &Config, global: &Global) -> Result<()>
where
    S: TableStore + ?Sized,
{
    let tables = engine::tables_for_sweep(store, config.stage.as_deref()).await?;
    print_sweep_header(global, "Backing up", &tables, config);

    for table in &tables {
        let report = backup_file(store, table, config).await?;
        print_report(global, "Backed up", &report);
    }

    Ok(())
}

async fn run_restore_all<S>(store: &S, config: &Config, global: &Global) -> Result<()>
where
    S: TableStore + ?Sized,
{
    let tables = engine::tables_for_sweep(store, config.stage.as_deref()).await?;
    print_sweep_header(global, "Restoring", &tables, config);

    for table in &tables {
        let report = restore_file(store, table, config).await?;
        print_report(global, "Restored", &report);
    }

    Ok(())
}

async fn run_copy_stage<S>(
    store: &S,
    from: &str,
    to: &str,
    config: &Config,
    global: &Global,
) -> Result<()>
where
    S: TableStore + ?Sized,
{
    if !global.is_silent() {
        aprintln!("{} {}", p_b("Target:"), config.aws.target_display());
        aprintln!("{} {} -> {}", p_b("Stages:"), from, to);
        aprintln!();
    }

    let reports = engine::copy_stage(store, from, to, config.rewrite_paths.clone()).await?;

    for report in &reports {
        print_report(global, "Copied", report);
    }
    if reports.is_empty() && !global.is_silent() {
        aprintln!("{}", p_y("No tables to copy."));
    }

    Ok(())
}

/// Backs `table` up to its snapshot file, replacing any previous one.
async fn backup_file<S>(store: &S, table: &str, config: &Config) -> Result<TransferReport>
where
    S: TableStore + ?Sized,
{
    let path = config.options.format.path_for(&config.snapshot_dir, table);
    let file = File::create(&path)
        .await
        .map_err(|e| EngineError::io(table, e))?;
    let mut sink = BufWriter::new(file);

    engine::backup(store, table, &mut sink, &config.options).await
}

/// Restores `table` from its snapshot file. A missing file is fatal.
async fn restore_file<S>(store: &S, table: &str, config: &Config) -> Result<TransferReport>
where
    S: TableStore + ?Sized,
{
    let path = config.options.format.path_for(&config.snapshot_dir, table);
    let mut source = File::open(&path)
        .await
        .map_err(|e| EngineError::io(table, e))?;

    engine::restore(store, table, &mut source, &config.options).await
}

fn print_sweep_header(global: &Global, verb: &str, tables: &[String], config: &Config) {
    if global.is_silent() {
        return;
    }
    aprintln!("{} {}", p_b("Target:"), config.aws.target_display());
    aprintln!("{} {}", p_b("Directory:"), config.snapshot_dir.display());
    aprintln!("{} {} tables", p_c(verb), tables.len());
    aprintln!();
}

fn print_report(global: &Global, verb: &str, report: &TransferReport) {
    if global.is_silent() {
        return;
    }
    if report.is_complete() {
        aprintln!("{} {}", p_g(verb), report);
    } else {
        aprintln!("{} {}", p_y(verb), report);
        for reason in &report.skipped {
            aprintln!("  {} {}", p_r("skipped:"), reason);
        }
    }
}
