use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::{CommandStatus, default_db_path, open_db};

/// Show store statistics and recent import runs.
pub(crate) fn run_stats(db_path: Option<PathBuf>) -> Result<CommandStatus, CliError> {
    let db_path = db_path.unwrap_or_else(default_db_path);

    if !db_path.exists() {
        log::warn!("No catalog database found at {}", db_path.display());
        log::info!("Run 'shelfgap import <file> --franchise <name>' to create one.");
        return Ok(CommandStatus::Full);
    }

    let conn = open_db(&db_path)?;
    let stats = shelfgap_db::store_stats(&conn)
        .map_err(|e| CliError::database(format!("Failed to query store stats: {}", e)))?;

    log::info!(
        "{}",
        "Catalog Database Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database: {}", db_path.display());
    crate::log_blank();
    log::info!("  Franchises:     {:>8}", stats.franchises);
    log::info!("  Entries:        {:>8}", stats.entries);
    log::info!("  Confirmed:      {:>8}", stats.confirmed);
    log::info!("  Missing stubs:  {:>8}", stats.missing);
    log::info!("  Platforms:      {:>8}", stats.platforms);
    log::info!("  Open reviews:   {:>8}", stats.open_reviews);
    log::info!("  Import runs:    {:>8}", stats.imports);

    let logs = shelfgap_db::list_import_logs(&conn, Some(5))
        .map_err(|e| CliError::database(e.to_string()))?;
    if !logs.is_empty() {
        crate::log_blank();
        log::info!(
            "{}",
            "  Recent imports:".if_supports_color(Stdout, |t| t.bold()),
        );
        for log_entry in &logs {
            log::info!(
                "    {} {} [{}] — {} new, {} merged, {} skipped",
                log_entry.imported_at.if_supports_color(Stdout, |t| t.dimmed()),
                log_entry.source_name,
                log_entry.franchise_id.if_supports_color(Stdout, |t| t.cyan()),
                log_entry.accepted,
                log_entry.merged,
                log_entry.skipped,
            );
        }
    }

    Ok(CommandStatus::Full)
}
