use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use shelfgap_catalog::normalize::slugify;
use shelfgap_catalog::types::Franchise;

use crate::CliError;

use super::{CommandStatus, default_db_path, open_db, resolve_franchise};

/// Add or update a franchise.
pub(crate) fn run_franchise_add(
    name: String,
    total: Option<i64>,
    first_year: Option<i32>,
    db_path: Option<PathBuf>,
) -> Result<CommandStatus, CliError> {
    let db_path = db_path.unwrap_or_else(default_db_path);
    let conn = open_db(&db_path)?;

    // Reuse the existing id when the franchise is already known.
    let id = match shelfgap_db::find_franchise(&conn, &name)
        .map_err(|e| CliError::database(e.to_string()))?
    {
        Some(existing) => existing.id,
        None => slugify(&name),
    };

    shelfgap_db::upsert_franchise(
        &conn,
        &Franchise {
            id: id.clone(),
            name,
            estimated_total_games: total,
            first_game_year: first_year,
            created_at: String::new(),
            updated_at: String::new(),
        },
    )
    .map_err(|e| CliError::database(e.to_string()))?;

    log::info!(
        "{} Franchise saved ({})",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        id.if_supports_color(Stdout, |t| t.dimmed()),
    );
    Ok(CommandStatus::Full)
}

/// List all franchises with entry counts.
pub(crate) fn run_franchise_list(db_path: Option<PathBuf>) -> Result<CommandStatus, CliError> {
    let db_path = db_path.unwrap_or_else(default_db_path);
    let conn = open_db(&db_path)?;

    let franchises =
        shelfgap_db::list_franchises(&conn).map_err(|e| CliError::database(e.to_string()))?;

    if franchises.is_empty() {
        log::info!("No franchises yet.");
        log::info!("Run 'shelfgap import <file> --franchise <name>' to create one.");
        return Ok(CommandStatus::Full);
    }

    log::info!("{}", "Franchises:".if_supports_color(Stdout, |t| t.bold()));
    for f in &franchises {
        let summary = shelfgap_db::franchise_summary(&conn, &f.id)
            .map_err(|e| CliError::database(e.to_string()))?;
        log::info!(
            "  {} {} — {} confirmed, {} missing ({})",
            f.name.if_supports_color(Stdout, |t| t.bold()),
            format!("({})", f.id).if_supports_color(Stdout, |t| t.dimmed()),
            summary.confirmed,
            summary.missing,
            summary.coverage,
        );
    }
    Ok(CommandStatus::Full)
}

/// Remove a franchise, optionally purging its entries first.
pub(crate) fn run_franchise_remove(
    name: String,
    purge_entries: bool,
    db_path: Option<PathBuf>,
) -> Result<CommandStatus, CliError> {
    let db_path = db_path.unwrap_or_else(default_db_path);
    let conn = open_db(&db_path)?;
    let franchise = resolve_franchise(&conn, &name)?;

    if purge_entries {
        let removed = shelfgap_db::delete_franchise_entries(&conn, &franchise.id)
            .map_err(|e| CliError::database(e.to_string()))?;
        if removed > 0 {
            log::info!("Deleted {} entries.", removed);
        }
    }

    shelfgap_db::delete_franchise(&conn, &franchise.id).map_err(|e| match e {
        shelfgap_db::OperationError::Validation { reason, .. } => CliError::usage(format!(
            "Cannot remove '{}': {reason}. Re-run with --purge-entries.",
            franchise.name,
        )),
        other => CliError::database(other.to_string()),
    })?;

    log::info!(
        "{} Franchise '{}' removed.",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        franchise.name,
    );
    Ok(CommandStatus::Full)
}
