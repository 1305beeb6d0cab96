use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::{CommandStatus, default_db_path, open_db};

/// List unresolved review items.
pub(crate) fn run_review_list(
    limit: u32,
    db_path: Option<PathBuf>,
) -> Result<CommandStatus, CliError> {
    let db_path = db_path.unwrap_or_else(default_db_path);
    let conn = open_db(&db_path)?;

    let items = shelfgap_db::list_open_review_items(&conn, Some(limit))
        .map_err(|e| CliError::database(e.to_string()))?;

    if items.is_empty() {
        log::info!("No unresolved review items.");
        return Ok(CommandStatus::Full);
    }

    log::info!(
        "{}",
        format!("{} unresolved review item(s):", items.len())
            .if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    for item in &items {
        let year = item
            .reference_year
            .map(|y| format!(" ({y})"))
            .unwrap_or_default();
        log::info!(
            "  #{} {}{} [{}]",
            format!("{}", item.id).if_supports_color(Stdout, |t| t.bold()),
            item.reference_title,
            year.if_supports_color(Stdout, |t| t.dimmed()),
            item.franchise_id.if_supports_color(Stdout, |t| t.cyan()),
        );
        for candidate in &item.candidates {
            log::info!(
                "    {} {}",
                "\u{25B6}".if_supports_color(Stdout, |t| t.blue()),
                candidate,
            );
        }
        crate::log_blank();
    }

    log::info!("Resolve with: shelfgap review resolve <id> --entry <entry-id> | --missing");
    Ok(CommandStatus::Full)
}

/// Resolve a review item with a chosen entry or as genuinely missing.
pub(crate) fn run_review_resolve(
    id: i64,
    entry: Option<String>,
    missing: bool,
    db_path: Option<PathBuf>,
) -> Result<CommandStatus, CliError> {
    let db_path = db_path.unwrap_or_else(default_db_path);
    let conn = open_db(&db_path)?;

    let resolution = match (entry, missing) {
        (Some(entry_id), false) => {
            // The chosen entry has to exist; a typo here would record a
            // resolution pointing at nothing.
            shelfgap_db::get_entry(&conn, &entry_id)
                .map_err(|e| CliError::database(e.to_string()))?;
            entry_id
        }
        (None, true) => "missing".to_string(),
        _ => {
            return Err(CliError::usage(
                "Specify exactly one of --entry <entry-id> or --missing",
            ));
        }
    };

    shelfgap_db::resolve_review_item(&conn, id, &resolution)
        .map_err(|e| CliError::database(e.to_string()))?;

    log::info!(
        "{} Review item #{} resolved as {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        id,
        resolution.if_supports_color(Stdout, |t| t.bold()),
    );
    Ok(CommandStatus::Full)
}
