use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use shelfgap_catalog::types::EntryStatus;

use crate::CliError;

use super::{CommandStatus, default_db_path, open_db, resolve_franchise, truncate_str};

/// Search entries in a franchise by title.
pub(crate) fn run_lookup(
    franchise: String,
    query: String,
    limit: usize,
    db_path: Option<PathBuf>,
) -> Result<CommandStatus, CliError> {
    let db_path = db_path.unwrap_or_else(default_db_path);
    let conn = open_db(&db_path)?;
    let franchise = resolve_franchise(&conn, &franchise)?;

    let mut matches = shelfgap_db::find_by_title(&conn, &franchise.id, &query)
        .map_err(|e| CliError::database(e.to_string()))?;
    let total = matches.len();
    matches.truncate(limit);

    if matches.is_empty() {
        log::info!("No entries matching '{}' in {}.", query, franchise.name);
        return Ok(CommandStatus::Full);
    }

    log::info!(
        "{}",
        format!("{} match(es) in {}:", total, franchise.name)
            .if_supports_color(Stdout, |t| t.bold()),
    );
    for entry in &matches {
        let year = entry
            .release_year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "????".to_string());
        let platforms = if entry.platforms.is_empty() {
            "unknown platform".to_string()
        } else {
            entry.platforms.join(", ")
        };
        let status_tag = match entry.status {
            EntryStatus::Confirmed => String::new(),
            other => format!(" [{}]", other.as_str()),
        };
        log::info!(
            "  {} ({}) - {}{}",
            truncate_str(&entry.title, 60).if_supports_color(Stdout, |t| t.bold()),
            year,
            platforms.if_supports_color(Stdout, |t| t.cyan()),
            status_tag.if_supports_color(Stdout, |t| t.yellow()),
        );
        log::debug!("    {}", entry.id);
        if let Some(ref base) = entry.edition_of {
            log::info!(
                "    {} edition of {}",
                "\u{21B3}".if_supports_color(Stdout, |t| t.dimmed()),
                base.if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
    }
    if total > limit {
        log::info!("  ... (showing first {}, use --limit to see more)", limit);
    }

    Ok(CommandStatus::Full)
}
