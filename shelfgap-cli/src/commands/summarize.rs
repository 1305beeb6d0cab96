use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::{CommandStatus, default_db_path, open_db, resolve_franchise};

/// Show per-franchise counts, platform breakdown, and coverage.
pub(crate) fn run_summarize(
    franchise: String,
    json: bool,
    db_path: Option<PathBuf>,
) -> Result<CommandStatus, CliError> {
    let db_path = db_path.unwrap_or_else(default_db_path);
    let conn = open_db(&db_path)?;
    let franchise = resolve_franchise(&conn, &franchise)?;

    let summary = shelfgap_db::franchise_summary(&conn, &franchise.id)
        .map_err(|e| CliError::database(e.to_string()))?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary)
                .map_err(|e| CliError::other(e.to_string()))?,
        );
        return Ok(CommandStatus::Full);
    }

    log::info!(
        "{}",
        format!("{} ({})", summary.franchise_name, summary.franchise_id)
            .if_supports_color(Stdout, |t| t.bold()),
    );
    if let Some(total) = summary.estimated_total_games {
        log::info!("  Estimated total:  {:>6}", total);
    }
    log::info!("  Confirmed:        {:>6}", summary.confirmed);
    log::info!("  Missing:          {:>6}", summary.missing);
    if summary.cancelled > 0 {
        log::info!("  Cancelled:        {:>6}", summary.cancelled);
    }
    if summary.disputed > 0 {
        log::info!("  Disputed:         {:>6}", summary.disputed);
    }
    log::info!("  Coverage:         {:>6}", summary.coverage.to_string());

    if !summary.platforms.is_empty() {
        crate::log_blank();
        log::info!(
            "{}",
            "  Confirmed by platform:".if_supports_color(Stdout, |t| t.bold()),
        );
        for p in &summary.platforms {
            log::info!("    {:<20} {:>4}", p.platform, p.confirmed);
        }
    }

    Ok(CommandStatus::Full)
}
