use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use shelfgap_catalog::normalize::slugify;
use shelfgap_catalog::types::Franchise;
use shelfgap_catalog::vocab::PlatformVocab;
use shelfgap_import::{LineOutcome, LogProgress, import_list, log_import};

use crate::CliError;

use super::{CommandStatus, default_db_path, open_db};

/// Import a franchise list file into the catalog database.
pub(crate) fn run_import(
    file: PathBuf,
    franchise: String,
    vocab_dir: Option<PathBuf>,
    db_path: Option<PathBuf>,
) -> Result<CommandStatus, CliError> {
    let db_path = db_path.unwrap_or_else(default_db_path);
    let conn = open_db(&db_path)?;

    let vocab = match vocab_dir {
        Some(dir) => PlatformVocab::with_overrides(&dir)
            .map_err(|e| CliError::vocab(e.to_string()))?,
        None => PlatformVocab::builtin(),
    };

    // Find the franchise, creating it on first use.
    let franchise_id = match shelfgap_db::find_franchise(&conn, &franchise)
        .map_err(|e| CliError::database(e.to_string()))?
    {
        Some(f) => f.id,
        None => {
            let id = slugify(&franchise);
            shelfgap_db::upsert_franchise(
                &conn,
                &Franchise {
                    id: id.clone(),
                    name: franchise.clone(),
                    estimated_total_games: None,
                    first_game_year: None,
                    created_at: String::new(),
                    updated_at: String::new(),
                },
            )
            .map_err(|e| CliError::database(e.to_string()))?;
            log::info!(
                "Created franchise {} ({})",
                franchise.if_supports_color(Stdout, |t| t.bold()),
                id.if_supports_color(Stdout, |t| t.dimmed()),
            );
            id
        }
    };

    let text = std::fs::read_to_string(&file)?;
    let source_name = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("list")
        .to_string();

    log::info!(
        "{}",
        format!("Importing {} into {}", file.display(), franchise_id)
            .if_supports_color(Stdout, |t| t.bold()),
    );

    let outcome = import_list(&conn, &franchise_id, &text, &vocab, Some(&LogProgress))
        .map_err(|e| CliError::database(e.to_string()))?;

    if let Err(e) = log_import(&conn, &franchise_id, &source_name, &outcome.stats) {
        log::warn!("Failed to log import: {}", e);
    }

    // Per-line skip report: skipped lines are never silently dropped.
    for line in &outcome.lines {
        if let LineOutcome::Skipped { reason } = &line.outcome {
            log::warn!(
                "  {} line {}: {}",
                "?".if_supports_color(Stdout, |t| t.yellow()),
                line.line_no,
                reason,
            );
        }
    }

    let stats = &outcome.stats;
    crate::log_blank();
    log::info!(
        "{}",
        "Import complete".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!(
        "  {} {} lines: {} new, {} merged, {} missing stubs, {} skipped",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        stats.total_lines,
        stats.accepted,
        stats.merged,
        stats.missing_stubs,
        stats.skipped,
    );
    log::info!("  Database: {}", db_path.display());

    if stats.skipped > 0 {
        Ok(CommandStatus::Partial)
    } else {
        Ok(CommandStatus::Full)
    }
}
