use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::{CommandStatus, default_db_path};

/// Delete and recreate the catalog database.
pub(crate) fn run_reset(
    db_path: Option<PathBuf>,
    confirm: bool,
) -> Result<CommandStatus, CliError> {
    let db_path = db_path.unwrap_or_else(default_db_path);

    if !confirm {
        log::warn!(
            "This will permanently delete the catalog database at:\n  {}",
            db_path.display(),
        );
        log::info!("Re-run with --confirm to proceed:");
        log::info!("  shelfgap reset --confirm");
        return Ok(CommandStatus::Full);
    }

    if !db_path.exists() {
        log::info!("No catalog database found at {}", db_path.display());
        log::info!("Nothing to reset.");
        return Ok(CommandStatus::Full);
    }

    std::fs::remove_file(&db_path)
        .map_err(|e| CliError::other(format!("Failed to delete {}: {}", db_path.display(), e)))?;
    // WAL sidecar files, if present.
    for suffix in ["-wal", "-shm"] {
        let mut sidecar = db_path.as_os_str().to_owned();
        sidecar.push(suffix);
        let _ = std::fs::remove_file(PathBuf::from(sidecar));
    }

    log::info!(
        "{}",
        "Catalog database deleted.".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Path: {}", db_path.display());
    crate::log_blank();
    log::info!("Run 'shelfgap import <file> --franchise <name>' to rebuild.");

    Ok(CommandStatus::Full)
}
