pub(crate) mod franchise;
pub(crate) mod gaps;
pub(crate) mod import;
pub(crate) mod lookup;
pub(crate) mod reset;
pub(crate) mod review;
pub(crate) mod stats;
pub(crate) mod summarize;

use std::path::{Path, PathBuf};

use rusqlite::Connection;
use shelfgap_catalog::types::Franchise;

use crate::CliError;

/// How a command finished, for exit-code mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CommandStatus {
    /// Everything succeeded.
    Full,
    /// The command completed but some work was skipped or gaps were found.
    Partial,
}

pub(crate) fn default_db_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("shelfgap")
        .join("catalog.db")
}

/// Open (or create) the catalog database, creating parent directories.
pub(crate) fn open_db(db_path: &Path) -> Result<Connection, CliError> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    shelfgap_db::open_database(db_path)
        .map_err(|e| CliError::database(format!("Failed to open catalog database: {}", e)))
}

/// Resolve a franchise argument (name or id) to its record.
pub(crate) fn resolve_franchise(conn: &Connection, key: &str) -> Result<Franchise, CliError> {
    shelfgap_db::find_franchise(conn, key)
        .map_err(|e| CliError::database(e.to_string()))?
        .ok_or_else(|| CliError::unknown_franchise(key))
}

/// Truncate a string to a maximum width, appending "..." if needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else if max > 3 {
        format!("{}...", &s[..max - 3])
    } else {
        s[..max].to_string()
    }
}
