//! CRUD operations for franchises, entries, and the review queue.

use rusqlite::{Connection, params};
use shelfgap_catalog::types::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Entity not found: {entity_type} with id '{id}'")]
    NotFound { entity_type: String, id: String },
    #[error("Validation failed for {entity_type} '{id}': {reason}")]
    Validation {
        entity_type: String,
        id: String,
        reason: String,
    },
    #[error("Version conflict on entry '{id}': expected {expected}, found {found}")]
    Conflict { id: String, expected: i64, found: i64 },
}

impl OperationError {
    fn not_found(entity_type: &str, id: &str) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }

    fn validation(entity_type: &str, id: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
            reason: reason.into(),
        }
    }
}

// ── Franchise Operations ────────────────────────────────────────────────────

/// Insert or update a franchise.
pub fn upsert_franchise(conn: &Connection, franchise: &Franchise) -> Result<(), OperationError> {
    conn.execute(
        "INSERT INTO franchises (id, name, estimated_total_games, first_game_year)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(id) DO UPDATE SET
             name = excluded.name,
             estimated_total_games = excluded.estimated_total_games,
             first_game_year = excluded.first_game_year,
             updated_at = datetime('now')",
        params![
            franchise.id,
            franchise.name,
            franchise.estimated_total_games,
            franchise.first_game_year,
        ],
    )?;
    Ok(())
}

/// Fetch a franchise by id.
pub fn get_franchise(conn: &Connection, id: &str) -> Result<Franchise, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, estimated_total_games, first_game_year, created_at, updated_at
         FROM franchises WHERE id = ?1",
    )?;
    let result = stmt.query_row(params![id], row_to_franchise);
    match result {
        Ok(f) => Ok(f),
        Err(rusqlite::Error::QueryReturnedNoRows) => Err(OperationError::not_found("franchise", id)),
        Err(e) => Err(e.into()),
    }
}

/// Find a franchise by id or case-insensitive name.
pub fn find_franchise(conn: &Connection, key: &str) -> Result<Option<Franchise>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, estimated_total_games, first_game_year, created_at, updated_at
         FROM franchises WHERE id = ?1 OR LOWER(name) = LOWER(?1) LIMIT 1",
    )?;
    let result = stmt.query_row(params![key], row_to_franchise);
    match result {
        Ok(f) => Ok(Some(f)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Delete a franchise.
///
/// Fails with a validation error while entries still reference it — there
/// are no cascading deletes; call [`delete_franchise_entries`] first.
pub fn delete_franchise(conn: &Connection, id: &str) -> Result<(), OperationError> {
    let entry_count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM entries WHERE franchise_id = ?1",
        params![id],
        |row| row.get(0),
    )?;
    if entry_count > 0 {
        return Err(OperationError::validation(
            "franchise",
            id,
            format!("{entry_count} entries remain; delete them first"),
        ));
    }

    let changed = conn.execute("DELETE FROM franchises WHERE id = ?1", params![id])?;
    if changed == 0 {
        return Err(OperationError::not_found("franchise", id));
    }
    Ok(())
}

/// Explicitly delete all entries belonging to a franchise.
///
/// Returns the number of entries removed.
pub fn delete_franchise_entries(conn: &Connection, id: &str) -> Result<usize, OperationError> {
    // Clear intra-franchise edition references before deleting the rows.
    conn.execute(
        "UPDATE entries SET edition_of = NULL WHERE franchise_id = ?1",
        params![id],
    )?;
    conn.execute(
        "DELETE FROM entry_platforms WHERE entry_id IN
             (SELECT id FROM entries WHERE franchise_id = ?1)",
        params![id],
    )?;
    let removed = conn.execute("DELETE FROM entries WHERE franchise_id = ?1", params![id])?;
    Ok(removed)
}

// ── Entry Operations ────────────────────────────────────────────────────────

/// Insert or replace a game entry by id. Idempotent.
///
/// Validates that the franchise exists and that the `edition_of` chain stays
/// acyclic. When the caller supplies a non-zero `version`, it must match the
/// stored row or the write fails with a conflict for the caller to retry.
pub fn upsert_entry(conn: &Connection, entry: &GameEntry) -> Result<(), OperationError> {
    let franchise_exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM franchises WHERE id = ?1)",
        params![entry.franchise_id],
        |row| row.get(0),
    )?;
    if !franchise_exists {
        return Err(OperationError::validation(
            "entry",
            &entry.id,
            format!("unknown franchise '{}'", entry.franchise_id),
        ));
    }

    if let Some(ref base) = entry.edition_of {
        check_edition_cycle(conn, &entry.id, base)?;
    }

    let current: Option<i64> = match conn.query_row(
        "SELECT version FROM entries WHERE id = ?1",
        params![entry.id],
        |row| row.get(0),
    ) {
        Ok(v) => Some(v),
        Err(rusqlite::Error::QueryReturnedNoRows) => None,
        Err(e) => return Err(e.into()),
    };
    if let Some(found) = current {
        if entry.version != 0 && entry.version != found {
            return Err(OperationError::Conflict {
                id: entry.id.clone(),
                expected: entry.version,
                found,
            });
        }
    }

    conn.execute(
        "INSERT INTO entries (id, franchise_id, title, release_year, edition_of,
             status, source_notes, version)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 1)
         ON CONFLICT(id) DO UPDATE SET
             franchise_id = excluded.franchise_id,
             title = excluded.title,
             release_year = excluded.release_year,
             edition_of = excluded.edition_of,
             status = excluded.status,
             source_notes = excluded.source_notes,
             version = entries.version + 1,
             updated_at = datetime('now')",
        params![
            entry.id,
            entry.franchise_id,
            entry.title,
            entry.release_year,
            entry.edition_of,
            entry.status.as_str(),
            entry.source_notes,
        ],
    )?;

    // Replace the platform set.
    conn.execute(
        "DELETE FROM entry_platforms WHERE entry_id = ?1",
        params![entry.id],
    )?;
    for platform in &entry.platforms {
        conn.execute(
            "INSERT OR IGNORE INTO entry_platforms (entry_id, platform) VALUES (?1, ?2)",
            params![entry.id, platform],
        )?;
    }

    Ok(())
}

/// Walk the `edition_of` chain from `base`, rejecting a link that would
/// lead back to `entry_id`.
fn check_edition_cycle(
    conn: &Connection,
    entry_id: &str,
    base: &str,
) -> Result<(), OperationError> {
    let mut current = base.to_string();
    // Depth guard against pre-existing corruption.
    for _ in 0..64 {
        if current == entry_id {
            return Err(OperationError::validation(
                "entry",
                entry_id,
                format!("edition_of chain through '{base}' forms a cycle"),
            ));
        }
        let next: Option<Option<String>> = match conn.query_row(
            "SELECT edition_of FROM entries WHERE id = ?1",
            params![current],
            |row| row.get(0),
        ) {
            Ok(v) => Some(v),
            Err(rusqlite::Error::QueryReturnedNoRows) => None,
            Err(e) => return Err(e.into()),
        };
        match next {
            Some(Some(n)) => current = n,
            _ => return Ok(()),
        }
    }
    Err(OperationError::validation(
        "entry",
        entry_id,
        "edition_of chain exceeds maximum depth",
    ))
}

/// Fetch an entry (including its platform set) by id.
pub fn get_entry(conn: &Connection, id: &str) -> Result<GameEntry, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, franchise_id, title, release_year, edition_of, status,
                source_notes, version, created_at, updated_at
         FROM entries WHERE id = ?1",
    )?;
    let result = stmt.query_row(params![id], row_to_entry);
    let mut entry = match result {
        Ok(e) => e,
        Err(rusqlite::Error::QueryReturnedNoRows) => {
            return Err(OperationError::not_found("entry", id));
        }
        Err(e) => return Err(e.into()),
    };
    entry.platforms = entry_platforms(conn, id)?;
    Ok(entry)
}

/// Delete an entry by id.
///
/// `edition_of` pointers referencing it are cleared (weak references carry
/// no ownership); no other entry data is touched.
pub fn delete_entry(conn: &Connection, id: &str) -> Result<(), OperationError> {
    conn.execute(
        "UPDATE entries SET edition_of = NULL WHERE edition_of = ?1",
        params![id],
    )?;
    conn.execute(
        "DELETE FROM entry_platforms WHERE entry_id = ?1",
        params![id],
    )?;
    let changed = conn.execute("DELETE FROM entries WHERE id = ?1", params![id])?;
    if changed == 0 {
        return Err(OperationError::not_found("entry", id));
    }
    Ok(())
}

/// Load the platform set for an entry, in insertion order.
pub fn entry_platforms(conn: &Connection, entry_id: &str) -> Result<Vec<String>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT platform FROM entry_platforms WHERE entry_id = ?1 ORDER BY rowid",
    )?;
    let rows = stmt.query_map(params![entry_id], |row| row.get::<_, String>(0))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Review Queue Operations ─────────────────────────────────────────────────

/// Insert a review item for an ambiguous reference match. Returns its id.
pub fn insert_review_item(conn: &Connection, item: &ReviewItem) -> Result<i64, OperationError> {
    let candidates = serde_json::to_string(&item.candidates)
        .map_err(|e| OperationError::validation("review_item", "new", e.to_string()))?;
    conn.execute(
        "INSERT INTO review_items (franchise_id, reference_title, reference_year, candidates)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            item.franchise_id,
            item.reference_title,
            item.reference_year,
            candidates,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Resolve a review item with a chosen entry id or the literal "missing".
pub fn resolve_review_item(
    conn: &Connection,
    id: i64,
    resolution: &str,
) -> Result<(), OperationError> {
    let changed = conn.execute(
        "UPDATE review_items SET resolved = 1, resolution = ?2, resolved_at = datetime('now')
         WHERE id = ?1",
        params![id, resolution],
    )?;
    if changed == 0 {
        return Err(OperationError::not_found("review_item", &id.to_string()));
    }
    Ok(())
}

// ── Import Log Operations ───────────────────────────────────────────────────

/// Insert an import log entry. Returns the generated id.
pub fn insert_import_log(conn: &Connection, log: &ImportLog) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO import_log (franchise_id, source_name, imported_at,
             lines_total, accepted, merged, missing_stubs, skipped)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            log.franchise_id,
            log.source_name,
            log.imported_at,
            log.lines_total,
            log.accepted,
            log.merged,
            log.missing_stubs,
            log.skipped,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

// ── Row Mapping Helpers ─────────────────────────────────────────────────────

fn row_to_franchise(row: &rusqlite::Row<'_>) -> rusqlite::Result<Franchise> {
    Ok(Franchise {
        id: row.get(0)?,
        name: row.get(1)?,
        estimated_total_games: row.get(2)?,
        first_game_year: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

pub(crate) fn row_to_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<GameEntry> {
    let status_str: String = row.get(5)?;
    Ok(GameEntry {
        id: row.get(0)?,
        franchise_id: row.get(1)?,
        title: row.get(2)?,
        release_year: row.get(3)?,
        platforms: Vec::new(),
        edition_of: row.get(4)?,
        status: EntryStatus::from_str_loose(&status_str),
        source_notes: row.get(6)?,
        version: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}
