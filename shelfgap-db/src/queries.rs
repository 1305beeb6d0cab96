//! Read queries for the catalog database.
//!
//! The franchise index lives here: it is recomputed on demand from the
//! record store rather than persisted, so there is never a second source
//! of truth to drift.

use rusqlite::{Connection, params};
use serde::Serialize;
use shelfgap_catalog::normalize::titles_match;
use shelfgap_catalog::types::*;

use crate::operations::{self, OperationError, row_to_entry};

// ── Entry Lookups ───────────────────────────────────────────────────────────

/// List all entries for a franchise, in insertion order.
pub fn entries_for_franchise(
    conn: &Connection,
    franchise_id: &str,
) -> Result<Vec<GameEntry>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, franchise_id, title, release_year, edition_of, status,
                source_notes, version, created_at, updated_at
         FROM entries WHERE franchise_id = ?1 ORDER BY rowid",
    )?;
    let rows = stmt.query_map(params![franchise_id], row_to_entry)?;
    let mut entries = rows.collect::<Result<Vec<_>, _>>()?;
    for entry in &mut entries {
        entry.platforms = operations::entry_platforms(conn, &entry.id)?;
    }
    Ok(entries)
}

/// Find entries in a franchise matching a title query.
///
/// Combines a case-insensitive substring match with a Levenshtein fuzzy
/// pass, so both "mario kart" and a near-typo of the full title find their
/// entry. Used for de-duplication during import and for `lookup`.
pub fn find_by_title(
    conn: &Connection,
    franchise_id: &str,
    query: &str,
) -> Result<Vec<GameEntry>, OperationError> {
    let pattern = format!("%{}%", query.trim());
    let mut stmt = conn.prepare(
        "SELECT id, franchise_id, title, release_year, edition_of, status,
                source_notes, version, created_at, updated_at
         FROM entries WHERE franchise_id = ?1 AND title LIKE ?2 ORDER BY title",
    )?;
    let rows = stmt.query_map(params![franchise_id, pattern], row_to_entry)?;
    let mut matches = rows.collect::<Result<Vec<_>, _>>()?;

    // Fuzzy pass over the rest of the franchise for near-miss titles.
    let seen: Vec<String> = matches.iter().map(|e| e.id.clone()).collect();
    for entry in entries_for_franchise(conn, franchise_id)? {
        if !seen.contains(&entry.id) && titles_match(&entry.title, query) {
            matches.push(entry);
        }
    }

    for entry in &mut matches {
        if entry.platforms.is_empty() {
            entry.platforms = operations::entry_platforms(conn, &entry.id)?;
        }
    }
    Ok(matches)
}

// ── Franchise Index ─────────────────────────────────────────────────────────

/// Coverage of a franchise: the fraction of known titles that are confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Coverage {
    Percent(f64),
    /// No confirmed and no missing entries — nothing to measure yet.
    InsufficientData,
}

impl std::fmt::Display for Coverage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Percent(p) => write!(f, "{p:.1}%"),
            Self::InsufficientData => write!(f, "insufficient data"),
        }
    }
}

/// Compute coverage from confirmed and missing counts.
///
/// 100% when nothing is missing and something is confirmed; insufficient
/// data (not zero, not an error) when both counts are zero.
pub fn coverage_percent(confirmed: i64, missing: i64) -> Coverage {
    if confirmed == 0 && missing == 0 {
        return Coverage::InsufficientData;
    }
    if missing == 0 {
        return Coverage::Percent(100.0);
    }
    Coverage::Percent(confirmed as f64 / (confirmed + missing) as f64 * 100.0)
}

/// Per-franchise summary: counts by status, platform breakdown, coverage.
#[derive(Debug, Serialize)]
pub struct FranchiseSummary {
    pub franchise_id: String,
    pub franchise_name: String,
    pub estimated_total_games: Option<i64>,
    pub confirmed: i64,
    pub missing: i64,
    pub cancelled: i64,
    pub disputed: i64,
    pub coverage: Coverage,
    /// Confirmed-entry counts per canonical platform tag.
    pub platforms: Vec<PlatformCount>,
}

#[derive(Debug, Serialize)]
pub struct PlatformCount {
    pub platform: String,
    pub confirmed: i64,
}

/// Summarize a franchise. Fails with NotFound when the franchise is unknown.
pub fn franchise_summary(
    conn: &Connection,
    franchise_id: &str,
) -> Result<FranchiseSummary, OperationError> {
    let franchise = operations::get_franchise(conn, franchise_id)?;

    let mut stmt = conn.prepare(
        "SELECT status, COUNT(*) FROM entries WHERE franchise_id = ?1 GROUP BY status",
    )?;
    let rows = stmt.query_map(params![franchise_id], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
    })?;

    let mut confirmed = 0i64;
    let mut missing = 0i64;
    let mut cancelled = 0i64;
    let mut disputed = 0i64;
    for row in rows {
        let (status, count) = row?;
        match EntryStatus::from_str_loose(&status) {
            EntryStatus::Confirmed => confirmed = count,
            EntryStatus::MissingFromStore => missing = count,
            EntryStatus::Cancelled => cancelled = count,
            EntryStatus::Disputed => disputed = count,
        }
    }

    let mut stmt = conn.prepare(
        "SELECT p.platform, COUNT(*) FROM entry_platforms p
         JOIN entries e ON e.id = p.entry_id
         WHERE e.franchise_id = ?1 AND e.status = 'confirmed'
         GROUP BY p.platform ORDER BY COUNT(*) DESC, p.platform",
    )?;
    let rows = stmt.query_map(params![franchise_id], |row| {
        Ok(PlatformCount {
            platform: row.get(0)?,
            confirmed: row.get(1)?,
        })
    })?;
    let platforms = rows.collect::<Result<Vec<_>, _>>()?;

    Ok(FranchiseSummary {
        franchise_id: franchise.id,
        franchise_name: franchise.name,
        estimated_total_games: franchise.estimated_total_games,
        confirmed,
        missing,
        cancelled,
        disputed,
        coverage: coverage_percent(confirmed, missing),
        platforms,
    })
}

/// List all franchises ordered by name.
pub fn list_franchises(conn: &Connection) -> Result<Vec<Franchise>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, estimated_total_games, first_game_year, created_at, updated_at
         FROM franchises ORDER BY name",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(Franchise {
            id: row.get(0)?,
            name: row.get(1)?,
            estimated_total_games: row.get(2)?,
            first_game_year: row.get(3)?,
            created_at: row.get(4)?,
            updated_at: row.get(5)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Get overall store statistics.
pub fn store_stats(conn: &Connection) -> Result<StoreStats, OperationError> {
    let franchises: i64 = conn.query_row("SELECT COUNT(*) FROM franchises", [], |r| r.get(0))?;
    let entries: i64 = conn.query_row("SELECT COUNT(*) FROM entries", [], |r| r.get(0))?;
    let confirmed: i64 = conn.query_row(
        "SELECT COUNT(*) FROM entries WHERE status = 'confirmed'",
        [],
        |r| r.get(0),
    )?;
    let missing: i64 = conn.query_row(
        "SELECT COUNT(*) FROM entries WHERE status = 'missing'",
        [],
        |r| r.get(0),
    )?;
    let platforms: i64 = conn.query_row(
        "SELECT COUNT(DISTINCT platform) FROM entry_platforms",
        [],
        |r| r.get(0),
    )?;
    let open_reviews: i64 = conn.query_row(
        "SELECT COUNT(*) FROM review_items WHERE resolved = 0",
        [],
        |r| r.get(0),
    )?;
    let imports: i64 = conn.query_row("SELECT COUNT(*) FROM import_log", [], |r| r.get(0))?;

    Ok(StoreStats {
        franchises,
        entries,
        confirmed,
        missing,
        platforms,
        open_reviews,
        imports,
    })
}

/// Summary statistics for the store.
#[derive(Debug, Serialize)]
pub struct StoreStats {
    pub franchises: i64,
    pub entries: i64,
    pub confirmed: i64,
    pub missing: i64,
    pub platforms: i64,
    pub open_reviews: i64,
    pub imports: i64,
}

// ── Review Queue Queries ────────────────────────────────────────────────────

/// List unresolved review items, newest first.
pub fn list_open_review_items(
    conn: &Connection,
    limit: Option<u32>,
) -> Result<Vec<ReviewItem>, OperationError> {
    let limit = limit.unwrap_or(50);
    let mut stmt = conn.prepare(&format!(
        "SELECT id, franchise_id, reference_title, reference_year, candidates,
                resolved, resolution, resolved_at, created_at
         FROM review_items WHERE resolved = 0
         ORDER BY created_at DESC, id DESC LIMIT {limit}"
    ))?;
    let rows = stmt.query_map([], row_to_review_item)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Fetch one review item by id.
pub fn get_review_item(conn: &Connection, id: i64) -> Result<Option<ReviewItem>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, franchise_id, reference_title, reference_year, candidates,
                resolved, resolution, resolved_at, created_at
         FROM review_items WHERE id = ?1",
    )?;
    let result = stmt.query_row(params![id], row_to_review_item);
    match result {
        Ok(item) => Ok(Some(item)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

// ── Import Log Queries ──────────────────────────────────────────────────────

/// List recent import logs.
pub fn list_import_logs(
    conn: &Connection,
    limit: Option<u32>,
) -> Result<Vec<ImportLog>, OperationError> {
    let limit = limit.unwrap_or(20);
    let mut stmt = conn.prepare(&format!(
        "SELECT id, franchise_id, source_name, imported_at,
                lines_total, accepted, merged, missing_stubs, skipped
         FROM import_log ORDER BY imported_at DESC LIMIT {limit}"
    ))?;
    let rows = stmt.query_map([], |row| {
        Ok(ImportLog {
            id: row.get(0)?,
            franchise_id: row.get(1)?,
            source_name: row.get(2)?,
            imported_at: row.get(3)?,
            lines_total: row.get(4)?,
            accepted: row.get(5)?,
            merged: row.get(6)?,
            missing_stubs: row.get(7)?,
            skipped: row.get(8)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Row Mapping Helpers ─────────────────────────────────────────────────────

fn row_to_review_item(row: &rusqlite::Row<'_>) -> rusqlite::Result<ReviewItem> {
    let candidates_json: String = row.get(4)?;
    Ok(ReviewItem {
        id: row.get(0)?,
        franchise_id: row.get(1)?,
        reference_title: row.get(2)?,
        reference_year: row.get(3)?,
        candidates: serde_json::from_str(&candidates_json).unwrap_or_default(),
        resolved: row.get(5)?,
        resolution: row.get(6)?,
        resolved_at: row.get(7)?,
        created_at: row.get(8)?,
    })
}
