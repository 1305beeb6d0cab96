//! Import franchise-list lines into the catalog database.
//!
//! Each line is parsed, normalized, and de-duplicated against the store:
//! the same title on a different platform merges into the existing entry
//! instead of creating a duplicate. Parse failures are collected per line,
//! never raised — a batch always runs to completion.

use rusqlite::Connection;
use shelfgap_catalog::line_parser::{EntryLine, ParsedLine, parse_list};
use shelfgap_catalog::normalize::{slugify, split_edition, title_key};
use shelfgap_catalog::types::*;
use shelfgap_catalog::vocab::PlatformVocab;
use shelfgap_db::operations::{self, OperationError};
use shelfgap_db::queries;
use thiserror::Error;

use crate::progress::ImportProgress;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Unknown franchise: {0}")]
    UnknownFranchise(String),
}

/// What happened to one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// A new confirmed entry was created.
    Accepted { entry_id: String },
    /// The line was folded into an existing entry.
    Merged { entry_id: String },
    /// A new missing-from-store stub was created.
    MissingStub { entry_id: String },
    /// Nothing extractable; the batch continued without it.
    Skipped { reason: String },
}

/// Per-line import result, tagged with the 1-based source line number.
#[derive(Debug, Clone)]
pub struct LineResult {
    pub line_no: usize,
    pub outcome: LineOutcome,
}

/// Aggregate statistics from a single list import.
#[derive(Debug, Default)]
pub struct ImportStats {
    pub total_lines: u64,
    pub accepted: u64,
    pub merged: u64,
    pub missing_stubs: u64,
    pub skipped: u64,
}

/// Full result of an import run.
#[derive(Debug)]
pub struct ImportOutcome {
    pub stats: ImportStats,
    pub lines: Vec<LineResult>,
}

/// Import a franchise list into the catalog database.
///
/// The whole batch runs in one transaction. Per-line failures become
/// [`LineOutcome::Skipped`] results; only database-level failures abort.
///
/// The optional `progress` callback is invoked after each line.
pub fn import_list(
    conn: &Connection,
    franchise_id: &str,
    text: &str,
    vocab: &PlatformVocab,
    progress: Option<&dyn ImportProgress>,
) -> Result<ImportOutcome, ImportError> {
    let franchise_exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM franchises WHERE id = ?1)",
        [franchise_id],
        |row| row.get(0),
    )?;
    if !franchise_exists {
        return Err(ImportError::UnknownFranchise(franchise_id.to_string()));
    }

    let parsed = parse_list(text);
    let total = parsed.len();

    let mut stats = ImportStats::default();
    stats.total_lines = total as u64;
    let mut lines = Vec::with_capacity(total);

    // Entry id of the most recent top-level line; indented sub-bullets
    // attach to it as edition variants.
    let mut last_top_level: Option<String> = None;

    let tx = conn.unchecked_transaction()?;

    for (i, (line_no, item)) in parsed.into_iter().enumerate() {
        let outcome = match item {
            ParsedLine::Entry(line) => {
                if let Some(p) = progress {
                    p.on_line(i + 1, total, &line.title);
                }
                import_line(&tx, franchise_id, &line, vocab, &mut last_top_level)?
            }
            ParsedLine::Unrecognized { reason } => LineOutcome::Skipped { reason },
            // parse_list drops structural lines before we get here.
            ParsedLine::Blank | ParsedLine::Heading => continue,
        };

        match &outcome {
            LineOutcome::Accepted { .. } => stats.accepted += 1,
            LineOutcome::Merged { .. } => stats.merged += 1,
            LineOutcome::MissingStub { .. } => stats.missing_stubs += 1,
            LineOutcome::Skipped { reason } => {
                log::debug!("line {line_no}: skipped ({reason})");
                stats.skipped += 1;
            }
        }
        lines.push(LineResult { line_no, outcome });
    }

    tx.commit()?;

    Ok(ImportOutcome { stats, lines })
}

/// Import a single parsed entry line.
fn import_line(
    conn: &Connection,
    franchise_id: &str,
    line: &EntryLine,
    vocab: &PlatformVocab,
    last_top_level: &mut Option<String>,
) -> Result<LineOutcome, ImportError> {
    let platforms = vocab.canonical_set(&line.platforms);
    let status = if line.missing {
        EntryStatus::MissingFromStore
    } else {
        EntryStatus::Confirmed
    };

    // Merge tie-break: an existing entry with the same normalized title whose
    // release year agrees (equal, or one side unknown) absorbs this line.
    let key = title_key(&line.title);
    let candidate = queries::find_by_title(conn, franchise_id, &line.title)?
        .into_iter()
        .find(|e| title_key(&e.title) == key && years_agree(e.release_year, line.year));

    if let Some(mut existing) = candidate {
        for platform in platforms {
            if !existing.platforms.contains(&platform) {
                existing.platforms.push(platform);
            }
        }
        existing.release_year = existing.release_year.or(line.year);
        // A confirmed sighting upgrades a stub; a MISSING marker never
        // downgrades a confirmed entry.
        if existing.status == EntryStatus::MissingFromStore && !line.missing {
            existing.status = EntryStatus::Confirmed;
        }
        if existing.source_notes.is_none() {
            existing.source_notes = line.note.clone();
        }
        let entry_id = existing.id.clone();
        operations::upsert_entry(conn, &existing)?;

        if line.indent == 0 {
            *last_top_level = Some(entry_id.clone());
        }
        return Ok(LineOutcome::Merged { entry_id });
    }

    // Fresh entry. Sub-bullets hang off the previous top-level entry; a
    // recognized edition qualifier links to its base title when present.
    let edition_of = if line.indent > 0 {
        last_top_level.clone()
    } else {
        let (base_title, qualifier) = split_edition(&line.title);
        match qualifier {
            Some(_) => find_base_entry(conn, franchise_id, &base_title)?,
            None => None,
        }
    };

    let entry_id = make_entry_id(franchise_id, &line.title, line.year);
    let entry = GameEntry {
        id: entry_id.clone(),
        franchise_id: franchise_id.to_string(),
        title: line.title.clone(),
        release_year: line.year,
        platforms,
        edition_of,
        status,
        source_notes: line.note.clone(),
        version: 0,
        created_at: String::new(),
        updated_at: String::new(),
    };
    operations::upsert_entry(conn, &entry)?;

    if line.indent == 0 {
        *last_top_level = Some(entry_id.clone());
    }

    if line.missing {
        Ok(LineOutcome::MissingStub { entry_id })
    } else {
        Ok(LineOutcome::Accepted { entry_id })
    }
}

/// Find an entry matching a base title exactly (normalized key equality).
fn find_base_entry(
    conn: &Connection,
    franchise_id: &str,
    base_title: &str,
) -> Result<Option<String>, ImportError> {
    let key = title_key(base_title);
    let found = queries::find_by_title(conn, franchise_id, base_title)?
        .into_iter()
        .find(|e| title_key(&e.title) == key)
        .map(|e| e.id);
    Ok(found)
}

/// Two release years agree when equal or when either side is unknown.
fn years_agree(a: Option<i32>, b: Option<i32>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a == b,
        _ => true,
    }
}

/// Log an import run in the import_log table.
pub fn log_import(
    conn: &Connection,
    franchise_id: &str,
    source_name: &str,
    stats: &ImportStats,
) -> Result<i64, ImportError> {
    let now = chrono::Utc::now().to_rfc3339();
    let log_entry = ImportLog {
        id: 0,
        franchise_id: franchise_id.to_string(),
        source_name: source_name.to_string(),
        imported_at: now,
        lines_total: stats.total_lines as i64,
        accepted: stats.accepted as i64,
        merged: stats.merged as i64,
        missing_stubs: stats.missing_stubs as i64,
        skipped: stats.skipped as i64,
    };
    let id = operations::insert_import_log(conn, &log_entry)?;
    Ok(id)
}

// ── ID Generation ───────────────────────────────────────────────────────────

/// Generate a stable entry id from franchise, title, and year.
///
/// The year suffix keeps same-named games of different years (remakes,
/// reboots) distinct: `mario:super-mario-bros:1985`.
pub fn make_entry_id(franchise_id: &str, title: &str, year: Option<i32>) -> String {
    let slug = slugify(title);
    match year {
        Some(y) => format!("{franchise_id}:{slug}:{y}"),
        None => format!("{franchise_id}:{slug}"),
    }
}
