//! Gap reporting: diff a reference list against the record store.
//!
//! Read-only over catalog entries. Each reference title is classified as
//! Present, Missing, or Ambiguous; ambiguous matches go to the review queue
//! for a human to resolve — they are never auto-resolved.

use rusqlite::Connection;
use serde::Serialize;
use shelfgap_catalog::line_parser::{ParsedLine, parse_list};
use shelfgap_catalog::normalize::{title_key, titles_match};
use shelfgap_catalog::types::*;
use shelfgap_db::{operations, queries};

use crate::list_import::ImportError;

/// How a reference entry matched a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    Fuzzy,
}

/// Classification of one reference entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GapClass {
    Present {
        entry_id: String,
        matched: MatchKind,
    },
    Missing,
    Ambiguous {
        candidates: Vec<String>,
    },
}

/// One classified reference entry.
#[derive(Debug, Clone, Serialize)]
pub struct GapItem {
    pub title: String,
    pub year: Option<i32>,
    pub class: GapClass,
}

/// Aggregate counts for a gap report.
#[derive(Debug, Default, Serialize)]
pub struct GapStats {
    pub reference_total: usize,
    pub present: usize,
    pub missing: usize,
    pub ambiguous: usize,
    /// Reference lines that could not be parsed at all.
    pub unparsed: usize,
}

/// Result of diffing a reference list against a franchise.
#[derive(Debug, Serialize)]
pub struct GapReport {
    pub franchise_id: String,
    pub stats: GapStats,
    pub items: Vec<GapItem>,
}

/// Options controlling the gap report.
#[derive(Debug, Default)]
pub struct ReportOptions {
    /// Persist ambiguous matches to the review queue.
    pub record_ambiguous: bool,
}

/// Compare a reference list against the store's view of a franchise.
///
/// For each reference entry: exact normalized-title match first, then a
/// Levenshtein fuzzy pass. Stub entries (status MissingFromStore) never
/// count as Present — the title is known, but the store doesn't hold it.
pub fn report_gaps(
    conn: &Connection,
    franchise_id: &str,
    reference_text: &str,
    options: &ReportOptions,
) -> Result<GapReport, ImportError> {
    if operations::find_franchise(conn, franchise_id)?.is_none() {
        return Err(ImportError::UnknownFranchise(franchise_id.to_string()));
    }

    // Only held entries can satisfy a reference title.
    let held: Vec<GameEntry> = queries::entries_for_franchise(conn, franchise_id)?
        .into_iter()
        .filter(|e| e.status != EntryStatus::MissingFromStore)
        .collect();

    let mut stats = GapStats::default();
    let mut items = Vec::new();

    for (_line_no, parsed) in parse_list(reference_text) {
        let line = match parsed {
            ParsedLine::Entry(line) => line,
            ParsedLine::Unrecognized { .. } => {
                stats.unparsed += 1;
                continue;
            }
            ParsedLine::Blank | ParsedLine::Heading => continue,
        };
        stats.reference_total += 1;

        let class = classify(&line.title, line.year, &held);
        match &class {
            GapClass::Present { .. } => stats.present += 1,
            GapClass::Missing => stats.missing += 1,
            GapClass::Ambiguous { candidates } => {
                stats.ambiguous += 1;
                if options.record_ambiguous {
                    let item = ReviewItem {
                        id: 0,
                        franchise_id: franchise_id.to_string(),
                        reference_title: line.title.clone(),
                        reference_year: line.year,
                        candidates: candidates.clone(),
                        resolved: false,
                        resolution: None,
                        resolved_at: None,
                        created_at: String::new(),
                    };
                    operations::insert_review_item(conn, &item)?;
                }
            }
        }

        items.push(GapItem {
            title: line.title,
            year: line.year,
            class,
        });
    }

    Ok(GapReport {
        franchise_id: franchise_id.to_string(),
        stats,
        items,
    })
}

/// Classify one reference title against the held entries.
fn classify(title: &str, year: Option<i32>, held: &[GameEntry]) -> GapClass {
    let key = title_key(title);

    // Exact normalized-title matches; disambiguate by year when several.
    let exact: Vec<&GameEntry> = held.iter().filter(|e| title_key(&e.title) == key).collect();
    match exact.len() {
        1 => {
            return GapClass::Present {
                entry_id: exact[0].id.clone(),
                matched: MatchKind::Exact,
            };
        }
        n if n > 1 => {
            let by_year: Vec<&&GameEntry> = exact
                .iter()
                .filter(|e| year.is_some() && e.release_year == year)
                .collect();
            if by_year.len() == 1 {
                return GapClass::Present {
                    entry_id: by_year[0].id.clone(),
                    matched: MatchKind::Exact,
                };
            }
            return GapClass::Ambiguous {
                candidates: exact.iter().map(|e| e.id.clone()).collect(),
            };
        }
        _ => {}
    }

    // Fuzzy fallback.
    let fuzzy: Vec<&GameEntry> = held
        .iter()
        .filter(|e| titles_match(&e.title, title))
        .collect();
    match fuzzy.len() {
        0 => GapClass::Missing,
        1 => GapClass::Present {
            entry_id: fuzzy[0].id.clone(),
            matched: MatchKind::Fuzzy,
        },
        _ => GapClass::Ambiguous {
            candidates: fuzzy.iter().map(|e| e.id.clone()).collect(),
        },
    }
}
