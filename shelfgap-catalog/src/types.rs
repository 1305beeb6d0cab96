//! Data model types for the franchise catalog.
//!
//! These types represent the persistent catalog schema: franchises, game
//! entries, review-queue items, and import tracking.

use serde::{Deserialize, Serialize};

// ── Franchise ───────────────────────────────────────────────────────────────

/// A named grouping of related game titles (e.g., "Mario", "Halo").
#[derive(Debug, Clone)]
pub struct Franchise {
    pub id: String,
    pub name: String,
    /// Best-effort count of how many games the franchise is believed to have.
    pub estimated_total_games: Option<i64>,
    pub first_game_year: Option<i32>,
    pub created_at: String,
    pub updated_at: String,
}

// ── Game Entry ──────────────────────────────────────────────────────────────

/// One catalogued title within a franchise.
#[derive(Debug, Clone)]
pub struct GameEntry {
    pub id: String,
    pub franchise_id: String,
    pub title: String,
    pub release_year: Option<i32>,
    /// Canonical platform tags. May be empty for unknown-platform entries.
    pub platforms: Vec<String>,
    /// Weak reference to the base entry this one is an edition/variant of.
    pub edition_of: Option<String>,
    pub status: EntryStatus,
    /// Free-text provenance (e.g., "mobile; shut down 2021").
    pub source_notes: Option<String>,
    /// Optimistic-concurrency counter. 0 on a fresh struct means "no
    /// expectation"; a non-zero value is checked against the stored row.
    pub version: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Catalog status of a game entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    Confirmed,
    /// Known to exist (from a reference list or a MISSING marker) but not
    /// held as a confirmed catalog record. Filtered out of confirmed views.
    MissingFromStore,
    Cancelled,
    Disputed,
}

impl Default for EntryStatus {
    fn default() -> Self {
        Self::Confirmed
    }
}

impl EntryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::MissingFromStore => "missing",
            Self::Cancelled => "cancelled",
            Self::Disputed => "disputed",
        }
    }

    pub fn from_str_loose(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "missing" | "missing_from_store" => Self::MissingFromStore,
            "cancelled" | "canceled" => Self::Cancelled,
            "disputed" => Self::Disputed,
            _ => Self::Confirmed,
        }
    }
}

// ── Review Queue ────────────────────────────────────────────────────────────

/// An ambiguous gap-report match persisted for human resolution.
#[derive(Debug, Clone)]
pub struct ReviewItem {
    pub id: i64,
    pub franchise_id: String,
    /// Title as it appeared in the reference list.
    pub reference_title: String,
    pub reference_year: Option<i32>,
    /// Candidate entry ids, JSON-encoded in the store.
    pub candidates: Vec<String>,
    pub resolved: bool,
    /// Chosen entry id, or "missing" when resolved as absent from the store.
    pub resolution: Option<String>,
    pub resolved_at: Option<String>,
    pub created_at: String,
}

// ── Import Tracking ─────────────────────────────────────────────────────────

/// Log entry for one import run.
#[derive(Debug, Clone)]
pub struct ImportLog {
    pub id: i64,
    pub franchise_id: String,
    pub source_name: String,
    pub imported_at: String,
    pub lines_total: i64,
    pub accepted: i64,
    pub merged: i64,
    pub missing_stubs: i64,
    pub skipped: i64,
}
