//! SQLite persistence layer for the franchise catalog.
//!
//! Provides schema creation, CRUD operations, and query APIs
//! backed by SQLite (via rusqlite with bundled feature).

pub mod operations;
pub mod queries;
pub mod schema;

pub use operations::{
    OperationError, delete_entry, delete_franchise, delete_franchise_entries, entry_platforms,
    find_franchise, get_entry, get_franchise, insert_import_log, insert_review_item,
    resolve_review_item, upsert_entry, upsert_franchise,
};
pub use queries::{
    Coverage, FranchiseSummary, PlatformCount, StoreStats, coverage_percent, entries_for_franchise,
    find_by_title, franchise_summary, get_review_item, list_franchises, list_import_logs,
    list_open_review_items, store_stats,
};
pub use schema::{SchemaError, open_database, open_memory};
