//! Import franchise lists and diff reference lists against the catalog.
//!
//! This crate owns all ETL logic: parsing list lines into catalog entries,
//! merging duplicates across platforms, recording import runs, and the
//! read-only gap reporter.

pub mod list_import;
pub mod progress;
pub mod report;

pub use list_import::{
    ImportError, ImportOutcome, ImportStats, LineOutcome, LineResult, import_list, log_import,
    make_entry_id,
};
pub use progress::{ImportProgress, LogProgress, SilentProgress};
pub use report::{
    GapClass, GapItem, GapReport, GapStats, MatchKind, ReportOptions, report_gaps,
};
