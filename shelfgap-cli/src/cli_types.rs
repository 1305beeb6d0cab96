//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "shelfgap")]
#[command(about = "Track franchise game catalogs and find the gaps", long_about = None)]
pub(crate) struct Cli {
    /// Path to the catalog database file (default: ~/.cache/shelfgap/catalog.db)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Import a franchise list file into the catalog
    Import {
        /// Path to the markdown franchise list
        file: PathBuf,

        /// Franchise name or id (created on first use)
        #[arg(long)]
        franchise: String,

        /// Directory of extra platform-vocabulary YAML files
        #[arg(long)]
        vocab_dir: Option<PathBuf>,
    },

    /// Compare the catalog against reference lists
    Report {
        #[command(subcommand)]
        action: ReportAction,
    },

    /// Show counts, platform breakdown, and coverage for a franchise
    Summarize {
        /// Franchise name or id
        franchise: String,

        /// Emit the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage franchises
    Franchise {
        #[command(subcommand)]
        action: FranchiseAction,
    },

    /// Search entries in a franchise by title
    Lookup {
        /// Franchise name or id
        franchise: String,

        /// Title query (substring or near-match)
        query: String,

        /// Maximum number of results
        #[arg(long, default_value = "25")]
        limit: usize,
    },

    /// Manage the review queue of ambiguous matches
    Review {
        #[command(subcommand)]
        action: ReviewAction,
    },

    /// Show catalog database statistics
    Stats,

    /// Delete and recreate the catalog database
    Reset {
        /// Confirm database deletion (required)
        #[arg(long)]
        confirm: bool,
    },
}

#[derive(Subcommand)]
pub(crate) enum ReportAction {
    /// Classify each reference entry as present, missing, or ambiguous
    Gaps {
        /// Franchise name or id
        franchise: String,

        /// Reference list file to compare against
        #[arg(long)]
        reference: PathBuf,

        /// Persist ambiguous matches to the review queue
        #[arg(long)]
        record: bool,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub(crate) enum FranchiseAction {
    /// Add or update a franchise
    Add {
        /// Display name (the id is derived as a slug)
        name: String,

        /// Best-effort total number of games in the franchise
        #[arg(long)]
        total: Option<i64>,

        /// Year of the first game
        #[arg(long)]
        first_year: Option<i32>,
    },

    /// List all franchises
    List,

    /// Remove a franchise
    Remove {
        /// Franchise name or id
        name: String,

        /// Also delete the franchise's entries (required while any exist)
        #[arg(long)]
        purge_entries: bool,
    },
}

#[derive(Subcommand)]
pub(crate) enum ReviewAction {
    /// List unresolved review items
    List {
        /// Maximum number of items to show
        #[arg(long, default_value = "50")]
        limit: u32,
    },

    /// Resolve a review item
    Resolve {
        /// Review item id
        id: i64,

        /// Entry id the reference title actually refers to
        #[arg(long, group = "choice")]
        entry: Option<String>,

        /// The reference title is genuinely missing from the store
        #[arg(long, group = "choice")]
        missing: bool,
    },
}
