//! Franchise catalog data model, list-line parsing, and platform vocabulary.
//!
//! This crate defines the persistent data model for the franchise catalog
//! without any database dependencies. Consumers can use these types directly
//! for parsing and display, or pass them to `shelfgap-db` for persistence.

pub mod line_parser;
pub mod normalize;
pub mod types;
pub mod vocab;

pub use line_parser::{EntryLine, ParsedLine, parse_list, parse_list_line};
pub use normalize::{
    fuzzy_threshold, levenshtein, normalize_title, slugify, split_edition, title_key, titles_match,
};
pub use types::*;
pub use vocab::{PlatformDef, PlatformVocab, VocabError, load_defs};
