//! shelfgap CLI
//!
//! Command-line interface for maintaining franchise game catalogs:
//! importing franchise lists, summarizing coverage, and reporting gaps
//! against reference lists.

mod cli_types;
mod commands;
mod error;

use std::io::Write;

use clap::Parser;

use cli_types::{Cli, Commands, FranchiseAction, ReportAction, ReviewAction};
use commands::CommandStatus;

pub(crate) use error::CliError;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    let result = match cli.command {
        Commands::Import {
            file,
            franchise,
            vocab_dir,
        } => commands::import::run_import(file, franchise, vocab_dir, cli.db),
        Commands::Report { action } => match action {
            ReportAction::Gaps {
                franchise,
                reference,
                record,
                json,
            } => commands::gaps::run_report_gaps(franchise, reference, record, json, cli.db),
        },
        Commands::Summarize { franchise, json } => {
            commands::summarize::run_summarize(franchise, json, cli.db)
        }
        Commands::Franchise { action } => match action {
            FranchiseAction::Add {
                name,
                total,
                first_year,
            } => commands::franchise::run_franchise_add(name, total, first_year, cli.db),
            FranchiseAction::List => commands::franchise::run_franchise_list(cli.db),
            FranchiseAction::Remove {
                name,
                purge_entries,
            } => commands::franchise::run_franchise_remove(name, purge_entries, cli.db),
        },
        Commands::Lookup {
            franchise,
            query,
            limit,
        } => commands::lookup::run_lookup(franchise, query, limit, cli.db),
        Commands::Review { action } => match action {
            ReviewAction::List { limit } => commands::review::run_review_list(limit, cli.db),
            ReviewAction::Resolve { id, entry, missing } => {
                commands::review::run_review_resolve(id, entry, missing, cli.db)
            }
        },
        Commands::Stats => commands::stats::run_stats(cli.db),
        Commands::Reset { confirm } => commands::reset::run_reset(cli.db, confirm),
    };

    // Exit codes: 0 full success, 1 partial (skips or gaps), 2 fatal.
    match result {
        Ok(CommandStatus::Full) => {}
        Ok(CommandStatus::Partial) => std::process::exit(1),
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(2);
        }
    }
}

/// Configure the logger from the global flags.
///
/// Default output is bare messages at info level; `--verbose` adds
/// timestamps and debug messages; `--quiet` drops to warnings.
fn init_logging(quiet: bool, verbose: bool) {
    let level = if quiet {
        log::LevelFilter::Warn
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    if !verbose {
        builder.format(|buf, record| writeln!(buf, "{}", record.args()));
    }
    builder.init();
}

/// Emit a blank line through the logger, keeping output ordered with it.
pub(crate) fn log_blank() {
    log::info!("");
}
